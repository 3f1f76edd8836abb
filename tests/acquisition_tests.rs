//! Integration tests for the acquisition loop driven through mock hardware.

use meterpanel::hal::{MockDisplay, MockLink};
use meterpanel::{AcquisitionLoop, Config, GaugeId, LinkState, Panel, SyntheticTelemetry};

fn new_loop(link: MockLink) -> AcquisitionLoop<MockLink, MockDisplay> {
    let config = Config::default();
    let panel = Panel::from_config(&config.gauges).unwrap();
    AcquisitionLoop::with_link(link, panel, MockDisplay::new(), &config.panel)
}

#[test]
fn full_session_with_dropout_and_recovery() {
    let mut link = MockLink::new();
    link.queue_lines(&[
        "512,20.5,45.0,21.0,50.0", // full reading
        "-1,nan,60.0,nan,nan",     // mostly dropped out
        "256,19.0,44.0,20.0,49.5", // recovered
    ]);
    let mut acq = new_loop(link);

    assert_eq!(acq.start().unwrap(), LinkState::Connected);

    // Cycle 1: everything lands.
    acq.tick().unwrap();
    assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
    assert!(!acq.panel().temp_a().data_missing());

    // Cycle 2: four fields drop out; their gauges flag but keep values.
    acq.tick().unwrap();
    assert!(acq.panel().potentiometer().data_missing());
    assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
    assert!(acq.panel().temp_a().data_missing());
    assert_eq!(acq.panel().temp_a().last_value(), Some(20.5));
    assert!(!acq.panel().humidity_a().data_missing());
    assert_eq!(acq.panel().humidity_a().last_value(), Some(60.0));

    // Cycle 3: everything recovers.
    acq.tick().unwrap();
    assert!(!acq.panel().potentiometer().data_missing());
    assert_eq!(acq.panel().potentiometer().last_value(), Some(256));
    assert_eq!(acq.panel().temp_b().last_value(), Some(20.0));

    let stats = acq.stats();
    assert_eq!(stats.telegrams, 3);
    assert_eq!(stats.decode_failures, 0);

    // Teardown hands the display back with its full call record.
    let display = acq.shutdown();
    assert_eq!(display.render_calls(), 20);
}

#[test]
fn render_payloads_reach_the_display() {
    let mut link = MockLink::new();
    link.queue_line("256,25.0,50.0,25.0,50.0");
    let mut acq = new_loop(link);
    acq.start().unwrap();
    acq.tick().unwrap();

    let display = acq.display();

    // Boot push plus one dispatch.
    assert_eq!(display.pointer_updates.len(), 2);
    assert_eq!(display.fill_updates.len(), 8);

    let (id, pointer) = &display.pointer_updates[1];
    assert_eq!(*id, GaugeId::Potentiometer);
    assert_eq!(pointer.raw.as_str(), "0256");
    assert_eq!(pointer.derived.as_str(), "1.25V");
    assert!(!pointer.data_missing);

    // temp_a has domain [-10, 60]: 25.0 normalizes to 0.5, plus the stub.
    let (id, fill) = &display.fill_updates[4];
    assert_eq!(*id, GaugeId::TempA);
    assert!((fill.extent - 0.65).abs() < 1e-6);
    assert_eq!(fill.raw.as_str(), "25.0");
}

#[test]
fn faulted_loop_never_reads_or_renders_data() {
    let mut link = MockLink::failing();
    // Even with telegrams waiting, a faulted loop must not touch them.
    link.queue_line("512,20.5,45.0,21.0,50.0");
    let mut acq = new_loop(link);

    assert_eq!(acq.start().unwrap(), LinkState::Faulted);
    let boot_renders = acq.display().render_calls();

    for _ in 0..6 {
        acq.tick().unwrap();
    }

    assert_eq!(acq.state(), LinkState::Faulted);
    assert_eq!(acq.stats().telegrams, 0);
    assert_eq!(acq.stats().decode_failures, 0);
    assert_eq!(acq.link().unwrap().read_calls, 0);
    assert_eq!(acq.link().unwrap().pending(), 1);
    assert_eq!(acq.display().render_calls(), boot_renders);

    // The indicator blinks with every cycle.
    assert_eq!(
        acq.display().link_error_states,
        vec![true, false, true, false, true, false]
    );
}

#[test]
fn malformed_stream_is_survived() {
    let mut link = MockLink::new();
    link.queue_lines(&[
        "garbage",
        "1,2,3",
        "abc,1.0,2.0,3.0,4.0",
        "512,20.5,45.0,21.0,50.0",
    ]);
    let mut acq = new_loop(link);
    acq.start().unwrap();

    for _ in 0..4 {
        acq.tick().unwrap();
    }

    let stats = acq.stats();
    assert_eq!(stats.state, LinkState::Connected);
    assert_eq!(stats.decode_failures, 3);
    assert_eq!(stats.telegrams, 1);
    assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
}

#[test]
fn gauges_hold_state_across_dropped_cycles() {
    let mut link = MockLink::new();
    link.queue_lines(&["512,20.5,45.0,21.0,50.0", "not,a,telegram"]);
    let mut acq = new_loop(link);
    acq.start().unwrap();

    acq.tick().unwrap();
    let renders_after_good_cycle = acq.display().render_calls();

    acq.tick().unwrap();

    // The dropped cycle produced no render calls and changed no gauge.
    assert_eq!(acq.display().render_calls(), renders_after_good_cycle);
    assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
    assert!(!acq.panel().potentiometer().data_missing());
}

#[test]
fn synthetic_mode_drives_all_gauges_without_a_link() {
    let config = Config::default().with_panel(
        meterpanel::PanelConfig::default().with_synthetic(true),
    );
    let panel = Panel::from_config(&config.gauges).unwrap();
    let mut acq = AcquisitionLoop::<MockLink, _>::with_synthetic(
        SyntheticTelemetry::new(),
        panel,
        MockDisplay::new(),
        &config.panel,
    );

    assert_eq!(acq.start().unwrap(), LinkState::Connected);
    for _ in 0..5 {
        acq.tick().unwrap();
    }

    let stats = acq.stats();
    assert_eq!(stats.telegrams, 5);
    assert_eq!(stats.decode_failures, 0);
    assert!(acq.link().is_none());

    // Every gauge saw data.
    assert!(!acq.panel().potentiometer().data_missing());
    assert!(!acq.panel().temp_a().data_missing());
    assert!(!acq.panel().humidity_a().data_missing());
    assert!(!acq.panel().temp_b().data_missing());
    assert!(!acq.panel().humidity_b().data_missing());

    // And the values are plausible.
    let pot = acq.panel().potentiometer().last_value().unwrap();
    assert!((0..1023).contains(&pot));
    let hum = acq.panel().humidity_b().last_value().unwrap();
    assert!((0.0..100.0).contains(&hum));
}

#[test]
fn boot_placeholders_are_rendered_before_any_telegram() {
    let mut acq = new_loop(MockLink::new());
    acq.start().unwrap();

    let display = acq.display();
    assert_eq!(display.pointer_updates.len(), 1);
    assert_eq!(display.fill_updates.len(), 4);

    let pointer = &display.pointer_updates[0].1;
    assert!(pointer.data_missing);
    assert_eq!(pointer.raw.as_str(), "0000");
    assert_eq!(pointer.derived.as_str(), "0.00V");

    for (_, fill) in &display.fill_updates {
        assert!(fill.data_missing);
        assert_eq!(fill.raw.as_str(), "00.0");
        assert!((fill.extent - 0.15).abs() < 1e-6);
    }
}
