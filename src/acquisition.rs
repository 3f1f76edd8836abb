//! The acquisition loop: the single coordinating process.
//!
//! One loop body pulls telegrams from the link (or fabricates synthetic
//! ones), decodes them, and drives every gauge's update, independent of
//! how many fields fail. All mutable state lives in owned fields of
//! [`AcquisitionLoop`]; nothing is shared and nothing is locked.
//!
//! # State machine
//!
//! | State | Entered | Behavior per cycle |
//! |-------|---------|--------------------|
//! | `Disconnected` | at construction | nothing (start not called) |
//! | `Connected` | `connect` succeeded, or synthetic mode | read → decode → dispatch |
//! | `Faulted` | `connect` failed | blink the link-error indicator |
//!
//! `Faulted` is permanent: the loop never retries the connection within
//! the process lifetime. Decode failures are *not* transitions: the
//! malformed reading is dropped and the loop keeps going.
//!
//! # Example
//!
//! ```rust
//! use meterpanel::acquisition::{AcquisitionLoop, LinkState};
//! use meterpanel::config::Config;
//! use meterpanel::hal::{MockDisplay, MockLink};
//! use meterpanel::panel::Panel;
//!
//! let config = Config::default();
//! let panel = Panel::from_config(&config.gauges).unwrap();
//!
//! let mut link = MockLink::new();
//! link.queue_line("512,20.5,45.0,21.0,50.0");
//!
//! let mut acq = AcquisitionLoop::with_link(link, panel, MockDisplay::new(), &config.panel);
//! assert_eq!(acq.start().unwrap(), LinkState::Connected);
//! acq.tick().unwrap();
//! assert_eq!(acq.stats().telegrams, 1);
//! ```

use core::fmt::Debug;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::config::PanelConfig;
use crate::panel::Panel;
use crate::synthetic::SyntheticTelemetry;
use crate::telegram::decode;
use crate::traits::{PanelDisplay, TelemetryLink};

/// Lifecycle state of the telemetry link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LinkState {
    /// Boot state; `start` has not run yet.
    Disconnected,
    /// The link is up (or synthetic mode is active); telegrams flow.
    Connected,
    /// The one-shot connect failed. Permanent for the process lifetime.
    Faulted,
}

/// Counters and state snapshot for tests, logging, and UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopStats {
    /// Current link state.
    pub state: LinkState,
    /// Readings successfully dispatched to the panel.
    pub telegrams: u64,
    /// Telegrams dropped because they failed to decode.
    pub decode_failures: u64,
    /// Whether the link-error indicator is currently shown.
    pub link_error_visible: bool,
}

/// Where readings come from: the real link or the synthetic generator.
/// Selected once at construction; the modes are mutually exclusive.
enum Source<L> {
    Link(L),
    Synthetic(SyntheticTelemetry),
}

/// The coordinating loop object.
///
/// Owns the data source, the five-gauge [`Panel`], and the display seam.
/// Single-threaded and cooperative: `run` blocks waiting for data in link
/// mode and sleeps fixed intervals in synthetic/faulted mode.
pub struct AcquisitionLoop<L: TelemetryLink, D: PanelDisplay> {
    source: Source<L>,
    panel: Panel,
    display: D,
    state: LinkState,
    link_error_visible: bool,
    telegrams: u64,
    decode_failures: u64,
    fault_blink_ms: u32,
    synthetic_interval_ms: u32,
}

impl<L, D> AcquisitionLoop<L, D>
where
    L: TelemetryLink,
    L::Error: Debug,
    D: PanelDisplay,
{
    /// Creates a loop that reads real telegrams from `link`.
    pub fn with_link(link: L, panel: Panel, display: D, config: &PanelConfig) -> Self {
        Self::new(Source::Link(link), panel, display, config)
    }

    /// Creates a loop fed by the synthetic generator; the link is never
    /// touched in this mode.
    pub fn with_synthetic(
        source: SyntheticTelemetry,
        panel: Panel,
        display: D,
        config: &PanelConfig,
    ) -> Self {
        Self::new(Source::Synthetic(source), panel, display, config)
    }

    fn new(source: Source<L>, panel: Panel, display: D, config: &PanelConfig) -> Self {
        Self {
            source,
            panel,
            display,
            state: LinkState::Disconnected,
            link_error_visible: false,
            telegrams: 0,
            decode_failures: 0,
            fault_blink_ms: config.fault_blink_ms,
            synthetic_interval_ms: config.synthetic_interval_ms,
        }
    }

    /// Initializes the display and attempts the one-shot connect.
    ///
    /// Connect success (or synthetic mode) → [`LinkState::Connected`];
    /// failure → [`LinkState::Faulted`], permanently; the loop does not
    /// retry. The boot placeholders are pushed to the display either way.
    pub fn start(&mut self) -> Result<LinkState, D::Error> {
        self.display.init()?;
        self.panel.render_all(&mut self.display)?;

        self.state = match &mut self.source {
            Source::Synthetic(_) => {
                info!("synthetic telemetry mode; link bypassed");
                LinkState::Connected
            }
            Source::Link(link) => match link.connect() {
                Ok(()) => {
                    info!("telemetry link connected");
                    LinkState::Connected
                }
                Err(e) => {
                    error!("telemetry link connect failed: {:?}", e);
                    LinkState::Faulted
                }
            },
        };
        Ok(self.state)
    }

    /// Runs one cycle of the loop.
    ///
    /// In `Connected` this blocks until a telegram is available (link
    /// mode) or fabricates one (synthetic mode), then dispatches it to
    /// the panel. A telegram that fails to decode is dropped: no gauge is
    /// touched, prior display state stays, the loop keeps running. In
    /// `Faulted` this only toggles the link-error indicator; the decoder
    /// and the gauges are never reached.
    pub fn tick(&mut self) -> Result<(), D::Error> {
        match self.state {
            LinkState::Disconnected => Ok(()),
            LinkState::Faulted => {
                self.link_error_visible = !self.link_error_visible;
                self.display.set_link_error(self.link_error_visible)
            }
            LinkState::Connected => self.acquire_cycle(),
        }
    }

    fn acquire_cycle(&mut self) -> Result<(), D::Error> {
        let reading = match &mut self.source {
            Source::Synthetic(source) => source.next_reading(),
            Source::Link(link) => {
                // Receiver-paced: block here until the sender has a full
                // line for us. There is deliberately no timeout; a silent
                // sender leaves the gauges holding their last values.
                loop {
                    match link.has_data() {
                        Ok(true) => break,
                        Ok(false) => thread::yield_now(),
                        Err(e) => {
                            warn!("link poll failed, dropping cycle: {:?}", e);
                            return Ok(());
                        }
                    }
                }

                let line = match link.read_line() {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("link read failed, dropping cycle: {:?}", e);
                        return Ok(());
                    }
                };

                match decode(&line) {
                    Ok(reading) => reading,
                    Err(e) => {
                        self.decode_failures += 1;
                        warn!("dropped malformed telegram {:?}: {}", line, e);
                        return Ok(());
                    }
                }
            }
        };

        self.telegrams += 1;
        self.panel.apply(&reading, &mut self.display)
    }

    /// Runs the loop until process exit (or a display error).
    ///
    /// Pacing: link mode is receiver-paced by the blocking data wait;
    /// synthetic mode sleeps its fixed interval; `Faulted` sleeps the
    /// blink interval between indicator toggles.
    pub fn run(&mut self) -> Result<(), D::Error> {
        self.start()?;
        loop {
            self.tick()?;
            match self.state {
                LinkState::Faulted => {
                    thread::sleep(Duration::from_millis(u64::from(self.fault_blink_ms)));
                }
                LinkState::Connected => {
                    if matches!(self.source, Source::Synthetic(_)) {
                        thread::sleep(Duration::from_millis(u64::from(
                            self.synthetic_interval_ms,
                        )));
                    }
                }
                LinkState::Disconnected => unreachable!("start() ran above"),
            }
        }
    }

    /// Current link state.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Snapshot of the loop's counters and state.
    pub fn stats(&self) -> LoopStats {
        LoopStats {
            state: self.state,
            telegrams: self.telegrams,
            decode_failures: self.decode_failures,
            link_error_visible: self.link_error_visible,
        }
    }

    /// The owned panel (for state inspection).
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// The owned display (for call inspection in tests).
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The owned link, if running in link mode.
    pub fn link(&self) -> Option<&L> {
        match &self.source {
            Source::Link(link) => Some(link),
            Source::Synthetic(_) => None,
        }
    }

    /// Tears the session down, dropping the link handle (which closes the
    /// port) and handing the display back.
    ///
    /// The reference behavior runs to process exit and never tears down;
    /// this exists for symmetry and for tests that inspect the display
    /// after a session.
    pub fn shutdown(self) -> D {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::hal::{MockDisplay, MockLink};

    fn panel() -> Panel {
        Panel::from_config(&Config::default().gauges).unwrap()
    }

    fn loop_with(link: MockLink) -> AcquisitionLoop<MockLink, MockDisplay> {
        AcquisitionLoop::with_link(link, panel(), MockDisplay::new(), &PanelConfig::default())
    }

    #[test]
    fn starts_connected_on_successful_connect() {
        let mut acq = loop_with(MockLink::new());
        assert_eq!(acq.state(), LinkState::Disconnected);
        assert_eq!(acq.start().unwrap(), LinkState::Connected);
        assert_eq!(acq.link().unwrap().connect_calls, 1);
    }

    #[test]
    fn start_pushes_boot_placeholders() {
        let mut acq = loop_with(MockLink::new());
        acq.start().unwrap();

        let display = acq.display();
        assert_eq!(display.init_calls, 1);
        assert_eq!(display.render_calls(), 5);
        assert!(display.pointer_updates[0].1.data_missing);
    }

    #[test]
    fn connect_failure_faults_permanently() {
        let mut acq = loop_with(MockLink::failing());
        assert_eq!(acq.start().unwrap(), LinkState::Faulted);

        for _ in 0..4 {
            acq.tick().unwrap();
        }

        // Still faulted; no reconnect attempt was made.
        assert_eq!(acq.state(), LinkState::Faulted);
        assert_eq!(acq.link().unwrap().connect_calls, 1);
    }

    #[test]
    fn faulted_blinks_and_never_decodes() {
        let mut acq = loop_with(MockLink::failing());
        acq.start().unwrap();
        let boot_renders = acq.display().render_calls();

        for _ in 0..4 {
            acq.tick().unwrap();
        }

        let stats = acq.stats();
        assert_eq!(stats.telegrams, 0);
        assert_eq!(stats.decode_failures, 0);
        assert_eq!(acq.link().unwrap().read_calls, 0);
        // Only the indicator moved: on, off, on, off.
        assert_eq!(acq.display().link_error_states, vec![true, false, true, false]);
        assert_eq!(acq.display().render_calls(), boot_renders);
    }

    #[test]
    fn valid_telegram_updates_every_gauge() {
        let mut link = MockLink::new();
        link.queue_line("512,20.5,45.0,21.0,50.0");
        let mut acq = loop_with(link);

        acq.start().unwrap();
        acq.tick().unwrap();

        assert_eq!(acq.stats().telegrams, 1);
        assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
        assert_eq!(acq.panel().humidity_b().last_value(), Some(50.0));
        // Boot renders plus one full dispatch.
        assert_eq!(acq.display().render_calls(), 10);
    }

    #[test]
    fn malformed_telegram_is_dropped_and_loop_continues() {
        let mut link = MockLink::new();
        link.queue_lines(&["512,20.5,45.0", "512,20.5,45.0,21.0,50.0"]);
        let mut acq = loop_with(link);
        acq.start().unwrap();

        acq.tick().unwrap();
        let stats = acq.stats();
        assert_eq!(stats.decode_failures, 1);
        assert_eq!(stats.telegrams, 0);
        // No gauge was touched by the bad cycle.
        assert_eq!(acq.panel().potentiometer().last_value(), None);
        assert_eq!(acq.display().render_calls(), 5);

        // The next, well-formed telegram goes through.
        acq.tick().unwrap();
        assert_eq!(acq.stats().telegrams, 1);
        assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
    }

    #[test]
    fn read_failure_drops_cycle_without_fault() {
        let mut link = MockLink::new();
        link.fail_read = true;
        let mut acq = loop_with(link);
        acq.start().unwrap();

        acq.tick().unwrap();

        // Recoverable: still connected, nothing dispatched.
        assert_eq!(acq.state(), LinkState::Connected);
        assert_eq!(acq.stats().telegrams, 0);
        assert_eq!(acq.stats().decode_failures, 0);
    }

    #[test]
    fn synthetic_mode_never_touches_the_link() {
        let mut acq = AcquisitionLoop::<MockLink, _>::with_synthetic(
            SyntheticTelemetry::new(),
            panel(),
            MockDisplay::new(),
            &PanelConfig::default().with_synthetic(true),
        );

        assert_eq!(acq.start().unwrap(), LinkState::Connected);
        for _ in 0..3 {
            acq.tick().unwrap();
        }

        assert_eq!(acq.stats().telegrams, 3);
        assert!(acq.link().is_none());
        assert!(!acq.panel().temp_a().data_missing());
    }

    #[test]
    fn tick_before_start_is_a_no_op() {
        let mut acq = loop_with(MockLink::new());
        acq.tick().unwrap();
        assert_eq!(acq.stats().telegrams, 0);
        assert_eq!(acq.display().render_calls(), 0);
    }
}
