//! Instrument panel binary.
//!
//! Wires the serial link (or the synthetic source) into the acquisition
//! loop, with a log-backed display standing in for the external 3-D
//! scene.
//!
//! # Usage
//!
//! ```sh
//! # Read real telegrams from a port
//! meterpanel /dev/ttyUSB0
//!
//! # Exercise the meters with pseudo-random data, no device needed
//! meterpanel --synthetic
//! ```
//!
//! With no arguments, the available serial ports are listed. Log level
//! defaults to `info`; set `RUST_LOG=debug` to see every telegram.

use std::env;

use anyhow::Context;
use log::info;

use meterpanel::gauge::{FillRenderState, PointerRenderState};
use meterpanel::hal::{available_port_names, SerialLink};
use meterpanel::traits::{GaugeId, PanelDisplay};
use meterpanel::{AcquisitionLoop, Config, Panel, SyntheticTelemetry};

/// Stand-in renderer: pushes panel updates to the log instead of a scene.
struct LogDisplay;

impl PanelDisplay for LogDisplay {
    type Error = core::convert::Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        info!("panel display ready");
        Ok(())
    }

    fn render_pointer(
        &mut self,
        id: GaugeId,
        state: &PointerRenderState,
    ) -> Result<(), Self::Error> {
        info!(
            "{}: angle {:.3} rad, raw {}, derived {}{}",
            id.as_str(),
            state.angle,
            state.raw,
            state.derived,
            if state.data_missing { " [no data]" } else { "" },
        );
        Ok(())
    }

    fn render_fill(&mut self, id: GaugeId, state: &FillRenderState) -> Result<(), Self::Error> {
        info!(
            "{}: fill {:.3}, raw {}{}",
            id.as_str(),
            state.extent,
            state.raw,
            if state.data_missing { " [no data]" } else { "" },
        );
        Ok(())
    }

    fn set_link_error(&mut self, visible: bool) -> Result<(), Self::Error> {
        info!(
            "link error indicator: {}",
            if visible { "on" } else { "off" }
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let panel = Panel::from_config(&config.gauges).context("gauge calibration rejected")?;

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--synthetic") => {
            let panel_config = config.panel.clone().with_synthetic(true);
            let mut acq = AcquisitionLoop::<SerialLink, _>::with_synthetic(
                SyntheticTelemetry::new(),
                panel,
                LogDisplay,
                &panel_config,
            );
            acq.run()?;
        }
        Some(port) => {
            let link = SerialLink::new(config.link.clone().with_port(port));
            let mut acq = AcquisitionLoop::with_link(link, panel, LogDisplay, &config.panel);
            acq.run()?;
        }
        None => {
            eprintln!("Usage: meterpanel <PORT> | --synthetic");
            eprintln!("Available ports:");
            for name in available_port_names() {
                eprintln!("  - {}", name);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
