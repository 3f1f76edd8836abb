//! # meterpanel
//!
//! A real-time analog instrument panel core: reads a periodic
//! line-delimited sensor telegram from a serial link and maps the values
//! into renderable gauge state: needle angles, fill extents, readout
//! texts, no-data indicators.
//!
//! ## Features
//!
//! - **Tolerant ingestion**: malformed telegrams and sensor dropouts are
//!   per-cycle events, never crashes; gauges hold their last values
//! - **Typed readings**: every field is `Value(T)` or `Unavailable`; no
//!   sentinel numbers leak past the decoder
//! - **Hardware abstraction**: the serial link and the renderer sit behind
//!   traits, so the whole core runs against desktop mocks
//! - **Synthetic mode**: pseudo-random telemetry for meter testing without
//!   a device on the bench
//!
//! ## Architecture
//!
//! The crate is structured so the core can be driven without hardware:
//!
//! - `telegram` - Wire protocol decoding into typed readings
//! - `gauge` - Pointer and fill gauge models with calibration
//! - `panel` - The fixed five-gauge panel and per-field dispatch
//! - `acquisition` - The coordinating loop and its link state machine
//! - `traits` - Link and display abstractions
//! - `hal` - Concrete implementations (mock for testing, serial for hardware)
//!
//! ## Example
//!
//! ```rust
//! use meterpanel::{
//!     AcquisitionLoop, Config, LinkState, Panel,
//!     hal::{MockDisplay, MockLink},
//! };
//!
//! let config = Config::default();
//! let panel = Panel::from_config(&config.gauges).unwrap();
//!
//! // Script a device on the mock link
//! let mut link = MockLink::new();
//! link.queue_line("512,20.5,45.0,21.0,50.0");
//! link.queue_line("-1,nan,60.0,nan,nan");
//!
//! let mut acq = AcquisitionLoop::with_link(link, panel, MockDisplay::new(), &config.panel);
//! assert_eq!(acq.start().unwrap(), LinkState::Connected);
//!
//! acq.tick().unwrap(); // full reading
//! acq.tick().unwrap(); // partial dropout: indicators on, values held
//!
//! assert_eq!(acq.panel().potentiometer().last_value(), Some(512));
//! assert!(acq.panel().potentiometer().data_missing());
//! assert_eq!(acq.panel().humidity_a().last_value(), Some(60.0));
//! ```

#![warn(missing_docs)]

/// The acquisition loop and its link state machine.
pub mod acquisition;
/// Start-up configuration for the link, the loop, and the gauges.
pub mod config;
/// Gauge models: calibration, state, and renderable-state mapping.
pub mod gauge;
/// Concrete link/display implementations (mock for testing, serial for hardware).
pub mod hal;
/// The fixed five-gauge panel and per-field dispatch.
pub mod panel;
/// Pseudo-random telemetry source for meter testing.
pub mod synthetic;
/// Wire protocol decoding into typed readings.
pub mod telegram;
/// Core traits for the link and display seams.
pub mod traits;

// Re-exports for convenience
pub use acquisition::{AcquisitionLoop, LinkState, LoopStats};
pub use config::{
    Color, Config, FillGaugeConfig, GaugesConfig, LinkConfig, PanelConfig, PointerGaugeConfig,
};
pub use gauge::{
    FillGauge, FillRenderState, GaugeCalibration, InvalidCalibrationError, PointerGauge,
    PointerRenderState,
};
pub use panel::Panel;
pub use synthetic::SyntheticTelemetry;
pub use telegram::{decode, DecodeError, Reading, Sample};
pub use traits::{GaugeId, PanelDisplay, TelemetryLink};
