//! Core traits: the transport seam and the graphics collaborator seam.
//!
//! The acquisition loop is written against these traits so the whole core
//! can run on desktop test doubles (see [`crate::hal::mock`]) as well as a
//! real serial port and a real renderer.

mod display;
mod link;

pub use display::{GaugeId, PanelDisplay};
pub use link::TelemetryLink;
