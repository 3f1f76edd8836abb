//! Display abstraction for the external graphics collaborator.
//!
//! The core never draws. It pushes per-gauge renderable state (needle
//! angle or fill extent, readout texts, the no-data flag) plus the
//! panel-wide link-error indicator through [`PanelDisplay`], and the
//! 3-D scene (or a log sink, or a test double) does the rest.

use crate::gauge::{FillRenderState, PointerRenderState};

/// Identifies one of the panel's five fixed gauges, in wire-field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GaugeId {
    /// Raw input channel dial (pointer gauge).
    Potentiometer,
    /// First temperature sensor (fill gauge).
    TempA,
    /// First humidity sensor (fill gauge).
    HumidityA,
    /// Second temperature sensor (fill gauge).
    TempB,
    /// Second humidity sensor (fill gauge).
    HumidityB,
}

impl GaugeId {
    /// All five gauges in wire-field order.
    pub const ALL: [GaugeId; 5] = [
        GaugeId::Potentiometer,
        GaugeId::TempA,
        GaugeId::HumidityA,
        GaugeId::TempB,
        GaugeId::HumidityB,
    ];

    /// Returns the gauge id as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GaugeId::Potentiometer => "potentiometer",
            GaugeId::TempA => "temp_a",
            GaugeId::HumidityA => "humidity_a",
            GaugeId::TempB => "temp_b",
            GaugeId::HumidityB => "humidity_b",
        }
    }
}

/// Renderer trait consumed by the acquisition loop.
///
/// Implementors draw the panel: the 3-D scene on hardware, a mock that
/// records calls in tests, or a log sink on a headless box.
///
/// # Example
///
/// ```ignore
/// use meterpanel::traits::{GaugeId, PanelDisplay};
/// use meterpanel::gauge::{FillRenderState, PointerRenderState};
///
/// struct SceneDisplay { /* scene handles */ }
///
/// impl PanelDisplay for SceneDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render_pointer(&mut self, id: GaugeId, state: &PointerRenderState) -> Result<(), ()> {
///         // Rotate the needle, set the readout labels...
///         Ok(())
///     }
///     fn render_fill(&mut self, id: GaugeId, state: &FillRenderState) -> Result<(), ()> {
///         // Stretch the fill column...
///         Ok(())
///     }
///     fn set_link_error(&mut self, visible: bool) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait PanelDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display. Called once before the loop starts.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Pushes a pointer gauge's renderable state.
    fn render_pointer(
        &mut self,
        id: GaugeId,
        state: &PointerRenderState,
    ) -> Result<(), Self::Error>;

    /// Pushes a fill gauge's renderable state.
    fn render_fill(&mut self, id: GaugeId, state: &FillRenderState) -> Result<(), Self::Error>;

    /// Shows or hides the panel-wide link-error indicator.
    fn set_link_error(&mut self, visible: bool) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_id_order_matches_wire_order() {
        assert_eq!(GaugeId::ALL[0], GaugeId::Potentiometer);
        assert_eq!(GaugeId::ALL[4], GaugeId::HumidityB);
    }

    #[test]
    fn gauge_id_as_str() {
        assert_eq!(GaugeId::Potentiometer.as_str(), "potentiometer");
        assert_eq!(GaugeId::TempB.as_str(), "temp_b");
    }
}
