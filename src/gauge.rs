//! Gauge models: calibration, per-gauge state, and the mapping from typed
//! samples to renderable state.
//!
//! Two variants share the same data-missing behavior and differ only in
//! their update-to-renderable mapping:
//!
//! | Gauge | Drives | Renderable |
//! |-------|--------|------------|
//! | [`PointerGauge`] | bounded dial needle | angle in radians + raw/derived readouts |
//! | [`FillGauge`] | thermometer/hygrometer column | normalized fill extent + raw readout |
//!
//! An [`Sample::Unavailable`](crate::telegram::Sample) update toggles the
//! gauge's no-data indicator and leaves everything else exactly where it
//! was: a physical meter does not snap to zero when its sensor drops out.
//! Numeric updates are never range-checked: a value past the calibrated
//! domain drives the needle (or column) off the drawn scale, just like
//! overdriving a real meter movement.
//!
//! # Example
//!
//! ```rust
//! use meterpanel::config::PointerGaugeConfig;
//! use meterpanel::gauge::PointerGauge;
//! use meterpanel::telegram::Sample;
//!
//! let mut dial = PointerGauge::from_config(&PointerGaugeConfig::default()).unwrap();
//! let state = dial.update(Sample::Value(256));
//! assert_eq!(state.derived.as_str(), "1.25V");
//! assert!(!state.data_missing);
//! ```

use core::fmt;
use core::fmt::Write as _;

use heapless::String as HString;

use crate::config::{Color, FillGaugeConfig, PointerGaugeConfig, ShortString};
use crate::telegram::Sample;

/// Fixed-capacity readout text (raw and derived value strings).
pub type ReadoutText = HString<16>;

// ============================================================================
// Calibration
// ============================================================================

/// Immutable per-gauge calibration. Set once at construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeCalibration {
    domain_min: f32,
    domain_max: f32,
    label: ShortString,
    units: ShortString,
    color: Color,
}

impl GaugeCalibration {
    /// Creates a calibration, rejecting degenerate domains.
    ///
    /// `domain_min < domain_max` is required: an empty or inverted domain
    /// makes every subsequent update mathematically undefined, so it is
    /// refused here rather than handled per update.
    pub fn new(
        domain_min: f32,
        domain_max: f32,
        label: ShortString,
        units: ShortString,
        color: Color,
    ) -> Result<Self, InvalidCalibrationError> {
        if !(domain_min < domain_max) {
            return Err(InvalidCalibrationError {
                domain_min,
                domain_max,
            });
        }
        Ok(Self {
            domain_min,
            domain_max,
            label,
            units,
            color,
        })
    }

    /// Low end of the calibrated domain.
    pub fn domain_min(&self) -> f32 {
        self.domain_min
    }

    /// High end of the calibrated domain.
    pub fn domain_max(&self) -> f32 {
        self.domain_max
    }

    /// Width of the calibrated domain (always positive).
    pub fn span(&self) -> f32 {
        self.domain_max - self.domain_min
    }

    /// Gauge face label.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Unit suffix for readouts.
    pub fn units(&self) -> &str {
        self.units.as_str()
    }

    /// Accent color (cosmetic pass-through).
    pub fn color(&self) -> Color {
        self.color
    }
}

/// A gauge was constructed with an empty or inverted domain.
///
/// Fatal at start-up: no gauge (and no renderable state) is constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidCalibrationError {
    /// The offending domain minimum.
    pub domain_min: f32,
    /// The offending domain maximum.
    pub domain_max: f32,
}

impl fmt::Display for InvalidCalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid gauge calibration: domain min {} must be below max {}",
            self.domain_min, self.domain_max
        )
    }
}

impl std::error::Error for InvalidCalibrationError {}

// ============================================================================
// Render states
// ============================================================================

/// Renderable state of a pointer gauge, pushed to the display collaborator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerRenderState {
    /// Needle angle in radians.
    pub angle: f32,
    /// Raw-value readout text (e.g. `"0256"`).
    pub raw: ReadoutText,
    /// Derived-value readout text (e.g. `"1.25V"`).
    pub derived: ReadoutText,
    /// Whether the "no data" indicator is shown.
    pub data_missing: bool,
}

/// Renderable state of a fill gauge, pushed to the display collaborator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillRenderState {
    /// Fill extent, normalized against the calibrated domain plus the
    /// drawn column stub. Not clamped to the drawn scale.
    pub extent: f32,
    /// Raw-value readout text (e.g. `"25.0"`).
    pub raw: ReadoutText,
    /// Whether the "no data" indicator is shown.
    pub data_missing: bool,
}

// ============================================================================
// Pointer gauge
// ============================================================================

/// Linear-pointer gauge: a bounded dial swept by a needle.
///
/// Drives the raw input channel. The needle sweeps linearly from
/// `start_angle` (value 0) down to `end_angle` (full scale) across the
/// sensor's fixed native range, and a derived linear readout
/// (`scale_factor * value / domain_span`, e.g. volts) accompanies the raw
/// count.
#[derive(Clone, Debug)]
pub struct PointerGauge {
    calibration: GaugeCalibration,
    domain_span: f32,
    scale_factor: f32,
    start_angle: f32,
    end_angle: f32,
    last_value: Option<i32>,
    render: PointerRenderState,
}

impl PointerGauge {
    /// Builds the gauge from its configuration.
    ///
    /// Fails with [`InvalidCalibrationError`] if the drawn scale is
    /// degenerate.
    pub fn from_config(config: &PointerGaugeConfig) -> Result<Self, InvalidCalibrationError> {
        let calibration = GaugeCalibration::new(
            config.scale_min,
            config.scale_max,
            config.label.clone(),
            config.units.clone(),
            config.color,
        )?;

        // Boot placeholders: the face artwork shows these until the first
        // telegram lands.
        let mut render = PointerRenderState {
            angle: config.start_angle,
            raw: ReadoutText::new(),
            derived: ReadoutText::new(),
            data_missing: true,
        };
        let _ = render.raw.push_str("0000");
        let _ = write!(render.derived, "0.00{}", calibration.units());

        Ok(Self {
            calibration,
            domain_span: config.domain_span,
            scale_factor: config.scale_factor,
            start_angle: config.start_angle,
            end_angle: config.end_angle,
            last_value: None,
            render,
        })
    }

    /// Applies one sample and returns the resulting renderable state.
    ///
    /// `Unavailable` turns the no-data indicator on and leaves needle and
    /// readouts at their previous values. A numeric value updates
    /// everything; it is *not* clamped to the nominal range, so off-range
    /// values drive the needle past the drawn scale.
    pub fn update(&mut self, sample: Sample<i32>) -> &PointerRenderState {
        match sample {
            Sample::Unavailable => {
                self.render.data_missing = true;
            }
            Sample::Value(value) => {
                self.last_value = Some(value);
                self.render.data_missing = false;

                self.render.raw.clear();
                let _ = write!(self.render.raw, "{:04}", value);

                let derived = round2(self.scale_factor * value as f32 / self.domain_span);
                self.render.derived.clear();
                let _ = write!(
                    self.render.derived,
                    "{:.2}{}",
                    derived,
                    self.calibration.units()
                );

                let sweep = self.start_angle - self.end_angle;
                self.render.angle = self.start_angle - sweep / self.domain_span * value as f32;
            }
        }
        &self.render
    }

    /// Last numeric value applied, if any.
    pub fn last_value(&self) -> Option<i32> {
        self.last_value
    }

    /// Whether the no-data indicator is currently shown.
    pub fn data_missing(&self) -> bool {
        self.render.data_missing
    }

    /// Current renderable state.
    pub fn render_state(&self) -> &PointerRenderState {
        &self.render
    }

    /// The gauge's calibration.
    pub fn calibration(&self) -> &GaugeCalibration {
        &self.calibration
    }
}

// ============================================================================
// Fill gauge
// ============================================================================

/// Linear-fill gauge: a thermometer/hygrometer style column.
///
/// The fill extent is `base_offset + (value - domain_min) / span`, where
/// `base_offset` is the drawn column stub at the domain minimum. The
/// normalized position is not clamped; out-of-domain values fill past the
/// drawn scale end.
#[derive(Clone, Debug)]
pub struct FillGauge {
    calibration: GaugeCalibration,
    base_offset: f32,
    last_value: Option<f32>,
    render: FillRenderState,
}

impl FillGauge {
    /// Builds the gauge from its configuration.
    ///
    /// Fails with [`InvalidCalibrationError`] if the calibrated domain is
    /// degenerate (`domain_min >= domain_max`); no renderable state is
    /// constructed in that case.
    pub fn from_config(config: &FillGaugeConfig) -> Result<Self, InvalidCalibrationError> {
        let calibration = GaugeCalibration::new(
            config.domain_min,
            config.domain_max,
            config.label.clone(),
            config.units.clone(),
            config.color,
        )?;

        let mut render = FillRenderState {
            extent: config.base_offset,
            raw: ReadoutText::new(),
            data_missing: true,
        };
        let _ = render.raw.push_str("00.0");

        Ok(Self {
            calibration,
            base_offset: config.base_offset,
            last_value: None,
            render,
        })
    }

    /// Applies one sample and returns the resulting renderable state.
    ///
    /// `Unavailable` turns the no-data indicator on and retains the last
    /// fill extent and readout. A numeric value moves the fill to
    /// `base_offset + (value - domain_min) / span`, unclamped.
    pub fn update(&mut self, sample: Sample<f32>) -> &FillRenderState {
        match sample {
            Sample::Unavailable => {
                self.render.data_missing = true;
            }
            Sample::Value(value) => {
                self.last_value = Some(value);
                self.render.data_missing = false;

                self.render.raw.clear();
                let _ = write!(self.render.raw, "{:.1}", value);

                let t = (value - self.calibration.domain_min()) / self.calibration.span();
                self.render.extent = self.base_offset + t;
            }
        }
        &self.render
    }

    /// Last numeric value applied, if any.
    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// Whether the no-data indicator is currently shown.
    pub fn data_missing(&self) -> bool {
        self.render.data_missing
    }

    /// Current renderable state.
    pub fn render_state(&self) -> &FillRenderState {
        &self.render
    }

    /// The gauge's calibration.
    pub fn calibration(&self) -> &GaugeCalibration {
        &self.calibration
    }
}

/// Round to two decimal places for the derived readout.
fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
