//! The five-gauge panel and its per-field dispatch.

use crate::config::GaugesConfig;
use crate::gauge::{FillGauge, InvalidCalibrationError, PointerGauge};
use crate::telegram::Reading;
use crate::traits::{GaugeId, PanelDisplay};

/// The instrument panel: one pointer dial and four fill gauges, bound to
/// the five telegram fields in wire order.
///
/// Each gauge exclusively owns its calibration and state; the panel owns
/// the gauges and fans a [`Reading`] out to them. Dispatch is
/// unconditional for all five fields: mixed availability is normal, and
/// one sensor's dropout never blocks the others' updates.
#[derive(Clone, Debug)]
pub struct Panel {
    potentiometer: PointerGauge,
    temp_a: FillGauge,
    humidity_a: FillGauge,
    temp_b: FillGauge,
    humidity_b: FillGauge,
}

impl Panel {
    /// Builds all five gauges from configuration.
    ///
    /// Any degenerate calibration aborts construction; a panel with an
    /// undefined gauge must not come up at all.
    pub fn from_config(config: &GaugesConfig) -> Result<Self, InvalidCalibrationError> {
        Ok(Self {
            potentiometer: PointerGauge::from_config(&config.potentiometer)?,
            temp_a: FillGauge::from_config(&config.temp_a)?,
            humidity_a: FillGauge::from_config(&config.humidity_a)?,
            temp_b: FillGauge::from_config(&config.temp_b)?,
            humidity_b: FillGauge::from_config(&config.humidity_b)?,
        })
    }

    /// Dispatches one reading to every gauge and pushes the resulting
    /// renderable states to the display.
    pub fn apply<D: PanelDisplay>(
        &mut self,
        reading: &Reading,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.render_pointer(
            GaugeId::Potentiometer,
            self.potentiometer.update(reading.potentiometer),
        )?;
        display.render_fill(GaugeId::TempA, self.temp_a.update(reading.temp_a))?;
        display.render_fill(GaugeId::HumidityA, self.humidity_a.update(reading.humidity_a))?;
        display.render_fill(GaugeId::TempB, self.temp_b.update(reading.temp_b))?;
        display.render_fill(GaugeId::HumidityB, self.humidity_b.update(reading.humidity_b))?;
        Ok(())
    }

    /// Pushes every gauge's current state without applying a reading.
    ///
    /// Used once at start-up so the display shows the boot placeholders
    /// (and their no-data indicators) before the first telegram lands.
    pub fn render_all<D: PanelDisplay>(&self, display: &mut D) -> Result<(), D::Error> {
        display.render_pointer(GaugeId::Potentiometer, self.potentiometer.render_state())?;
        display.render_fill(GaugeId::TempA, self.temp_a.render_state())?;
        display.render_fill(GaugeId::HumidityA, self.humidity_a.render_state())?;
        display.render_fill(GaugeId::TempB, self.temp_b.render_state())?;
        display.render_fill(GaugeId::HumidityB, self.humidity_b.render_state())?;
        Ok(())
    }

    /// The pointer gauge on the raw input channel.
    pub fn potentiometer(&self) -> &PointerGauge {
        &self.potentiometer
    }

    /// The first temperature gauge.
    pub fn temp_a(&self) -> &FillGauge {
        &self.temp_a
    }

    /// The first humidity gauge.
    pub fn humidity_a(&self) -> &FillGauge {
        &self.humidity_a
    }

    /// The second temperature gauge.
    pub fn temp_b(&self) -> &FillGauge {
        &self.temp_b
    }

    /// The second humidity gauge.
    pub fn humidity_b(&self) -> &FillGauge {
        &self.humidity_b
    }
}
