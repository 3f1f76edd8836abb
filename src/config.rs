//! Start-up configuration for the panel, the link, and the five gauges.
//!
//! Uses `heapless::String` for fixed-capacity text fields and the builder
//! pattern throughout. Configuration is fixed at start-up: nothing here is
//! reloaded while the acquisition loop runs.
//!
//! # Example
//!
//! ```rust
//! use meterpanel::config::{Config, LinkConfig, PanelConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_link(LinkConfig::default().with_port("/dev/ttyACM0"))
//!     .with_panel(PanelConfig::default().with_synthetic(true));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (port names, labels, units)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Color
// ============================================================================

/// Color for gauge elements. Cosmetic pass-through to the renderer; the
/// core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// The panel's red accent (pointer dial, thermometers).
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    /// The panel's blue accent (hygrometers).
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);

    /// Creates a color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as an `(r, g, b)` tuple.
    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Serial link configuration
    pub link: LinkConfig,
    /// Acquisition loop configuration
    pub panel: PanelConfig,
    /// Per-gauge calibration
    pub gauges: GaugesConfig,
}

impl Config {
    /// Set link configuration
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    /// Set panel configuration
    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.panel = panel;
        self
    }

    /// Set gauge calibration configuration
    pub fn with_gauges(mut self, gauges: GaugesConfig) -> Self {
        self.gauges = gauges;
        self
    }
}

// ============================================================================
// Link Config
// ============================================================================

/// Serial link configuration.
///
/// The port is opened once at start-up and held for the process lifetime;
/// there is no reconnection path.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    /// Serial port name (e.g. `/dev/ttyUSB0`, `COM3`)
    pub port: ShortString,
    /// Baud rate
    pub baud: u32,
    /// Settle time after opening the port, in milliseconds. Some boards
    /// reset when the port opens and need a moment before they talk.
    pub connect_grace_ms: u32,
    /// Read timeout of the underlying port, in milliseconds. Timed-out
    /// reads are retried; this does not bound the overall data wait.
    pub read_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: short_string("/dev/ttyUSB0"),
            baud: 115_200,
            connect_grace_ms: 1000,
            read_timeout_ms: 100,
        }
    }
}

impl LinkConfig {
    /// Set the serial port name
    pub fn with_port(mut self, port: &str) -> Self {
        self.port = short_string(port);
        self
    }

    /// Set the baud rate
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Set the post-open settle time
    pub fn with_connect_grace_ms(mut self, ms: u32) -> Self {
        self.connect_grace_ms = ms;
        self
    }

    /// Set the port read timeout
    pub fn with_read_timeout_ms(mut self, ms: u32) -> Self {
        self.read_timeout_ms = ms;
        self
    }
}

// ============================================================================
// Panel Config
// ============================================================================

/// Acquisition loop configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// Target refresh rate in Hz. In real-transport mode the loop is
    /// receiver-paced (it blocks on data), so this only caps synthetic mode.
    pub refresh_hz: u32,
    /// Feed pseudo-random data instead of reading the link
    pub synthetic: bool,
    /// Interval between synthetic readings, in milliseconds
    pub synthetic_interval_ms: u32,
    /// Link-error indicator blink interval in `Faulted`, in milliseconds
    pub fault_blink_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 100,
            synthetic: false,
            synthetic_interval_ms: 100,
            fault_blink_ms: 500,
        }
    }
}

impl PanelConfig {
    /// Set the target refresh rate
    pub fn with_refresh_hz(mut self, hz: u32) -> Self {
        self.refresh_hz = hz;
        self
    }

    /// Enable or disable synthetic data mode
    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Set the synthetic reading interval
    pub fn with_synthetic_interval_ms(mut self, ms: u32) -> Self {
        self.synthetic_interval_ms = ms;
        self
    }

    /// Set the fault blink interval
    pub fn with_fault_blink_ms(mut self, ms: u32) -> Self {
        self.fault_blink_ms = ms;
        self
    }
}

// ============================================================================
// Gauge Configs
// ============================================================================

/// Pointer (dial) gauge configuration.
///
/// The drawn scale is `scale_min..scale_max` in `units`; the needle math
/// runs over the sensor's fixed native range `domain_span`, swept from
/// `start_angle` down to `end_angle`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerGaugeConfig {
    /// Low end of the drawn scale
    pub scale_min: f32,
    /// High end of the drawn scale
    pub scale_max: f32,
    /// Sensor native range step count (e.g. 1024 for a 10-bit ADC)
    pub domain_span: f32,
    /// Linear factor from raw counts to the derived readout (e.g. 5.0 V)
    pub scale_factor: f32,
    /// Needle angle at zero, radians
    pub start_angle: f32,
    /// Needle angle at full scale, radians
    pub end_angle: f32,
    /// Gauge face label
    pub label: ShortString,
    /// Unit suffix for the derived readout
    pub units: ShortString,
    /// Accent color (cosmetic)
    pub color: Color,
}

impl Default for PointerGaugeConfig {
    fn default() -> Self {
        Self {
            scale_min: 0.0,
            scale_max: 5.0,
            domain_span: 1024.0,
            scale_factor: 5.0,
            start_angle: 5.0 * core::f32::consts::PI / 6.0,
            end_angle: core::f32::consts::PI / 6.0,
            label: short_string("Potentiometer 1"),
            units: short_string("V"),
            color: Color::RED,
        }
    }
}

impl PointerGaugeConfig {
    /// Set the drawn scale bounds
    pub fn with_scale(mut self, min: f32, max: f32) -> Self {
        self.scale_min = min;
        self.scale_max = max;
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = short_string(label);
        self
    }

    /// Set the unit suffix
    pub fn with_units(mut self, units: &str) -> Self {
        self.units = short_string(units);
        self
    }

    /// Set the accent color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Fill (thermometer/hygrometer) gauge configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillGaugeConfig {
    /// Calibrated domain minimum
    pub domain_min: f32,
    /// Calibrated domain maximum
    pub domain_max: f32,
    /// Fill extent at domain minimum (the drawn column stub)
    pub base_offset: f32,
    /// Gauge face label
    pub label: ShortString,
    /// Unit suffix
    pub units: ShortString,
    /// Accent color (cosmetic)
    pub color: Color,
}

impl Default for FillGaugeConfig {
    fn default() -> Self {
        Self {
            domain_min: 0.0,
            domain_max: 100.0,
            base_offset: 0.15,
            label: ShortString::new(),
            units: ShortString::new(),
            color: Color::RED,
        }
    }
}

impl FillGaugeConfig {
    /// Set the calibrated domain
    pub fn with_domain(mut self, min: f32, max: f32) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = short_string(label);
        self
    }

    /// Set the unit suffix
    pub fn with_units(mut self, units: &str) -> Self {
        self.units = short_string(units);
        self
    }

    /// Set the accent color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Calibration for all five gauges, in wire-field order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugesConfig {
    /// Raw input channel dial
    pub potentiometer: PointerGaugeConfig,
    /// First temperature sensor
    pub temp_a: FillGaugeConfig,
    /// First humidity sensor
    pub humidity_a: FillGaugeConfig,
    /// Second temperature sensor
    pub temp_b: FillGaugeConfig,
    /// Second humidity sensor
    pub humidity_b: FillGaugeConfig,
}

impl Default for GaugesConfig {
    fn default() -> Self {
        Self {
            potentiometer: PointerGaugeConfig::default(),
            temp_a: FillGaugeConfig::default()
                .with_domain(-10.0, 60.0)
                .with_label("DHT11 Temp")
                .with_units("\u{00b0}C")
                .with_color(Color::RED),
            humidity_a: FillGaugeConfig::default()
                .with_domain(0.0, 100.0)
                .with_label("DHT11 Hum")
                .with_units("%")
                .with_color(Color::BLUE),
            temp_b: FillGaugeConfig::default()
                .with_domain(-10.0, 60.0)
                .with_label("DHT22 Temp")
                .with_units("\u{00b0}C")
                .with_color(Color::RED),
            humidity_b: FillGaugeConfig::default()
                .with_domain(0.0, 100.0)
                .with_label("DHT22 Hum")
                .with_units("%")
                .with_color(Color::BLUE),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
