//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the link and display traits,
//! enabling development and testing on desktop without a serial device
//! or a renderer.
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockLink`] | [`TelemetryLink`] | Scripted telegram lines, failure injection |
//! | [`MockDisplay`] | [`PanelDisplay`] | Records every render call |
//!
//! # Example
//!
//! ```rust
//! use meterpanel::hal::MockLink;
//! use meterpanel::traits::TelemetryLink;
//!
//! let mut link = MockLink::new();
//! link.queue_line("512,20.5,45.0,21.0,50.0");
//!
//! link.connect().unwrap();
//! assert!(link.has_data().unwrap());
//! assert_eq!(link.read_line().unwrap(), "512,20.5,45.0,21.0,50.0");
//! assert!(!link.has_data().unwrap());
//! ```

use std::collections::VecDeque;

use crate::gauge::{FillRenderState, PointerRenderState};
use crate::traits::{GaugeId, PanelDisplay, TelemetryLink};

// ============================================================================
// Mock link
// ============================================================================

/// Mock telemetry link for testing.
///
/// Queue telegram lines to script the device; flip the failure switches
/// to exercise the loop's error paths. Counters record how often the
/// loop touched the link.
#[derive(Debug, Default)]
pub struct MockLink {
    lines: VecDeque<String>,
    /// When set, `connect` fails (drives the loop into `Faulted`).
    pub fail_connect: bool,
    /// When set, `has_data` reports data but `read_line` fails.
    pub fail_read: bool,
    /// Number of `connect` calls.
    pub connect_calls: usize,
    /// Number of `read_line` calls.
    pub read_calls: usize,
}

impl MockLink {
    /// Creates a connected-on-demand mock link with no queued lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock link whose `connect` fails.
    pub fn failing() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    /// Queues one telegram line (without line terminator).
    pub fn queue_line(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
    }

    /// Queues several telegram lines in order.
    pub fn queue_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.queue_line(line);
        }
    }

    /// Number of lines still queued.
    pub fn pending(&self) -> usize {
        self.lines.len()
    }
}

impl TelemetryLink for MockLink {
    type Error = ();

    fn connect(&mut self) -> Result<(), ()> {
        self.connect_calls += 1;
        if self.fail_connect {
            Err(())
        } else {
            Ok(())
        }
    }

    fn has_data(&mut self) -> Result<bool, ()> {
        Ok(self.fail_read || !self.lines.is_empty())
    }

    fn read_line(&mut self) -> Result<String, ()> {
        self.read_calls += 1;
        if self.fail_read {
            return Err(());
        }
        self.lines.pop_front().ok_or(())
    }
}

// ============================================================================
// Mock display
// ============================================================================

/// Mock display that records every render call for verification.
///
/// # Example
///
/// ```rust
/// use meterpanel::hal::MockDisplay;
/// use meterpanel::traits::PanelDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// display.set_link_error(true).unwrap();
///
/// assert_eq!(display.init_calls, 1);
/// assert_eq!(display.link_error_states, vec![true]);
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Number of `init` calls.
    pub init_calls: usize,
    /// Every pointer render, in call order.
    pub pointer_updates: Vec<(GaugeId, PointerRenderState)>,
    /// Every fill render, in call order.
    pub fill_updates: Vec<(GaugeId, FillRenderState)>,
    /// Every link-error visibility change, in call order.
    pub link_error_states: Vec<bool>,
}

impl MockDisplay {
    /// Creates a mock display with empty call records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of gauge render calls of either kind.
    pub fn render_calls(&self) -> usize {
        self.pointer_updates.len() + self.fill_updates.len()
    }

    /// The most recent link-error visibility, if any was ever set.
    pub fn last_link_error(&self) -> Option<bool> {
        self.link_error_states.last().copied()
    }
}

impl PanelDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.init_calls += 1;
        Ok(())
    }

    fn render_pointer(&mut self, id: GaugeId, state: &PointerRenderState) -> Result<(), ()> {
        self.pointer_updates.push((id, state.clone()));
        Ok(())
    }

    fn render_fill(&mut self, id: GaugeId, state: &FillRenderState) -> Result<(), ()> {
        self.fill_updates.push((id, state.clone()));
        Ok(())
    }

    fn set_link_error(&mut self, visible: bool) -> Result<(), ()> {
        self.link_error_states.push(visible);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_link_fifo_order() {
        let mut link = MockLink::new();
        link.queue_lines(&["first", "second"]);

        assert_eq!(link.read_line().unwrap(), "first");
        assert_eq!(link.read_line().unwrap(), "second");
        assert!(link.read_line().is_err());
    }

    #[test]
    fn mock_link_connect_failure() {
        let mut link = MockLink::failing();
        assert!(link.connect().is_err());
        assert_eq!(link.connect_calls, 1);
    }

    #[test]
    fn mock_link_read_failure_reports_data() {
        let mut link = MockLink::new();
        link.fail_read = true;
        assert!(link.has_data().unwrap());
        assert!(link.read_line().is_err());
    }

    #[test]
    fn mock_display_records_link_error_toggles() {
        let mut display = MockDisplay::new();
        display.set_link_error(true).unwrap();
        display.set_link_error(false).unwrap();
        assert_eq!(display.link_error_states, vec![true, false]);
        assert_eq!(display.last_link_error(), Some(false));
    }
}
