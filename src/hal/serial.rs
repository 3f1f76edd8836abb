//! Real serial transport over the `serialport` crate.

use std::fmt;
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serialport::SerialPort;

use crate::config::LinkConfig;
use crate::traits::TelemetryLink;

/// Errors from the serial link.
#[derive(Debug)]
pub enum LinkError {
    /// Opening the port failed. Drives the loop's permanent `Faulted` state.
    Connect(serialport::Error),
    /// A port control call (e.g. the availability poll) failed.
    Port(serialport::Error),
    /// Reading from the open port failed.
    Io(io::Error),
    /// The link was used before `connect`.
    NotConnected,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Connect(e) => write!(f, "failed to open serial port: {}", e),
            LinkError::Port(e) => write!(f, "serial port error: {}", e),
            LinkError::Io(e) => write!(f, "serial read error: {}", e),
            LinkError::NotConnected => write!(f, "serial link is not connected"),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::Connect(e) | LinkError::Port(e) => Some(e),
            LinkError::Io(e) => Some(e),
            LinkError::NotConnected => None,
        }
    }
}

/// Serial implementation of [`TelemetryLink`].
///
/// Opens the configured port once and holds it for the process lifetime.
/// Lines are accumulated byte-wise until `\n`; the terminator and any
/// preceding `\r` are stripped before the line is handed to the decoder.
pub struct SerialLink {
    config: LinkConfig,
    port: Option<Box<dyn SerialPort>>,
    pending: Vec<u8>,
}

impl SerialLink {
    /// Creates an unconnected link for the given configuration.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            port: None,
            pending: Vec::new(),
        }
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>, LinkError> {
        self.port.as_mut().ok_or(LinkError::NotConnected)
    }
}

impl TelemetryLink for SerialLink {
    type Error = LinkError;

    fn connect(&mut self) -> Result<(), LinkError> {
        let port = serialport::new(self.config.port.as_str(), self.config.baud)
            .timeout(Duration::from_millis(u64::from(self.config.read_timeout_ms)))
            .open()
            .map_err(LinkError::Connect)?;

        info!(
            "opened serial port {} at {} baud",
            self.config.port, self.config.baud
        );

        // Boards that reset on port-open need a moment before they talk;
        // whatever they printed while resetting is not telegram data.
        thread::sleep(Duration::from_millis(u64::from(self.config.connect_grace_ms)));
        let _ = port.clear(serialport::ClearBuffer::Input);

        self.port = Some(port);
        Ok(())
    }

    fn has_data(&mut self) -> Result<bool, LinkError> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        let available = self.port_mut()?.bytes_to_read().map_err(LinkError::Port)?;
        Ok(available > 0)
    }

    fn read_line(&mut self) -> Result<String, LinkError> {
        loop {
            if let Some(line) = take_line(&mut self.pending) {
                debug!("telegram: {}", line);
                return Ok(line);
            }

            let mut buf = [0u8; 256];
            match self.port_mut()?.read(&mut buf) {
                Ok(0) => continue,
                Ok(n) => self.pending.extend_from_slice(&buf[..n]),
                // Timed-out reads are part of the blocking contract: keep
                // waiting until a full line arrives.
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(LinkError::Io(e)),
            }
        }
    }
}

/// Splits the first complete line out of `pending`, stripping the
/// terminating `\n` and any preceding `\r`. Bytes after the terminator
/// stay buffered for the next call.
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = pending.drain(..=pos).collect();
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(String::from_utf8_lossy(&line).into_owned())
}

/// Names of the serial ports visible on this machine.
///
/// Used by the binary to help pick a port when none is configured.
pub fn available_port_names() -> Vec<String> {
    serialport::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .unwrap_or_default()
}
