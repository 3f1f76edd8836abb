//! Transport abstraction over the telemetry link.

/// Abstraction over the serial link that delivers telegrams.
///
/// The acquisition loop calls [`connect`](Self::connect) exactly once at
/// start-up; a failure there puts the loop into its permanent `Faulted`
/// state; there is no reconnection path. Afterwards the loop polls
/// [`has_data`](Self::has_data) (non-blocking) and pulls complete lines
/// with [`read_line`](Self::read_line).
///
/// # Implementation Notes
///
/// - `read_line` returns one telegram with the trailing CR/LF stripped.
/// - `has_data` must not consume input; it only reports availability.
/// - Implementations own the link handle for the process lifetime.
///
/// # Example Implementation
///
/// ```rust
/// use meterpanel::traits::TelemetryLink;
///
/// struct ReplayLink { lines: Vec<String> }
///
/// impl TelemetryLink for ReplayLink {
///     type Error = ();
///
///     fn connect(&mut self) -> Result<(), ()> {
///         Ok(())
///     }
///
///     fn has_data(&mut self) -> Result<bool, ()> {
///         Ok(!self.lines.is_empty())
///     }
///
///     fn read_line(&mut self) -> Result<String, ()> {
///         if self.lines.is_empty() {
///             return Err(());
///         }
///         Ok(self.lines.remove(0))
///     }
/// }
/// ```
pub trait TelemetryLink {
    /// Error type for link operations.
    type Error;

    /// Opens the link. Called once at start-up.
    fn connect(&mut self) -> Result<(), Self::Error>;

    /// Non-blocking check whether a complete line is waiting.
    fn has_data(&mut self) -> Result<bool, Self::Error>;

    /// Reads one line, blocking until a full line is available.
    ///
    /// The returned line has its trailing CR/LF stripped.
    fn read_line(&mut self) -> Result<String, Self::Error>;
}
