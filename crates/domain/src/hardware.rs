//! Hardware collaborator interfaces.
//!
//! Sensors pull raw readings from a [`ReadingSource`]; actuators push commands
//! to a [`CommandSink`]. Both are opaque to the domain: a reading is whatever
//! string the source hands back, and parsing it belongs to the collaborator.

use std::fmt;
use std::sync::Arc;

use crate::error::HardwareError;

/// Something a sensor can read a raw value from.
pub trait ReadingSource: Send + Sync {
    /// Fetch the next raw reading.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::Unavailable`] when the source cannot produce a value.
    fn read(&self) -> Result<String, HardwareError>;
}

/// Shared handle to a reading source.
pub type SharedReadingSource = Arc<dyn ReadingSource>;

/// Something an actuator can send commands to.
///
/// Each method returns whether the hardware accepted the command.
pub trait CommandSink: Send + Sync {
    fn send_switch(&self, on: bool) -> bool;
    fn send_integer(&self, value: i64) -> bool;
    fn send_decimal(&self, value: f64) -> bool;
}

/// Wrapper that gives an `Arc<dyn ReadingSource>` a readable `Debug`.
pub(crate) struct SourceDebug<'a>(pub &'a Option<SharedReadingSource>);

impl fmt::Debug for SourceDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Some(<reading source>)"),
            None => f.write_str("None"),
        }
    }
}
