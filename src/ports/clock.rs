//! Clock port - injectable reference time.

use crate::domain::foundation::Timestamp;

/// Supplies the current moment to handlers.
///
/// Classification is date-sensitive, so every command and query takes
/// its "now" from this port rather than the system clock directly;
/// tests substitute a fixed clock.
pub trait Clock: Send + Sync {
    /// Returns the current moment.
    fn now(&self) -> Timestamp;
}
