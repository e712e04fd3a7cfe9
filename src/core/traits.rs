//! Seam traits between the timer core and its collaborators.

use crate::error::PlankrError;

/// The persistence boundary that records completed session durations.
///
/// The timer controller calls [`record_session`](SessionSink::record_session)
/// exactly once per completed session, with a positive duration in whole
/// seconds. Implementations own durability and identity; the controller
/// treats the sink as opaque and performs no retries of its own.
#[cfg_attr(test, mockall::automock)]
pub trait SessionSink {
    /// Durably record one completed session.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored; the caller
    /// decides whether to park it for a later retry.
    fn record_session(&self, duration_seconds: u32) -> Result<(), PlankrError>;
}
