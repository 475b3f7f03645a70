//! [`Query`] definition.

pub mod appointments;
pub mod reports;
pub mod scans;
pub mod users;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;
