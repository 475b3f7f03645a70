//! [`Command`] definition.

pub mod authorize_caller;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::authorize_caller::AuthorizeCaller;
