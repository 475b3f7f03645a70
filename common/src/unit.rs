//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a birth of a person.
#[derive(Clone, Copy, Debug)]
pub struct Birth;

/// Marker type describing a scheduled event.
#[derive(Clone, Copy, Debug)]
pub struct Schedule;

/// Marker type describing an expiration of something.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;
