//! Read entities definitions.

pub mod appointment;
pub mod document;
pub mod report;
pub mod scan;
pub mod user;
