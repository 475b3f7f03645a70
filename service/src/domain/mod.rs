//! Domain definitions.

pub mod appointment;
pub mod report;
pub mod scan;
pub mod user;

pub use self::{
    appointment::Appointment, report::Report, scan::Scan, user::User,
};
