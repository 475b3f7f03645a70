//! REST API definitions.
//!
//! Every list endpoint accepts the query string parameters understood by
//! [`ListQuery::parse()`] and answers with a JSON [`Page`].
//!
//! [`ListQuery::parse()`]: common::ListQuery::parse

pub mod appointment;
pub mod report;
pub mod scan;
pub mod user;

use axum::Json;

pub use self::{
    appointment::Appointment, report::Report, scan::Scan, user::User,
};

/// JSON page of items.
pub type Page<T> = Json<common::Page<T>>;
