//! Application provides REST API for listing clinic records through the
//! [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;

use axum::{routing::get, Router};
// Used in binary.
use axum_client_ip as _;
use refinery as _;
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::Context,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Postgres>;

/// Builds the [`Router`] serving the REST API.
///
/// The [`Service`] is expected to be provided as an [`Extension`] layer.
///
/// [`Extension`]: axum::Extension
pub fn router() -> Router {
    Router::new()
        .route("/admins", get(api::user::admins))
        .route("/admins/list", get(api::user::all_admins))
        .route("/doctors", get(api::user::doctors))
        .route("/doctors/list", get(api::user::all_doctors))
        .route("/patients", get(api::user::patients))
        .route("/patients/list", get(api::user::all_patients))
        .route("/appointments", get(api::appointment::list))
        .route("/users/patients/reports", get(api::report::list))
        .route(
            "/users/patients/:patient_id/reports",
            get(api::report::of_patient),
        )
        .route("/users/patients/scans", get(api::scan::list))
        .route(
            "/users/patients/:patient_id/scans",
            get(api::scan::of_patient),
        )
}
