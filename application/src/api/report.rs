//! [`Report`]-related REST API definitions.

use axum::{
    extract::{rejection::PathRejection, Path, Query},
    Json,
};
use common::{DateTime, Params};
use serde::Serialize;
use service::{domain, query::reports, read, Query as _};
use uuid::Uuid;

use crate::{api::Page, AsError, Context, Error};

/// A `Report` issued within an appointment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier of this `Report`.
    pub id: Uuid,

    /// Unique identifier of the appointment of this `Report`.
    pub appointment_id: Uuid,

    /// Title of this `Report`.
    pub title: String,

    /// Processing status of this `Report`.
    pub status: String,

    /// Notes on this `Report`, if any.
    pub notes: Option<String>,

    /// Name of the file of this `Report`.
    pub file_name: String,

    /// Date and time when this `Report` was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Report> for Report {
    fn from(r: domain::Report) -> Self {
        Self {
            id: r.id.into(),
            appointment_id: r.appointment_id.into(),
            title: r.title,
            status: r.status.to_string(),
            notes: r.notes,
            file_name: r.file_name,
            created_at: r.created_at.coerce(),
        }
    }
}

/// Lists `Report`s visible to the authorized caller.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
/// - `INTERNAL_SERVER_ERROR` - the storage failed to answer.
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn list(
    ctx: Context,
    Query(params): Query<Params>,
) -> Result<Page<Report>, Error> {
    execute(&ctx, None, &params).await
}

/// Lists `Report`s of the patient with the provided ID, visible to the
/// authorized caller.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - the patient ID is malformed;
/// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
/// - `INTERNAL_SERVER_ERROR` - the storage failed to answer.
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn of_patient(
    ctx: Context,
    patient: Result<Path<Uuid>, PathRejection>,
    Query(params): Query<Params>,
) -> Result<Page<Report>, Error> {
    let Path(patient) = patient.map_err(AsError::into_error)?;
    execute(&ctx, Some(patient), &params).await
}

/// Executes the [`reports::List`] query.
async fn execute(
    ctx: &Context,
    patient: Option<Uuid>,
    params: &Params,
) -> Result<Page<Report>, Error> {
    ctx.service()
        .execute(reports::List {
            caller: ctx.caller(),
            patient: patient.map(Into::into),
            query: read::report::list::Query::parse(params),
        })
        .await
        .map(|page| Json(page.map(Report::from)))
        .map_err(AsError::into_error)
}

impl AsError for reports::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
