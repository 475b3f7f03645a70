//! [`Scan`]-related REST API definitions.

use axum::{
    extract::{rejection::PathRejection, Path, Query},
    Json,
};
use common::{DateTime, Params};
use serde::Serialize;
use service::{domain, query::scans, read, Query as _};
use uuid::Uuid;

use crate::{api::Page, AsError, Context, Error};

/// A `Scan` taken within an appointment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    /// Unique identifier of this `Scan`.
    pub id: Uuid,

    /// Unique identifier of the appointment of this `Scan`.
    pub appointment_id: Uuid,

    /// Title of this `Scan`.
    pub title: String,

    /// Notes on this `Scan`.
    pub notes: String,

    /// Imaging modality of this `Scan`.
    pub modality: String,

    /// Date and time when this `Scan` was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Scan> for Scan {
    fn from(s: domain::Scan) -> Self {
        Self {
            id: s.id.into(),
            appointment_id: s.appointment_id.into(),
            title: s.title,
            notes: s.notes,
            modality: s.modality,
            created_at: s.created_at.coerce(),
        }
    }
}

/// Lists `Scan`s visible to the authorized caller.
///
/// # Errors
///
/// See [`super::report::list()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn list(
    ctx: Context,
    Query(params): Query<Params>,
) -> Result<Page<Scan>, Error> {
    execute(&ctx, None, &params).await
}

/// Lists `Scan`s of the patient with the provided ID, visible to the
/// authorized caller.
///
/// # Errors
///
/// See [`super::report::of_patient()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn of_patient(
    ctx: Context,
    patient: Result<Path<Uuid>, PathRejection>,
    Query(params): Query<Params>,
) -> Result<Page<Scan>, Error> {
    let Path(patient) = patient.map_err(AsError::into_error)?;
    execute(&ctx, Some(patient), &params).await
}

/// Executes the [`scans::List`] query.
async fn execute(
    ctx: &Context,
    patient: Option<Uuid>,
    params: &Params,
) -> Result<Page<Scan>, Error> {
    ctx.service()
        .execute(scans::List {
            caller: ctx.caller(),
            patient: patient.map(Into::into),
            query: read::scan::list::Query::parse(params),
        })
        .await
        .map(|page| Json(page.map(Scan::from)))
        .map_err(AsError::into_error)
}

impl AsError for scans::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
