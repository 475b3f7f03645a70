//! [`Appointment`]-related REST API definitions.

use axum::{extract::Query, Json};
use common::{DateTime, Params};
use serde::Serialize;
use service::{
    domain::{self, appointment},
    query::appointments,
    read, Query as _,
};
use uuid::Uuid;

use crate::{api::Page, AsError, Context, Error};

/// An `Appointment` of a patient.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique identifier of this `Appointment`.
    pub id: Uuid,

    /// Sequential number of this `Appointment`.
    pub number: i32,

    /// Date and time this `Appointment` is scheduled on.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub date: DateTime,

    /// Status of this `Appointment`.
    pub status: String,

    /// Patient of this `Appointment`.
    pub patient: Party,

    /// Doctor of this `Appointment`, if assigned.
    pub doctor: Option<Party>,

    /// Date and time when this `Appointment` was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Appointment> for Appointment {
    fn from(a: domain::Appointment) -> Self {
        Self {
            id: a.id.into(),
            number: a.number.into(),
            date: a.date.coerce(),
            status: a.status.to_string(),
            patient: a.patient.into(),
            doctor: a.doctor.map(Into::into),
            created_at: a.created_at.coerce(),
        }
    }
}

/// `User` taking part in an `Appointment`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Unique identifier of the `User`.
    pub id: Uuid,

    /// First name of the `User`.
    pub first_name: String,

    /// Last name of the `User`.
    pub last_name: String,
}

impl From<appointment::Party> for Party {
    fn from(party: appointment::Party) -> Self {
        Self {
            id: party.id.into(),
            first_name: party.first_name.to_string(),
            last_name: party.last_name.to_string(),
        }
    }
}

/// Lists `Appointment`s visible to the authorized caller.
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
) -> Result<Page<Appointment>, Error> {
    ctx.service()
        .execute(appointments::List {
            caller: ctx.caller(),
            query: read::appointment::list::Query::parse(&params),
        })
        .await
        .map(|page| Json(page.map(Appointment::from)))
        .map_err(AsError::into_error)
}

impl AsError for appointments::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
