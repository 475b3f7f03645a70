//! [`User`]-related REST API definitions.

use axum::{extract::Query, Json};
use common::{DateTime, Params};
use serde::Serialize;
use service::{
    domain::{self, user::Role},
    query::users,
    read, Query as _,
};
use uuid::Uuid;

use crate::{api::Page, AsError, Context, Error};

/// A `User` of the clinic.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of this `User`.
    pub id: Uuid,

    /// First name of this `User`.
    pub first_name: String,

    /// Last name of this `User`.
    pub last_name: String,

    /// Email address of this `User`.
    pub email: String,

    /// Sex of this `User`.
    pub sex: String,

    /// Role of this `User`.
    pub role: String,

    /// Birth date of this `User`, if known.
    pub birth_date: Option<String>,

    /// Indicator whether this `User` is a super administrator.
    pub is_super_admin: bool,

    /// Indicator whether this `User` is not deactivated.
    pub is_active: bool,

    /// Date and time when this `User` was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            sex: user.sex.to_string(),
            role: user.role.to_string(),
            birth_date: user.birth_date.map(|d| d.to_rfc3339()),
            is_super_admin: user.is_super_admin,
            is_active: user.is_active,
            created_at: user.created_at.coerce(),
        }
    }
}

/// Short form of a `User`, as listed by lookups.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Unique identifier of the `User`.
    pub id: Uuid,

    /// First name of the `User`.
    pub first_name: String,

    /// Last name of the `User`.
    pub last_name: String,
}

impl From<domain::User> for Summary {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
        }
    }
}

/// Lists administrators visible to the authorized caller.
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
/// - `INTERNAL_SERVER_ERROR` - the storage failed to answer.
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn admins(
    ctx: Context,
    Query(params): Query<Params>,
) -> Result<Page<User>, Error> {
    list(&ctx, Role::Admin, &params).await
}

/// Lists doctors visible to the authorized caller.
///
/// # Errors
///
/// See [`admins()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn doctors(
    ctx: Context,
    Query(params): Query<Params>,
) -> Result<Page<User>, Error> {
    list(&ctx, Role::Doctor, &params).await
}

/// Lists patients visible to the authorized caller.
///
/// # Errors
///
/// See [`admins()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn patients(
    ctx: Context,
    Query(params): Query<Params>,
) -> Result<Page<User>, Error> {
    list(&ctx, Role::Patient, &params).await
}

/// Executes the [`users::List`] query of `User`s with the provided [`Role`].
async fn list(
    ctx: &Context,
    role: Role,
    params: &Params,
) -> Result<Page<User>, Error> {
    ctx.service()
        .execute(users::List {
            caller: ctx.caller(),
            role,
            query: read::user::list::Query::parse(params),
        })
        .await
        .map(|page| Json(page.map(User::from)))
        .map_err(AsError::into_error)
}

/// Lists every active administrator visible to the authorized caller,
/// ordered by name.
///
/// # Errors
///
/// See [`admins()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn all_admins(ctx: Context) -> Result<Json<Vec<Summary>>, Error> {
    list_all(&ctx, Role::Admin).await
}

/// Lists every active doctor visible to the authorized caller, ordered by
/// name.
///
/// # Errors
///
/// See [`admins()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn all_doctors(ctx: Context) -> Result<Json<Vec<Summary>>, Error> {
    list_all(&ctx, Role::Doctor).await
}

/// Lists every active patient visible to the authorized caller, ordered by
/// name.
///
/// # Errors
///
/// See [`admins()`].
#[tracing::instrument(skip_all, fields(caller = %ctx.caller().id))]
pub async fn all_patients(ctx: Context) -> Result<Json<Vec<Summary>>, Error> {
    list_all(&ctx, Role::Patient).await
}

/// Executes the [`users::ListAll`] query of `User`s with the provided
/// [`Role`].
async fn list_all(
    ctx: &Context,
    role: Role,
) -> Result<Json<Vec<Summary>>, Error> {
    ctx.service()
        .execute(users::ListAll {
            caller: ctx.caller(),
            role,
        })
        .await
        .map(|all| Json(all.into_iter().map(Summary::from).collect()))
        .map_err(AsError::into_error)
}

impl AsError for users::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
