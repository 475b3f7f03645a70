//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{
            self,
            postgres::{sql, Connection},
            Postgres,
        },
        Database,
    },
    read::{self, user::list::Field},
};

/// Columns selected for a [`User`].
const COLUMNS: &str = "\
    u.id, u.first_name, u.last_name, u.email, \
    u.sex, u.role, u.birth_date, \
    u.is_super_admin, u.is_active, u.is_email_verified, \
    u.created_at";

impl sql::Column for Field {
    fn column(self) -> &'static str {
        match self {
            Self::Id => "u.id",
            Self::FirstName => "u.first_name",
            Self::LastName => "u.last_name",
            Self::Email => "u.email",
            Self::Sex => "u.sex",
            Self::Role => "u.role",
            Self::BirthDate => "u.birth_date",
            Self::IsActive => "u.is_active",
            Self::IsEmailVerified => "u.is_email_verified",
            Self::CreatedAt => "u.created_at",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::FirstName | Self::LastName | Self::Email)
    }
}

/// Reads a [`User`] out of the provided [`Row`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        sex: row.get("sex"),
        role: row.get("role"),
        birth_date: row.get("birth_date"),
        is_super_admin: row.get("is_super_admin"),
        is_active: row.get("is_active"),
        is_email_verified: row.get("is_email_verified"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM users u \
             WHERE u.id = $1::UUID"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<read::user::list::Page, read::user::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::user::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::user::list::Page, read::user::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let stmt = sql::Statement::select(
            &format!("SELECT {COLUMNS} FROM users u"),
            &selector,
            Field::Id,
        );
        let rows = self
            .query(&stmt.sql, &stmt.params())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::user::list::Page::from_window(
            rows.iter().map(from_row).collect(),
            &selector.arguments,
        ))
    }
}

impl<C> Database<Select<By<Vec<User>, read::user::lookup::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<User>, read::user::lookup::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let stmt = sql::Statement::lookup(
            &format!("SELECT {COLUMNS} FROM users u"),
            &selector,
            Field::Id,
        );
        Ok(self
            .query(&stmt.sql, &stmt.params())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}
