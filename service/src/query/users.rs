//! [`Query`] collection related to the multiple [`User`]s.

use common::{
    operations::{By, Select},
    Predicate,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    read::user::{
        list::{self, Field, Page, Selector},
        lookup,
    },
    visibility::Caller,
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`User`]s with the specified [`user::Role`], as
/// seen by the [`Caller`].
#[derive(Clone, Debug)]
pub struct List {
    /// [`Caller`] requesting the list.
    pub caller: Caller,

    /// [`user::Role`] of the listed [`User`]s.
    pub role: user::Role,

    /// Parsed list query.
    pub query: list::Query,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<Page, Selector>>,
        Ok = Page,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, q: List) -> Result<Self::Ok, Self::Err> {
        let List {
            caller,
            role,
            query,
        } = q;

        let selector = Selector {
            predicate: caller.users(role).and(list::predicate(&query)),
            sort: query.sort(list::SORTABLE, list::DEFAULT_SORT),
            arguments: query.arguments,
        };
        log::debug!(
            "listing `{role}` users for `User(id: {})`: sort `{}-{}`, \
             page {}, limit {}",
            caller.id,
            selector.sort.field,
            selector.sort.direction,
            selector.arguments.page,
            selector.arguments.limit,
        );

        self.database()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Queries every active [`User`] with the specified [`user::Role`], as seen
/// by the [`Caller`], ordered by name.
///
/// Unlike [`List`], takes no list query and answers no [`Page`]: this is a
/// lookup for pickers.
#[derive(Clone, Copy, Debug)]
pub struct ListAll {
    /// [`Caller`] requesting the list.
    pub caller: Caller,

    /// [`user::Role`] of the listed [`User`]s.
    pub role: user::Role,
}

impl<Db> Query<ListAll> for Service<Db>
where
    Db: Database<
        Select<By<Vec<User>, lookup::Selector>>,
        Ok = Vec<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, q: ListAll) -> Result<Self::Ok, Self::Err> {
        let ListAll { caller, role } = q;

        let selector = lookup::Selector {
            predicate: caller
                .users(role)
                .and(Predicate::Equals(Field::IsActive, true.into())),
            sort: lookup::SORT,
        };
        log::debug!(
            "looking up all `{role}` users for `User(id: {})`",
            caller.id,
        );

        self.database()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`List`] and [`ListAll`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
