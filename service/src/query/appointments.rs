//! [`Query`] collection related to the multiple [`Appointment`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Appointment;
use crate::{
    infra::{database, Database},
    read::appointment::list::{self, Page, Selector},
    visibility::Caller,
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`Appointment`]s, as seen by the [`Caller`].
#[derive(Clone, Debug)]
pub struct List {
    /// [`Caller`] requesting the list.
    pub caller: Caller,

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
        let List { caller, query } = q;

        let selector = Selector {
            predicate: caller
                .appointments()
                .and(list::predicate(&query, caller.id)),
            sort: query.sort(list::SORTABLE, list::DEFAULT_SORT),
            arguments: query.arguments,
        };
        log::debug!(
            "listing appointments for `User(id: {})`: sort `{}-{}`, \
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

/// Error of [`List`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
