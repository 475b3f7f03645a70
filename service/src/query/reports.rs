//! [`Query`] collection related to the multiple [`Report`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Report;
use crate::{
    domain::user,
    infra::{database, Database},
    read::report::list::{self, Page, Selector},
    visibility::Caller,
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`Report`]s, as seen by the [`Caller`].
#[derive(Clone, Debug)]
pub struct List {
    /// [`Caller`] requesting the list.
    pub caller: Caller,

    /// ID of the patient to list the [`Report`]s of, if any.
    pub patient: Option<user::Id>,

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
            patient,
            query,
        } = q;

        let selector = Selector {
            predicate: caller
                .documents()
                .and(list::predicate(&query, patient)),
            sort: query.sort(list::SORTABLE, list::DEFAULT_SORT),
            arguments: query.arguments,
        };
        log::debug!(
            "listing reports for `User(id: {})`: sort `{}-{}`, \
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

#[cfg(test)]
mod tests {
    use common::Params;
    use futures::executor::block_on;

    use crate::{
        domain::{appointment::Status, user::Role, User},
        infra::InMemory,
        query::Query as _,
        read::report::list::{self, Page},
        test_support::{appointment, member, report, service},
        visibility::Caller,
    };

    use super::List;

    fn list(
        db: &InMemory,
        caller: Caller,
        patient: Option<&User>,
        pairs: &[(&str, &str)],
    ) -> Page {
        let params = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<Params>();
        block_on(service(db.clone()).execute(List {
            caller,
            patient: patient.map(|p| p.id),
            query: list::Query::parse(&params),
        }))
        .unwrap()
    }

    fn titles(page: &Page) -> Vec<String> {
        page.items.iter().map(|r| r.title.clone()).collect()
    }

    fn as_caller(user: &User) -> Caller {
        Caller {
            id: user.id,
            role: user.role,
            is_super_admin: user.is_super_admin,
        }
    }

    #[test]
    fn scopes_reports_by_caller_and_patient() {
        let house = member("Gregory", "House", Role::Doctor, 1);
        let jane = member("Jane", "Doe", Role::Patient, 2);
        let john = member("John", "Roe", Role::Patient, 3);
        let admin = member("Lisa", "Cuddy", Role::Admin, 4);
        let db = InMemory::default();
        for (n, (title, patient, doctor)) in [
            ("Blood panel", &jane, Some(&house)),
            ("Chest X-ray", &john, Some(&house)),
            ("Allergy test", &john, None),
        ]
        .into_iter()
        .enumerate()
        {
            let a = appointment(1, patient, doctor, Status::Completed);
            block_on(db.put_report(report(title, &a, n.try_into().unwrap())));
        }

        assert_eq!(
            titles(&list(&db, as_caller(&admin), None, &[])),
            ["Allergy test", "Chest X-ray", "Blood panel"],
        );
        assert_eq!(
            titles(&list(&db, as_caller(&admin), Some(&john), &[])),
            ["Allergy test", "Chest X-ray"],
        );
        assert_eq!(
            titles(&list(&db, as_caller(&house), Some(&john), &[])),
            ["Chest X-ray"],
        );
        assert_eq!(
            titles(&list(&db, as_caller(&jane), Some(&john), &[])),
            Vec::<String>::new(),
        );
    }

    #[test]
    fn searches_and_sorts_by_title() {
        let jane = member("Jane", "Doe", Role::Patient, 1);
        let a = appointment(1, &jane, None, Status::Completed);
        let db = InMemory::default();
        for (n, title) in ["MRI knee", "Blood panel", "MRI brain"]
            .into_iter()
            .enumerate()
        {
            block_on(db.put_report(report(title, &a, n.try_into().unwrap())));
        }

        assert_eq!(
            titles(&list(
                &db,
                as_caller(&jane),
                None,
                &[("value", "mri"), ("sort", "name-asc")],
            )),
            ["MRI brain", "MRI knee"],
        );
    }
}
