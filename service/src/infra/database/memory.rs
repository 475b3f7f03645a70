//! In-memory [`Database`] implementation.

use std::sync::Arc;

use common::operations::{By, Select};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{user, Appointment, Report, Scan, User},
    infra::database::{self, Database},
    read,
};

/// In-memory [`Database`] evaluating [`Selector`]s over the whole collection.
///
/// Clones share the same records.
///
/// [`Selector`]: common::query::Selector
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Stored [`User`]s.
    users: Arc<RwLock<Vec<User>>>,

    /// Stored [`Appointment`]s.
    appointments: Arc<RwLock<Vec<Appointment>>>,

    /// Stored [`Report`]s.
    reports: Arc<RwLock<Vec<Report>>>,

    /// Stored [`Scan`]s.
    scans: Arc<RwLock<Vec<Scan>>>,
}

impl InMemory {
    /// Creates a new [`InMemory`] [`Database`] holding the provided records.
    #[must_use]
    pub fn with(
        users: impl IntoIterator<Item = User>,
        appointments: impl IntoIterator<Item = Appointment>,
    ) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
            appointments: Arc::new(RwLock::new(
                appointments.into_iter().collect(),
            )),
            ..Self::default()
        }
    }

    /// Stores the provided [`User`], replacing the one with the same
    /// [`user::Id`], if any.
    pub async fn put_user(&self, user: User) {
        let mut users = self.users.write().await;
        users.retain(|u| u.id != user.id);
        users.push(user);
    }

    /// Stores the provided [`Appointment`], replacing the one with the same
    /// ID, if any.
    pub async fn put_appointment(&self, appointment: Appointment) {
        let mut appointments = self.appointments.write().await;
        appointments.retain(|a| a.id != appointment.id);
        appointments.push(appointment);
    }

    /// Stores the provided [`Report`], replacing the one with the same ID,
    /// if any.
    pub async fn put_report(&self, report: Report) {
        let mut reports = self.reports.write().await;
        reports.retain(|r| r.id != report.id);
        reports.push(report);
    }

    /// Stores the provided [`Scan`], replacing the one with the same ID, if
    /// any.
    pub async fn put_scan(&self, scan: Scan) {
        let mut scans = self.scans.write().await;
        scans.retain(|s| s.id != scan.id);
        scans.push(scan);
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for InMemory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }
}

impl Database<Select<By<read::user::list::Page, read::user::list::Selector>>>
    for InMemory
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
        let users = self.users.read().await;
        Ok(selector.apply(users.iter().cloned()))
    }
}

impl
    Database<
        Select<
            By<
                read::appointment::list::Page,
                read::appointment::list::Selector,
            >,
        >,
    > for InMemory
{
    type Ok = read::appointment::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::appointment::list::Page,
                read::appointment::list::Selector,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let appointments = self.appointments.read().await;
        Ok(selector.apply(appointments.iter().cloned()))
    }
}

impl Database<Select<By<Vec<User>, read::user::lookup::Selector>>>
    for InMemory
{
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<User>, read::user::lookup::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let users = self.users.read().await;
        Ok(selector.apply(users.iter().cloned()))
    }
}

impl
    Database<
        Select<By<read::report::list::Page, read::report::list::Selector>>,
    > for InMemory
{
    type Ok = read::report::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::report::list::Page, read::report::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let reports = self.reports.read().await;
        Ok(selector.apply(reports.iter().cloned()))
    }
}

impl Database<Select<By<read::scan::list::Page, read::scan::list::Selector>>>
    for InMemory
{
    type Ok = read::scan::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::scan::list::Page, read::scan::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let scans = self.scans.read().await;
        Ok(selector.apply(scans.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use common::operations::{By, Select};
    use futures::executor::block_on;

    use crate::{
        domain::{appointment::Status, user::Role, User},
        infra::Database as _,
        test_support::{appointment, deactivated, member},
    };

    use super::InMemory;

    #[test]
    fn put_replaces_record_with_same_id() {
        let db = InMemory::default();
        let jane = member("Jane", "Doe", Role::Patient, 1);

        block_on(db.put_user(jane.clone()));
        block_on(db.put_user(deactivated(jane.clone())));
        block_on(db.put_appointment(appointment(
            1,
            &jane,
            None,
            Status::Pending,
        )));

        let found = block_on(
            db.execute(Select(By::<Option<User>, _>::new(jane.id))),
        )
        .unwrap()
        .unwrap();
        assert!(!found.is_active);
        assert_eq!(block_on(db.users.read()).len(), 1);
        assert_eq!(block_on(db.appointments.read()).len(), 1);
    }
}
