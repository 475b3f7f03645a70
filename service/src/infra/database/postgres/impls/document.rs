//! [`Report`]- and [`Scan`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{Report, Scan},
    infra::{
        database::{
            self,
            postgres::{sql, Connection},
            Postgres,
        },
        Database,
    },
    read::{self, document::list::Field},
};

/// Columns of an [`Appointment`] a document is scoped by.
///
/// [`Appointment`]: crate::domain::Appointment
const SCOPE: &str = "a.patient_id, a.doctor_id";

impl sql::Column for Field {
    fn column(self) -> &'static str {
        match self {
            Self::Id => "d.id",
            Self::Title => "d.title",
            Self::PatientId => "a.patient_id",
            Self::DoctorId => "a.doctor_id",
            Self::CreatedAt => "d.created_at",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::Title)
    }
}

/// Builds a `FROM` SQL query selecting the `columns` of the documents stored
/// in the `table`, joined with their [`Appointment`]s.
///
/// [`Appointment`]: crate::domain::Appointment
fn from(table: &str, columns: &str) -> String {
    format!(
        "SELECT {columns}, {SCOPE} \
         FROM {table} d \
         INNER JOIN appointments a ON a.id = d.appointment_id",
    )
}

/// Reads a [`Report`] out of the provided [`Row`].
fn report_from_row(row: &Row) -> Report {
    Report {
        id: row.get("id"),
        appointment_id: row.get("appointment_id"),
        patient_id: row.get("patient_id"),
        doctor_id: row.get("doctor_id"),
        title: row.get("title"),
        status: row.get("status"),
        notes: row.get("notes"),
        file_name: row.get("file_name"),
        created_at: row.get("created_at"),
    }
}

/// Reads a [`Scan`] out of the provided [`Row`].
fn scan_from_row(row: &Row) -> Scan {
    Scan {
        id: row.get("id"),
        appointment_id: row.get("appointment_id"),
        patient_id: row.get("patient_id"),
        doctor_id: row.get("doctor_id"),
        title: row.get("title"),
        notes: row.get("notes"),
        modality: row.get("modality"),
        created_at: row.get("created_at"),
    }
}

impl<C>
    Database<
        Select<By<read::report::list::Page, read::report::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
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

        let stmt = sql::Statement::select(
            &from(
                "reports",
                "d.id, d.appointment_id, d.title, d.status, d.notes, \
                 d.file_name, d.created_at",
            ),
            &selector,
            Field::Id,
        );
        let rows = self
            .query(&stmt.sql, &stmt.params())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::report::list::Page::from_window(
            rows.iter().map(report_from_row).collect(),
            &selector.arguments,
        ))
    }
}

impl<C>
    Database<Select<By<read::scan::list::Page, read::scan::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
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

        let stmt = sql::Statement::select(
            &from(
                "scans",
                "d.id, d.appointment_id, d.title, d.notes, d.modality, \
                 d.created_at",
            ),
            &selector,
            Field::Id,
        );
        let rows = self
            .query(&stmt.sql, &stmt.params())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::scan::list::Page::from_window(
            rows.iter().map(scan_from_row).collect(),
            &selector.arguments,
        ))
    }
}
