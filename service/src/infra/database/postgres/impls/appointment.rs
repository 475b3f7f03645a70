//! [`Appointment`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{appointment::Party, Appointment},
    infra::{
        database::{
            self,
            postgres::{sql, Connection},
            Postgres,
        },
        Database,
    },
    read::{self, appointment::list::Field},
};

/// [`Appointment`]s joined with their parties.
const FROM: &str = "\
    SELECT a.id, a.number, a.date, a.status, a.created_at, \
           p.id AS patient_id, \
           p.first_name AS patient_first_name, \
           p.last_name AS patient_last_name, \
           d.id AS doctor_id, \
           d.first_name AS doctor_first_name, \
           d.last_name AS doctor_last_name \
    FROM appointments a \
    INNER JOIN users p ON p.id = a.patient_id \
    LEFT JOIN users d ON d.id = a.doctor_id";

impl sql::Column for Field {
    fn column(self) -> &'static str {
        match self {
            Self::Id => "a.id",
            Self::Number => "a.number",
            Self::Date => "a.date",
            Self::Status => "a.status",
            Self::PatientId => "a.patient_id",
            Self::PatientFirstName => "p.first_name",
            Self::PatientLastName => "p.last_name",
            Self::DoctorId => "a.doctor_id",
            Self::DoctorFirstName => "d.first_name",
            Self::DoctorLastName => "d.last_name",
            Self::CreatedAt => "a.created_at",
        }
    }

    fn is_text(self) -> bool {
        matches!(
            self,
            Self::PatientFirstName
                | Self::PatientLastName
                | Self::DoctorFirstName
                | Self::DoctorLastName,
        )
    }
}

/// Reads an [`Appointment`] out of the provided [`Row`].
fn from_row(row: &Row) -> Appointment {
    Appointment {
        id: row.get("id"),
        number: row.get("number"),
        date: row.get("date"),
        status: row.get("status"),
        patient: Party {
            id: row.get("patient_id"),
            first_name: row.get("patient_first_name"),
            last_name: row.get("patient_last_name"),
        },
        doctor: row.get::<_, Option<_>>("doctor_id").map(|id| Party {
            id,
            first_name: row.get("doctor_first_name"),
            last_name: row.get("doctor_last_name"),
        }),
        created_at: row.get("created_at"),
    }
}

impl<C>
    Database<
        Select<
            By<
                read::appointment::list::Page,
                read::appointment::list::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
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

        let stmt = sql::Statement::select(FROM, &selector, Field::Id);
        let rows = self
            .query(&stmt.sql, &stmt.params())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::appointment::list::Page::from_window(
            rows.iter().map(from_row).collect(),
            &selector.arguments,
        ))
    }
}
