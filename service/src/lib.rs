//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod visibility;

use derive_more::Debug;

#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query, visibility::Caller};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }
}

#[cfg(test)]
mod test_support {
    //! Fixtures shared by tests.

    use std::time::Duration;

    use common::DateTime;

    use crate::{
        domain::{
            appointment::{self, Party},
            report, scan,
            user::{self, Email, Name},
            Appointment, Report, Scan, User,
        },
        Caller, Config, Service,
    };

    #[cfg(feature = "postgres")]
    pub(crate) use self::failing::Failing;

    /// Creates a new [`Service`] accepting tokens signed with `secret`.
    pub(crate) fn service<Db>(database: Db) -> Service<Db> {
        Service::new(
            Config {
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
            },
            database,
        )
    }

    /// Creates a new [`Caller`] with a random ID.
    pub(crate) fn caller(role: user::Role, is_super_admin: bool) -> Caller {
        Caller {
            id: user::Id::new(),
            role,
            is_super_admin,
        }
    }

    /// Creates a new active verified male [`User`], created `created_at`
    /// seconds after the Unix epoch.
    pub(crate) fn member(
        first_name: &str,
        last_name: &str,
        role: user::Role,
        created_at: i64,
    ) -> User {
        User {
            id: user::Id::new(),
            first_name: Name::new(first_name).unwrap(),
            last_name: Name::new(last_name).unwrap(),
            email: Email::new(
                format!("{first_name}.{last_name}@clinic.test").to_lowercase(),
            )
            .unwrap(),
            sex: user::Sex::Male,
            role,
            birth_date: None,
            is_super_admin: false,
            is_active: true,
            is_email_verified: true,
            created_at: DateTime::from_unix_timestamp(created_at)
                .unwrap()
                .coerce(),
        }
    }

    /// Marks the provided [`User`] as deactivated.
    pub(crate) fn deactivated(user: User) -> User {
        User {
            is_active: false,
            ..user
        }
    }

    /// Creates a new [`Appointment`] with the provided `number`, scheduled on
    /// the `number`-th day since the Unix epoch.
    pub(crate) fn appointment(
        number: i32,
        patient: &User,
        doctor: Option<&User>,
        status: appointment::Status,
    ) -> Appointment {
        let party = |u: &User| Party {
            id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
        };
        let days = u64::try_from(number - 1).unwrap();
        Appointment {
            id: appointment::Id::new(),
            number: number.into(),
            date: (DateTime::UNIX_EPOCH
                + Duration::from_secs(days * 24 * 60 * 60))
            .coerce(),
            status,
            patient: party(patient),
            doctor: doctor.map(party),
            created_at: DateTime::from_unix_timestamp(number.into())
                .unwrap()
                .coerce(),
        }
    }

    /// Creates a new initial [`Report`] of the provided [`Appointment`],
    /// created `created_at` seconds after the Unix epoch.
    pub(crate) fn report(
        title: &str,
        appointment: &Appointment,
        created_at: i64,
    ) -> Report {
        Report {
            id: report::Id::new(),
            appointment_id: appointment.id,
            patient_id: appointment.patient.id,
            doctor_id: appointment.doctor.as_ref().map(|d| d.id),
            title: title.to_owned(),
            status: report::Status::Initial,
            notes: None,
            file_name: format!("{title}.pdf"),
            created_at: DateTime::from_unix_timestamp(created_at)
                .unwrap()
                .coerce(),
        }
    }

    /// Creates a new CT [`Scan`] of the provided [`Appointment`], created
    /// `created_at` seconds after the Unix epoch.
    pub(crate) fn scan(
        title: &str,
        appointment: &Appointment,
        created_at: i64,
    ) -> Scan {
        Scan {
            id: scan::Id::new(),
            appointment_id: appointment.id,
            patient_id: appointment.patient.id,
            doctor_id: appointment.doctor.as_ref().map(|d| d.id),
            title: title.to_owned(),
            notes: String::new(),
            modality: "CT".to_owned(),
            created_at: DateTime::from_unix_timestamp(created_at)
                .unwrap()
                .coerce(),
        }
    }

    #[cfg(feature = "postgres")]
    mod failing {
        //! [`Failing`] storage definitions.

        use common::operations::{By, Select};
        use tracerr::Traced;

        use crate::{
            infra::{
                database::{self, postgres},
                Database,
            },
            read,
        };

        /// Storage failing every list selection.
        #[derive(Clone, Copy, Debug)]
        pub(crate) struct Failing;

        /// Returns an error of an unavailable storage.
        fn unavailable() -> Traced<database::Error> {
            tracerr::new!(database::Error::from(postgres::Error::from(
                postgres::connection::PoolError::Closed,
            )))
        }

        impl
            Database<
                Select<By<read::user::list::Page, read::user::list::Selector>>,
            > for Failing
        {
            type Ok = read::user::list::Page;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                _: Select<
                    By<read::user::list::Page, read::user::list::Selector>,
                >,
            ) -> Result<Self::Ok, Self::Err> {
                Err(unavailable())
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
            > for Failing
        {
            type Ok = read::appointment::list::Page;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                _: Select<
                    By<
                        read::appointment::list::Page,
                        read::appointment::list::Selector,
                    >,
                >,
            ) -> Result<Self::Ok, Self::Err> {
                Err(unavailable())
            }
        }
    }
}
