//! [`Report`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{appointment, user};
#[cfg(doc)]
use crate::domain::Appointment;

/// Medical report issued within an [`Appointment`].
#[derive(Clone, Debug)]
pub struct Report {
    /// ID of this [`Report`].
    pub id: Id,

    /// ID of the [`Appointment`] this [`Report`] belongs to.
    pub appointment_id: appointment::Id,

    /// ID of the patient of the [`Appointment`].
    pub patient_id: user::Id,

    /// ID of the doctor of the [`Appointment`], if assigned.
    pub doctor_id: Option<user::Id>,

    /// Title of this [`Report`].
    pub title: String,

    /// Processing [`Status`] of this [`Report`].
    pub status: Status,

    /// Free-form notes on this [`Report`], if any.
    pub notes: Option<String>,

    /// Name of the uploaded file of this [`Report`].
    pub file_name: String,

    /// [`DateTime`] when this [`Report`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Report`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Processing status of a `Report`."]
    enum Status {
        #[doc = "Uploaded, not processed yet."]
        Initial = 1,

        #[doc = "Processed successfully."]
        Processed = 2,

        #[doc = "Processing failed."]
        Failed = 3,
    }
}

/// [`DateTime`] when a [`Report`] was created.
pub type CreationDateTime = DateTimeOf<(Report, unit::Creation)>;
