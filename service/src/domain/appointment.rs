//! [`Appointment`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Visit of a patient to the clinic.
#[derive(Clone, Debug)]
pub struct Appointment {
    /// ID of this [`Appointment`].
    pub id: Id,

    /// Human-readable [`Number`] of this [`Appointment`].
    pub number: Number,

    /// [`DateTime`] this [`Appointment`] is scheduled on.
    pub date: ScheduleDateTime,

    /// [`Status`] of this [`Appointment`].
    pub status: Status,

    /// Patient [`Party`] of this [`Appointment`].
    pub patient: Party,

    /// Doctor [`Party`] of this [`Appointment`], if already assigned.
    pub doctor: Option<Party>,

    /// [`DateTime`] when this [`Appointment`] was created.
    pub created_at: CreationDateTime,
}

/// [`User`] taking part in an [`Appointment`].
#[derive(Clone, Debug)]
pub struct Party {
    /// ID of the [`User`].
    pub id: user::Id,

    /// First name of the [`User`].
    pub first_name: user::Name,

    /// Last name of the [`User`].
    pub last_name: user::Name,
}

/// ID of an [`Appointment`].
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

/// Sequential number of an [`Appointment`].
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Number(i32);

define_kind! {
    #[doc = "Status of an `Appointment`."]
    enum Status {
        #[doc = "Requested by a patient, not reviewed yet."]
        Pending = 1,

        #[doc = "Approved by the clinic."]
        Approved = 2,

        #[doc = "Took place."]
        Completed = 3,

        #[doc = "Cancelled by a patient."]
        Cancelled = 4,

        #[doc = "Rejected by the clinic."]
        Rejected = 5,
    }
}

/// [`DateTime`] an [`Appointment`] is scheduled on.
pub type ScheduleDateTime = DateTimeOf<(Appointment, unit::Schedule)>;

/// [`DateTime`] when an [`Appointment`] was created.
pub type CreationDateTime = DateTimeOf<(Appointment, unit::Creation)>;
