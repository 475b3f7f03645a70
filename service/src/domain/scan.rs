//! [`Scan`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{appointment, user};
#[cfg(doc)]
use crate::domain::Appointment;

/// Imaging scan taken within an [`Appointment`].
#[derive(Clone, Debug)]
pub struct Scan {
    /// ID of this [`Scan`].
    pub id: Id,

    /// ID of the [`Appointment`] this [`Scan`] belongs to.
    pub appointment_id: appointment::Id,

    /// ID of the patient of the [`Appointment`].
    pub patient_id: user::Id,

    /// ID of the doctor of the [`Appointment`], if assigned.
    pub doctor_id: Option<user::Id>,

    /// Title of this [`Scan`].
    pub title: String,

    /// Free-form notes on this [`Scan`].
    pub notes: String,

    /// Imaging modality this [`Scan`] was taken with (`CT`, `MRI`, etc.).
    pub modality: String,

    /// [`DateTime`] when this [`Scan`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Scan`].
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

/// [`DateTime`] when a [`Scan`] was created.
pub type CreationDateTime = DateTimeOf<(Scan, unit::Creation)>;
