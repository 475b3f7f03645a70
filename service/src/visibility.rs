//! Visibility policy restricting the records a [`Caller`] may ever see.
//!
//! The policy is a pure function of the [`Caller`] identity. Its
//! [`Predicate`] is always combined with the user-supplied one as a separate
//! conjunct, so no filter or search can relax it.

use common::{Predicate, Value};
use uuid::Uuid;

use crate::{
    domain::user::{self, Session},
    read,
};

/// Identity of the one requesting a list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Caller {
    /// ID of the calling [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub id: user::Id,

    /// [`user::Role`] of the calling [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub role: user::Role,

    /// Indicator whether the calling [`User`] is a super administrator.
    ///
    /// [`User`]: crate::domain::User
    pub is_super_admin: bool,
}

impl From<Session> for Caller {
    fn from(session: Session) -> Self {
        Self {
            id: session.user_id,
            role: session.role,
            is_super_admin: session.is_super_admin,
        }
    }
}

impl Caller {
    /// Returns the [`Predicate`] of [`User`]s with the `listed`
    /// [`user::Role`] this [`Caller`] may see.
    ///
    /// - Only verified [`User`]s are ever listed.
    /// - Only super administrators see deactivated [`User`]s.
    /// - Only administrators see other administrators.
    /// - Patients see no other patients.
    ///
    /// [`User`]: crate::domain::User
    #[must_use]
    pub fn users(
        &self,
        listed: user::Role,
    ) -> Predicate<read::user::list::Field> {
        use read::user::list::Field as F;
        use user::Role as R;

        let scope = match (self.role, listed) {
            (R::Admin, _)
            | (R::Doctor | R::Patient, R::Doctor)
            | (R::Doctor, R::Patient) => Predicate::Always,
            (R::Doctor | R::Patient, R::Admin) => Predicate::Never,
            (R::Patient, R::Patient) => {
                Predicate::Equals(F::Id, Uuid::from(self.id).into())
            }
        };

        Predicate::all([
            Predicate::Equals(F::Role, listed.into()),
            Predicate::Equals(F::IsEmailVerified, true.into()),
            if self.is_super_admin {
                Predicate::Always
            } else {
                Predicate::Equals(F::IsActive, true.into())
            },
            scope,
        ])
    }

    /// Returns the [`Predicate`] of [`Appointment`]s this [`Caller`] may see.
    ///
    /// Administrators see every [`Appointment`], doctors see the ones
    /// assigned to them or to nobody yet, and patients see their own ones.
    ///
    /// [`Appointment`]: crate::domain::Appointment
    #[must_use]
    pub fn appointments(&self) -> Predicate<read::appointment::list::Field> {
        use read::appointment::list::Field as F;

        let me = Value::from(Uuid::from(self.id));
        match self.role {
            user::Role::Admin => Predicate::Always,
            user::Role::Doctor => Predicate::any([
                Predicate::Equals(F::DoctorId, me),
                Predicate::Equals(F::DoctorId, Value::Null),
            ]),
            user::Role::Patient => Predicate::Equals(F::PatientId, me),
        }
    }

    /// Returns the [`Predicate`] of documents ([`Report`]s and [`Scan`]s)
    /// this [`Caller`] may see.
    ///
    /// Administrators see every document, doctors see the ones of the
    /// [`Appointment`]s assigned to them, and patients see their own ones.
    ///
    /// [`Appointment`]: crate::domain::Appointment
    /// [`Report`]: crate::domain::Report
    /// [`Scan`]: crate::domain::Scan
    #[must_use]
    pub fn documents(&self) -> Predicate<read::document::list::Field> {
        use read::document::list::Field as F;

        let me = Value::from(Uuid::from(self.id));
        match self.role {
            user::Role::Admin => Predicate::Always,
            user::Role::Doctor => Predicate::Equals(F::DoctorId, me),
            user::Role::Patient => Predicate::Equals(F::PatientId, me),
        }
    }
}
