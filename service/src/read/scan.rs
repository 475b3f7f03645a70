//! [`Scan`] read model definition.
//!
//! [`Scan`]: crate::domain::Scan

pub mod list {
    //! [`Scan`]s list definitions.

    use common::{pagination, Record, Value};
    use uuid::Uuid;

    pub use crate::read::document::list::{
        predicate, Field, Query, Selector, SortField, DEFAULT_SORT, SORTABLE,
    };
    use crate::domain::{scan, Scan};

    /// Page of [`Scan`]s.
    pub type Page = pagination::Page<Scan>;

    impl Record<Field> for Scan {
        type Id = scan::Id;

        fn id(&self) -> scan::Id {
            self.id
        }

        fn value(&self, field: Field) -> Value {
            match field {
                Field::Id => Uuid::from(self.id).into(),
                Field::Title => self.title.as_str().into(),
                Field::PatientId => Uuid::from(self.patient_id).into(),
                Field::DoctorId => self.doctor_id.map(Uuid::from).into(),
                Field::CreatedAt => self.created_at.into(),
            }
        }
    }
}
