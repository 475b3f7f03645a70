//! [`Report`] read model definition.
//!
//! [`Report`]: crate::domain::Report

pub mod list {
    //! [`Report`]s list definitions.

    use common::{pagination, Record, Value};
    use uuid::Uuid;

    pub use crate::read::document::list::{
        predicate, Field, Query, Selector, SortField, DEFAULT_SORT, SORTABLE,
    };
    use crate::domain::{report, Report};

    /// Page of [`Report`]s.
    pub type Page = pagination::Page<Report>;

    impl Record<Field> for Report {
        type Id = report::Id;

        fn id(&self) -> report::Id {
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
