//! Read model shared by the documents attached to an [`Appointment`]:
//! [`Report`]s and [`Scan`]s.
//!
//! [`Appointment`]: crate::domain::Appointment
//! [`Report`]: crate::domain::Report
//! [`Scan`]: crate::domain::Scan

pub mod list {
    //! Documents list definitions.

    use common::{
        predicate::search, query, sort::Key, Direction, ListQuery, Predicate,
        Sort,
    };
    use strum::{Display, EnumString};
    use uuid::Uuid;

    use crate::domain::user;

    /// [`ListQuery`] over documents.
    ///
    /// Documents have no filters beyond the search.
    pub type Query = ListQuery<SortField, ()>;

    /// Selector of a documents page.
    pub type Selector = query::Selector<Field, SortField>;

    /// Field of a document visible to [`Predicate`]s and [`Sort`]s.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Field {
        /// ID of the document.
        Id,

        /// Title of the document.
        Title,

        /// ID of the patient of the document's appointment.
        PatientId,

        /// ID of the doctor of the document's appointment.
        DoctorId,

        /// Creation date of the document.
        CreatedAt,
    }

    /// Field a documents list may be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "camelCase")]
    pub enum SortField {
        /// Title.
        Name,

        /// Creation date.
        CreatedAt,
    }

    impl Key<Field> for SortField {
        fn fields(&self) -> &'static [Field] {
            match self {
                Self::Name => &[Field::Title],
                Self::CreatedAt => &[Field::CreatedAt],
            }
        }
    }

    /// [`SortField`]s a documents list may be sorted by.
    pub const SORTABLE: &[SortField] = &[SortField::Name, SortField::CreatedAt];

    /// [`Sort`] applied when none (or a non-sortable one) is requested.
    pub const DEFAULT_SORT: Sort<SortField> =
        Sort::new(SortField::CreatedAt, Direction::Descending);

    /// Builds a [`Predicate`] of the user-supplied part of the [`Query`]:
    /// its title search, narrowed to the documents of the `patient`, if any.
    #[must_use]
    pub fn predicate(
        query: &Query,
        patient: Option<user::Id>,
    ) -> Predicate<Field> {
        Predicate::equals_opt(Field::PatientId, patient.map(Uuid::from))
            .and(search(query.search.as_ref(), &[Field::Title], &[]))
    }

    #[cfg(test)]
    mod tests {
        use common::{Direction, Params, Predicate, Sort};
        use uuid::Uuid;

        use crate::domain::user;

        use super::{Field, Query, SortField, DEFAULT_SORT, SORTABLE};

        fn query(pairs: &[(&str, &str)]) -> Query {
            Query::parse(
                &pairs
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect::<Params>(),
            )
        }

        #[test]
        fn searches_title_of_patient_documents() {
            let patient = user::Id::new();
            let q = query(&[("value", "chest x-ray")]);

            assert_eq!(
                super::predicate(&q, Some(patient)),
                Predicate::And(vec![
                    Predicate::Equals(
                        Field::PatientId,
                        Uuid::from(patient).into(),
                    ),
                    Predicate::Or(vec![
                        Predicate::Contains(Field::Title, "chest".into()),
                        Predicate::Contains(Field::Title, "x-ray".into()),
                    ]),
                ]),
            );
            assert_eq!(super::predicate(&query(&[]), None), Predicate::Always);
        }

        #[test]
        fn sorts_by_name_or_creation() {
            assert_eq!(
                query(&[("sort", "name-asc")]).sort(SORTABLE, DEFAULT_SORT),
                Sort::new(SortField::Name, Direction::Ascending),
            );
            assert_eq!(
                query(&[("sort", "birthDate-asc")])
                    .sort(SORTABLE, DEFAULT_SORT),
                DEFAULT_SORT,
            );
        }
    }
}
