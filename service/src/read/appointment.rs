//! [`Appointment`] read model definition.
//!
//! [`Appointment`]: crate::domain::Appointment

pub mod list {
    //! [`Appointment`]s list definitions.

    use common::{
        pagination,
        predicate::{search, Range},
        query::{self, enumeration},
        sort::Key,
        DateTime, Direction, ListQuery, Params, Predicate, Record, Sort,
        Value,
    };
    use strum::{Display, EnumString};
    use uuid::Uuid;

    use crate::domain::{appointment, user, Appointment};

    /// [`ListQuery`] over [`Appointment`]s.
    pub type Query = ListQuery<SortField, Filter>;

    /// Selector of an [`Appointment`]s [`Page`].
    pub type Selector = query::Selector<Field, SortField>;

    /// Page of [`Appointment`]s.
    pub type Page = pagination::Page<Appointment>;

    /// Field of an [`Appointment`] visible to [`Predicate`]s and [`Sort`]s.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`Appointment::id`].
        Id,

        /// [`Appointment::number`].
        Number,

        /// [`Appointment::date`].
        Date,

        /// [`Appointment::status`].
        Status,

        /// ID of the [`Appointment::patient`].
        PatientId,

        /// First name of the [`Appointment::patient`].
        PatientFirstName,

        /// Last name of the [`Appointment::patient`].
        PatientLastName,

        /// ID of the [`Appointment::doctor`].
        DoctorId,

        /// First name of the [`Appointment::doctor`].
        DoctorFirstName,

        /// Last name of the [`Appointment::doctor`].
        DoctorLastName,

        /// [`Appointment::created_at`].
        CreatedAt,
    }

    /// Field an [`Appointment`]s list may be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "camelCase")]
    pub enum SortField {
        /// Scheduled date.
        AppointmentDate,

        /// Sequential number.
        Number,

        /// Status.
        Status,

        /// Patient's first name, then last name.
        PatientName,

        /// Doctor's first name, then last name.
        DoctorName,

        /// Creation date.
        CreatedAt,
    }

    impl Key<Field> for SortField {
        fn fields(&self) -> &'static [Field] {
            match self {
                Self::AppointmentDate => &[Field::Date],
                Self::Number => &[Field::Number],
                Self::Status => &[Field::Status],
                Self::PatientName => {
                    &[Field::PatientFirstName, Field::PatientLastName]
                }
                Self::DoctorName => {
                    &[Field::DoctorFirstName, Field::DoctorLastName]
                }
                Self::CreatedAt => &[Field::CreatedAt],
            }
        }
    }

    /// [`SortField`]s an [`Appointment`]s list may be sorted by.
    pub const SORTABLE: &[SortField] = &[
        SortField::AppointmentDate,
        SortField::Number,
        SortField::Status,
        SortField::PatientName,
        SortField::DoctorName,
        SortField::CreatedAt,
    ];

    /// [`Sort`] applied when none (or a non-sortable one) is requested.
    pub const DEFAULT_SORT: Sort<SortField> =
        Sort::new(SortField::CreatedAt, Direction::Descending);

    /// [`Field`]s searched word by word.
    pub const NAME_FIELDS: &[Field] = &[
        Field::PatientFirstName,
        Field::PatientLastName,
        Field::DoctorFirstName,
        Field::DoctorLastName,
    ];

    /// Filter of an [`Appointment`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`appointment::Status`] to match, if any.
        pub status: Option<appointment::Status>,

        /// Earliest scheduled [`DateTime`] to match, inclusive.
        pub from: Option<DateTime>,

        /// Latest scheduled [`DateTime`] to match, inclusive.
        pub to: Option<DateTime>,

        /// Narrowing of the visible [`Appointment`]s, if any.
        pub visible: Option<Visible>,
    }

    /// Narrowing of the [`Appointment`]s a caller sees.
    ///
    /// Its absence (or the `all` value) keeps every visible [`Appointment`].
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case", ascii_case_insensitive)]
    pub enum Visible {
        /// Only the ones the caller takes part in, either as a patient or as
        /// a doctor.
        Yours,
    }

    impl query::Filter for Filter {
        fn from_params(params: &Params) -> Self {
            let date = |key: &str| {
                params
                    .get(key)
                    .and_then(|s| DateTime::from_rfc3339(s.trim()).ok())
            };
            Self {
                status: enumeration(params.get("status")),
                from: date("from"),
                to: date("to"),
                visible: enumeration(params.get("visible")),
            }
        }
    }

    impl Filter {
        /// Builds a [`Predicate`] of this [`Filter`] for the [`User`] with
        /// the provided ID.
        ///
        /// [`User`]: crate::domain::User
        #[must_use]
        pub fn predicate(&self, caller: user::Id) -> Predicate<Field> {
            let me = Value::from(Uuid::from(caller));
            Predicate::all([
                Predicate::equals_opt(Field::Status, self.status),
                Predicate::in_range(
                    Field::Date,
                    Range {
                        from: self.from.map(Value::from),
                        to: self.to.map(Value::from),
                    },
                ),
                match self.visible {
                    None => Predicate::Always,
                    Some(Visible::Yours) => Predicate::any([
                        Predicate::Equals(Field::DoctorId, me.clone()),
                        Predicate::Equals(Field::PatientId, me),
                    ]),
                },
            ])
        }
    }

    /// Builds a [`Predicate`] of the user-supplied part of the [`Query`]
    /// issued by the `caller`: its [`Filter`] and its search.
    #[must_use]
    pub fn predicate(query: &Query, caller: user::Id) -> Predicate<Field> {
        query.filter.predicate(caller).and(search(
            query.search.as_ref(),
            NAME_FIELDS,
            &[],
        ))
    }

    impl Record<Field> for Appointment {
        type Id = appointment::Id;

        fn id(&self) -> appointment::Id {
            self.id
        }

        fn value(&self, field: Field) -> Value {
            let doctor = self.doctor.as_ref();
            match field {
                Field::Id => Uuid::from(self.id).into(),
                Field::Number => i32::from(self.number).into(),
                Field::Date => self.date.into(),
                Field::Status => self.status.into(),
                Field::PatientId => Uuid::from(self.patient.id).into(),
                Field::PatientFirstName => {
                    self.patient.first_name.to_string().into()
                }
                Field::PatientLastName => {
                    self.patient.last_name.to_string().into()
                }
                Field::DoctorId => doctor.map(|d| Uuid::from(d.id)).into(),
                Field::DoctorFirstName => {
                    doctor.map(|d| d.first_name.to_string()).into()
                }
                Field::DoctorLastName => {
                    doctor.map(|d| d.last_name.to_string()).into()
                }
                Field::CreatedAt => self.created_at.into(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use common::{
            predicate::Range, DateTime, Direction, Params, Predicate, Sort,
            Value,
        };
        use uuid::Uuid;

        use crate::domain::{appointment, user};

        use super::{Field, Query, SortField, Visible, DEFAULT_SORT, SORTABLE};

        fn query(pairs: &[(&str, &str)]) -> Query {
            Query::parse(
                &pairs
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect::<Params>(),
            )
        }

        #[test]
        fn parses_date_range() {
            let q = query(&[
                ("from", "2024-03-01T00:00:00Z"),
                ("to", "soon"),
                ("status", "approved"),
            ]);
            let from = DateTime::from_rfc3339("2024-03-01T00:00:00Z").unwrap();

            assert_eq!(q.filter.status, Some(appointment::Status::Approved));
            assert_eq!(q.filter.to, None);
            assert_eq!(
                q.filter.predicate(user::Id::new()),
                Predicate::And(vec![
                    Predicate::Equals(
                        Field::Status,
                        appointment::Status::Approved.into(),
                    ),
                    Predicate::InRange(
                        Field::Date,
                        Range {
                            from: Some(Value::from(from)),
                            to: None,
                        },
                    ),
                ]),
            );
        }

        #[test]
        fn searches_both_parties_by_words() {
            let q = query(&[("search", "house")]);

            assert_eq!(
                super::predicate(&q, user::Id::new()),
                Predicate::Or(vec![
                    Predicate::Contains(Field::PatientFirstName, "house".into()),
                    Predicate::Contains(Field::PatientLastName, "house".into()),
                    Predicate::Contains(Field::DoctorFirstName, "house".into()),
                    Predicate::Contains(Field::DoctorLastName, "house".into()),
                ]),
            );
        }

        #[test]
        fn ignores_missing_and_all_filters() {
            let q = query(&[("status", "all")]);

            assert_eq!(
                super::predicate(&q, user::Id::new()),
                Predicate::Always,
            );
        }

        #[test]
        fn resolves_party_and_date_sorts() {
            for (raw, field) in [
                ("patientName-asc", SortField::PatientName),
                ("doctorName-asc", SortField::DoctorName),
                ("appointmentDate-asc", SortField::AppointmentDate),
            ] {
                assert_eq!(
                    query(&[("sort", raw)]).sort(SORTABLE, DEFAULT_SORT),
                    Sort::new(field, Direction::Ascending),
                    "{raw}",
                );
            }
            assert_eq!(
                query(&[("sort", "date-asc")]).sort(SORTABLE, DEFAULT_SORT),
                DEFAULT_SORT,
            );
        }

        #[test]
        fn narrows_to_own_appointments() {
            let me = user::Id::new();

            assert_eq!(
                query(&[("visible", "yours")]).filter.visible,
                Some(Visible::Yours),
            );
            assert_eq!(
                super::predicate(&query(&[("visible", "yours")]), me),
                Predicate::Or(vec![
                    Predicate::Equals(Field::DoctorId, Uuid::from(me).into()),
                    Predicate::Equals(Field::PatientId, Uuid::from(me).into()),
                ]),
            );
            assert_eq!(
                super::predicate(&query(&[("visible", "all")]), me),
                Predicate::Always,
            );
        }
    }
}
