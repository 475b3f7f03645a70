//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use common::{
        pagination,
        predicate::search,
        query::{self, enumeration},
        sort::Key,
        Direction, ListQuery, Params, Predicate, Record, Sort, Value,
    };
    use strum::{Display, EnumString};
    use uuid::Uuid;

    use crate::domain::{user, User};

    /// [`ListQuery`] over [`User`]s.
    pub type Query = ListQuery<SortField, Filter>;

    /// Selector of a [`User`]s [`Page`].
    pub type Selector = query::Selector<Field, SortField>;

    /// Page of [`User`]s.
    pub type Page = pagination::Page<User>;

    /// Field of a [`User`] visible to [`Predicate`]s and [`Sort`]s.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Field {
        /// [`User::id`].
        Id,

        /// [`User::first_name`].
        FirstName,

        /// [`User::last_name`].
        LastName,

        /// [`User::email`].
        Email,

        /// [`User::sex`].
        Sex,

        /// [`User::role`].
        Role,

        /// [`User::birth_date`].
        BirthDate,

        /// [`User::is_active`].
        IsActive,

        /// [`User::is_email_verified`].
        IsEmailVerified,

        /// [`User::created_at`].
        CreatedAt,
    }

    /// Field a [`User`]s list may be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "camelCase")]
    pub enum SortField {
        /// First name, then last name.
        Name,

        /// Birth date.
        BirthDate,

        /// Creation date.
        CreatedAt,

        /// Activity flag.
        IsActive,
    }

    impl Key<Field> for SortField {
        fn fields(&self) -> &'static [Field] {
            match self {
                Self::Name => &[Field::FirstName, Field::LastName],
                Self::BirthDate => &[Field::BirthDate],
                Self::CreatedAt => &[Field::CreatedAt],
                Self::IsActive => &[Field::IsActive],
            }
        }
    }

    /// [`SortField`]s a [`User`]s list may be sorted by.
    pub const SORTABLE: &[SortField] = &[
        SortField::Name,
        SortField::BirthDate,
        SortField::CreatedAt,
        SortField::IsActive,
    ];

    /// [`Sort`] applied when none (or a non-sortable one) is requested.
    pub const DEFAULT_SORT: Sort<SortField> =
        Sort::new(SortField::CreatedAt, Direction::Descending);

    /// [`Field`]s searched word by word.
    pub const NAME_FIELDS: &[Field] = &[Field::FirstName, Field::LastName];

    /// [`Field`]s searched by the whole text.
    pub const IDENTIFIER_FIELDS: &[Field] = &[Field::Email];

    /// Filter of a [`User`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`user::Sex`] to match, if any.
        pub sex: Option<user::Sex>,

        /// [`user::Status`] to match, if any.
        pub status: Option<user::Status>,
    }

    impl query::Filter for Filter {
        fn from_params(params: &Params) -> Self {
            Self {
                sex: enumeration(params.get("sex")),
                status: enumeration(params.get("status")),
            }
        }
    }

    impl Filter {
        /// Builds a [`Predicate`] of this [`Filter`].
        #[must_use]
        pub fn predicate(&self) -> Predicate<Field> {
            Predicate::all([
                Predicate::equals_opt(Field::Sex, self.sex),
                Predicate::equals_opt(
                    Field::IsActive,
                    self.status.map(user::Status::is_active),
                ),
            ])
        }
    }

    /// Builds a [`Predicate`] of the user-supplied part of the [`Query`]:
    /// its [`Filter`] and its search.
    #[must_use]
    pub fn predicate(query: &Query) -> Predicate<Field> {
        query.filter.predicate().and(search(
            query.search.as_ref(),
            NAME_FIELDS,
            IDENTIFIER_FIELDS,
        ))
    }

    impl Record<Field> for User {
        type Id = user::Id;

        fn id(&self) -> user::Id {
            self.id
        }

        fn value(&self, field: Field) -> Value {
            match field {
                Field::Id => Uuid::from(self.id).into(),
                Field::FirstName => self.first_name.to_string().into(),
                Field::LastName => self.last_name.to_string().into(),
                Field::Email => self.email.to_string().into(),
                Field::Sex => self.sex.into(),
                Field::Role => self.role.into(),
                Field::BirthDate => self.birth_date.into(),
                Field::IsActive => self.is_active.into(),
                Field::IsEmailVerified => self.is_email_verified.into(),
                Field::CreatedAt => self.created_at.into(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use common::{Params, Predicate};

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
        fn parses_filter() {
            let q = query(&[("sex", "female"), ("status", "all")]);

            assert_eq!(q.filter.sex, Some(user::Sex::Female));
            assert_eq!(q.filter.status, None);
            assert_eq!(
                q.filter.predicate(),
                Predicate::Equals(Field::Sex, user::Sex::Female.into()),
            );
        }

        #[test]
        fn all_filters_impose_nothing() {
            let q = query(&[("sex", "all"), ("status", "all")]);

            assert_eq!(super::predicate(&q), Predicate::Always);
        }

        #[test]
        fn maps_status_onto_activity_flag() {
            let q = query(&[("status", "inactive")]);

            assert_eq!(
                q.filter.predicate(),
                Predicate::Equals(Field::IsActive, false.into()),
            );
        }

        #[test]
        fn sorts_by_name_or_defaults() {
            assert_eq!(
                query(&[("sortBy", "name-asc")]).sort(SORTABLE, DEFAULT_SORT),
                common::Sort::new(
                    SortField::Name,
                    common::Direction::Ascending,
                ),
            );
            assert_eq!(
                query(&[("sortBy", "email-asc")]).sort(SORTABLE, DEFAULT_SORT),
                DEFAULT_SORT,
            );
        }

        #[test]
        fn searches_names_by_words_and_email_by_text() {
            let q = query(&[("search", "jane doe")]);

            assert_eq!(
                super::predicate(&q),
                Predicate::Or(vec![
                    Predicate::Contains(Field::FirstName, "jane".into()),
                    Predicate::Contains(Field::LastName, "jane".into()),
                    Predicate::Contains(Field::FirstName, "doe".into()),
                    Predicate::Contains(Field::LastName, "doe".into()),
                    Predicate::Contains(Field::Email, "jane doe".into()),
                ]),
            );
        }
    }
}

pub mod lookup {
    //! Unpaginated [`User`]s lookup definitions.
    //!
    //! [`User`]: crate::domain::User

    use common::{query, Direction, Sort};

    use super::list::{Field, SortField};

    /// Selector of every matching [`User`], ordered by [`SORT`].
    ///
    /// [`User`]: crate::domain::User
    pub type Selector = query::Lookup<Field, SortField>;

    /// [`Sort`] of a [`User`]s lookup.
    ///
    /// [`User`]: crate::domain::User
    pub const SORT: Sort<SortField> =
        Sort::new(SortField::Name, Direction::Ascending);
}
