//! [`Predicate`] definitions.

use uuid::Uuid;

use crate::DateTimeOf;

/// Value of a record field, as seen by [`Predicate`]s and [`Sort`]s.
///
/// [`Null`] is ordered before any other value.
///
/// [`Null`]: Value::Null
/// [`Sort`]: crate::Sort
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Value {
    /// Absent value.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (also used for kind enums).
    Int(i64),

    /// Textual value.
    Text(String),

    /// [`Uuid`] value.
    Uuid(Uuid),

    /// Date and time value.
    DateTime(crate::DateTime),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for Value {
    fn from(v: DateTimeOf<Of>) -> Self {
        Self::DateTime(v.coerce())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Record which fields of `F` type may be matched by a [`Predicate`].
pub trait Record<F> {
    /// Type of the unique identifier of this [`Record`].
    type Id: Ord;

    /// Returns the unique identifier of this [`Record`].
    fn id(&self) -> Self::Id;

    /// Returns the [`Value`] of the provided `field` of this [`Record`].
    fn value(&self, field: F) -> Value;
}

/// Boolean expression over fields of `F` type.
///
/// A [`Predicate`] is built once per list query and never mutated afterwards:
/// combining two [`Predicate`]s always produces a new tree containing both of
/// them, so a later stage cannot weaken an earlier restriction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate<F> {
    /// Matches every record.
    Always,

    /// Matches no record.
    Never,

    /// Matches records matched by all the inner [`Predicate`]s.
    And(Vec<Predicate<F>>),

    /// Matches records matched by any of the inner [`Predicate`]s.
    Or(Vec<Predicate<F>>),

    /// Field is equal to the [`Value`].
    Equals(F, Value),

    /// Textual field contains the text, case-insensitively.
    Contains(F, String),

    /// Field is equal to one of the [`Value`]s.
    InSet(F, Vec<Value>),

    /// Field lies within the [`Range`].
    InRange(F, Range),
}

/// Inclusive range of [`Value`]s, open on a missing side.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub from: Option<Value>,

    /// Upper bound.
    pub to: Option<Value>,
}

impl Range {
    /// Checks whether the provided [`Value`] lies within this [`Range`].
    ///
    /// [`Value::Null`] lies within no [`Range`].
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        *value != Value::Null
            && self.from.as_ref().map_or(true, |from| value >= from)
            && self.to.as_ref().map_or(true, |to| value <= to)
    }

    /// Indicates whether this [`Range`] is open on both sides.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl<F> Predicate<F> {
    /// Creates a [`Predicate`] matching records matched by all the provided
    /// ones.
    ///
    /// [`Predicate::Always`]s are dropped, and any [`Predicate::Never`]
    /// collapses the whole conjunction.
    pub fn all(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut conjuncts = Vec::new();
        for p in predicates {
            match p {
                Self::Always => {}
                Self::Never => return Self::Never,
                Self::And(inner) => conjuncts.extend(inner),
                p @ (Self::Or(_)
                | Self::Equals(..)
                | Self::Contains(..)
                | Self::InSet(..)
                | Self::InRange(..)) => conjuncts.push(p),
            }
        }
        match conjuncts.len() {
            0 => Self::Always,
            1 => conjuncts.remove(0),
            _ => Self::And(conjuncts),
        }
    }

    /// Creates a [`Predicate`] matching records matched by any of the provided
    /// ones.
    ///
    /// [`Predicate::Never`]s are dropped, and any [`Predicate::Always`]
    /// collapses the whole disjunction.
    pub fn any(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut disjuncts = Vec::new();
        for p in predicates {
            match p {
                Self::Never => {}
                Self::Always => return Self::Always,
                Self::Or(inner) => disjuncts.extend(inner),
                p @ (Self::And(_)
                | Self::Equals(..)
                | Self::Contains(..)
                | Self::InSet(..)
                | Self::InRange(..)) => disjuncts.push(p),
            }
        }
        match disjuncts.len() {
            0 => Self::Never,
            1 => disjuncts.remove(0),
            _ => Self::Or(disjuncts),
        }
    }

    /// Combines this [`Predicate`] with the `other` one via conjunction.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::all([self, other])
    }

    /// Combines this [`Predicate`] with the `other` one via disjunction.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::any([self, other])
    }

    /// Creates an equality [`Predicate`] if the `value` is present, or a
    /// [`Predicate::Always`] otherwise.
    pub fn equals_opt<V: Into<Value>>(field: F, value: Option<V>) -> Self {
        value.map_or(Self::Always, |v| Self::Equals(field, v.into()))
    }

    /// Creates a range [`Predicate`] if the [`Range`] is bounded, or a
    /// [`Predicate::Always`] otherwise.
    pub fn in_range(field: F, range: Range) -> Self {
        if range.is_unbounded() {
            Self::Always
        } else {
            Self::InRange(field, range)
        }
    }

    /// Checks whether the provided [`Record`] is matched by this
    /// [`Predicate`].
    pub fn matches<R>(&self, record: &R) -> bool
    where
        F: Copy,
        R: Record<F>,
    {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::And(ps) => ps.iter().all(|p| p.matches(record)),
            Self::Or(ps) => ps.iter().any(|p| p.matches(record)),
            Self::Equals(f, v) => record.value(*f) == *v,
            Self::Contains(f, needle) => match record.value(*f) {
                Value::Text(text) => {
                    text.to_lowercase().contains(&needle.to_lowercase())
                }
                Value::Null
                | Value::Bool(_)
                | Value::Int(_)
                | Value::Uuid(_)
                | Value::DateTime(_) => false,
            },
            Self::InSet(f, vs) => vs.contains(&record.value(*f)),
            Self::InRange(f, range) => range.contains(&record.value(*f)),
        }
    }
}

/// Free-text search requested by a list query.
///
/// Always trimmed and non-empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Search(String);

impl Search {
    /// Creates a new [`Search`] out of the provided `text`.
    ///
    /// [`None`] is returned if the `text` is blank.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self(text.to_owned()))
    }

    /// Returns the searched text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whitespace-separated words of this [`Search`].
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// Builds a [`Predicate`] matching records where:
    /// - any word of this [`Search`] is contained in any of `names` fields;
    /// - or the whole text is contained in any of `identifiers` fields.
    pub fn predicate<F: Copy>(
        &self,
        names: &[F],
        identifiers: &[F],
    ) -> Predicate<F> {
        let by_words = self.tokens().flat_map(move |word| {
            names
                .iter()
                .map(move |f| Predicate::Contains(*f, word.to_owned()))
        });
        let by_identifier = identifiers
            .iter()
            .map(|f| Predicate::Contains(*f, self.0.clone()));
        Predicate::any(by_words.chain(by_identifier))
    }
}

/// Builds a [`Predicate`] of the optional [`Search`].
///
/// A missing [`Search`] matches every record.
pub fn search<F: Copy>(
    search: Option<&Search>,
    names: &[F],
    identifiers: &[F],
) -> Predicate<F> {
    search.map_or(Predicate::Always, |s| s.predicate(names, identifiers))
}

#[cfg(test)]
mod tests {
    use super::{search, Predicate, Range, Record, Search, Value};

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Field {
        FirstName,
        LastName,
        Email,
        Sex,
        Age,
    }

    struct Person {
        id: u32,
        first_name: &'static str,
        last_name: &'static str,
        email: &'static str,
        sex: &'static str,
        age: Option<i64>,
    }

    impl Record<Field> for Person {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn value(&self, field: Field) -> Value {
            match field {
                Field::FirstName => self.first_name.into(),
                Field::LastName => self.last_name.into(),
                Field::Email => self.email.into(),
                Field::Sex => self.sex.into(),
                Field::Age => self.age.into(),
            }
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                id: 1,
                first_name: "Jane",
                last_name: "Smith",
                email: "jane@clinic.test",
                sex: "female",
                age: Some(34),
            },
            Person {
                id: 2,
                first_name: "John",
                last_name: "McDoexter",
                email: "john@clinic.test",
                sex: "male",
                age: Some(51),
            },
            Person {
                id: 3,
                first_name: "Alice",
                last_name: "Brown",
                email: "alice@doe.test",
                sex: "female",
                age: None,
            },
            Person {
                id: 4,
                first_name: "Bob",
                last_name: "Stone",
                email: "bob@clinic.test",
                sex: "male",
                age: Some(20),
            },
        ]
    }

    fn matched(p: &Predicate<Field>) -> Vec<u32> {
        people()
            .iter()
            .filter(|r| p.matches(*r))
            .map(|r| r.id)
            .collect()
    }

    const NAMES: &[Field] = &[Field::FirstName, Field::LastName];
    const IDENTIFIERS: &[Field] = &[Field::Email];

    #[test]
    fn search_words_are_ored() {
        let s = Search::new("Jane Doe").unwrap();

        // "Jane" matches #1 by first name, "Doe" matches #2 by last name.
        assert_eq!(matched(&s.predicate(NAMES, IDENTIFIERS)), [1, 2]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let s = Search::new("  jANe ").unwrap();

        assert_eq!(s.as_str(), "jANe");
        assert_eq!(matched(&s.predicate(NAMES, IDENTIFIERS)), [1]);
    }

    #[test]
    fn search_matches_whole_text_against_identifiers() {
        let s = Search::new("doe.test").unwrap();

        assert_eq!(matched(&s.predicate(NAMES, IDENTIFIERS)), [3]);
    }

    #[test]
    fn blank_search_matches_everything() {
        assert_eq!(Search::new("   "), None);
        assert_eq!(
            search::<Field>(None, NAMES, IDENTIFIERS),
            Predicate::Always,
        );
        assert_eq!(matched(&Predicate::Always), [1, 2, 3, 4]);
    }

    #[test]
    fn absent_filter_adds_no_constraint() {
        let absent = Predicate::equals_opt(Field::Sex, None::<&str>);
        let female = Predicate::equals_opt(Field::Sex, Some("female"));

        assert_eq!(absent, Predicate::Always);
        assert_eq!(matched(&female), [1, 3]);
        assert!(matched(&absent).len() >= matched(&female).len());
    }

    #[test]
    fn conjunction_is_flattened() {
        let p = Predicate::all([
            Predicate::Always,
            Predicate::Equals(Field::Sex, "male".into()),
            Predicate::And(vec![Predicate::Contains(
                Field::Email,
                "clinic".into(),
            )]),
        ]);

        assert_eq!(
            p,
            Predicate::And(vec![
                Predicate::Equals(Field::Sex, "male".into()),
                Predicate::Contains(Field::Email, "clinic".into()),
            ]),
        );
        assert_eq!(matched(&p), [2, 4]);
    }

    #[test]
    fn never_dominates_conjunction() {
        let p = Predicate::Equals(Field::Sex, "male".into())
            .and(Predicate::Never);

        assert_eq!(p, Predicate::Never);
        assert!(matched(&p).is_empty());
        assert_eq!(Predicate::<Field>::any([]), Predicate::Never);
        assert_eq!(Predicate::<Field>::all([]), Predicate::Always);
    }

    #[test]
    fn range_is_inclusive_and_skips_nulls() {
        let p = Predicate::in_range(
            Field::Age,
            Range {
                from: Some(20.into()),
                to: Some(34.into()),
            },
        );

        assert_eq!(matched(&p), [1, 4]);
        assert_eq!(
            Predicate::in_range(Field::Age, Range::default()),
            Predicate::Always,
        );
    }

    #[test]
    fn in_set_matches_any_member() {
        let p = Predicate::InSet(Field::Age, vec![51.into(), Value::Null]);

        assert_eq!(matched(&p), [2, 3]);
        assert!(matched(&Predicate::InSet(Field::Age, vec![])).is_empty());
    }
}
