//! [`Sort`] definitions.

use std::cmp::Ordering;

use derive_more::Display;
use strum::EnumString;

use crate::Record;

/// Direction of a [`Sort`].
#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq,
)]
pub enum Direction {
    /// Ascending order.
    #[display("asc")]
    #[strum(serialize = "asc")]
    Ascending,

    /// Descending order.
    #[default]
    #[display("desc")]
    #[strum(serialize = "desc")]
    Descending,
}

impl Direction {
    /// Applies this [`Direction`] to the provided ascending [`Ordering`].
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Returns SQL keyword representing this [`Direction`].
    ///
    /// `NULL`s always go first in the ascending order, like
    /// [`Value::Null`] does in memory.
    ///
    /// [`Value::Null`]: crate::Value::Null
    #[cfg(feature = "postgres")]
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC NULLS FIRST",
            Self::Descending => "DESC NULLS LAST",
        }
    }
}

/// Sortable field of a resource, expanding into the record fields of `F`
/// type it orders by.
pub trait Key<F: 'static> {
    /// Returns record fields to compare, most significant first.
    fn fields(&self) -> &'static [F];
}

/// Resolved ordering of list query results.
///
/// Records are compared by the [`Key::fields`] of the `field` in the
/// [`Direction`], and then by their [`Record::id`] in the ascending order,
/// so the ordering is total and stays stable across pages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sort<S> {
    /// Field to sort by.
    pub field: S,

    /// [`Direction`] to sort in.
    pub direction: Direction,
}

impl<S> Sort<S> {
    /// Creates a new [`Sort`].
    #[must_use]
    pub const fn new(field: S, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Resolves the `requested` field and `direction` into a [`Sort`].
    ///
    /// The `default` [`Sort`] is returned if nothing is requested, or the
    /// requested field is not in the `whitelist`.
    #[must_use]
    pub fn resolve(
        requested: Option<S>,
        direction: Direction,
        whitelist: &[S],
        default: Self,
    ) -> Self
    where
        S: PartialEq,
    {
        match requested {
            Some(field) if whitelist.contains(&field) => {
                Self::new(field, direction)
            }
            Some(_) | None => default,
        }
    }

    /// Compares the provided [`Record`]s according to this [`Sort`].
    ///
    /// Strings are compared byte-wise (case-sensitively).
    pub fn compare<F, R>(&self, a: &R, b: &R) -> Ordering
    where
        S: Key<F>,
        F: Copy + 'static,
        R: Record<F>,
    {
        self.field
            .fields()
            .iter()
            .map(|f| self.direction.apply(a.value(*f).cmp(&b.value(*f))))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.id().cmp(&b.id()))
    }

    /// Sorts the provided [`Record`]s according to this [`Sort`].
    pub fn sort<F, R>(&self, records: &mut [R])
    where
        S: Key<F>,
        F: Copy + 'static,
        R: Record<F>,
    {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use crate::{Record, Value};

    use super::{Direction, Key, Sort};

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Field {
        Name,
        Score,
    }

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum By {
        Name,
        Score,
        Secret,
    }

    impl Key<Field> for By {
        fn fields(&self) -> &'static [Field] {
            match self {
                Self::Name => &[Field::Name],
                Self::Score | Self::Secret => &[Field::Score],
            }
        }
    }

    #[derive(Clone, Debug)]
    struct Row(u32, &'static str, Option<i64>);

    impl Record<Field> for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }

        fn value(&self, field: Field) -> Value {
            match field {
                Field::Name => self.1.into(),
                Field::Score => self.2.into(),
            }
        }
    }

    const WHITELIST: &[By] = &[By::Name, By::Score];
    const DEFAULT: Sort<By> = Sort::new(By::Score, Direction::Descending);

    fn ids(sort: Sort<By>, mut rows: Vec<Row>) -> Vec<u32> {
        sort.sort(&mut rows);
        rows.into_iter().map(|r| r.0).collect()
    }

    #[test]
    fn parses_direction() {
        assert_eq!("asc".parse::<Direction>(), Ok(Direction::Ascending));
        assert_eq!("desc".parse::<Direction>(), Ok(Direction::Descending));
        assert!("up".parse::<Direction>().is_err());
        assert_eq!(Direction::Ascending.to_string(), "asc");
    }

    #[test]
    fn resolves_whitelisted_field() {
        assert_eq!(
            Sort::resolve(
                Some(By::Name),
                Direction::Ascending,
                WHITELIST,
                DEFAULT,
            ),
            Sort::new(By::Name, Direction::Ascending),
        );
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(
            Sort::resolve(
                Some(By::Secret),
                Direction::Ascending,
                WHITELIST,
                DEFAULT,
            ),
            DEFAULT,
        );
        assert_eq!(
            Sort::resolve(None, Direction::Ascending, WHITELIST, DEFAULT),
            DEFAULT,
        );
    }

    #[test]
    fn breaks_ties_by_ascending_id() {
        let rows = vec![
            Row(5, "b", Some(1)),
            Row(2, "a", Some(1)),
            Row(9, "c", Some(3)),
            Row(1, "d", Some(1)),
        ];

        assert_eq!(
            ids(Sort::new(By::Score, Direction::Descending), rows.clone()),
            [9, 1, 2, 5],
        );
        assert_eq!(
            ids(Sort::new(By::Score, Direction::Ascending), rows),
            [1, 2, 5, 9],
        );
    }

    #[test]
    fn compares_strings_byte_wise() {
        let rows = vec![Row(1, "alice", None), Row(2, "Bob", None)];
        let sort = Sort::new(By::Name, Direction::Ascending);

        assert_eq!(ids(sort, rows), [2, 1]);
    }

    #[test]
    fn nulls_go_first_in_ascending_order() {
        let rows = vec![Row(1, "a", Some(0)), Row(2, "b", None)];

        assert_eq!(
            ids(Sort::new(By::Score, Direction::Ascending), rows.clone()),
            [2, 1],
        );
        assert_eq!(
            ids(Sort::new(By::Score, Direction::Descending), rows),
            [1, 2],
        );
    }
}
