//! [`ListQuery`] parsing out of raw request parameters.

use std::{collections::HashMap, str::FromStr};

use crate::{
    pagination::{Arguments, Page},
    predicate::Search,
    sort::{Direction, Key, Sort},
    Predicate, Record,
};

/// Raw request parameters, as transported by a query string.
pub type Params = HashMap<String, String>;

/// Resource-specific filter of a [`ListQuery`].
pub trait Filter {
    /// Reads this [`Filter`] out of the raw [`Params`].
    ///
    /// Must never fail: missing or malformed values mean "no constraint",
    /// and unknown keys are ignored.
    fn from_params(params: &Params) -> Self;
}

impl Filter for () {
    fn from_params(_: &Params) -> Self {}
}

/// Normalized list query over a resource sortable by `S` fields and
/// filtered by `F`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListQuery<S, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Free-text [`Search`], if any.
    pub search: Option<Search>,

    /// Requested field to sort by, if it's a known one.
    pub sort_field: Option<S>,

    /// Requested sorting [`Direction`].
    pub direction: Direction,

    /// Resource-specific [`Filter`].
    pub filter: F,
}

impl<S, F> ListQuery<S, F> {
    /// Parses a [`ListQuery`] out of the provided raw [`Params`].
    ///
    /// Never fails, coercing invalid values to their defaults instead:
    /// - `page` and `limit` must be positive integers, or default to
    ///   [`Arguments::DEFAULT_PAGE`] and [`Arguments::DEFAULT_LIMIT`]
    ///   (`limit` is capped by [`Arguments::MAX_LIMIT`]);
    /// - `sort` (or `sortBy`) is a `field-direction` pair, where unknown
    ///   direction means [`Direction::Descending`];
    /// - `search` (or `value`) is trimmed, and blank means no search.
    pub fn parse(params: &Params) -> Self
    where
        S: FromStr,
        F: Filter,
    {
        let get = |keys: &[&str]| {
            keys.iter().find_map(|k| params.get(*k)).map(String::as_str)
        };

        let (sort_field, direction) = get(&["sort", "sortBy"])
            .map(sorting)
            .unwrap_or_default();

        Self {
            arguments: Arguments {
                page: positive(get(&["page"]))
                    .unwrap_or(Arguments::DEFAULT_PAGE),
                limit: positive(get(&["limit"]))
                    .unwrap_or(Arguments::DEFAULT_LIMIT)
                    .min(Arguments::MAX_LIMIT),
            },
            search: get(&["search", "value"]).and_then(Search::new),
            sort_field,
            direction,
            filter: F::from_params(params),
        }
    }

    /// Resolves the [`Sort`] of this [`ListQuery`] against the `whitelist` of
    /// the resource, falling back to its `default` one.
    #[must_use]
    pub fn sort(&self, whitelist: &[S], default: Sort<S>) -> Sort<S>
    where
        S: Copy + PartialEq,
    {
        Sort::resolve(self.sort_field, self.direction, whitelist, default)
    }
}

/// Fully resolved selection of records with fields of `F` type, sortable by
/// `S` fields.
///
/// This is what a storage receives: the [`Predicate`] already includes the
/// caller's visibility restriction, and the [`Sort`] is already resolved
/// against the resource's whitelist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector<F, S> {
    /// [`Predicate`] the selected records must match.
    pub predicate: Predicate<F>,

    /// [`Sort`] to order the selected records by.
    pub sort: Sort<S>,

    /// Pagination [`Arguments`].
    pub arguments: Arguments,
}

impl<F, S> Selector<F, S> {
    /// Applies this [`Selector`] to the provided in-memory `records`:
    /// filters, orders and slices them into a [`Page`].
    pub fn apply<R>(&self, records: impl IntoIterator<Item = R>) -> Page<R>
    where
        F: Copy + 'static,
        S: Key<F>,
        R: Record<F>,
    {
        Page::paginate(
            select(&self.predicate, &self.sort, records),
            &self.arguments,
        )
    }
}

/// Unpaginated selection of records with fields of `F` type, sortable by `S`
/// fields.
///
/// Same as a [`Selector`], but yields every matching record at once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lookup<F, S> {
    /// [`Predicate`] the selected records must match.
    pub predicate: Predicate<F>,

    /// [`Sort`] to order the selected records by.
    pub sort: Sort<S>,
}

impl<F, S> Lookup<F, S> {
    /// Applies this [`Lookup`] to the provided in-memory `records`: filters
    /// and orders them.
    pub fn apply<R>(&self, records: impl IntoIterator<Item = R>) -> Vec<R>
    where
        F: Copy + 'static,
        S: Key<F>,
        R: Record<F>,
    {
        select(&self.predicate, &self.sort, records)
    }
}

/// Filters the `records` by the `predicate` and orders them by the `sort`.
fn select<F, S, R>(
    predicate: &Predicate<F>,
    sort: &Sort<S>,
    records: impl IntoIterator<Item = R>,
) -> Vec<R>
where
    F: Copy + 'static,
    S: Key<F>,
    R: Record<F>,
{
    let mut matched = records
        .into_iter()
        .filter(|r| predicate.matches(r))
        .collect::<Vec<_>>();
    sort.sort(&mut matched);
    matched
}

/// Parses a positive integer.
fn positive(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Splits the raw `field-direction` pair on the first `-`.
fn sorting<S: FromStr>(raw: &str) -> (Option<S>, Direction) {
    let (field, direction) = raw.split_once('-').unwrap_or((raw, ""));
    (
        field.trim().parse().ok(),
        direction.trim().parse().unwrap_or_default(),
    )
}

/// Parses an optional enumeration filter value.
///
/// `all`, a missing value and an unknown value all mean "no constraint".
#[must_use]
pub fn enumeration<T: FromStr>(raw: Option<&String>) -> Option<T> {
    match raw.map(|s| s.trim()) {
        None | Some("all") => None,
        Some(s) => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use strum::EnumString;

    use crate::{
        pagination::{Arguments, Page},
        predicate::Search,
        sort::{Direction, Sort},
    };

    use super::{enumeration, Filter, ListQuery, Params};

    #[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq)]
    #[strum(serialize_all = "camelCase")]
    enum By {
        CreatedAt,
        Name,
        Secret,
    }

    #[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    enum Sex {
        Male,
        Female,
    }

    #[derive(Debug, Default, Eq, PartialEq)]
    struct ByGender {
        sex: Option<Sex>,
    }

    impl Filter for ByGender {
        fn from_params(params: &Params) -> Self {
            Self {
                sex: enumeration(params.get("sex")),
            }
        }
    }

    fn parse(pairs: &[(&str, &str)]) -> ListQuery<By, ByGender> {
        ListQuery::parse(
            &pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn defaults_empty_params() {
        assert_eq!(
            parse(&[]),
            ListQuery {
                arguments: Arguments { page: 1, limit: 10 },
                search: None,
                sort_field: None,
                direction: Direction::Descending,
                filter: ByGender::default(),
            },
        );
    }

    #[test]
    fn coerces_invalid_pagination() {
        for (page, limit) in [("0", "0"), ("-2", "-5"), ("two", "1.5"), ("", " ")]
        {
            let q = parse(&[("page", page), ("limit", limit)]);

            assert_eq!(q.arguments, Arguments::default(), "{page} {limit}");
        }

        let q = parse(&[("page", " 3 "), ("limit", "25")]);
        assert_eq!(q.arguments, Arguments { page: 3, limit: 25 });

        let q = parse(&[("limit", "100000")]);
        assert_eq!(q.arguments.limit, Arguments::MAX_LIMIT);
    }

    #[test]
    fn capped_limit_still_reports_more() {
        let q = parse(&[("limit", "200")]);
        let page = Page::paginate(1..=150, &q.arguments);

        assert_eq!(page.items.len(), 100);
        assert!(page.has_more);
    }

    #[test]
    fn splits_sort_on_first_dash() {
        let q = parse(&[("sort", "name-asc")]);
        assert_eq!(
            (q.sort_field, q.direction),
            (Some(By::Name), Direction::Ascending),
        );

        let q = parse(&[("sortBy", "createdAt-sideways")]);
        assert_eq!(
            (q.sort_field, q.direction),
            (Some(By::CreatedAt), Direction::Descending),
        );

        let q = parse(&[("sort", "name")]);
        assert_eq!(
            (q.sort_field, q.direction),
            (Some(By::Name), Direction::Descending),
        );

        let q = parse(&[("sort", "age-asc")]);
        assert_eq!(q.sort_field, None);
    }

    #[test]
    fn resolves_sort_against_whitelist() {
        let default = Sort::new(By::CreatedAt, Direction::Descending);
        let whitelist = &[By::CreatedAt, By::Name];

        assert_eq!(
            parse(&[("sort", "name-asc")]).sort(whitelist, default),
            Sort::new(By::Name, Direction::Ascending),
        );
        assert_eq!(
            parse(&[("sort", "secret-asc")]).sort(whitelist, default),
            default,
        );
    }

    #[test]
    fn trims_search() {
        assert_eq!(parse(&[("search", "   ")]).search, None);
        assert_eq!(
            parse(&[("value", " Jane Doe ")]).search,
            Search::new("Jane Doe"),
        );
    }

    #[test]
    fn treats_all_as_absent_filter() {
        assert_eq!(parse(&[("sex", "all")]).filter.sex, None);
        assert_eq!(parse(&[("sex", "unknown")]).filter.sex, None);
        assert_eq!(parse(&[("sex", "female")]).filter.sex, Some(Sex::Female));
    }

    #[test]
    fn ignores_unknown_keys() {
        assert_eq!(parse(&[("role", "admin"), ("drop", "table")]), parse(&[]));
    }
}
