//! Abstractions for offset pagination.

/// Pagination arguments.
///
/// Both `page` and `limit` are at least `1`: they are normalized once, when
/// a [`ListQuery`] is parsed, and not re-validated afterwards.
///
/// [`ListQuery`]: crate::ListQuery
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Number of the requested page, starting from `1`.
    pub page: usize,

    /// Maximum number of items on a page.
    pub limit: usize,
}

impl Arguments {
    /// Default [`Arguments::page`].
    pub const DEFAULT_PAGE: usize = 1;

    /// Default [`Arguments::limit`].
    pub const DEFAULT_LIMIT: usize = 10;

    /// Maximum allowed [`Arguments::limit`].
    ///
    /// A larger requested limit is clamped to this one, so a page shorter
    /// than the requested limit is not necessarily the last one: only
    /// [`Page::has_more`] tells that.
    pub const MAX_LIMIT: usize = 100;

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        debug_assert!(self.page >= 1, "`page` must be normalized");
        debug_assert!(self.limit >= 1, "`limit` must be normalized");

        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A page of items.
///
/// [`Page::has_more`] is a heuristic: it is set whenever the page is full,
/// so the last page may be followed by an empty one if the total number of
/// items is a multiple of the limit.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Indicator whether there may be more items after this [`Page`].
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Creates a new [`Page`] out of the window of items already sliced by
    /// the provided [`Arguments`] (for example, by a database `LIMIT` and
    /// `OFFSET`).
    #[must_use]
    pub fn from_window(items: Vec<T>, arguments: &Arguments) -> Self {
        let has_more = items.len() == arguments.limit;
        Self { items, has_more }
    }

    /// Slices the requested [`Page`] out of the fully ordered items.
    ///
    /// An offset beyond the items results in an empty [`Page`] having no
    /// more items.
    #[must_use]
    pub fn paginate(
        ordered: impl IntoIterator<Item = T>,
        arguments: &Arguments,
    ) -> Self {
        let items = ordered
            .into_iter()
            .skip(arguments.offset())
            .take(arguments.limit)
            .collect();
        Self::from_window(items, arguments)
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Arguments, Page};

    fn page(page: usize, limit: usize) -> Page<usize> {
        Page::paginate(1..=12, &Arguments { page, limit })
    }

    #[test]
    fn computes_offset() {
        assert_eq!(Arguments { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(Arguments { page: 3, limit: 5 }.offset(), 10);
        assert_eq!(Arguments::default(), Arguments { page: 1, limit: 10 });
    }

    #[test]
    fn slices_requested_page() {
        assert_eq!(
            page(2, 5),
            Page {
                items: vec![6, 7, 8, 9, 10],
                has_more: true,
            },
        );
        assert_eq!(
            page(3, 5),
            Page {
                items: vec![11, 12],
                has_more: false,
            },
        );
    }

    #[test]
    fn offset_beyond_items_is_empty() {
        assert_eq!(
            page(4, 5),
            Page {
                items: vec![],
                has_more: false,
            },
        );
    }

    #[test]
    fn full_last_page_claims_more() {
        assert_eq!(
            page(2, 6),
            Page {
                items: vec![7, 8, 9, 10, 11, 12],
                has_more: true,
            },
        );
        assert!(page(3, 6).items.is_empty());
    }

    #[test]
    fn consecutive_pages_are_contiguous() {
        for limit in 1..=13 {
            let mut all = Vec::new();
            for p in 1..=13 {
                let Page { items, .. } = page(p, limit);
                all.extend(items);
            }
            assert_eq!(all, (1..=12).collect::<Vec<_>>(), "limit {limit}");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "`page` must be normalized")]
    fn rejects_zero_page_in_debug() {
        _ = Arguments { page: 0, limit: 10 }.offset();
    }
}
