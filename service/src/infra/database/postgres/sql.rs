//! Translation of list [`Selector`]s into SQL.

use std::error::Error as StdError;

use common::{
    predicate::Range,
    query::{Lookup, Selector},
    sort::Key,
    Predicate, Sort, Value,
};
use itertools::Itertools as _;
use postgres_types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};

use super::LikePattern;

/// Record field stored in a SQL column.
pub(super) trait Column: Copy + 'static {
    /// Returns the SQL expression of this [`Column`].
    fn column(self) -> &'static str;

    /// Indicates whether this [`Column`] holds text.
    fn is_text(self) -> bool;
}

/// SQL statement with its parameters.
#[derive(Debug)]
pub(super) struct Statement {
    /// SQL text of this [`Statement`].
    pub(super) sql: String,

    /// Parameters bound to the `sql` placeholders.
    params: Vec<Param>,
}

impl Statement {
    /// Builds a [`Statement`] selecting a page by the provided [`Selector`]
    /// out of the `from` SQL query.
    ///
    /// The rows are ordered by the [`Selector`] sort, and then by the `id`
    /// column ascending.
    pub(super) fn select<F, S>(
        from: &str,
        selector: &Selector<F, S>,
        id: F,
    ) -> Self
    where
        F: Column,
        S: Key<F>,
    {
        let Selector {
            predicate,
            sort,
            arguments,
        } = selector;

        let Self { sql, mut params } = Self::ordered(from, predicate, sort, id);
        let offset = bind(&mut params, to_int(arguments.offset()));
        let limit = bind(&mut params, to_int(arguments.limit));

        let sql = format!("{sql} OFFSET {offset} LIMIT {limit}");
        Self { sql, params }
    }

    /// Builds a [`Statement`] selecting every row matching the provided
    /// [`Lookup`] out of the `from` SQL query.
    pub(super) fn lookup<F, S>(from: &str, lookup: &Lookup<F, S>, id: F) -> Self
    where
        F: Column,
        S: Key<F>,
    {
        Self::ordered(from, &lookup.predicate, &lookup.sort, id)
    }

    /// Builds a [`Statement`] filtering the `from` SQL query by the provided
    /// [`Predicate`] and ordering it by the provided [`Sort`], and then by
    /// the `id` column ascending.
    fn ordered<F, S>(
        from: &str,
        predicate: &Predicate<F>,
        sort: &Sort<S>,
        id: F,
    ) -> Self
    where
        F: Column,
        S: Key<F>,
    {
        let mut params = vec![];
        let condition = condition(predicate, &mut params);
        let order = sort.direction.sql();
        let ordering = sort.field.fields().iter().format_with(", ", |f, w| {
            if f.is_text() {
                w(&format_args!(r#"{} COLLATE "C" {order}"#, f.column()))
            } else {
                w(&format_args!("{} {order}", f.column()))
            }
        });

        let sql = format!(
            "{from} \
             WHERE {condition} \
             ORDER BY {ordering}, {id} ASC",
            id = id.column(),
        );
        Self { sql, params }
    }

    /// Returns parameters of this [`Statement`] in the form accepted by a
    /// [`Connection`].
    ///
    /// [`Connection`]: super::Connection
    pub(super) fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        let mut refs: Vec<&(dyn ToSql + Sync)> =
            Vec::with_capacity(self.params.len());
        for p in &self.params {
            refs.push(p);
        }
        refs
    }
}

/// Translates the provided [`Predicate`] into a SQL condition, binding its
/// values into `params`.
fn condition<F: Column>(
    predicate: &Predicate<F>,
    params: &mut Vec<Param>,
) -> String {
    match predicate {
        Predicate::Always => "TRUE".into(),
        Predicate::Never => "FALSE".into(),
        Predicate::And(ps) => format!(
            "({})",
            ps.iter().map(|p| condition(p, params)).join(" AND "),
        ),
        Predicate::Or(ps) => format!(
            "({})",
            ps.iter().map(|p| condition(p, params)).join(" OR "),
        ),
        Predicate::Equals(f, Value::Null) => format!("{} IS NULL", f.column()),
        Predicate::Equals(f, v) => {
            format!("{} = {}", f.column(), bind(params, v.clone()))
        }
        Predicate::Contains(f, text) => {
            let pattern = String::from(LikePattern::new(text));
            format!("{} ILIKE {}", f.column(), bind(params, pattern.into()))
        }
        Predicate::InSet(f, vs) => {
            let equalities =
                vs.iter().map(|v| Predicate::Equals(*f, v.clone()));
            condition(&Predicate::any(equalities), params)
        }
        Predicate::InRange(f, Range { from, to }) => {
            let bounds = from
                .iter()
                .map(|v| (">=", v))
                .chain(to.iter().map(|v| ("<=", v)))
                .map(|(op, v)| {
                    format!("{} {op} {}", f.column(), bind(params, v.clone()))
                })
                .collect::<Vec<_>>();
            if bounds.is_empty() {
                "TRUE".into()
            } else {
                format!("({})", bounds.join(" AND "))
            }
        }
    }
}

/// Binds the provided [`Value`] into `params`, returning its typed SQL
/// placeholder.
fn bind(params: &mut Vec<Param>, value: Value) -> String {
    let cast = match &value {
        Value::Null => "",
        Value::Bool(_) => "::BOOL",
        Value::Int(_) => "::INT8",
        Value::Text(_) => "::VARCHAR",
        Value::Uuid(_) => "::UUID",
        Value::DateTime(_) => "::TIMESTAMPTZ",
    };
    params.push(Param(value));
    format!("${}{cast}", params.len())
}

/// Converts the provided [`usize`] into a [`Value::Int`], saturating on
/// overflow.
fn to_int(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// [`Value`] bound as a SQL parameter.
#[derive(Debug)]
struct Param(Value);

impl ToSql for Param {
    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, w),
            Value::Int(v) => v.to_sql(ty, w),
            Value::Text(v) => v.to_sql(ty, w),
            Value::Uuid(v) => v.to_sql(ty, w),
            Value::DateTime(v) => v.to_sql(ty, w),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <uuid::Uuid as ToSql>::accepts(ty)
            || <common::DateTime as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use common::{
        pagination::Arguments,
        predicate::Range,
        query::{Lookup, Selector},
        sort::Key,
        Direction, Predicate, Sort, Value,
    };

    use super::{Column, Statement};

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Field {
        Id,
        Name,
        Score,
    }

    impl Column for Field {
        fn column(self) -> &'static str {
            match self {
                Self::Id => "t.id",
                Self::Name => "t.name",
                Self::Score => "t.score",
            }
        }

        fn is_text(self) -> bool {
            matches!(self, Self::Name)
        }
    }

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct ByName;

    impl Key<Field> for ByName {
        fn fields(&self) -> &'static [Field] {
            &[Field::Name, Field::Score]
        }
    }

    fn statement(predicate: Predicate<Field>) -> Statement {
        Statement::select(
            "SELECT * FROM t",
            &Selector {
                predicate,
                sort: Sort::new(ByName, Direction::Ascending),
                arguments: Arguments { page: 3, limit: 5 },
            },
            Field::Id,
        )
    }

    #[test]
    fn pushes_down_ordering_and_pagination() {
        let stmt = statement(Predicate::Always);

        assert_eq!(
            stmt.sql,
            "SELECT * FROM t \
             WHERE TRUE \
             ORDER BY t.name COLLATE \"C\" ASC NULLS FIRST, \
                      t.score ASC NULLS FIRST, t.id ASC \
             OFFSET $1::INT8 \
             LIMIT $2::INT8",
        );
        assert_eq!(stmt.params().len(), 2);
    }

    #[test]
    fn translates_predicate_tree() {
        let stmt = statement(Predicate::all([
            Predicate::Equals(Field::Score, Value::Null),
            Predicate::any([
                Predicate::Contains(Field::Name, "jane".into()),
                Predicate::InSet(Field::Score, vec![]),
            ]),
            Predicate::InRange(
                Field::Score,
                Range {
                    from: Some(Value::Int(1)),
                    to: None,
                },
            ),
        ]));

        assert!(stmt.sql.contains(
            "WHERE (t.score IS NULL \
                    AND (t.name ILIKE $1::VARCHAR OR FALSE) \
                    AND (t.score >= $2::INT8)) ",
        ));
        assert_eq!(stmt.params().len(), 4);
    }

    #[test]
    fn looks_up_without_pagination() {
        let stmt = Statement::lookup(
            "SELECT * FROM t",
            &Lookup {
                predicate: Predicate::Equals(Field::Score, Value::Int(3)),
                sort: Sort::new(ByName, Direction::Descending),
            },
            Field::Id,
        );

        assert_eq!(
            stmt.sql,
            "SELECT * FROM t \
             WHERE t.score = $1::INT8 \
             ORDER BY t.name COLLATE \"C\" DESC NULLS LAST, \
                      t.score DESC NULLS LAST, t.id ASC",
        );
        assert_eq!(stmt.params().len(), 1);
    }

    #[test]
    fn never_matches_empty_set() {
        let stmt = statement(Predicate::InSet(Field::Score, vec![]));

        assert!(stmt.sql.contains("WHERE FALSE "));
    }
}
