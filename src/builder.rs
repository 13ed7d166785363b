//! Fluent construction of a [`FilterSpec`].
//!
//! ```rust
//! use paginate_sql::{Config, FilterSpec};
//!
//! let spec = FilterSpec::builder("users u")
//!     .schema("app")
//!     .search("ada", ["name", "email"])
//!     .equals("status", ["active", "invited"])
//!     .greater_than_or_equal("age", [18])
//!     .like_or("email", ["example.com"])
//!     .is_null_or("deletedAt")
//!     .sort("lastName", "desc")
//!     .page(3)
//!     .items_per_page(500)
//!     .build(&Config::default());
//!
//! // Page size is clamped to the configured maximum
//! assert_eq!(spec.items_per_page, 100);
//! assert_eq!(spec.filters.len(), 4);
//! ```

use sea_orm::Value;

use crate::config::Config;
use crate::models::{Combinator, FilterEntry, FilterKind, FilterSpec};
use crate::query::Fragment;

impl FilterSpec {
    /// Start building a specification for `table`.
    #[must_use]
    pub fn builder(table: impl Into<String>) -> FilterSpecBuilder {
        FilterSpecBuilder::new(table)
    }
}

fn values<I, V>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

#[derive(Debug, Clone)]
pub struct FilterSpecBuilder {
    spec: FilterSpec,
}

impl FilterSpecBuilder {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            spec: FilterSpec::new(table),
        }
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.spec.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.spec.columns.push(column.into());
        self
    }

    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append a join clause, emitted verbatim (e.g. `LEFT JOIN teams t ON t.id = u.team_id`)
    #[must_use]
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.spec.joins.push(join.into());
        self
    }

    /// Free-text search of `term` across logical `fields`
    #[must_use]
    pub fn search<I, S>(mut self, term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.search = Some(term.into());
        self.spec.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a fully specified entry
    #[must_use]
    pub fn filter(mut self, entry: FilterEntry) -> Self {
        self.spec.filters.push(entry);
        self
    }

    fn and_entry<I, V>(self, field: impl Into<String>, kind: FilterKind, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(FilterEntry::new(field, kind, values(vals)))
    }

    fn or_entry<I, V>(self, field: impl Into<String>, kind: FilterKind, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(FilterEntry::new(field, kind, values(vals)).with_combinator(Combinator::Or))
    }

    /// `field` equals any of `values`
    #[must_use]
    pub fn equals<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::Equals, values)
    }

    /// Like [`equals`](Self::equals), but joins the shared OR group
    #[must_use]
    pub fn equals_or<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.or_entry(field, FilterKind::Equals, values)
    }

    /// `field` contains any of `values` (case-insensitive)
    #[must_use]
    pub fn like<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::Like, values)
    }

    /// `field` contains every one of `values` (case-insensitive)
    #[must_use]
    pub fn like_all<I, V>(self, field: impl Into<String>, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(
            FilterEntry::new(field, FilterKind::Like, values(vals))
                .with_value_combinator(Combinator::And),
        )
    }

    /// Like [`like`](Self::like), but joins the shared OR group
    #[must_use]
    pub fn like_or<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.or_entry(field, FilterKind::Like, values)
    }

    #[must_use]
    pub fn greater_than<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::GreaterThan, values)
    }

    #[must_use]
    pub fn greater_than_or_equal<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::GreaterThanOrEqual, values)
    }

    #[must_use]
    pub fn less_than<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::LessThan, values)
    }

    #[must_use]
    pub fn less_than_or_equal<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::LessThanOrEqual, values)
    }

    /// `field BETWEEN min AND max`
    #[must_use]
    pub fn between(
        self,
        field: impl Into<String>,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> Self {
        self.filter(FilterEntry::new(
            field,
            FilterKind::Between,
            vec![min.into(), max.into()],
        ))
    }

    #[must_use]
    pub fn in_set<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::In, values)
    }

    #[must_use]
    pub fn not_in_set<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_entry(field, FilterKind::NotIn, values)
    }

    #[must_use]
    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.filter(FilterEntry::new(field, FilterKind::IsNull, Vec::new()))
    }

    /// `field IS NULL` as a member of the shared OR group
    #[must_use]
    pub fn is_null_or(self, field: impl Into<String>) -> Self {
        self.filter(
            FilterEntry::new(field, FilterKind::IsNull, Vec::new()).with_combinator(Combinator::Or),
        )
    }

    #[must_use]
    pub fn is_not_null(self, field: impl Into<String>) -> Self {
        self.filter(FilterEntry::new(field, FilterKind::IsNotNull, Vec::new()))
    }

    /// Append a sort term; `direction` is `asc` or `desc` (case-insensitive)
    #[must_use]
    pub fn sort(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.spec.sort_columns.push(column.into());
        self.spec.sort_directions.push(direction.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: i64) -> Self {
        self.spec.page = page;
        self
    }

    #[must_use]
    pub fn items_per_page(mut self, items: i64) -> Self {
        self.spec.items_per_page = items;
        self
    }

    #[must_use]
    pub fn no_offset(mut self, no_offset: bool) -> Self {
        self.spec.no_offset = no_offset;
        self
    }

    /// Use the statistical estimator for count queries
    #[must_use]
    pub fn vacuum(mut self, vacuum: bool) -> Self {
        self.spec.vacuum = vacuum;
        self
    }

    /// Add a raw WHERE fragment.
    ///
    /// `args` bind the fragment's distinct `$n` tokens first, in ascending
    /// order, then each `?` in turn. `$n` tokens keep their number, so they
    /// must continue `$1, $2, ...` across fragments. A fragment whose
    /// arguments don't match its parameters, or whose `$n` tokens leave a gap
    /// or rebind an index to another value, is left out of the compiled
    /// query.
    #[must_use]
    pub fn where_clause<I, V>(mut self, clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.spec
            .where_clauses
            .push(Fragment::new(clause, values(args)));
        self
    }

    /// How raw WHERE fragments are joined with each other (default `AND`)
    #[must_use]
    pub fn where_combinator(mut self, combinator: Combinator) -> Self {
        self.spec.where_combinator = combinator;
        self
    }

    /// Finish the specification, applying the pagination limits of `config`.
    ///
    /// Pages below 1 become 1; a non-positive page size becomes the default
    /// and one above the maximum is clamped to it.
    #[must_use]
    pub fn build(self, config: &Config) -> FilterSpec {
        let mut spec = self.spec;
        spec.page = spec.page.max(1);
        if spec.items_per_page < 1 {
            spec.items_per_page = config.default_items_per_page;
        }
        if config.max_items_per_page > 0 && spec.items_per_page > config.max_items_per_page {
            spec.items_per_page = config.max_items_per_page;
        }
        spec
    }

    /// Finish without applying any pagination limits.
    #[must_use]
    pub fn build_unchecked(self) -> FilterSpec {
        self.spec
    }
}
