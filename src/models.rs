use sea_orm::Value;
use serde::{Deserialize, Serialize};

use crate::query::Fragment;

/// How sibling predicates are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

impl Combinator {
    /// Separator used when joining fragments, keyword padded with spaces
    #[must_use]
    pub fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }

    /// Parse `and` / `or`, case-insensitively
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

/// Predicate category of a filter entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// `col = value`
    #[serde(alias = "eq")]
    Equals,
    /// `col::TEXT ILIKE '%value%'`
    Like,
    /// `col > value`
    #[serde(alias = "gt")]
    GreaterThan,
    /// `col >= value`
    #[serde(alias = "gte")]
    GreaterThanOrEqual,
    /// `col < value`
    #[serde(alias = "lt")]
    LessThan,
    /// `col <= value`
    #[serde(alias = "lte")]
    LessThanOrEqual,
    /// `col BETWEEN min AND max`
    Between,
    /// `col IN (...)`
    In,
    /// `col NOT IN (...)`
    #[serde(alias = "notin")]
    NotIn,
    /// `col IS NULL`
    #[serde(alias = "isnull")]
    IsNull,
    /// `col IS NOT NULL`
    #[serde(alias = "isnotnull")]
    IsNotNull,
}

impl FilterKind {
    /// Parse the short or long name of a filter kind (e.g. `gte`, `not_in`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "eq" | "equals" => Self::Equals,
            "like" => Self::Like,
            "gt" | "greater_than" => Self::GreaterThan,
            "gte" | "greater_than_or_equal" => Self::GreaterThanOrEqual,
            "lt" | "less_than" => Self::LessThan,
            "lte" | "less_than_or_equal" => Self::LessThanOrEqual,
            "between" => Self::Between,
            "in" => Self::In,
            "notin" | "not_in" => Self::NotIn,
            "isnull" | "is_null" => Self::IsNull,
            "isnotnull" | "is_not_null" => Self::IsNotNull,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind checks for SQL NULL and takes no values
    #[must_use]
    pub fn is_null_check(self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// One filter directive: a kind applied to a logical field with its values.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    /// Logical field name, resolved through entity metadata
    pub field: String,
    pub kind: FilterKind,
    /// How this entry joins the rest of the WHERE clause
    pub combinator: Combinator,
    pub values: Vec<Value>,
    /// How the entry's own values are joined with each other
    pub value_combinator: Combinator,
}

impl FilterEntry {
    /// Create an AND entry whose values are ORed together
    #[must_use]
    pub fn new(field: impl Into<String>, kind: FilterKind, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            kind,
            combinator: Combinator::And,
            values,
            value_combinator: Combinator::Or,
        }
    }

    #[must_use]
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    #[must_use]
    pub fn with_value_combinator(mut self, combinator: Combinator) -> Self {
        self.value_combinator = combinator;
        self
    }
}

/// Everything needed to build one page query (or its count).
///
/// Usually populated through [`FilterSpecBuilder`](crate::FilterSpecBuilder),
/// which also applies page-size limits from [`Config`](crate::Config). The
/// compiler uses the values verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub table: String,
    pub schema: Option<String>,
    /// Output columns, `*` when empty. Logical names are resolved, anything
    /// else (wildcards, expressions) is emitted as written.
    pub columns: Vec<String>,
    /// Join clauses emitted verbatim, in order
    pub joins: Vec<String>,
    /// Free-text search term
    pub search: Option<String>,
    /// Logical fields the search term is matched against
    pub search_fields: Vec<String>,
    pub filters: Vec<FilterEntry>,
    pub sort_columns: Vec<String>,
    /// `asc` / `desc`, paired 1:1 with `sort_columns`
    pub sort_directions: Vec<String>,
    /// 1-based page number
    pub page: i64,
    pub items_per_page: i64,
    /// Skip the OFFSET clause (keyset pagination)
    pub no_offset: bool,
    /// Wrap count queries in the statistical estimator
    pub vacuum: bool,
    /// Caller-supplied WHERE fragments using `?` placeholders
    pub where_clauses: Vec<Fragment>,
    pub where_combinator: Combinator,
}

impl FilterSpec {
    /// Empty specification for `table`: first page, default page size.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: None,
            columns: Vec::new(),
            joins: Vec::new(),
            search: None,
            search_fields: Vec::new(),
            filters: Vec::new(),
            sort_columns: Vec::new(),
            sort_directions: Vec::new(),
            page: 1,
            items_per_page: crate::config::DEFAULT_ITEMS_PER_PAGE,
            no_offset: false,
            vacuum: false,
            where_clauses: Vec::new(),
            where_combinator: Combinator::And,
        }
    }

    /// `schema.table` or just `table`
    #[must_use]
    pub fn qualified_table(&self) -> String {
        match self.schema.as_deref() {
            Some(schema) if !schema.is_empty() => format!("{schema}.{}", self.table),
            _ => self.table.clone(),
        }
    }
}
