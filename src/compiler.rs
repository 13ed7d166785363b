use crate::config::Config;
use crate::metadata::EntityMetadata;
use crate::models::FilterSpec;
use sea_orm::Value;

use crate::query::composer::{compose_row_query, positional_args};
use crate::query::count::{compose_count_query, id_column, wrap_estimate};
use crate::query::placeholders::{max_positional_index, renumber};
use crate::query::{CompiledQuery, Fragment};

const TERMINATOR: char = ';';

/// Compiles [`FilterSpec`]s for one entity into Postgres SQL.
///
/// Holds the entity's metadata by reference and a read-only [`Config`]. It
/// has no mutable state, so a single instance can be shared across threads
/// and requests.
///
/// ```rust
/// use paginate_sql::{Config, FilterSpec, QueryCompiler, entity_metadata};
///
/// let metadata = entity_metadata! { "name" => "u.name" };
/// let compiler = QueryCompiler::new(&metadata, Config::default());
///
/// let spec = FilterSpec::builder("users u")
///     .equals("name", ["ada"])
///     .build(compiler.config());
///
/// let query = compiler.compile_row_query(&spec);
/// assert_eq!(query.sql, "SELECT * FROM users u WHERE (u.name = $1) LIMIT 10 OFFSET 0;");
/// assert_eq!(query.args.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QueryCompiler<'a> {
    metadata: &'a EntityMetadata,
    config: Config,
}

impl<'a> QueryCompiler<'a> {
    #[must_use]
    pub fn new(metadata: &'a EntityMetadata, config: Config) -> Self {
        Self { metadata, config }
    }

    #[must_use]
    pub fn metadata(&self) -> &EntityMetadata {
        self.metadata
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the page query: `SELECT ... FROM ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...;`
    #[must_use]
    pub fn compile_row_query(&self, spec: &FilterSpec) -> CompiledQuery {
        let (numbered, args) = bind(spec, compose_row_query(spec, self.metadata));
        let query = CompiledQuery::new(format!("{numbered}{TERMINATOR}"), args);
        self.log("compile_row_query", &query);
        query
    }

    /// Build the matching count query.
    ///
    /// Same `FROM`/join/`WHERE` text and arguments as the row query, without
    /// ordering or pagination. With `spec.vacuum` set, the statement is
    /// wrapped in the configured estimator function.
    #[must_use]
    pub fn compile_count_query(&self, spec: &FilterSpec) -> CompiledQuery {
        let id = id_column(spec, self.metadata);
        let (numbered, args) = bind(spec, compose_count_query(spec, self.metadata, &id));

        let sql = if spec.vacuum {
            wrap_estimate(&numbered, &id, &self.config.estimate_function)
        } else {
            format!("{numbered}{TERMINATOR}")
        };

        let query = CompiledQuery::new(sql, args);
        self.log("compile_count_query", &query);
        query
    }

    fn log(&self, operation: &'static str, query: &CompiledQuery) {
        if self.config.debug {
            tracing::debug!(
                operation,
                sql = %query.sql,
                args = ?query.args,
                arg_count = query.args.len(),
                "Compiled paginated query"
            );
        }
    }
}

/// Number the `?` placeholders and lay out the arguments: values for
/// existing `$n` tokens first, then one per `?` in order of appearance.
fn bind(spec: &FilterSpec, fragment: Fragment) -> (String, Vec<Value>) {
    let Fragment { text, args: placeholder_args } = fragment;
    let mut args = positional_args(spec);

    let highest = max_positional_index(&text);
    if highest > args.len() {
        tracing::warn!(
            highest,
            bound = args.len(),
            "Statement references positional parameters with no value"
        );
    }

    args.extend(placeholder_args);
    (renumber(&text), args)
}

/// Compile the page query with the default [`Config`].
#[must_use]
pub fn compile_row_query(spec: &FilterSpec, metadata: &EntityMetadata) -> CompiledQuery {
    QueryCompiler::new(metadata, Config::default()).compile_row_query(spec)
}

/// Compile the count query with the default [`Config`].
#[must_use]
pub fn compile_count_query(spec: &FilterSpec, metadata: &EntityMetadata) -> CompiledQuery {
    QueryCompiler::new(metadata, Config::default()).compile_count_query(spec)
}
