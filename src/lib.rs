//! # paginate-sql
//!
//! Compiles pagination, filtering, search and sorting directives into
//! parameterized Postgres SQL plus a positionally aligned argument list.
//!
//! ```rust
//! use paginate_sql::{Config, FilterSpec, QueryCompiler, entity_metadata};
//!
//! let metadata = entity_metadata! {
//!     "t.id" => "t.id",
//!     "name" => "name",
//!     "lastName" => "last_name",
//! };
//! let compiler = QueryCompiler::new(&metadata, Config::default());
//!
//! let spec = FilterSpec::builder("test")
//!     .search("vinicius", ["t.id"])
//!     .sort("name", "desc")
//!     .sort("lastName", "asc")
//!     .page(3)
//!     .items_per_page(50)
//!     .build(compiler.config());
//!
//! let rows = compiler.compile_row_query(&spec);
//! assert!(rows.sql.ends_with("ORDER BY name DESC, last_name ASC LIMIT 50 OFFSET 100;"));
//!
//! let count = compiler.compile_count_query(&spec);
//! assert_eq!(count.sql, "SELECT COUNT(id) FROM test WHERE (t.id::TEXT ILIKE $1);");
//! assert_eq!(count.args, rows.args);
//! ```

pub mod builder;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod filtering;
pub mod metadata;
pub mod models;
pub mod query;

pub use builder::FilterSpecBuilder;
pub use compiler::{QueryCompiler, compile_count_query, compile_row_query};
pub use config::Config;
pub use errors::MetadataError;
pub use metadata::{EntityMetadata, FieldMapping};
pub use models::{Combinator, FilterEntry, FilterKind, FilterSpec};
pub use query::{CompiledQuery, Fragment};
