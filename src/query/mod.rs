//! Statement assembly: fragments, clause composition, placeholder numbering
//! and the count/estimate variants.

pub mod composer;
pub mod count;
pub mod fragment;
pub mod placeholders;

use sea_orm::{DbBackend, Statement, Value};

pub use fragment::{Fragment, PLACEHOLDER};

/// Final SQL text plus its arguments.
///
/// `args[i]` binds to `$(i + 1)`: arguments are listed in the order their
/// placeholders appear in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl CompiledQuery {
    #[must_use]
    pub fn new(sql: String, args: Vec<Value>) -> Self {
        Self { sql, args }
    }

    /// Convert into a sea-orm statement for a Postgres connection.
    #[must_use]
    pub fn into_statement(self) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, self.sql, self.args)
    }

    /// Split into the `(sql, args)` pair most drivers accept.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}
