#![allow(dead_code)]

use paginate_sql::{Config, EntityMetadata, QueryCompiler, entity_metadata};

/// Metadata for the `users u` table used across the integration tests
pub fn user_metadata() -> EntityMetadata {
    entity_metadata! {
        "id" => "u.id",
        "name" => "u.name",
        "lastName" => "u.last_name",
        "email" => "u.email",
        "age" => "u.age",
        "status" => "u.status",
        "createdAt" => "u.created_at",
        "deletedAt" => "u.deleted_at",
        "teamName" => "t.name",
    }
}

pub fn compiler(metadata: &EntityMetadata) -> QueryCompiler<'_> {
    QueryCompiler::new(metadata, Config::default())
}

/// Indices of the `$n` tokens in order of appearance, ignoring string literals
pub fn positional_indices(sql: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut in_literal = false;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => in_literal = !in_literal,
            '$' if !in_literal => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                if let Ok(index) = digits.parse() {
                    indices.push(index);
                }
            }
            _ => {}
        }
    }
    indices
}

/// Text between `FROM` and the first of `ORDER BY` / `LIMIT` / `;`
pub fn body(sql: &str) -> &str {
    let start = sql.find(" FROM ").expect("query has a FROM clause");
    let rest = &sql[start..];
    let end = [" ORDER BY ", " LIMIT ", ";"]
        .iter()
        .filter_map(|marker| rest.find(marker))
        .min()
        .unwrap_or(rest.len());
    &rest[..end]
}
