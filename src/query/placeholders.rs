//! Rewrites generic `?` placeholders into Postgres positional parameters.
//!
//! Fragments are assembled with `?` so they can be built and tested in
//! isolation. Once the statement text is final, placeholders are numbered
//! left to right, which is exactly the order their arguments were appended.
//!
//! Text inside single-quoted literals is left alone, and `$n` tokens that are
//! already present are never renumbered: numbering continues after the
//! highest existing index so the two can coexist.

use super::fragment::PLACEHOLDER;

const POSITIONAL_PREFIX: char = '$';

/// Distinct `$n` indices appearing outside string literals, ascending.
#[must_use]
pub fn positional_indices(sql: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut in_literal = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => in_literal = !in_literal,
            POSITIONAL_PREFIX if !in_literal => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                if let Ok(index) = digits.parse::<usize>() {
                    indices.push(index);
                }
            }
            _ => {}
        }
    }

    indices.sort_unstable();
    indices.dedup();
    indices
}

/// Highest `$n` index appearing outside string literals, 0 when there is none.
#[must_use]
pub fn max_positional_index(sql: &str) -> usize {
    positional_indices(sql).last().copied().unwrap_or(0)
}

/// Replace every `?` outside string literals with `$start`, `$start+1`, ...
#[must_use]
pub fn renumber_from(sql: &str, start: usize) -> String {
    let mut output = String::with_capacity(sql.len() + 8);
    let mut next = start;
    let mut in_literal = false;

    for c in sql.chars() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                output.push(c);
            }
            PLACEHOLDER if !in_literal => {
                output.push(POSITIONAL_PREFIX);
                output.push_str(&next.to_string());
                next += 1;
            }
            _ => output.push(c),
        }
    }

    output
}

/// Number placeholders, continuing after any positional index already in use.
#[must_use]
pub fn renumber(sql: &str) -> String {
    renumber_from(sql, max_positional_index(sql) + 1)
}

/// Count the `?` placeholders outside string literals.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut in_literal = false;

    for c in sql.chars() {
        match c {
            '\'' => in_literal = !in_literal,
            PLACEHOLDER if !in_literal => count += 1,
            _ => {}
        }
    }

    count
}
