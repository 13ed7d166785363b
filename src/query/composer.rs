//! Assembles the full statement from the individual fragments.
//!
//! Clause order is fixed: `SELECT`, `FROM`, joins, `WHERE`, `ORDER BY`,
//! `LIMIT`, `OFFSET`. The WHERE clause is a top-level `AND` of conjuncts,
//! collected in this order:
//!
//! 1. the free-text search group
//! 2. each AND entry (except between and null checks), one conjunct per entry
//! 3. one disjunction holding *every* OR entry, whatever its kind
//! 4. AND between entries
//! 5. AND null-check entries
//! 6. caller-supplied WHERE fragments, joined by their own combinator
//!
//! Arguments are appended in the same order, which is what keeps them aligned
//! with the placeholders once they are numbered.

use crate::filtering::{build_limit_offset, build_order_by, build_search_condition, compile_entry};
use crate::metadata::EntityMetadata;
use crate::models::{Combinator, FilterEntry, FilterKind, FilterSpec};
use sea_orm::Value;

use super::fragment::Fragment;
use super::placeholders::{count_placeholders, positional_indices};

/// Where an entry lands in the conjunct list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    And,
    Or,
    Between,
    NullCheck,
}

fn slot(entry: &FilterEntry) -> Slot {
    match (entry.combinator, entry.kind) {
        (Combinator::Or, _) => Slot::Or,
        (Combinator::And, FilterKind::Between) => Slot::Between,
        (Combinator::And, kind) if kind.is_null_check() => Slot::NullCheck,
        (Combinator::And, _) => Slot::And,
    }
}

fn compile_slot(spec: &FilterSpec, metadata: &EntityMetadata, wanted: Slot) -> Vec<Fragment> {
    spec.filters
        .iter()
        .filter(|entry| slot(entry) == wanted)
        .filter_map(|entry| compile_entry(entry, metadata))
        .collect()
}

/// Caller-supplied WHERE fragments that passed validation.
///
/// A fragment's arguments bind its distinct `$n` tokens first, in ascending
/// index order, then its `?` placeholders. Values for `$n` tokens are kept
/// apart in `positional`, where `positional[i]` binds `$(i + 1)`; they must
/// fill `$1..$k` without gaps, and two fragments sharing an index must agree
/// on its value.
#[derive(Debug, Default)]
struct Freeform {
    clauses: Vec<Fragment>,
    positional: Vec<Value>,
}

impl Freeform {
    fn collect(spec: &FilterSpec) -> Self {
        let mut freeform = Self::default();
        for clause in &spec.where_clauses {
            if let Err(reason) = freeform.accept(clause) {
                tracing::trace!(clause = %clause.text, reason, "Dropping WHERE fragment");
            }
        }
        freeform
    }

    fn accept(&mut self, clause: &Fragment) -> Result<(), &'static str> {
        if clause.text.trim().is_empty() {
            return Err("blank");
        }

        let indices = positional_indices(&clause.text);
        if indices.first() == Some(&0) {
            return Err("positional index 0");
        }
        if indices.len() + count_placeholders(&clause.text) != clause.args.len() {
            return Err("argument count does not match its parameters");
        }

        let (bound, rest) = clause.args.split_at(indices.len());
        let mut fresh = Vec::new();
        for (&index, value) in indices.iter().zip(bound) {
            match self.positional.get(index - 1) {
                Some(existing) if existing == value => {}
                Some(_) => return Err("conflicting value for a positional parameter"),
                None => fresh.push((index, value)),
            }
        }

        let next = self.positional.len() + 1;
        if fresh
            .iter()
            .enumerate()
            .any(|(offset, (index, _))| *index != next + offset)
        {
            return Err("positional parameters leave a gap");
        }

        self.positional
            .extend(fresh.into_iter().map(|(_, value)| value.clone()));
        self.clauses
            .push(Fragment::new(clause.text.clone(), rest.to_vec()).parenthesized());
        Ok(())
    }
}

/// Caller-supplied fragments as a single conjunct
fn build_freeform(spec: &FilterSpec) -> Option<Fragment> {
    let mut parts = Freeform::collect(spec).clauses;

    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Fragment::join(parts, spec.where_combinator.separator()).parenthesized()),
    }
}

/// Values bound to the `$n` tokens of caller-supplied WHERE fragments.
///
/// `args[i]` binds `$(i + 1)`. They precede every `?` argument in the
/// compiled query.
#[must_use]
pub fn positional_args(spec: &FilterSpec) -> Vec<Value> {
    Freeform::collect(spec).positional
}

/// Every top-level conjunct of the WHERE clause, in emission order.
#[must_use]
pub fn build_conjuncts(spec: &FilterSpec, metadata: &EntityMetadata) -> Vec<Fragment> {
    let mut conjuncts = Vec::new();

    if let Some(search) =
        build_search_condition(spec.search.as_deref(), &spec.search_fields, metadata)
    {
        conjuncts.push(search);
    }

    conjuncts.extend(compile_slot(spec, metadata, Slot::And));

    let or_group = compile_slot(spec, metadata, Slot::Or);
    if !or_group.is_empty() {
        conjuncts.push(Fragment::join(or_group, " OR ").parenthesized());
    }

    conjuncts.extend(compile_slot(spec, metadata, Slot::Between));
    conjuncts.extend(compile_slot(spec, metadata, Slot::NullCheck));
    conjuncts.extend(build_freeform(spec));

    conjuncts
}

/// `WHERE c1 AND c2 ...`, or nothing when there are no conjuncts
#[must_use]
pub fn build_where(spec: &FilterSpec, metadata: &EntityMetadata) -> Option<Fragment> {
    let conjuncts = build_conjuncts(spec, metadata);
    if conjuncts.is_empty() {
        return None;
    }
    let mut clause = Fragment::raw("WHERE");
    clause.push(Fragment::join(conjuncts, " AND "));
    Some(clause)
}

/// Output columns, resolved where possible, `*` when none are given
#[must_use]
pub fn build_select_columns(spec: &FilterSpec, metadata: &EntityMetadata) -> String {
    let columns: Vec<&str> = spec
        .columns
        .iter()
        .map(String::as_str)
        .filter(|column| !column.trim().is_empty())
        .map(|column| metadata.resolve(column).unwrap_or(column))
        .collect();

    if columns.is_empty() {
        "*".to_string()
    } else {
        columns.join(", ")
    }
}

/// `FROM`, joins and `WHERE`: the part shared by row and count queries.
#[must_use]
pub fn build_body(spec: &FilterSpec, metadata: &EntityMetadata) -> Fragment {
    let mut body = Fragment::raw(format!("FROM {}", spec.qualified_table()));
    for join in spec.joins.iter().filter(|join| !join.trim().is_empty()) {
        body.push_str(join.trim());
    }
    if let Some(clause) = build_where(spec, metadata) {
        body.push(clause);
    }
    body
}

/// The row query before placeholder numbering and without the terminator.
#[must_use]
pub fn compose_row_query(spec: &FilterSpec, metadata: &EntityMetadata) -> Fragment {
    let mut query = Fragment::raw(format!(
        "SELECT {}",
        build_select_columns(spec, metadata)
    ));
    query.push(build_body(spec, metadata));
    if let Some(order_by) = build_order_by(&spec.sort_columns, &spec.sort_directions, metadata) {
        query.push_str(&order_by);
    }
    query.push_str(&build_limit_offset(spec));
    query
}
