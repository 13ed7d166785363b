mod common;

use common::{compiler, positional_indices, user_metadata};
use paginate_sql::{Combinator, Config, FilterEntry, FilterKind, FilterSpec};
use sea_orm::Value;

const KINDS: [FilterKind; 11] = [
    FilterKind::Equals,
    FilterKind::Like,
    FilterKind::GreaterThan,
    FilterKind::GreaterThanOrEqual,
    FilterKind::LessThan,
    FilterKind::LessThanOrEqual,
    FilterKind::Between,
    FilterKind::In,
    FilterKind::NotIn,
    FilterKind::IsNull,
    FilterKind::IsNotNull,
];

const FIELDS: [&str; 4] = ["name", "age", "unknown", "status"];

/// Every kind crossed with known and unknown fields, both combinators and
/// one to three values per entry.
fn mixed_specs() -> Vec<FilterSpec> {
    let mut specs = Vec::new();
    for (i, kind) in KINDS.iter().enumerate() {
        for value_count in 1..=3 {
            let mut spec = FilterSpec::builder("users u")
                .search(if i % 2 == 0 { "ada" } else { "" }, ["name", "bogus", "email"])
                .where_clause("u.tenant_id = ?", [i as i64])
                .build(&Config::default());

            for (j, field) in FIELDS.iter().enumerate() {
                let kind = KINDS[(i + j) % KINDS.len()];
                let values: Vec<Value> = (0..value_count)
                    .map(|n| Value::from(format!("{field}-{n}")))
                    .collect();
                let combinator = if (i + j) % 2 == 0 { Combinator::And } else { Combinator::Or };
                spec.filters.push(
                    FilterEntry::new(*field, kind, values)
                        .with_combinator(combinator)
                        .with_value_combinator(if j % 2 == 0 { Combinator::Or } else { Combinator::And }),
                );
            }
            spec.filters
                .push(FilterEntry::new("email", *kind, vec![Value::from("x"), Value::from("y")]));
            specs.push(spec);
        }
    }
    specs
}

#[test]
fn test_placeholders_match_arguments() {
    let metadata = user_metadata();
    let compiler = compiler(&metadata);

    for spec in mixed_specs() {
        for query in [compiler.compile_row_query(&spec), compiler.compile_count_query(&spec)] {
            let indices = positional_indices(&query.sql);
            assert_eq!(indices.len(), query.args.len(), "misaligned: {}", query.sql);
            assert_eq!(
                indices,
                (1..=query.args.len()).collect::<Vec<_>>(),
                "placeholders out of order: {}",
                query.sql
            );
            assert!(!query.sql.contains('?'), "unnumbered placeholder: {}", query.sql);
        }
    }
}

#[test]
fn test_nth_placeholder_binds_nth_argument() {
    let metadata = user_metadata();
    let spec = FilterSpec::builder("users u")
        .equals("name", ["a"])
        .equals("ghost", ["never-bound"])
        .greater_than("age", [30])
        .like_or("email", ["b"])
        .in_set("unknown", [1, 2])
        .between("age", 1, 2)
        .build(&Config::default());

    let query = compiler(&metadata).compile_row_query(&spec);

    assert_eq!(
        query.sql,
        "SELECT * FROM users u WHERE (u.name = $1) AND (u.age > $2) AND ((u.email::TEXT ILIKE $3)) AND (u.age BETWEEN $4 AND $5) LIMIT 10 OFFSET 0;"
    );
    assert_eq!(
        query.args,
        vec![
            Value::from("a"),
            Value::from(30),
            Value::from("%b%"),
            Value::from(1),
            Value::from(2),
        ]
    );
}

#[test]
fn test_unknown_field_does_not_shift_others() {
    let metadata = user_metadata();
    let with_unknown = FilterSpec::builder("users u")
        .equals("name", ["a"])
        .equals("nope", ["zzz"])
        .equals_or("status", ["s"])
        .build(&Config::default());
    let without_unknown = FilterSpec::builder("users u")
        .equals("name", ["a"])
        .equals_or("status", ["s"])
        .build(&Config::default());

    let compiler = compiler(&metadata);
    assert_eq!(
        compiler.compile_row_query(&with_unknown),
        compiler.compile_row_query(&without_unknown)
    );
    assert_eq!(
        compiler.compile_count_query(&with_unknown),
        compiler.compile_count_query(&without_unknown)
    );
}

#[test]
fn test_compilation_is_deterministic() {
    let metadata = user_metadata();
    let compiler = compiler(&metadata);
    for spec in mixed_specs() {
        assert_eq!(compiler.compile_row_query(&spec), compiler.compile_row_query(&spec));
        assert_eq!(compiler.compile_count_query(&spec), compiler.compile_count_query(&spec));
    }
}

#[test]
fn test_two_or_kinds_form_single_group() {
    let metadata = user_metadata();
    let spec = FilterSpec::builder("users u")
        .equals_or("name", ["a"])
        .like_or("email", ["b"])
        .build(&Config::default());

    let sql = compiler(&metadata).compile_row_query(&spec).sql;
    let where_clause = sql
        .split(" WHERE ")
        .nth(1)
        .and_then(|rest| rest.split(" LIMIT ").next())
        .unwrap();
    assert_eq!(where_clause, "((u.name = $1) OR (u.email::TEXT ILIKE $2))");
    assert_eq!(where_clause.matches(" OR ").count(), 1);
    assert!(!where_clause.contains(" AND "));
}
