mod common;

use common::{body, compiler, user_metadata};
use paginate_sql::{Config, EntityMetadata, FilterSpec, QueryCompiler, entity_metadata};
use sea_orm::Value;

fn download_metadata() -> EntityMetadata {
    entity_metadata! {
        "id" => "dl.id",
        "file" => "dl.file_name",
        "status" => "dl.status",
    }
}

#[test]
fn test_count_matches_row_query_body() {
    let metadata = user_metadata();
    let spec = FilterSpec::builder("users u")
        .join("LEFT JOIN teams t ON t.id = u.team_id")
        .search("ada", ["name", "email"])
        .equals("status", ["active", "invited"])
        .like_or("teamName", ["core"])
        .is_null_or("deletedAt")
        .between("age", 18, 65)
        .where_clause("u.tenant_id = ?", [7])
        .sort("name", "asc")
        .page(5)
        .items_per_page(30)
        .build(&Config::default());

    let compiler = compiler(&metadata);
    let rows = compiler.compile_row_query(&spec);
    let count = compiler.compile_count_query(&spec);

    assert_eq!(body(&rows.sql), body(&count.sql));
    assert_eq!(rows.args, count.args);
    assert!(count.sql.starts_with("SELECT COUNT(id) FROM users u"));
    assert!(!count.sql.contains("ORDER BY"));
    assert!(!count.sql.contains("LIMIT"));
    assert!(!count.sql.contains("OFFSET"));
    assert!(count.sql.ends_with(';'));
}

#[test]
fn test_count_keeps_search_predicate() {
    let metadata = entity_metadata! {
        "t.id" => "t.id",
        "name" => "name",
        "lastName" => "last_name",
    };
    let spec = FilterSpec::builder("test")
        .search("vinicius", ["t.id"])
        .sort("name", "desc")
        .sort("lastName", "asc")
        .page(3)
        .items_per_page(50)
        .build(&Config::default());

    let count = paginate_sql::compile_count_query(&spec, &metadata);

    assert_eq!(count.sql, "SELECT COUNT(id) FROM test WHERE (t.id::TEXT ILIKE $1);");
    assert_eq!(count.args, vec![Value::from("%vinicius%")]);
}

#[test]
fn test_count_column_precedence() {
    let metadata = download_metadata();
    let compiler = QueryCompiler::new(&metadata, Config::default());

    let by_name = FilterSpec::builder("download_logs dl")
        .columns(["file", "id"])
        .build(compiler.config());
    assert!(compiler.compile_count_query(&by_name).sql.starts_with("SELECT COUNT(dl.id) "));

    let by_wildcard = FilterSpec::builder("download_logs dl")
        .columns(["dl.*"])
        .build(compiler.config());
    assert!(compiler.compile_count_query(&by_wildcard).sql.starts_with("SELECT COUNT(dl.id) "));

    let fallback = FilterSpec::builder("download_logs dl")
        .columns(["file"])
        .build(compiler.config());
    assert!(compiler.compile_count_query(&fallback).sql.starts_with("SELECT COUNT(id) "));
}

#[test]
fn test_vacuum_wraps_count_in_estimator() {
    let metadata = download_metadata();
    let spec = FilterSpec::builder("download_logs dl")
        .columns(["dl.*"])
        .equals("status", ["done"])
        .where_clause("dl.kind <> 'temp'", Vec::<Value>::new())
        .vacuum(true)
        .build(&Config::default());

    let count = paginate_sql::compile_count_query(&spec, &metadata);

    assert_eq!(
        count.sql,
        "SELECT count_estimate('SELECT 1 FROM download_logs dl WHERE (dl.status = $$1) AND (dl.kind <> ''temp'')');"
    );
    assert!(!count.sql.contains("COUNT(dl.id)"));
    assert_eq!(count.args, vec![Value::from("done")]);
}

#[test]
fn test_vacuum_does_not_affect_row_query() {
    let metadata = download_metadata();
    let spec = FilterSpec::builder("download_logs dl")
        .equals("status", ["done"])
        .vacuum(true)
        .build(&Config::default());

    let rows = paginate_sql::compile_row_query(&spec, &metadata);
    assert_eq!(
        rows.sql,
        "SELECT * FROM download_logs dl WHERE (dl.status = $1) LIMIT 10 OFFSET 0;"
    );
}

#[test]
fn test_count_into_statement() {
    let metadata = download_metadata();
    let spec = FilterSpec::builder("download_logs dl")
        .in_set("status", ["done", "failed"])
        .build(&Config::default());

    let statement = paginate_sql::compile_count_query(&spec, &metadata).into_statement();
    assert_eq!(
        statement.sql,
        "SELECT COUNT(id) FROM download_logs dl WHERE (dl.status IN ($1, $2));"
    );
    assert_eq!(statement.values.map(|values| values.0.len()), Some(2));
}

#[test]
fn test_count_keeps_positional_values_ahead() {
    let metadata = user_metadata();
    let spec = FilterSpec::builder("users u")
        .equals("status", ["active"])
        .where_clause("u.tenant_id = $1", [7])
        .build(&Config::default());

    let compiler = compiler(&metadata);
    let rows = compiler.compile_row_query(&spec);
    let count = compiler.compile_count_query(&spec);

    assert_eq!(
        count.sql,
        "SELECT COUNT(id) FROM users u WHERE (u.status = $2) AND (u.tenant_id = $1);"
    );
    assert_eq!(count.args, vec![Value::from(7), Value::from("active")]);
    assert_eq!(count.args, rows.args);

    let mut vacuum = spec.clone();
    vacuum.vacuum = true;
    let estimate = compiler.compile_count_query(&vacuum);
    assert_eq!(
        estimate.sql,
        "SELECT count_estimate('SELECT 1 FROM users u WHERE (u.status = $$2) AND (u.tenant_id = $$1)');"
    );
    assert_eq!(estimate.args, count.args);
}
