//! End-to-end query construction through the public API.
//!
//! No database involved: these check the generated text and value order.

use squid::{
    Record, SquidError, escape_identifier, ident, param, raw, spread_and, spread_insert,
    spread_update, sql, sql_fragment,
};

fn dedent(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn values(q: &squid::QueryConfig) -> String {
    format!("{:?}", q.values)
}

#[test]
fn template_creates_a_valid_postgres_query() {
    let q = sql!("SELECT email FROM users WHERE id = " {1_i32});
    assert_eq!(q.text, "SELECT email FROM users WHERE id = $1");
    assert_eq!(values(&q), "[1]");
}

#[test]
fn explicit_param_works() {
    let q = sql!("SELECT email FROM users WHERE id = " {param(1_i32)});
    assert_eq!(q.text, "SELECT email FROM users WHERE id = $1");
    assert_eq!(values(&q), "[1]");
}

#[test]
fn raw_works() {
    let q = sql!("SELECT email FROM users WHERE id = " {raw("1")});
    assert_eq!(q.text, "SELECT email FROM users WHERE id = 1");
    assert!(q.values.is_empty());
}

#[test]
fn spread_and_in_where_clause() -> Result<(), SquidError> {
    let filter = Record::new()
        .set("name", "Hugo")
        .set("age", 20_i32)
        .set("email", raw("'foo@example.com'"))
        .absent("foo");
    let q = sql!(
        "
        SELECT * FROM users WHERE " {spread_and(&filter)?} "
        "
    );
    assert_eq!(
        dedent(&q.text),
        r#"SELECT * FROM users WHERE ("name" = $1 AND "age" = $2 AND "email" = 'foo@example.com')"#
    );
    assert_eq!(values(&q), r#"["Hugo", 20]"#);
    Ok(())
}

#[test]
fn spread_insert_with_returning() -> Result<(), SquidError> {
    let row = Record::new()
        .set("name", "Hugo")
        .set("age", 20_i32)
        .set("created_at", raw("NOW()"))
        .absent("foo");
    let q = sql!("INSERT INTO users " {spread_insert(&[row])?} " RETURNING *");
    assert_eq!(
        q.text,
        r#"INSERT INTO users ("name", "age", "created_at") VALUES ($1, $2, NOW()) RETURNING *"#
    );
    assert_eq!(values(&q), r#"["Hugo", 20]"#);
    Ok(())
}

#[test]
fn spread_insert_two_rows() -> Result<(), SquidError> {
    let rows = [
        squid::record! { "name" => "Hugo", "age" => 20_i32 },
        squid::record! { "name" => "Jon", "age" => 25_i32 },
    ];
    let q = sql!("INSERT INTO users " {spread_insert(&rows)?});
    assert_eq!(
        q.text,
        r#"INSERT INTO users ("name", "age") VALUES ($1, $2), ($3, $4)"#
    );
    assert_eq!(values(&q), r#"["Hugo", 20, "Jon", 25]"#);
    Ok(())
}

#[test]
fn spread_insert_rejects_differing_columns() {
    let rows = [
        squid::record! { "name" => "Hugo", "age" => 20_i32 },
        squid::record! { "name" => "Jon", "email" => "jon@example.com" },
    ];
    let err = spread_insert(&rows).unwrap_err();
    assert!(matches!(err, SquidError::MissingColumnValue { row: 1, .. }));
    assert!(err.is_construction_error());
}

#[test]
fn spread_update_works() -> Result<(), SquidError> {
    let changes = Record::new()
        .set("name", "Hugo")
        .set("age", 20_i32)
        .set("created_at", raw("NOW()"))
        .set_opt("foo", None::<String>);
    let q = sql!("UPDATE users SET " {spread_update(&changes)?} " WHERE id = " {7_i64});
    assert_eq!(
        q.text,
        r#"UPDATE users SET "name" = $1, "age" = $2, "created_at" = NOW() WHERE id = $3"#
    );
    assert_eq!(values(&q), r#"["Hugo", 20, 7]"#);
    Ok(())
}

#[test]
fn works_with_multiple_parameters() -> Result<(), SquidError> {
    let row = Record::new()
        .set("name", "Hugo")
        .set("age", 20_i32)
        .set("created_at", raw("NOW()"))
        .set("role", "user");
    let q = sql!(
        "
        WITH some_users AS (
          SELECT * FROM users WHERE id = " {1_i32} " OR email = " {"foo@example.com"} "
        )
        INSERT INTO users " {spread_insert(&[row])?} " UNION SELECT * FROM some_users RETURNING *
        "
    );
    assert_eq!(
        dedent(&q.text),
        dedent(
            r#"
            WITH some_users AS (
            SELECT * FROM users WHERE id = $1 OR email = $2
            )
            INSERT INTO users ("name", "age", "created_at", "role") VALUES ($3, $4, NOW(), $5) UNION SELECT * FROM some_users RETURNING *
            "#
        )
    );
    assert_eq!(values(&q), r#"[1, "foo@example.com", "Hugo", 20, "user"]"#);
    assert!(q.validate().is_ok());
    Ok(())
}

#[test]
fn fragments_nest_and_renumber() -> Result<(), SquidError> {
    let active = sql_fragment!("status = " {"active"} " AND age > " {18_i32});
    let filter = Record::new().set("country", "NZ").set("flags", active.clone().parenthesize());
    let q = sql!(
        "SELECT * FROM " {ident("users")?} " WHERE " {spread_and(&filter)?} " OR (" {active} ")"
    );
    assert_eq!(
        q.text,
        r#"SELECT * FROM "users" WHERE ("country" = $1 AND "flags" = (status = $2 AND age > $3)) OR (status = $4 AND age > $5)"#
    );
    assert_eq!(values(&q), r#"["NZ", "active", 18, "active", 18]"#);
    Ok(())
}

#[test]
fn null_values_are_bound() -> Result<(), SquidError> {
    let changes = Record::new().set("deleted_at", None::<String>);
    let q = sql!("UPDATE users SET " {spread_update(&changes)?});
    assert_eq!(q.text, r#"UPDATE users SET "deleted_at" = $1"#);
    assert_eq!(values(&q), "[None]");
    Ok(())
}

#[test]
fn chrono_and_json_values_bind() {
    let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let doc = serde_json::json!({ "theme": "dark" });
    let q = sql!("SELECT " {at} ", " {doc});
    assert_eq!(q.text, "SELECT $1, $2");
    assert_eq!(q.params_ref().len(), 2);
}

#[test]
fn identifiers_are_escaped() {
    assert_eq!(escape_identifier("col").unwrap(), "\"col\"");
    assert_eq!(escape_identifier("\"col\"").unwrap(), "\"col\"");
    assert!(matches!(
        escape_identifier("a\"b"),
        Err(SquidError::InvalidIdentifier { .. })
    ));
}

#[test]
fn function_form_matches_macro() -> Result<(), SquidError> {
    let q = squid::sql(
        &["SELECT * FROM users WHERE ", " LIMIT ", ""],
        vec![
            spread_and(&Record::new().set("name", "Hugo"))?,
            squid::to_builder(10_i64),
        ],
    )?;
    assert_eq!(q.text, r#"SELECT * FROM users WHERE ("name" = $1) LIMIT $2"#);
    assert_eq!(values(&q), r#"["Hugo", 10]"#);
    Ok(())
}
