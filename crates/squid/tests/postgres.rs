//! Round trips against a live database. Skipped unless `DATABASE_URL` is set.

use squid::{
    FromRow, GenericClient, Record, SquidResult, raw, spread_and, spread_insert, spread_update,
    sql,
};
use tokio_postgres::NoTls;

#[derive(Debug, FromRow, PartialEq)]
struct TestRow {
    id: i32,
    #[squid(column = "name")]
    label: String,
}

async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping");
            return None;
        }
    };
    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

async fn reset_table(client: &impl GenericClient, table: &str) -> SquidResult<()> {
    client
        .execute(&format!("DROP TABLE IF EXISTS {table}"), &[])
        .await?;
    client
        .execute(
            &format!("CREATE TABLE {table} ( id SERIAL, name VARCHAR, age INT )"),
            &[],
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn template_query_runs() -> SquidResult<()> {
    let Some(client) = try_connect().await else {
        return Ok(());
    };
    let table = "squid_test_template";
    reset_table(&client, table).await?;

    client
        .execute(
            &format!("INSERT INTO {table} (name) VALUES ('Alice'), ('Bob'), ('Charles')"),
            &[],
        )
        .await?;

    let q = sql!(
        "SELECT id, name FROM " {squid::ident(table)?}
        " WHERE id = " {1_i32} " OR name = " {raw("'Charles'")} " ORDER BY id"
    );
    let rows: Vec<TestRow> = q.fetch_all_as(&client).await?;
    assert_eq!(
        rows,
        vec![
            TestRow {
                id: 1,
                label: "Alice".to_string()
            },
            TestRow {
                id: 3,
                label: "Charles".to_string()
            },
        ]
    );

    client.execute(&format!("DROP TABLE {table}"), &[]).await?;
    Ok(())
}

#[tokio::test]
async fn spread_helpers_round_trip() -> SquidResult<()> {
    let Some(mut client) = try_connect().await else {
        return Ok(());
    };
    let table = "squid_test_spread";
    reset_table(&client, table).await?;

    let tx = client.transaction().await?;

    let rows = [
        Record::new().set("name", "Hugo").set("age", 20_i32),
        Record::new().set("age", 25_i32).set("name", "Jon"),
    ];
    let inserted = sql!("INSERT INTO " {squid::ident(table)?} " " {spread_insert(&rows)?})
        .execute(&tx)
        .await?;
    assert_eq!(inserted, 2);

    let updated = sql!(
        "UPDATE " {squid::ident(table)?} " SET " {spread_update(&Record::new().set("age", 26_i32))?}
        " WHERE " {spread_and(&Record::new().set("name", "Jon").absent("age"))?}
    )
    .execute(&tx)
    .await?;
    assert_eq!(updated, 1);

    let row = sql!(
        "SELECT age FROM " {squid::ident(table)?} " WHERE " {spread_and(&Record::new().set("name", "Jon"))?}
    )
    .fetch_one(&tx)
    .await?;
    assert_eq!(row.get::<_, i32>(0), 26);

    let missing = sql!("SELECT id FROM " {squid::ident(table)?} " WHERE name = " {"nobody"})
        .fetch_opt(&tx)
        .await?;
    assert!(missing.is_none());

    tx.rollback().await?;
    client.execute(&format!("DROP TABLE {table}"), &[]).await?;
    Ok(())
}
