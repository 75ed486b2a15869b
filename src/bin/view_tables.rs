use afrijobs_backend::{config::init_config, database::pool::create_pool};

#[derive(Debug, sqlx::FromRow)]
struct TableInfo {
    table_name: String,
    column_count: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let pool = create_pool().await?;

    let tables = sqlx::query_as::<_, TableInfo>(
        "SELECT t.table_name::text AS table_name, \
                (SELECT count(*) FROM information_schema.columns c \
                 WHERE c.table_name = t.table_name) AS column_count \
         FROM information_schema.tables t \
         WHERE t.table_schema = 'public' \
         ORDER BY t.table_name",
    )
    .fetch_all(&pool)
    .await?;

    println!("\nAll Tables in Database:");
    println!("=======================");
    for table in &tables {
        println!("{} ({} columns)", table.table_name, table.column_count);
    }

    Ok(())
}
