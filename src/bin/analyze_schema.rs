use std::collections::BTreeMap;
use std::fmt::Write as _;

use afrijobs_backend::{config::init_config, database::pool::create_pool};

#[derive(Debug, Clone, sqlx::FromRow)]
struct ColumnInfo {
    table_name: String,
    column_name: String,
    data_type: String,
    is_nullable: String,
    column_default: Option<String>,
    references_table: Option<String>,
    references_column: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let pool = create_pool().await?;

    let columns = sqlx::query_as::<_, ColumnInfo>(
        "SELECT \
             c.table_name::text AS table_name, \
             c.column_name::text AS column_name, \
             c.data_type::text AS data_type, \
             c.is_nullable::text AS is_nullable, \
             c.column_default::text AS column_default, \
             fk.foreign_table_name::text AS references_table, \
             fk.foreign_column_name::text AS references_column \
         FROM information_schema.columns c \
         LEFT JOIN ( \
             SELECT tc.table_name, kcu.column_name, \
                    ccu.table_name AS foreign_table_name, \
                    ccu.column_name AS foreign_column_name \
             FROM information_schema.table_constraints tc \
             JOIN information_schema.key_column_usage kcu \
               ON tc.constraint_name = kcu.constraint_name \
              AND tc.table_schema = kcu.table_schema \
             JOIN information_schema.constraint_column_usage ccu \
               ON ccu.constraint_name = tc.constraint_name \
              AND ccu.table_schema = tc.table_schema \
             WHERE tc.constraint_type = 'FOREIGN KEY' \
               AND tc.table_schema = 'public' \
         ) fk ON fk.table_name = c.table_name AND fk.column_name = c.column_name \
         WHERE c.table_schema = 'public' \
         ORDER BY c.table_name, c.ordinal_position",
    )
    .fetch_all(&pool)
    .await?;

    let tables = group_by_table(columns);
    let report = render_report(&tables)?;

    std::fs::write("database_analysis.md", report)?;
    println!("Analysis complete! Check database_analysis.md for details.");

    Ok(())
}

fn group_by_table(columns: Vec<ColumnInfo>) -> BTreeMap<String, Vec<ColumnInfo>> {
    let mut tables: BTreeMap<String, Vec<ColumnInfo>> = BTreeMap::new();
    for column in columns {
        tables.entry(column.table_name.clone()).or_default().push(column);
    }
    tables
}

fn render_report(tables: &BTreeMap<String, Vec<ColumnInfo>>) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "# Database Schema Analysis\n")?;
    writeln!(out, "## Current Schema\n")?;

    for (table_name, columns) in tables {
        writeln!(out, "### {}\n", table_name)?;
        writeln!(out, "| Column | Type | Nullable | Default | References |")?;
        writeln!(out, "|--------|------|----------|----------|------------|")?;
        for column in columns {
            let reference = match (&column.references_table, &column.references_column) {
                (Some(table), Some(col)) => format!("{}({})", table, col),
                _ => String::new(),
            };
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                column.column_name,
                column.data_type,
                column.is_nullable,
                column.column_default.as_deref().unwrap_or(""),
                reference
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\n## Suggested Improvements\n")?;

    if tables.contains_key("jobs") && tables.contains_key("job_details") {
        writeln!(out, "### 1. Merge Duplicate Tables")?;
        writeln!(out, "- `jobs` and `job_details` tables appear to store similar information")?;
        writeln!(out, "- Recommendation: Merge these tables into a single `jobs` table")?;
        writeln!(out, "- Migration steps:")?;
        writeln!(out, "  1. Create a migration to merge unique columns from `job_details` into `jobs`")?;
        writeln!(out, "  2. Migrate the data")?;
        writeln!(out, "  3. Remove the `job_details` table\n")?;
    }

    writeln!(out, "### 2. Index Recommendations")?;
    writeln!(out, "- Add indexes on frequently queried columns and foreign keys")?;
    writeln!(out, "- Specific recommendations:")?;
    for (table_name, columns) in tables {
        let fk_columns: Vec<&str> = columns
            .iter()
            .filter(|column| column.references_table.is_some())
            .map(|column| column.column_name.as_str())
            .collect();
        if !fk_columns.is_empty() {
            writeln!(
                out,
                "  - Add indexes on foreign keys in `{}`: {}",
                table_name,
                fk_columns.join(", ")
            )?;
        }
    }

    writeln!(out, "\n### 3. Timestamp Management")?;
    let without_timestamps: Vec<&str> = tables
        .iter()
        .filter(|(_, columns)| {
            !columns
                .iter()
                .any(|c| c.column_name == "created_at" || c.column_name == "updated_at")
        })
        .map(|(name, _)| name.as_str())
        .collect();
    if !without_timestamps.is_empty() {
        writeln!(out, "- Add timestamp columns to track record creation and updates:")?;
        for table_name in without_timestamps {
            writeln!(out, "  - Add `created_at` and `updated_at` to `{}`", table_name)?;
        }
    }

    Ok(out)
}
