//! Print what is currently stored, as a quick sanity check after seeding.

use sqlx::{Pool, Postgres};
use tracker_core::{initialize_database, Token, Wallet};

const LIST_LIMIT: i64 = 1000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = initialize_database().await?;

    println!("Database contents:\n");

    let wallets = Wallet::find_all(&[], LIST_LIMIT, 0, &pool).await?;
    println!("Wallets ({}):", wallets.len());
    for w in &wallets {
        println!(
            "  - {} ({}) - {}",
            w.address,
            w.chain,
            w.label.as_deref().unwrap_or("No label")
        );
    }

    let tokens = Token::search(None, None, LIST_LIMIT, &pool).await?;
    println!("\nTokens ({}):", tokens.len());
    for t in &tokens {
        println!("  - {} ({}) on {}", t.symbol, t.name, t.chain);
    }

    match hypertables(&pool).await {
        Ok(names) => println!("\nTimescaleDB hypertables: {:?}", names),
        Err(err) => println!("\nTimescaleDB hypertables unavailable: {err}"),
    }

    pool.close().await;
    Ok(())
}

async fn hypertables(pool: &Pool<Postgres>) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT hypertable_name::text
        FROM timescaledb_information.hypertables
        WHERE hypertable_schema IN ('crypto', 'analytics')
        "#,
    )
    .fetch_all(pool)
    .await
}
