//! Populate a development database with sample tokens, a wallet and a transfer.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker_core::{initialize_database, run_migrations, seed};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,tracker_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seeding database...");

    let result = async {
        let pool = initialize_database().await?;
        run_migrations(&pool).await?;
        let report = seed::run(&pool).await?;
        pool.close().await;
        Ok::<_, Box<dyn std::error::Error>>(report)
    }
    .await;

    match result {
        Ok(report) => {
            tracing::info!(
                tokens = report.tokens.len(),
                wallet = %report.wallet.address,
                transaction = %report.transaction.hash,
                "Seed complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Seed failed: {err}");
            ExitCode::FAILURE
        }
    }
}
