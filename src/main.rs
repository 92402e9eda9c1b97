use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use lottery_lib::api::NyOpenDataSource;
use lottery_lib::clock::SystemClock;
use lottery_lib::config;
use lottery_lib::draw_cache::DrawResultCache;
use lottery_lib::engine::PrizeEngine;
use lottery_lib::mcp_handler::{MCPHandler, stdio};
use lottery_lib::prize_table::PrizeTable;
use lottery_lib::use_cases::LotteryUseCase;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Checking tickets against draws from {}", config.draws_url);

    let prize_table = match &config.prize_table_path {
        Some(path) => PrizeTable::from_json_file(path)?,
        None => PrizeTable::default(),
    };

    let source = NyOpenDataSource::from_config(&config)?;
    let cache = DrawResultCache::new(
        Arc::new(source),
        Arc::new(SystemClock),
        config.fetch_cooldown,
    );

    let lottery_use_case = LotteryUseCase::new(
        Arc::new(cache),
        PrizeEngine::new(prize_table),
        config.max_picks,
    );

    let handler = MCPHandler::new(Arc::new(lottery_use_case));

    let (reader, writer) = stdio();

    handler.serve(reader, writer).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    Ok(())
}
