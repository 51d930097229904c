pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod ranking;
pub mod services;
pub mod storage;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use crate::api::PublicApiClient;
use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::services::rank::RankService;
use crate::services::sync::SyncService;
use crate::storage::SnapshotStore;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_sync(data_dir: Option<&Path>) -> Result<()> {
    let config = AppConfig::from_env().with_data_dir(data_dir);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let api = PublicApiClient::new(&config.api)?;
        let store = SnapshotStore::create(&config.storage.data_dir)?;
        let service = SyncService::new(api, store, config.api.concurrency);
        let report = service.run().await?;
        report.print_summary();
        Ok(())
    })
}

pub fn handle_rank(data_dir: Option<&Path>) -> Result<()> {
    let config = AppConfig::from_env().with_data_dir(data_dir);
    let store = SnapshotStore::open(&config.storage.data_dir);
    let service = RankService::new(store);
    let report = service.run()?;
    report.print_summary();
    Ok(())
}
