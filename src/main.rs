use crate::cli::Args;
use clap::Parser;
use log::{debug, error, info};
use std::process::ExitCode;

mod cli;
mod errors;
mod fs;
mod janitor;
mod logger;
mod models;
mod report;
mod retention;
mod scanner;
mod vars;

fn main() -> ExitCode {
    let args = Args::parse();
    // Initialize the logger
    logger::init();
    // Set up the application environment variables
    env_setup();

    match cli::purge::run(args) {
        Ok(summary) => {
            debug!("Purge finished: {summary:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // 已执行的删除不会回滚
            error!("Purge failed: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn env_setup() {
    // Load environment variables from .env file if it exists
    if dotenvy::dotenv().is_ok() {
        info!("loaded .env file");
    }
}
