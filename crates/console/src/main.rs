use std::io;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use bookclub_commands::CommandHandler;
use bookclub_console::{Speaker, run};
use bookclub_infra::{ClubService, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    bookclub_observability::init(config.log_format);

    let store = config.open_store().context("failed to open club store")?;
    let handler = CommandHandler::new(ClubService::new(Arc::clone(&store)));

    tracing::info!(
        "console transport ready for community {} as {} ({})",
        config.community,
        config.user_name,
        config.user_id
    );

    let speaker = Speaker {
        id: config.user_id,
        name: config.user_name.clone(),
    };
    let stdin = io::stdin();
    run(&handler, config.community, speaker, stdin.lock(), io::stdout(), Utc::now)
}
