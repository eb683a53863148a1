use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::Bot;

use session_manager::{FileSessionStorage, SessionManager};
use trainer_bot::telegram::{self, AppDeps, TelegramApi};

#[derive(Parser, Debug, Clone)]
#[command(name = "trainer-bot")]
#[command(about = "Daily workout trainer Telegram bot")]
#[command(version)]
struct Cli {
    /// Telegram bot API token
    #[arg(long, env = "TG_BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Directory holding per-user session files
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    if cli.log_level.is_some() {
        // If RUST_LOG is set, use it
        env_logger::init();
    } else {
        init_logging(cli.debug);
    }

    log::info!("Starting trainer-bot");
    log::info!("  Session data dir: {}", cli.data_dir.display());

    tokio::fs::create_dir_all(&cli.data_dir).await?;

    let bot = Bot::new(cli.bot_token);
    let deps = Arc::new(AppDeps {
        api: TelegramApi::new(bot.clone()),
        sessions: SessionManager::new(FileSessionStorage::new(&cli.data_dir)),
    });

    telegram::run(bot, deps).await;
    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();
}
