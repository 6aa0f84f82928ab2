use std::time::Duration;

use clap::{Parser, Subcommand};

use ekehi_id_bot::application::errors::BotError;
use ekehi_id_bot::application::messaging::{CommandDispatcher, MessageParser};
use ekehi_id_bot::application::services::MessageService;
use ekehi_id_bot::domain::traits::Bot;
use ekehi_id_bot::infrastructure::adapters::console::{ConsoleAdapter, CONSOLE_CHAT_ID};
use ekehi_id_bot::infrastructure::adapters::telegram::TelegramAdapter;
use ekehi_id_bot::infrastructure::config::{BotToken, Config, TelegramConfig};
use ekehi_id_bot::infrastructure::shutdown::ShutdownSignal;

#[derive(Parser)]
#[command(name = "ekehi-id-bot")]
#[command(about = "Telegram bot that replies with the user's Telegram ID", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides BOT_TOKEN and the config file)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&cli.config, cli.token).await,
        Commands::Version => {
            println!("ekehi-id-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let mut config = Config::load_or_default(config_path)?;
    config.apply_token_overrides(Config::env_token(), token_override);

    tracing::info!("Starting {}", config.bot.name);

    let shutdown = ShutdownSignal::install()?;

    let finished = match config.token() {
        Ok(token) => {
            let token = token.clone();
            let settings = config.telegram.clone();
            tokio::select! {
                result = run_telegram_bot(token, settings) => result,
                _ = shutdown.wait() => Ok(()),
            }
        }
        Err(_) => {
            tracing::warn!("No bot token configured, running console bot (dev mode)");
            tokio::select! {
                result = run_console_bot() => result,
                _ = shutdown.wait() => Ok(()),
            }
        }
    };

    tracing::info!("Shutting down");
    finished
}

async fn run_telegram_bot(token: BotToken, settings: TelegramConfig) -> Result<(), BotError> {
    let mut bot = TelegramAdapter::new(token);
    bot.fetch_bot_info().await?;
    bot.start().await?;

    let dispatcher = CommandDispatcher::new();
    if settings.register_commands {
        if let Err(e) = bot.register_commands(&dispatcher.commands()).await {
            tracing::warn!("Failed to register commands: {}", e);
        }
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let parser = MessageParser::new().with_bot_username(info.username);
    let service = MessageService::new(bot, dispatcher);

    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match service.bot().get_updates(offset, settings.poll_timeout_seconds).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::info!("Received {} updates", updates.len());
                }
                for update in &updates {
                    let Some(incoming) = update.message.as_ref()
                        .and_then(|msg| TelegramAdapter::to_incoming(msg, &parser))
                    else {
                        continue;
                    };

                    if let Err(e) = service.process(&incoming).await {
                        tracing::error!("Failed to send message to {}: {}", incoming.chat_id, e);
                    }
                }

                offset = TelegramAdapter::get_next_offset(&updates, offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(Duration::from_secs(settings.poll_error_delay_seconds)).await;
            }
        }
    }
}

async fn run_console_bot() -> Result<(), BotError> {
    let bot = ConsoleAdapter::new();
    bot.start().await?;

    let parser = MessageParser::new().with_bot_username(bot.bot_info().username);
    let service = MessageService::new(bot, CommandDispatcher::new());

    println!("Type /start, /id or /help (Ctrl+D to quit)");

    while let Some(input) = service.bot().read_line().await {
        if input.is_empty() {
            continue;
        }

        let Some(incoming) = parser.parse(CONSOLE_CHAT_ID, &input, ConsoleAdapter::console_user()) else {
            continue;
        };

        if let Err(e) = service.process(&incoming).await {
            tracing::error!("Failed to send message: {}", e);
        }
    }

    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    println!("Provide the bot token through the BOT_TOKEN environment variable.");
    Ok(())
}
