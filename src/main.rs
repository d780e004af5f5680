use clap::{Parser, Subcommand};

use horoscope_bot::application::errors::BotError;
use horoscope_bot::application::messaging::MessageDispatcher;
use horoscope_bot::build_dispatcher;
use horoscope_bot::domain::entities::{Message, Reply};
use horoscope_bot::domain::traits::Bot;
use horoscope_bot::infrastructure::adapters::console::CONSOLE_CHAT_ID;
use horoscope_bot::infrastructure::adapters::telegram::TelegramAdapter;
use horoscope_bot::infrastructure::adapters::ConsoleAdapter;
use horoscope_bot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "horoscope-bot")]
#[command(about = "Telegram bot that looks up your daily horoscope", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Talk to the bot from this terminal
    Console,
    /// Show version
    Version,
    /// Write a default config file
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => with_runtime(run_telegram(load_config(&cli.config, cli.token))),
        Commands::Console => with_runtime(run_console(load_config(&cli.config, cli.token))),
        Commands::Version => {
            println!("horoscope-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str, token_override: Option<String>) -> Config {
    let mut config = Config::load_or_env(path);
    if let Some(token) = token_override {
        config.apply_env(|key| (key == "BOT_TOKEN").then(|| token.clone()));
    }
    config
}

fn with_runtime<F>(future: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(future)
}

async fn run_telegram(config: Config) -> Result<(), BotError> {
    let token = config.telegram_token()?;
    let dispatcher = build_dispatcher(&config)?;

    tracing::info!("Starting {}", config.bot.name);

    let mut bot = TelegramAdapter::new(token);
    if let Some(api_base) = config.telegram_api_base() {
        bot = bot.with_api_base(api_base);
    }
    bot.fetch_bot_info().await?;
    bot.start().await?;

    if let Err(e) = bot.register_commands(&dispatcher.commands().descriptions()).await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let mut offset: i64 = 0;
    let timeout_seconds = config.poll_timeout();

    tracing::info!("Starting message loop...");

    loop {
        let updates = match bot.get_updates(offset, timeout_seconds).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                continue;
            }
        };

        if !updates.is_empty() {
            tracing::debug!("Received {} updates", updates.len());
        }

        // One update at a time, to completion
        for update in &updates {
            let Some(incoming) = update.incoming() else {
                continue;
            };

            let message = dispatcher.parser()
                .parse(&incoming.chat_id, incoming.text)
                .with_sender(incoming.sender)
                .with_platform("telegram");

            let replies = handle(&dispatcher, &message).await;
            deliver(&bot, &incoming.chat_id, &replies).await;
        }

        offset = TelegramAdapter::get_next_offset(&updates, offset);
    }
}

async fn run_console(config: Config) -> Result<(), BotError> {
    let dispatcher = build_dispatcher(&config)?;
    let bot = ConsoleAdapter::new();
    bot.start().await?;

    while let Some(line) = bot.read_line().await? {
        let message = dispatcher.parser()
            .parse(CONSOLE_CHAT_ID, line)
            .with_platform("console");

        let replies = handle(&dispatcher, &message).await;
        deliver(&bot, CONSOLE_CHAT_ID, &replies).await;
    }

    tracing::info!("Console closed");
    Ok(())
}

/// Process one message; failures become a generic notice instead of ending the loop
async fn handle(dispatcher: &MessageDispatcher, message: &Message) -> Vec<Reply> {
    match dispatcher.process(message).await {
        Ok(replies) => replies,
        Err(e) => {
            tracing::error!("[{}] Failed to process message: {}", message.chat_id, e);
            vec![Reply::plain("Something went wrong. Please try again.")]
        }
    }
}

async fn deliver(bot: &dyn Bot, chat_id: &str, replies: &[Reply]) {
    for reply in replies {
        if let Err(e) = bot.send_message(chat_id, reply).await {
            tracing::error!("Failed to send message: {}", e);
        }
    }
}

fn init_config(path: &str) -> Result<(), BotError> {
    Config::write_default(path)?;
    println!("Wrote {}. Set BOT_TOKEN or adapters.telegram.token before running.", path);
    Ok(())
}
