use bhasha::chat::{date_header, ChatMessage, ChatWindow, SwitchOutcome};
use bhasha::config::{self, Config, API_KEY_ENV};
use bhasha::localization::{Catalog, Localizer};
use bhasha::secrets::{self, DEFAULT_SECRET_NAME};
use bhasha::translation::language::{find_language, is_supported, SOURCE_LANGUAGE};
use bhasha::translation::{map_language_code, SarvamTranslator, TranslationClient, LANGUAGES};
use bhasha::TranslationSession;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bhasha")]
#[command(author, version, about = "Multilingual chat with Sarvam translation", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a single text
    Translate {
        /// Text to translate
        text: String,

        /// Target language code (hi, ta, ...)
        #[arg(short, long)]
        to: String,

        /// Source language code
        #[arg(short, long, default_value = SOURCE_LANGUAGE)]
        from: String,
    },

    /// List supported languages
    Languages,

    /// Start an interactive chat
    Chat {
        /// Initial language (overrides chat.default_language)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Configure settings
    Config {
        /// Set the default chat language
        #[arg(long)]
        language: Option<String>,

        /// Set the translate endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Set the translation mode (formal, modern-colloquial, classic-colloquial, code-mixed)
        #[arg(long)]
        mode: Option<String>,

        /// Set the number of concurrent requests per batch
        #[arg(long)]
        batch_size: Option<usize>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },

    /// Manage the API key in the system keyring
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
}

#[derive(Subcommand)]
enum SecretAction {
    /// Store an API key (prompts for the value)
    Set {
        #[arg(default_value = DEFAULT_SECRET_NAME)]
        name: String,
    },

    /// Delete a stored API key
    Delete {
        #[arg(default_value = DEFAULT_SECRET_NAME)]
        name: String,
    },

    /// Check keyring availability
    Check,
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("bhasha=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("bhasha={}", level)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_session(config: &Config) -> Arc<TranslationSession> {
    let api_key = config.translation.resolve_api_key();
    if api_key.is_empty() {
        warn!(
            "No translation API key configured; text will stay untranslated. Set {} or translation.api_key.",
            API_KEY_ENV
        );
    }

    let engine = Arc::new(SarvamTranslator::new(config.translation.sarvam_config(api_key)));
    Arc::new(
        TranslationSession::new(TranslationClient::new(engine))
            .with_batch_size(config.translation.batch_size),
    )
}

fn print_message(message: &ChatMessage) {
    let who = if message.is_user { "you" } else { "bot" };
    println!("[{}] {}: {}", message.timestamp.format("%H:%M"), who, message.text);
}

async fn run_chat(config: &Config, language: Option<String>) -> anyhow::Result<()> {
    let session = build_session(config);
    info!("Starting chat (engine: {})", session.client().engine_name());
    let localizer = Localizer::new(Catalog::bundled()?, Arc::clone(&session));
    let mut window = ChatWindow::new(Arc::clone(&session), config.chat.placeholder_reply.clone());
    window.controller_mut().on_language_changed(|change| {
        info!("Language: {} -> {}", change.previous, change.current);
    });

    let initial = language.unwrap_or_else(|| config.chat.default_language.clone());
    if !is_supported(&initial) {
        anyhow::bail!("Unsupported language '{}'. Run `bhasha languages` for the list.", initial);
    }
    if initial != SOURCE_LANGUAGE {
        window.select_language(&initial).await;
        localizer.translate_missing().await;
    }

    println!("{}", localizer.t("app.title").await);
    println!("{}", localizer.t("chat.welcome").await);
    println!("Commands: /lang <code>, /new, /history [query], /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "/quit" | "/exit" => break,
            "/lang" => {
                let code = arg.trim();
                if !is_supported(code) {
                    println!("{}:", localizer.t("language.select").await);
                    for lang in LANGUAGES {
                        println!("  {:<3} {}", lang.code, lang.native_name);
                    }
                    continue;
                }
                println!("{}", localizer.t("chat.translating").await);
                match window.select_language(code).await {
                    SwitchOutcome::Failed => warn!("Could not translate the conversation"),
                    SwitchOutcome::Superseded | SwitchOutcome::NothingToTranslate => {}
                    SwitchOutcome::Applied { .. } => {
                        for message in window.messages().await {
                            print_message(&message);
                        }
                    }
                }
                localizer.translate_missing().await;
            }
            "/new" => {
                window.new_chat().await;
                println!("{}", localizer.t("chat.new").await);
            }
            "/history" => {
                println!("{}:", localizer.t("chat.history").await);
                let today = chrono::Local::now().date_naive();
                let sessions = window.history().search(arg);
                if sessions.is_empty() {
                    println!("  {}", localizer.t("chat.no_results").await);
                }
                for chat in sessions {
                    let marker = if chat.active { "*" } else { " " };
                    println!(
                        " {} {} ({})",
                        marker,
                        chat.title,
                        date_header(chat.date.date_naive(), today)
                    );
                }
            }
            "" => {}
            _ => {
                if let Some(reply) = window.send_message(line).await {
                    print_message(&reply);
                }
            }
        }
    }

    let stats = session.cache_stats().await;
    info!(
        "Session ended: {} cached translations, {} hits, {} misses",
        stats.entries, stats.hits, stats.misses
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match cli.command {
        Commands::Config {
            language,
            endpoint,
            mode,
            batch_size,
            show,
        } => {
            init_logging(cli.verbose, "info");
            if show {
                config::show(&config_path)?;
            } else {
                config::update(&config_path, language, endpoint, mode, batch_size)?;
            }
        }

        Commands::Secret { action } => {
            init_logging(cli.verbose, "info");
            match action {
                SecretAction::Set { name } => secrets::cli::handle_set(&name)?,
                SecretAction::Delete { name } => secrets::cli::handle_delete(&name)?,
                SecretAction::Check => {
                    if !secrets::cli::handle_check() {
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Languages => {
            for lang in LANGUAGES {
                println!("{:<3} {:<6} {:<10} {}", lang.code, lang.locale, lang.name, lang.native_name);
            }
        }

        Commands::Translate { text, to, from } => {
            let config = Config::load_from(&config_path)?;
            init_logging(cli.verbose, &config.logging.level);
            for code in [&from, &to] {
                if find_language(code).is_none() {
                    anyhow::bail!("Unsupported language '{}'. Run `bhasha languages` for the list.", code);
                }
            }

            let session = build_session(&config);
            let translated = session
                .client()
                .translate_one(&text, map_language_code(&from), map_language_code(&to))
                .await;
            println!("{}", translated);
        }

        Commands::Chat { language } => {
            let config = Config::load_from(&config_path)?;
            init_logging(cli.verbose, &config.logging.level);
            run_chat(&config, language).await?;
        }
    }

    Ok(())
}
