//! `lbj` - terminal front-end for the LBJ orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lbj_application::{OrchestratorSession, SessionConfig, SubmitOutcome};
use lbj_core::secret::SecretService;
use lbj_core::{AppConfig, Attachment, LbjError, ProviderKind};
use lbj_infrastructure::paths::LbjPaths;
use lbj_infrastructure::{ConfigService, SecretServiceImpl, load_attachment};
use lbj_interaction::build_provider;

mod command;
mod helper;
mod render;

use command::{COMMANDS, ReplCommand, STARTER_PROMPTS};
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "lbj")]
#[command(about = "LBJ Orchestrator - routes each request to the right specialist AI", long_about = None)]
struct Cli {
    /// Provider binding to use (gemini or openai)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Model id for the selected provider
    #[arg(long)]
    model: Option<String>,

    /// Path to config.toml (defaults to ~/.config/lbj/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// File to attach to the first request
    #[arg(long)]
    attach: Option<PathBuf>,

    /// Seconds the specialist grid stays lit after a response
    #[arg(long)]
    reset_secs: Option<u64>,
}

impl Cli {
    /// Command-line flags take precedence over everything else.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(model) = &self.model {
            config.settings_for_mut(config.provider).model_name = Some(model.clone());
        }
        if let Some(secs) = self.reset_secs {
            config.status_reset_secs = secs;
        }
    }
}

/// Sends logs to a daily file so the terminal stays free for the chat.
fn init_tracing() -> Option<WorkerGuard> {
    let log_dir = LbjPaths::log_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "lbj.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

fn print_help() {
    println!("{}", "Commands:".bright_white().bold());
    for (name, description) in COMMANDS {
        println!("  {:<10} {}", name.bright_cyan(), description.bright_black());
    }
    println!(
        "{}",
        "Anything else is sent to the orchestrator.".bright_black()
    );
}

fn print_starter_prompts() {
    println!("{}", "Standard requests (/example <n> to load one):".bright_white());
    for (i, prompt) in STARTER_PROMPTS.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).bright_cyan(), prompt.bright_black());
    }
}

async fn attach(path: &str) -> Option<Attachment> {
    match load_attachment(path).await {
        Ok(attachment) => {
            println!(
                "{}",
                format!(
                    "Attached {} ({}). It will be sent with your next request.",
                    attachment.file_name, attachment.mime_type
                )
                .bright_green()
            );
            Some(attachment)
        }
        Err(e) => {
            tracing::warn!("[Repl] Failed to attach {}: {}", path, e);
            eprintln!("{}", e.to_string().red());
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing();

    // ===== Configuration =====
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.get_config()?;
    cli.apply_to(&mut config);

    let secret_service = SecretServiceImpl::new()?;
    let secrets = secret_service.load_secrets().await?;

    let provider = build_provider(&config, &secrets).with_context(|| {
        format!(
            "No {} API key found. Add it to {} or set it in the environment.",
            config.provider,
            LbjPaths::secret_file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "~/.config/lbj/secret.json".to_string())
        )
    })?;

    let session = Arc::new(OrchestratorSession::new(
        provider,
        SessionConfig::from(&config),
    ));
    tracing::info!(
        "[Bootstrap] Session ready (provider: {}, model: {})",
        session.provider_kind(),
        session.provider_model()
    );

    let mut pending: Option<Attachment> = match &cli.attach {
        Some(path) => attach(&path.to_string_lossy()).await,
        None => None,
    };

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== LBJ Orchestrator ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Using {} ({}). Describe what you need, or type /help.",
            session.provider_kind(),
            session.provider_model()
        )
        .bright_black()
    );
    print_starter_prompts();
    println!();

    // Text loaded by /example, offered for editing on the next read
    let mut prefill: Option<&'static str> = None;

    // ===== Main REPL Loop =====
    loop {
        let prompt = match &pending {
            Some(attachment) => format!("[{}] >> ", attachment.file_name),
            None => ">> ".to_string(),
        };

        let read = match prefill.take() {
            Some(text) => rl.readline_with_initial(&prompt, (text, "")),
            None => rl.readline(&prompt),
        };
        let line = match read {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let command = ReplCommand::parse(&line);
        if command != ReplCommand::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Status => {
                println!("{}", render::render_status_grid(&session.statuses().await));
            }
            ReplCommand::History => {
                let messages = session.messages().await;
                if messages.is_empty() {
                    println!("{}", "No messages yet.".bright_black());
                }
                for message in &messages {
                    println!("{}\n", render::render_message(message));
                }
            }
            ReplCommand::Attach(Some(path)) => {
                if let Some(attachment) = attach(&path).await {
                    pending = Some(attachment);
                }
            }
            ReplCommand::Example(Some(text)) => prefill = Some(text),
            ReplCommand::Example(None) => print_starter_prompts(),
            ReplCommand::Attach(None) => {
                println!("{}", "Usage: /attach <path>".yellow());
            }
            ReplCommand::Detach => match pending.take() {
                Some(attachment) => println!(
                    "{}",
                    format!("Dropped {}.", attachment.file_name).bright_black()
                ),
                None => println!("{}", "Nothing attached.".bright_black()),
            },
            ReplCommand::Unknown(name) => {
                println!(
                    "{}",
                    format!("Unknown command {name}. Type /help for the list.").bright_black()
                );
            }
            ReplCommand::Prompt(text) => {
                println!("{}", "Routing...".bright_black());

                match session.submit(&text, pending.clone()).await {
                    Ok(SubmitOutcome::Routed { message, .. }) => {
                        pending = None;
                        println!("{}\n", render::render_message(&message));
                        println!("{}\n", render::render_status_grid(&session.statuses().await));
                    }
                    Ok(SubmitOutcome::Failed { message, .. }) => {
                        println!("{}\n", render::render_message(&message));
                    }
                    Err(e @ (LbjError::EmptyPrompt | LbjError::Busy)) => {
                        println!("{}", e.to_string().yellow());
                    }
                    Err(e) => {
                        tracing::error!("[Repl] Unexpected submit error: {}", e);
                        eprintln!("{}", e.user_message().red());
                    }
                }
            }
        }
    }

    Ok(())
}
