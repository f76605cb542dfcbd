//! wotatoken CLI
//!
//! Command-line front end for the JKT48Connect access-code console and the
//! membership-gated replay check. State (membership record, admin login)
//! lives in a directory of JSON files; codes live on the wotatokens API.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wotatoken::adapters::console::render;
use wotatoken::adapters::{FileLocalStore, FixedConfirmer, HttpCodeRegistry, StdinConfirmer};
use wotatoken::application::handlers::admin::AdminSession;
use wotatoken::application::handlers::codes::DeleteOutcome;
use wotatoken::application::handlers::membership::{
    ClearMembershipHandler, GetStoredMembershipHandler, ImportMembershipCommand,
    ImportMembershipHandler,
};
use wotatoken::application::handlers::replay::{
    CheckReplayAccessHandler, CheckReplayAccessQuery, ReplayAccess,
};
use wotatoken::application::AdminConsole;
use wotatoken::config::{AppConfig, LoggingConfig};
use wotatoken::domain::access_code::{CodeDraft, CodeFilter, CodeFormat, CodeType};
use wotatoken::domain::foundation::Timestamp;
use wotatoken::ports::{Confirmer, LocalStore};

// =============================================================================
// Command Line
// =============================================================================

/// JKT48Connect access codes and replay access
#[derive(Parser, Debug)]
#[command(name = "wotatoken")]
#[command(about = "Manage wotatoken access codes and check replay access", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether the stored membership may watch a replay
    Replay {
        /// Playback ID of the replay
        playback_id: String,
    },

    /// Manage the stored membership record
    Membership {
        #[command(subcommand)]
        command: MembershipCommands,
    },

    /// Start an admin session
    Login,

    /// End the admin session
    Logout,

    /// Administer access codes (requires login)
    Codes {
        #[command(subcommand)]
        command: CodeCommands,
    },
}

#[derive(Subcommand, Debug)]
enum MembershipCommands {
    /// Store a verified membership record read from a JSON file
    Import {
        /// Path to the record JSON
        file: PathBuf,
    },
    /// Show the stored record
    Show,
    /// Remove the stored record and auth token
    Clear,
}

#[derive(Subcommand, Debug)]
enum CodeCommands {
    /// Create a new code
    Create {
        /// Owner email
        #[arg(long)]
        email: String,

        /// What the code is for
        #[arg(long)]
        purpose: String,

        /// Code category (custom, show, membership, special)
        #[arg(long = "type", default_value = "custom")]
        code_type: String,

        /// Length of the generated code
        #[arg(long, default_value_t = 8)]
        length: u32,

        /// Character set (alphanumeric, numeric, alpha)
        #[arg(long, default_value = "alphanumeric")]
        format: CodeFormat,

        /// Number of allowed redemptions
        #[arg(long, default_value_t = 1)]
        usage_limit: u32,

        /// Lifetime in hours
        #[arg(long, default_value_t = 168)]
        expires_in_hours: u32,

        /// Deactivate the code right after creation
        #[arg(long)]
        inactive: bool,

        /// Free-form note stored in the metadata
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List codes with statistics
    List {
        /// Status filter (all, active, inactive, used, unused)
        #[arg(long, default_value = "all")]
        filter: CodeFilter,

        /// Case-insensitive text matched against code, email and purpose
        #[arg(long, default_value = "")]
        search: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one code and its usage history
    Show {
        code: String,
        #[arg(long)]
        email: String,
    },

    /// Activate or deactivate a code
    SetActive {
        code: String,
        #[arg(long)]
        email: String,
        /// Desired state
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Delete a code
    Delete {
        code: String,
        #[arg(long)]
        email: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging);

    let store: Arc<dyn LocalStore> = Arc::new(FileLocalStore::new(&config.storage.dir));
    tracing::debug!(dir = %config.storage.dir.display(), "Using local store");

    match cli.command {
        Commands::Replay { playback_id } => run_replay(store, playback_id).await,
        Commands::Membership { command } => run_membership(store, command).await,
        Commands::Login => {
            AdminSession::new(store).start(Timestamp::now()).await?;
            println!("Login berhasil");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Logout => {
            AdminSession::new(store).end().await?;
            println!("Logout berhasil");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Codes { command } => run_codes(&config, store, command).await,
    }
}

fn init_tracing(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.filter.trim()))
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// =============================================================================
// Replay
// =============================================================================

async fn run_replay(store: Arc<dyn LocalStore>, playback_id: String) -> anyhow::Result<ExitCode> {
    let handler = CheckReplayAccessHandler::new(store);
    let query = CheckReplayAccessQuery {
        playback_id,
        now: Timestamp::now(),
    };

    match handler.handle(query).await {
        Ok(ReplayAccess::Granted(view)) => {
            print!("{}", render::replay_view(&view));
            Ok(ExitCode::SUCCESS)
        }
        Ok(ReplayAccess::Denied(reason)) => {
            print!("{}", render::denial(&reason));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Replay access check failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

// =============================================================================
// Membership
// =============================================================================

async fn run_membership(
    store: Arc<dyn LocalStore>,
    command: MembershipCommands,
) -> anyhow::Result<ExitCode> {
    match command {
        MembershipCommands::Import { file } => {
            let raw_json = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let result = ImportMembershipHandler::new(store)
                .handle(ImportMembershipCommand { raw_json })
                .await?;

            println!(
                "Membership tersimpan: {}",
                wotatoken::domain::membership::display_label(result.record.raw_plan_type())
            );
            if !result.token_stored {
                println!("Peringatan: record tidak memiliki token");
            }
        }
        MembershipCommands::Show => {
            let stored = GetStoredMembershipHandler::new(store).handle().await?;
            print!("{}", render::stored_membership(&stored));
        }
        MembershipCommands::Clear => {
            ClearMembershipHandler::new(store).handle().await?;
            println!("Membership dihapus");
        }
    }
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// Codes
// =============================================================================

async fn run_codes(
    config: &AppConfig,
    store: Arc<dyn LocalStore>,
    command: CodeCommands,
) -> anyhow::Result<ExitCode> {
    let registry = Arc::new(HttpCodeRegistry::new(config.api.registry_config()?));

    let confirmer: Arc<dyn Confirmer> = match &command {
        CodeCommands::Delete { yes: true, .. } => Arc::new(FixedConfirmer::accepting()),
        _ => Arc::new(StdinConfirmer::new()),
    };

    let session = AdminSession::new(store);
    let mut console = match AdminConsole::open(&session, registry, confirmer).await {
        Ok(console) => console,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let outcome = match command {
        CodeCommands::Create {
            email,
            purpose,
            code_type,
            length,
            format,
            usage_limit,
            expires_in_hours,
            inactive,
            notes,
        } => {
            let draft = CodeDraft {
                code_type: CodeType::from(code_type.as_str()),
                code_length: length,
                code_format: format,
                usage_limit,
                expires_in_hours,
                is_active: !inactive,
                notes,
                ..CodeDraft::new(email, purpose)
            };
            console.create(draft, Timestamp::now()).await.map(|_| ())
        }
        CodeCommands::List {
            filter,
            search,
            page,
        } => {
            let fetched = console.set_query(filter, search).await.map(|_| ());
            if fetched.is_ok() {
                console.go_to_page(page);
                if let Some(listing) = &console.state().listing {
                    print!("{}", render::listing(listing));
                }
            }
            fetched
        }
        CodeCommands::Show { code, email } => console
            .show_detail(&code, &email)
            .await
            .map(|detail| print!("{}", render::code_detail(detail))),
        CodeCommands::SetActive {
            code,
            email,
            active,
        } => console.set_active(&code, &email, active).await.map(|_| ()),
        CodeCommands::Delete { code, email, .. } => {
            console.delete(&code, &email).await.map(|outcome| {
                if matches!(outcome, DeleteOutcome::Cancelled) {
                    println!("Penghapusan dibatalkan");
                }
            })
        }
    };

    if let Some(notice) = console.notice() {
        if notice.is_error() {
            eprint!("{}", render::notice(notice));
        } else {
            print!("{}", render::notice(notice));
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
