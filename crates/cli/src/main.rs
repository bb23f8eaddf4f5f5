//! Juniper Goods CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (includes the session table)
//! jg-cli migrate
//!
//! # Seed demo categories and products
//! jg-cli seed
//!
//! # Create a staff account
//! jg-cli admin create -e admin@example.com -p changeit --first-name Ada --role super_admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo data
//! - `admin create` - Create staff accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jg-cli")]
#[command(author, version, about = "Juniper Goods CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
    /// Manage staff accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new staff account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (hashed with Argon2id before storage)
        #[arg(short, long)]
        password: String,

        /// First name
        #[arg(long, default_value = "")]
        first_name: String,

        /// Last name
        #[arg(long, default_value = "")]
        last_name: String,

        /// Role (`admin`, `super_admin`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                password,
                first_name,
                last_name,
                role,
            } => {
                commands::admin::create_user(&email, &password, &first_name, &last_name, &role)
                    .await?;
            }
        },
    }
    Ok(())
}
