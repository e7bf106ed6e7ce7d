//! FreshCart CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! freshcart migrate
//!
//! # Create an admin user
//! freshcart admin create -e admin@example.com -n "Admin Name" -p 'Str0ng!pass'
//!
//! # Seed the catalog with sample data
//! freshcart seed
//! ```
//!
//! # Environment Variables
//!
//! - `FRESHCART_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "freshcart")]
#[command(author, version, about = "FreshCart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with sample catalog data
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password (policy: 8+ chars, upper, lower, digit, special)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Admin {
            action:
                AdminAction::Create {
                    email,
                    name,
                    password,
                },
        } => commands::admin::create(&email, &name, &password).await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}
