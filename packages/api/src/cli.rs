//! Command-line interface for maintaining the content tree and database.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use osaka_kenpo_corpus::{validate_tree, ContentTree};

use crate::config::AppConfig;
use crate::db;
use crate::error::CliError;
use crate::import::import_law;

/// Osaka Kenpo content tools.
#[derive(Parser)]
#[command(name = "kenpo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every law document below DATA_DIR/laws.
    Validate {
        /// Content tree root
        data_dir: PathBuf,
    },

    /// Replace one law in the database (DATABASE_URL) with its files.
    Import {
        /// Content tree root
        data_dir: PathBuf,

        /// Law category (e.g., jp, foreign)
        category: String,

        /// Law id (e.g., constitution, minpou)
        law: String,
    },
}

/// Run the CLI.
pub async fn run() -> Result<(), CliError> {
    execute(Cli::parse().command).await
}

/// Run one parsed command.
pub async fn execute(command: Commands) -> Result<(), CliError> {
    match command {
        // the tree walk reads with std::fs
        Commands::Validate { data_dir } => {
            tokio::task::spawn_blocking(move || validate_command(&data_dir)).await?
        }
        Commands::Import {
            data_dir,
            category,
            law,
        } => import_command(&data_dir, &category, &law).await,
    }
}

fn validate_command(data_dir: &Path) -> Result<(), CliError> {
    let report = validate_tree(data_dir)?;

    for (path, problems) in &report.failures {
        println!("{}", path.display());
        for problem in problems {
            println!("  - {problem}");
        }
    }

    if !report.is_ok() {
        return Err(CliError::ValidationFailed {
            failed: report.failures.len(),
            checked: report.checked,
        });
    }

    println!("{} documents OK", report.checked);
    Ok(())
}

async fn import_command(data_dir: &Path, category: &str, law: &str) -> Result<(), CliError> {
    osaka_kenpo_corpus::validate_identifier(category)?;
    osaka_kenpo_corpus::validate_identifier(law)?;

    let database = AppConfig::from_env()
        .database
        .ok_or_else(|| CliError::Config("DATABASE_URL not set".into()))?;

    let pool = db::create_pool(&database).await?;
    if database.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let tree = ContentTree::new(data_dir);
    let summary = import_law(&pool, &tree, category, law).await?;

    println!(
        "Imported {category}/{law}: {} articles, {} chapters, {} famous articles",
        summary.articles, summary.chapters, summary.famous_articles
    );
    Ok(())
}
