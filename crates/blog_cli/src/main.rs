//! Command-line entry point over `blog_core`.
//!
//! # Usage
//! - `blog_cli ping`
//! - `blog_cli --db <DB_PATH> add-author <NAME> <PHONE_NUMBER>`
//! - `blog_cli --db <DB_PATH> add-post <TITLE> <CONTENT> <SUMMARY> <CATEGORY>`
//!
//! `BLOG_LOG_DIR` (absolute path) enables file logging; `BLOG_LOG_LEVEL`
//! overrides the build default.

use std::path::PathBuf;
use std::process::ExitCode;

use blog_core::db::open_db;
use blog_core::{add_author, add_post, RepoError};
use clap::{Parser, Subcommand};
use log::info;

#[derive(Debug, Parser)]
#[command(name = "blog_cli")]
#[command(about = "Store validated blog authors and posts in SQLite", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file (created and migrated on first use)
    #[arg(long = "db", value_name = "DB_PATH", default_value = "blog.db", global = true)]
    db_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the core library is linked
    Ping,

    /// Store a new author
    AddAuthor {
        /// Unique author name
        #[arg(value_name = "NAME")]
        name: String,

        /// Exactly ten decimal digits
        #[arg(value_name = "PHONE_NUMBER")]
        phone_number: String,
    },

    /// Store a new post
    AddPost {
        /// Title; must read like clickbait
        #[arg(value_name = "TITLE")]
        title: String,

        /// Body, at least 250 characters
        #[arg(value_name = "CONTENT")]
        content: String,

        /// Summary, at most 250 characters
        #[arg(value_name = "SUMMARY")]
        summary: String,

        /// `Fiction` or `Non-Fiction`
        #[arg(value_name = "CATEGORY")]
        category: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = init_logging_from_env() {
        eprintln!("warning: {message}");
    }

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    match cli.command {
        Commands::Ping => Ok(format!(
            "blog_core ping={} version={}",
            blog_core::ping(),
            blog_core::core_version()
        )),
        Commands::AddAuthor { name, phone_number } => {
            let mut conn = open_db(&cli.db_path).map_err(|err| err.to_string())?;
            let author = add_author(&mut conn, &name, &phone_number).map_err(describe)?;
            info!("event=cli_command module=cli status=ok command=add-author");
            Ok(author.to_string())
        }
        Commands::AddPost {
            title,
            content,
            summary,
            category,
        } => {
            let mut conn = open_db(&cli.db_path).map_err(|err| err.to_string())?;
            let post =
                add_post(&mut conn, &title, &content, &summary, &category).map_err(describe)?;
            info!("event=cli_command module=cli status=ok command=add-post");
            Ok(post.to_string())
        }
    }
}

fn describe(err: RepoError) -> String {
    match err {
        RepoError::DuplicateName(_) => format!("A unique constraint was violated: {err}"),
        other => other.to_string(),
    }
}

fn init_logging_from_env() -> Result<(), String> {
    let Ok(log_dir) = std::env::var("BLOG_LOG_DIR") else {
        return Ok(());
    };
    let level = std::env::var("BLOG_LOG_LEVEL")
        .unwrap_or_else(|_| blog_core::default_log_level().to_string());
    blog_core::init_logging(&level, &log_dir)
}
