// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Taskwire - natural-language todo service.
//!
//! This is the binary entry point: the HTTP server plus a few one-shot
//! administration commands that work directly on the database.

mod cli;
mod serve;
mod shutdown;

use clap::{Parser, Subcommand};

/// Taskwire - natural-language todo service.
#[derive(Parser, Debug)]
#[command(name = "taskwire", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Manage user profiles.
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Issue a new session token for an existing user.
    Token {
        /// Email of the user.
        email: String,
    },
    /// Interpret and apply a single command.
    Run {
        /// Email of the acting user.
        #[arg(long = "as", value_name = "EMAIL")]
        actor: String,
        /// Only interpret and print the preview.
        #[arg(long)]
        dry_run: bool,
        /// The natural-language command.
        command: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Register a profile and print its first session token.
    Add {
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// List registered profiles.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match taskwire_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            taskwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::User { action }) => {
            serve::init_tracing(&config.server.log_level);
            match action {
                UserAction::Add {
                    email,
                    name,
                    full_name,
                } => {
                    cli::run_user_add(&config, &email, name.as_deref(), full_name.as_deref())
                        .await
                }
                UserAction::List { json } => cli::run_user_list(&config, json).await,
            }
        }
        Some(Commands::Token { email }) => {
            serve::init_tracing(&config.server.log_level);
            cli::run_token(&config, &email).await
        }
        Some(Commands::Run {
            actor,
            dry_run,
            command,
        }) => {
            serve::init_tracing(&config.server.log_level);
            cli::run_command(&config, &actor, &command, dry_run).await
        }
        None => {
            println!("taskwire: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_actor_and_command() {
        let cli = Cli::try_parse_from([
            "taskwire",
            "run",
            "--as",
            "me@company.com",
            "--dry-run",
            "show urgent tasks",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run {
                actor,
                dry_run,
                command,
            }) => {
                assert_eq!(actor, "me@company.com");
                assert!(dry_run);
                assert_eq!(command, "show urgent tasks");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = taskwire_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.users.lookup_limit, 50);
    }
}
