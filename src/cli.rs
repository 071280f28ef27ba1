// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every connection setting can come from a flag or from a REPO_FINDER_*
// environment variable (clap's `env` feature), flag first.
//
// It also parses the lines typed during an `interactive` session into
// session intents.
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::catalog;
use crate::github::{LanguageCode, DEFAULT_API_URL};
use crate::session::Intent;

#[derive(Parser, Debug)]
#[command(
    name = "repo-finder",
    version,
    about = "Show a random highly-starred GitHub repository for a language",
    long_about = "repo-finder searches GitHub for the most-starred repositories written in a \
                  language and shows one of them at random. Refresh to get another pick."
)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command that talks to the search API
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Root of the GitHub REST API
    #[arg(long, env = "REPO_FINDER_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Give up on a search after this many seconds
    #[arg(
        long,
        env = "REPO_FINDER_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout_secs: u64,

    /// Seed the random pick so runs are reproducible
    #[arg(long, env = "REPO_FINDER_SEED", global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the languages you can pick from
    Languages,

    /// Pick one random repository for a language and exit
    ///
    /// Example: repo-finder pick go
    ///
    /// Exit codes: 0 = found one, 1 = no repositories, 2 = error
    Pick {
        /// Language code or name (e.g. go, "C#", kotlin)
        language: String,

        /// Print the final session state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a session: type a language to pick, 'r' to refresh, 'q' to quit
    Interactive,
}

pub const INTERACTIVE_HELP: &str = "\
Commands:
  <language>   select a language (code or name, e.g. go, C#)
  r            refresh: pick again (also retries after an error)
  -            clear the selection
  ?            show this help
  q            quit";

/// One line typed during an interactive session
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Intent(Intent),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

pub fn parse_repl_line(line: &str) -> ReplCommand {
    let input = line.trim();
    match input.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Nothing,
        "q" | "quit" | "exit" => ReplCommand::Quit,
        "?" | "h" | "help" => ReplCommand::Help,
        "r" | "refresh" | "retry" => ReplCommand::Intent(Intent::Refresh),
        "-" | "clear" => ReplCommand::Intent(Intent::SelectLanguage(None)),
        _ => match catalog::resolve(input) {
            Some(lang) => ReplCommand::Intent(Intent::SelectLanguage(LanguageCode::new(lang.code))),
            None => ReplCommand::Unknown(input.to_string()),
        },
    }
}
