// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (REPO_FINDER_LOG, written to stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler
// 4. Exit with a code (0 = repository found, 1 = none found, 2 = error)
//
// Every handler drives the same session core: a SessionDriver owning the
// state machine, fed with intents over a channel.
// =============================================================================

mod catalog;   // src/catalog.rs - the languages on offer
mod cli;       // src/cli.rs - command-line parsing
mod github;    // src/github/ - repository search client
mod render;    // src/render.rs - terminal output
mod session;   // src/session/ - state machine and driver

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ClientArgs, Commands, ReplCommand};
use github::{ClientConfig, GithubSearchClient, LanguageCode};
use session::{Intent, RandomSelector, SessionDriver, Status};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected failure (bad flags, bad API URL, broken stdin...)
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `pick --json` output stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_env("REPO_FINDER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Languages => {
            println!("{}", render::render_languages());
            Ok(0)
        }
        Commands::Pick { language, json } => handle_pick(&cli.client, &language, json).await,
        Commands::Interactive => handle_interactive(&cli.client).await,
    }
}

fn build_driver(args: &ClientArgs) -> Result<SessionDriver<GithubSearchClient>> {
    let config = ClientConfig::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    let client = GithubSearchClient::new(&config)?;
    tracing::debug!(endpoint = %client.endpoint(), timeout_secs = args.timeout_secs, "search client ready");

    let selector = match args.seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::from_entropy(),
    };

    Ok(SessionDriver::new(Arc::new(client), selector))
}

// Handles the 'pick' subcommand: one selection, one result
async fn handle_pick(args: &ClientArgs, language: &str, json: bool) -> Result<i32> {
    let lang = catalog::resolve(language).ok_or_else(|| {
        anyhow!(
            "Unknown language '{}'. Run `repo-finder languages` to see the choices",
            language
        )
    })?;
    let code = LanguageCode::new(lang.code)
        .ok_or_else(|| anyhow!("Catalog entry {} has an empty code", lang.name))?;

    if !json {
        println!("🔍 Looking for a popular {} repository...\n", lang.name);
    }

    let driver = build_driver(args)?;
    let (tx, rx) = mpsc::channel(1);
    tx.send(Intent::SelectLanguage(Some(code))).await?;
    // Closing the channel lets the driver finish the search and return
    drop(tx);

    let state = driver.run(rx).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", render::render_state(&state));
    }

    Ok(match state.status {
        Status::Success(_) => 0,
        Status::Empty => 1,
        _ => 2,
    })
}

// Handles the 'interactive' subcommand
//
// Three tasks cooperate:
//   - the session driver, which owns all state
//   - a printer, which redraws whenever the state changes
//   - this function, which turns stdin lines into intents
async fn handle_interactive(args: &ClientArgs) -> Result<i32> {
    let driver = build_driver(args)?;
    let mut updates = driver.subscribe();

    let (tx, rx) = mpsc::channel(16);
    let session = tokio::spawn(driver.run(rx));

    println!("{}\n", cli::INTERACTIVE_HELP);
    println!("{}", render::render_state(&updates.borrow()));

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = render::render_state(&updates.borrow_and_update());
            println!("\n{}", text);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match cli::parse_repl_line(&line) {
            ReplCommand::Intent(intent) => intent,
            ReplCommand::Quit => break,
            ReplCommand::Help => {
                println!("{}", cli::INTERACTIVE_HELP);
                continue;
            }
            ReplCommand::Nothing => continue,
            ReplCommand::Unknown(input) => {
                eprintln!("Unknown language or command '{}' (type ? for help)", input);
                continue;
            }
        };

        if tx.send(intent).await.is_err() {
            break;
        }
    }

    // Session over: searches still running are abandoned
    drop(tx);
    session.abort();
    printer.abort();

    Ok(0)
}
