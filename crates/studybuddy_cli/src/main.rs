//! `studybuddy` - CLI front end for the study notes core.
//!
//! One invocation is one user action: resolve config and identity, open the
//! note store, run the command, print the result.

mod cli;
mod commands;
mod render;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::Cli;
use commands::Context;
use std::io;
use std::process::ExitCode;
use studybuddy_core::db::open_db;
use studybuddy_core::{
    init_logging, resolve_session, AppConfig, LogOptions, NoteService, SqliteNoteRepository,
    StaticIdentityVerifier,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_from(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let log_dir = config.log_dir();
    let log_echoes_warnings = match init_logging(&LogOptions {
        level: &level,
        log_dir: &log_dir,
        echo_stderr: cli.verbose,
    }) {
        Ok(()) => cli.verbose,
        Err(err) => {
            eprintln!("warning: file logging disabled: {err}");
            false
        }
    };

    let verifier = StaticIdentityVerifier::new(config.auth.tokens.clone());
    let session = resolve_session(
        &config.app_id,
        config.auth.initial_auth_token.as_deref(),
        &verifier,
    )?;
    if let Some(notice) = render::anonymous_notice(&session, log_echoes_warnings) {
        eprintln!("{notice}");
    }

    let database_path = config.database_path();
    let conn = open_db(&database_path).with_context(|| {
        format!(
            "Error initializing the note store at `{}`",
            database_path.display()
        )
    })?;
    let notes = NoteService::new(
        SqliteNoteRepository::try_new(&conn)?,
        session.collection_path().clone(),
    );
    let mut ctx = Context::new(&session, notes, config.generation_latency());

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    commands::execute(cli.command, &mut ctx, &mut input, &mut out)
}
