//! Command-line surface for the `studybuddy` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// studybuddy - save study notes and drill them with generated quizzes
#[derive(Debug, Parser)]
#[command(name = "studybuddy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Echo warnings and errors from the log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the active user and where their notes are stored
    Whoami,
    /// Save notes to your collection
    Save(SaveCommand),
    /// List your ten most recent notes
    List,
    /// Print a saved note
    Load {
        /// Note id as shown by `list`
        id: String,
    },
    /// Generate a quiz and flashcards from notes
    Generate(GenerateCommand),
    /// Answer a generated quiz interactively, then review flashcards
    Review(NotesSource),
}

#[derive(Debug, Args)]
pub struct SaveCommand {
    /// Notes text; read from stdin when neither TEXT nor --file is given
    pub text: Option<String>,

    /// Read notes from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: NotesSource,

    /// Print the study set as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where to take the notes text from.
#[derive(Debug, Clone, Default, Args)]
pub struct NotesSource {
    /// Notes text
    pub text: Option<String>,

    /// Read notes from a file
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["text", "note"])]
    pub file: Option<PathBuf>,

    /// Use a saved note by id
    #[arg(short, long, value_name = "ID", conflicts_with = "text")]
    pub note: Option<String>,
}

impl NotesSource {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.file.is_none() && self.note.is_none()
    }
}
