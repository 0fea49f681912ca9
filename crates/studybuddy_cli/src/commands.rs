//! Command handlers.
//!
//! Each handler reads from `input` and writes to `out` so the flows can be
//! driven from tests without a terminal.

use crate::cli::{Command, NotesSource, SaveCommand};
use crate::render;
use anyhow::{bail, Context as _, Result};
use log::debug;
use std::io::{BufRead, Read, Write};
use std::time::Duration;
use studybuddy_core::{
    NoteId, NoteService, NoteServiceError, PlaceholderGenerator, ReviewSession, Session,
    SqliteNoteRepository, StudyService,
};

pub type NoteStore<'conn> = NoteService<SqliteNoteRepository<'conn>>;

/// Everything a command needs for one run.
pub struct Context<'a> {
    session: &'a Session,
    notes: NoteStore<'a>,
    studies: StudyService<PlaceholderGenerator>,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a Session, notes: NoteStore<'a>, latency: Duration) -> Self {
        Self {
            session,
            notes,
            studies: StudyService::new(PlaceholderGenerator::new(latency)),
        }
    }
}

pub fn execute(
    command: Command,
    ctx: &mut Context<'_>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Whoami => render::session_banner(out, ctx.session)?,
        Command::Save(cmd) => save(&cmd, ctx, input, out)?,
        Command::List => list(ctx, out)?,
        Command::Load { id } => {
            let note = ctx.notes.load_note(parse_note_id(&id)?)?;
            writeln!(out, "{}", note.content)?;
        }
        Command::Generate(cmd) => {
            let notes = read_notes(&cmd.source, &ctx.notes, input)?;
            let set = ctx.studies.generate(&notes)?;
            if cmd.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&set)?)?;
            } else {
                render::study_set(out, &set)?;
            }
        }
        Command::Review(source) => review(&source, ctx, input, out)?,
    }
    out.flush()?;
    Ok(())
}

fn save(
    cmd: &SaveCommand,
    ctx: &Context<'_>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let source = NotesSource {
        text: cmd.text.clone(),
        file: cmd.file.clone(),
        note: None,
    };
    let text = read_notes(&source, &ctx.notes, input)?;
    let note = match ctx.notes.save_note(&text) {
        Ok(note) => note,
        Err(NoteServiceError::EmptyContent) => bail!("Cannot save empty notes."),
        Err(err) => return Err(err).context("Error saving notes"),
    };
    debug!("event=cli_save module=cli status=ok note_id={}", note.id);
    writeln!(out, "Notes saved successfully!")?;
    writeln!(out, "id: {}", note.id)?;
    writeln!(out, "title: {}", note.title)?;
    Ok(())
}

fn list(ctx: &Context<'_>, out: &mut impl Write) -> Result<()> {
    let notes = ctx
        .notes
        .recent_notes()
        .context("Error retrieving notes")?;
    if notes.is_empty() {
        writeln!(
            out,
            "No notes saved yet. Use `studybuddy save` to add your study material!"
        )?;
        return Ok(());
    }
    writeln!(out, "Your Saved Notes")?;
    for note in &notes {
        render::note_line(out, note)?;
    }
    Ok(())
}

fn review(
    source: &NotesSource,
    ctx: &mut Context<'_>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if source.is_empty() {
        bail!("review reads answers from stdin; pass notes as TEXT, --file or --note");
    }
    let notes = read_notes(source, &ctx.notes, input)?;
    let mut session = ReviewSession::new(ctx.studies.generate(&notes)?);

    let total = session.study_set().quiz.len();
    'questions: for index in 0..total {
        let question = session.question(index)?.clone();
        render::question(out, index + 1, &question)?;
        let position = loop {
            write!(out, "Your answer [1-{}]: ", question.options.len())?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break 'questions;
            }
            match parse_choice(&line, question.options.len()) {
                Some(position) => break position,
                None => writeln!(out, "Pick one of the listed options.")?,
            }
        };
        let verdict = session.answer_by_position(index, position)?;
        render::verdict(out, &verdict)?;
        writeln!(out, "---")?;
    }

    let score = session.score();
    writeln!(
        out,
        "Score: {}/{} correct ({} answered)",
        score.correct, score.total, score.answered
    )?;
    render::flashcards(out, session.study_set())?;
    Ok(())
}

/// Resolves notes text from TEXT, --file, --note, or else all of `input`.
fn read_notes(
    source: &NotesSource,
    notes: &NoteStore<'_>,
    input: &mut impl BufRead,
) -> Result<String> {
    if let Some(text) = &source.text {
        return Ok(text.clone());
    }
    if let Some(path) = &source.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read notes from `{}`", path.display()));
    }
    if let Some(id) = &source.note {
        return Ok(notes.load_note(parse_note_id(id)?)?.content);
    }
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read notes from stdin")?;
    Ok(text)
}

fn parse_note_id(value: &str) -> Result<NoteId> {
    NoteId::parse_str(value.trim()).with_context(|| format!("invalid note id `{value}`"))
}

/// Accepts a 1-based number or an option letter (`a`, `B`, ...).
fn parse_choice(line: &str, option_count: usize) -> Option<usize> {
    let trimmed = line.trim();
    let position = if let Ok(number) = trimmed.parse::<usize>() {
        number.checked_sub(1)?
    } else {
        let mut chars = trimmed.chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() || !letter.is_ascii_lowercase() {
            return None;
        }
        usize::from(letter as u8 - b'a')
    };
    (position < option_count).then_some(position)
}

#[cfg(test)]
mod tests {
    use super::{execute, parse_choice, Context};
    use crate::cli::{Command, GenerateCommand, NotesSource, SaveCommand};
    use rusqlite::Connection;
    use std::collections::HashMap;
    use std::io::{Cursor, Write};
    use std::time::Duration;
    use studybuddy_core::db::open_db_in_memory;
    use studybuddy_core::{
        placeholder_study_set, resolve_session, NoteService, Session, SqliteNoteRepository,
        StaticIdentityVerifier, StudySet,
    };

    fn session() -> Session {
        resolve_session("test-app", None, &StaticIdentityVerifier::new(HashMap::new())).expect("session should resolve")
    }

    fn run(conn: &Connection, command: Command, stdin: &str) -> anyhow::Result<String> {
        let session = session();
        let notes = NoteService::new(
            SqliteNoteRepository::try_new(conn)?,
            session.collection_path().clone(),
        );
        let mut ctx = Context::new(&session, notes, Duration::ZERO);
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        execute(command, &mut ctx, &mut input, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn save(text: &str) -> Command {
        Command::Save(SaveCommand {
            text: Some(text.to_string()),
            file: None,
        })
    }

    fn saved_id(output: &str) -> String {
        output
            .lines()
            .find_map(|line| line.strip_prefix("id: "))
            .expect("save output should include the id")
            .to_string()
    }

    #[test]
    fn parse_choice_accepts_numbers_and_letters() {
        assert_eq!(parse_choice("2\n", 3), Some(1));
        assert_eq!(parse_choice(" b ", 3), Some(1));
        assert_eq!(parse_choice("C", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("d", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn save_then_list_then_load() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let saved = run(&conn, save("Mitosis has four phases."), "").expect("command should succeed");
        assert!(saved.starts_with("Notes saved successfully!"));

        let listed = run(&conn, Command::List, "").expect("command should succeed");
        assert!(listed.contains("Mitosis has four phases."));

        let loaded = run(&conn, Command::Load { id: saved_id(&saved) }, "").expect("command should succeed");
        assert_eq!(loaded, "Mitosis has four phases.\n");
    }

    #[test]
    fn save_reads_stdin_and_rejects_blank() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let cmd = Command::Save(SaveCommand {
            text: None,
            file: None,
        });
        run(&conn, cmd, "from stdin\n").expect("command should succeed");

        let err = run(&conn, save("   "), "").expect_err("command should fail");
        assert_eq!(err.to_string(), "Cannot save empty notes.");

        let listed = run(&conn, Command::List, "").expect("command should succeed");
        assert_eq!(listed.lines().count(), 2);
    }

    #[test]
    fn save_reads_notes_file() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(file, "Ohm's law: V = IR").expect("temp file should be writable");
        let cmd = Command::Save(SaveCommand {
            text: None,
            file: Some(file.path().to_path_buf()),
        });
        let output = run(&conn, cmd, "").expect("command should succeed");
        assert!(output.contains("title: Ohm's law: V = IR"));
    }

    #[test]
    fn empty_list_prints_hint() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let listed = run(&conn, Command::List, "").expect("command should succeed");
        assert!(listed.starts_with("No notes saved yet."));
    }

    #[test]
    fn generate_json_from_saved_note() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let id = saved_id(&run(&conn, save("Plate tectonics"), "").expect("command should succeed"));
        let cmd = Command::Generate(GenerateCommand {
            source: NotesSource {
                note: Some(id),
                ..NotesSource::default()
            },
            json: true,
        });
        let output = run(&conn, cmd, "").expect("command should succeed");
        let set: StudySet = serde_json::from_str(&output).expect("json should decode");
        assert_eq!(set, placeholder_study_set());
    }

    #[test]
    fn generate_rejects_blank_notes() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let cmd = Command::Generate(GenerateCommand {
            source: NotesSource::default(),
            json: false,
        });
        let err = run(&conn, cmd, "  \n").expect_err("command should fail");
        assert_eq!(err.to_string(), "Notes required for generation.");
    }

    #[test]
    fn review_grades_answers_and_reveals_flashcards() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let cmd = Command::Review(NotesSource {
            text: Some("Study habits".to_string()),
            ..NotesSource::default()
        });
        let output = run(&conn, cmd, "x\nb\n1\n").expect("command should succeed");
        assert!(output.contains("Pick one of the listed options."));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Incorrect. The answer is: B. The per-user note store"));
        assert!(output.contains("Score: 1/2 correct (2 answered)"));
        assert!(output.contains("Term 2: Note store"));
    }

    #[test]
    fn review_stops_at_end_of_input() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let cmd = Command::Review(NotesSource {
            text: Some("Study habits".to_string()),
            ..NotesSource::default()
        });
        let output = run(&conn, cmd, "2\n").expect("command should succeed");
        assert!(output.contains("Score: 1/2 correct (1 answered)"));
    }

    #[test]
    fn review_requires_explicit_notes() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let err = run(&conn, Command::Review(NotesSource::default()), "").expect_err("command should fail");
        assert!(err.to_string().contains("review reads answers from stdin"));
    }
}
