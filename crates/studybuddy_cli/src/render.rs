//! Plain-text rendering of notes and study sets.

use chrono::{DateTime, Local};
use std::io::{self, Write};
use studybuddy_core::{AnswerVerdict, Note, QuizQuestion, Session, StudySet};

pub fn session_banner(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let kind = if session.is_anonymous() {
        "anonymous"
    } else {
        "verified"
    };
    writeln!(out, "User ID: {} ({kind})", session.user_id())?;
    writeln!(out, "Collection: {}", session.collection_path())
}

/// Warning shown for anonymous sessions, unless the logger already echoes
/// the session's own warning to stderr.
pub fn anonymous_notice(session: &Session, log_echoes_warnings: bool) -> Option<String> {
    (session.is_anonymous() && !log_echoes_warnings).then(|| {
        format!(
            "warning: no auth token configured; using the default user id `{}`",
            session.user_id()
        )
    })
}

pub fn note_line(out: &mut impl Write, note: &Note) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  {}",
        format_timestamp(note.created_at),
        note.id,
        single_line(&note.title)
    )
}

pub fn question(out: &mut impl Write, number: usize, question: &QuizQuestion) -> io::Result<()> {
    writeln!(out, "Question {number}: {}", question.question)?;
    for (position, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", position + 1)?;
    }
    Ok(())
}

pub fn verdict(out: &mut impl Write, verdict: &AnswerVerdict) -> io::Result<()> {
    match verdict {
        AnswerVerdict::Correct => writeln!(out, "Correct!"),
        AnswerVerdict::Incorrect { correct_answer } => {
            writeln!(out, "Incorrect. The answer is: {correct_answer}")
        }
    }
}

pub fn study_set(out: &mut impl Write, set: &StudySet) -> io::Result<()> {
    writeln!(out, "Multiple Choice Quiz")?;
    for (index, q) in set.quiz.iter().enumerate() {
        question(out, index + 1, q)?;
        writeln!(out, "  Answer: {}", q.correct_answer)?;
        writeln!(out, "---")?;
    }
    flashcards(out, set)
}

pub fn flashcards(out: &mut impl Write, set: &StudySet) -> io::Result<()> {
    writeln!(out, "Key Flashcards")?;
    for (index, card) in set.flashcards.iter().enumerate() {
        writeln!(out, "Term {}: {}", index + 1, card.term)?;
        writeln!(out, "  Definition: {}", card.definition)?;
    }
    Ok(())
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Titles keep the note's line breaks; list rows must not.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::{anonymous_notice, single_line, verdict};
    use std::collections::HashMap;
    use studybuddy_core::{resolve_session, AnswerVerdict, StaticIdentityVerifier};

    #[test]
    fn anonymous_notice_is_printed_once() {
        let verifier = StaticIdentityVerifier::new(HashMap::from([(
            "tok".to_string(),
            "uid-carol".to_string(),
        )]));
        let anonymous =
            resolve_session("app", None, &verifier).expect("anonymous session should resolve");
        let notice = anonymous_notice(&anonymous, false).expect("plain run should warn");
        assert!(notice.contains("studybuddy-anon-user"));
        assert!(anonymous_notice(&anonymous, true).is_none());

        let verified =
            resolve_session("app", Some("tok"), &verifier).expect("token should verify");
        assert!(anonymous_notice(&verified, false).is_none());
    }

    #[test]
    fn single_line_collapses_breaks() {
        assert_eq!(single_line("Cell\ntheory\t notes"), "Cell theory notes");
    }

    #[test]
    fn incorrect_verdict_names_the_answer() {
        let mut out = Vec::new();
        verdict(
            &mut out,
            &AnswerVerdict::Incorrect {
                correct_answer: "B. Mitochondria".to_string(),
            },
        )
        .expect("verdict should render");
        assert_eq!(
            String::from_utf8(out).expect("output should be UTF-8"),
            "Incorrect. The answer is: B. Mitochondria\n"
        );
    }
}
