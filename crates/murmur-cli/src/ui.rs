//! Line-oriented transcript rendering

use chrono::Local;
use crossterm::style::Stylize;
use murmur_core::{Author, Transcript, Turn};
use std::io::{self, Write};

use crate::theme::Theme;

/// Label shown in place of the pending assistant turn
pub const TYPING_LABEL: &str = "typing...";

fn timestamp(turn: &Turn) -> String {
    turn.created_at()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// One rendered transcript row
pub fn format_turn(turn: &Turn, theme: &Theme) -> String {
    let label_color = match turn.author() {
        Author::User => theme.user,
        Author::Assistant => theme.assistant,
    };
    format!(
        "{} {} {}",
        format!("[{}]", timestamp(turn)).with(theme.dim),
        format!("{}:", turn.author().label()).with(label_color).bold(),
        turn.text().with(theme.fg),
    )
}

/// Placeholder row for a reply that has not resolved yet
pub fn format_typing(theme: &Theme) -> String {
    format!(
        "{} {}",
        format!("{}:", Author::Assistant.label()).with(theme.assistant).bold(),
        TYPING_LABEL.with(theme.pending).italic(),
    )
}

pub fn format_error(message: &str, theme: &Theme) -> String {
    format!("{}", format!("Error: {}", message).with(theme.error))
}

/// Write every turn, plus the typing row while a reply is pending
pub fn render_transcript<W: Write>(
    out: &mut W,
    transcript: &Transcript,
    theme: &Theme,
) -> io::Result<()> {
    for turn in transcript.turns() {
        writeln!(out, "{}", format_turn(turn, theme))?;
    }
    if transcript.is_awaiting_reply() {
        writeln!(out, "{}", format_typing(theme))?;
    }
    Ok(())
}
