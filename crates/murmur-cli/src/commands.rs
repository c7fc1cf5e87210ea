//! Slash commands for interactive mode

/// Result of executing a slash command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Flip light/dark and persist the choice
    ToggleTheme,
    /// Reprint the whole transcript
    ShowTranscript,
    /// Show a message to the user
    Message(String),
    /// Exit the application
    Exit,
}

/// One line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Command(CommandResult),
    /// Text to send to the assistant
    Chat(&'a str),
}

/// Split a prompt line into a known slash command or chat text.
///
/// Only known commands are intercepted, so "/etc is confusing" is sent as is.
/// A leading `//` sends the rest with a single slash ("//help" sends "/help").
pub fn parse_input(line: &str) -> Input<'_> {
    if line.starts_with("//") {
        return Input::Chat(&line[1..]);
    }
    match execute_command(line) {
        Some(result) => Input::Command(result),
        None => Input::Chat(line),
    }
}

/// Parse a known slash command. Returns `None` for anything else.
pub fn execute_command(input: &str) -> Option<CommandResult> {
    let input = input.trim();
    let command = input.strip_prefix('/')?;
    let mut parts = command.split_whitespace();
    let name = parts.next()?.to_lowercase();
    if parts.next().is_some() {
        return None;
    }

    match name.as_str() {
        "help" | "h" | "?" => Some(CommandResult::Message(help_message())),
        "theme" | "t" => Some(CommandResult::ToggleTheme),
        "transcript" | "history" => Some(CommandResult::ShowTranscript),
        "quit" | "exit" | "q" => Some(CommandResult::Exit),
        _ => None,
    }
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?           Show this help message
  /theme, /t              Toggle light/dark theme (saved)
  /transcript, /history   Show the full conversation
  /quit, /exit, /q        Exit

Type a message and press Enter to send.
Other lines starting with / are sent as messages; start with // to send a
line that would otherwise be a command."#
        .to_string()
}
