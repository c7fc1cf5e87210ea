//! murmur - terminal chat with a canned assistant

mod commands;
mod config;
mod theme;
mod ui;

use clap::Parser;
use murmur_core::{ChatSession, SessionEvent};
use std::io::{self, Write};

use crate::config::Config;
use crate::theme::{Theme, ThemeMode};

/// murmur - chat with a canned assistant
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Send a single message, print the reply, and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Theme for this run (does not change the saved preference)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("murmur=debug,murmur_core=debug")
            .with_writer(io::stderr)
            .init();
    }

    if args.init_config {
        let path = Config::init()?;
        println!("Config file created at: {}", path.display());
        println!("\nExample config:\n{}", config::example_config());
        return Ok(());
    }

    let config = Config::load();
    let mode = ThemeMode::resolve(args.theme, config.theme, ThemeMode::detect_system());
    tracing::debug!(theme = mode.name(), "Theme resolved");
    let theme = Theme::for_mode(mode);

    let session = ChatSession::new(config.session_config());

    if let Some(command) = args.command {
        let result = run_command(&session, &command, &theme).await;
        session.shutdown();
        return result;
    }

    let result = run_interactive(&session, theme).await;
    session.shutdown();
    result
}

async fn run_command(session: &ChatSession, text: &str, theme: &Theme) -> anyhow::Result<()> {
    let transcript = session.submit_user_turn(text)?;
    if let Some(turn) = transcript.last() {
        println!("{}", ui::format_turn(turn, theme));
    }

    session.wait_for_reply().await;

    if let Some(turn) = session.transcript().last() {
        println!("{}", ui::format_turn(turn, theme));
    }
    Ok(())
}

async fn run_interactive(session: &ChatSession, mut theme: Theme) -> anyhow::Result<()> {
    let mut events = session.subscribe();
    let mut stdout = io::stdout();

    if io::IsTerminal::is_terminal(&io::stderr()) {
        let id = session.id().to_string();
        eprintln!("murmur session: {}  (/help for commands)", &id[..8]);
        eprintln!();
    }
    ui::render_transcript(&mut stdout, &session.transcript(), &theme)?;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }
        let line = input.trim_end_matches(['\r', '\n']);

        let text = match commands::parse_input(line) {
            commands::Input::Chat(text) => text,
            commands::Input::Command(result) => {
                match result {
                    commands::CommandResult::ToggleTheme => {
                        let mode = theme.mode.toggled();
                        theme = Theme::for_mode(mode);
                        if let Err(e) = Config::store_theme(&Config::config_path(), mode) {
                            let msg = format!("could not save theme: {}", e);
                            eprintln!("{}", ui::format_error(&msg, &theme));
                        } else {
                            println!("Theme set to {}.", mode.name());
                        }
                    }
                    commands::CommandResult::ShowTranscript => {
                        ui::render_transcript(&mut stdout, &session.transcript(), &theme)?;
                    }
                    commands::CommandResult::Message(msg) => println!("{}", msg),
                    commands::CommandResult::Exit => break,
                }
                continue;
            }
        };

        if text.trim().is_empty() {
            continue;
        }

        if let Err(e) = session.submit_user_turn(text) {
            if !e.is_user_correctable() {
                return Err(e.into());
            }
            eprintln!("{}", ui::format_error(&e.to_string(), &theme));
            continue;
        }

        // Input stays closed until the reply lands
        println!("{}", ui::format_typing(&theme));
        loop {
            match events.recv().await {
                Ok(event) if event.is_terminal() => {
                    if let SessionEvent::ReplyResolved { turn } = event {
                        println!("{}", ui::format_turn(&turn, &theme));
                    }
                    break;
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Dropped {} session events", n);
                    if !session.is_awaiting_reply() {
                        if let Some(turn) = session.transcript().last() {
                            println!("{}", ui::format_turn(turn, &theme));
                        }
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}
