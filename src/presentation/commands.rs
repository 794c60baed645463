// User input - stdin lines parsed into dashboard commands
use crate::application::events::{AppEvent, UserCommand};
use crate::domain::settings::Theme;
use crate::domain::view::Tab;
use std::io::BufRead;
use tokio::sync::mpsc;

pub const HELP: &str = "\
Commands:
  dashboard | d         live readings
  plants | p            plant roster
  analytics | a         trends and distribution
  rate <ms>             refresh interval (1000, 2000, 5000, 10000)
  theme <dark|light>
  notify <on|off>
  help
  quit | q";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument '{value}' for '{command}'")]
    InvalidArgument { command: &'static str, value: String },
}

/// What one line of input asks for.
#[derive(Debug, PartialEq)]
pub enum Input {
    Command(UserCommand),
    Help,
}

pub fn parse(line: &str) -> Result<Input, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "dashboard" | "d" => UserCommand::SelectTab(Tab::Dashboard),
        "plants" | "p" => UserCommand::SelectTab(Tab::Plants),
        "analytics" | "a" => UserCommand::SelectTab(Tab::Analytics),
        "rate" => {
            let value = arg.ok_or(CommandError::MissingArgument("rate"))?;
            let ms = value.parse::<u64>().map_err(|_| CommandError::InvalidArgument {
                command: "rate",
                value: value.to_string(),
            })?;
            UserCommand::SetRefreshRate(ms)
        }
        "theme" => {
            let value = arg.ok_or(CommandError::MissingArgument("theme"))?;
            let theme = value.parse::<Theme>().map_err(|_| CommandError::InvalidArgument {
                command: "theme",
                value: value.to_string(),
            })?;
            UserCommand::SetTheme(theme)
        }
        "notify" => match arg.map(str::to_ascii_lowercase).as_deref() {
            Some("on") => UserCommand::SetNotifications(true),
            Some("off") => UserCommand::SetNotifications(false),
            Some(other) => {
                return Err(CommandError::InvalidArgument {
                    command: "notify",
                    value: other.to_string(),
                });
            }
            None => return Err(CommandError::MissingArgument("notify")),
        },
        "help" | "h" | "?" => return Ok(Input::Help),
        "quit" | "q" | "exit" => UserCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Input::Command(command))
}

/// Reads stdin on a dedicated thread so a pending read never holds up runtime shutdown.
pub fn spawn_stdin_reader(
    tx: mpsc::Sender<AppEvent>,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read input");
                        break;
                    }
                };

                match parse(&line) {
                    Ok(Input::Help) => println!("{}", HELP),
                    Ok(Input::Command(command)) => {
                        let quit = command == UserCommand::Quit;
                        if tx.blocking_send(AppEvent::Command(command)).is_err() || quit {
                            break;
                        }
                    }
                    Err(CommandError::Empty) => {}
                    Err(e) => eprintln!("{} (type 'help' for commands)", e),
                }
            }
            tracing::debug!("input reader finished");
        })
}
