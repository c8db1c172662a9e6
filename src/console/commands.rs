//! Line commands accepted by the terminal surface.

use std::str::FromStr;

use ck_core::{EntryTimestamp, TypeFilter};

pub const USAGE: &str = "\
commands:
  list                     show the filtered history, newest first
  filter <all|text|image>  change the type filter
  preview <ts>             open the preview for an entry
  close                    close the preview
  copy <ts>                copy an entry back to the clipboard
  clear                    clear the history
  autostart [on|off]       show or change launch at login
  hide | show              hide or show the window
  help                     show this message
  quit                     leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Filter(TypeFilter),
    Preview(EntryTimestamp),
    Close,
    Copy(EntryTimestamp),
    Clear,
    /// `None` queries the current state.
    Autostart(Option<bool>),
    Hide,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}`: invalid argument `{value}`, expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("`{0}` takes no further arguments")]
    TrailingArguments(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(CommandError::TrailingArguments(static_name(head)));
        }

        let command = match head.to_ascii_lowercase().as_str() {
            "list" | "ls" => no_arg("list", arg, Command::List)?,
            "filter" => Command::Filter(parse_arg("filter", arg, "all, text or image")?),
            "preview" => Command::Preview(timestamp_arg("preview", arg)?),
            "close" => no_arg("close", arg, Command::Close)?,
            "copy" => Command::Copy(timestamp_arg("copy", arg)?),
            "clear" => no_arg("clear", arg, Command::Clear)?,
            "autostart" => Command::Autostart(arg.map(parse_switch).transpose()?),
            "hide" => no_arg("hide", arg, Command::Hide)?,
            "show" => no_arg("show", arg, Command::Show)?,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse_line(s)?.ok_or_else(|| CommandError::Unknown(String::new()))
    }
}

fn no_arg(command: &'static str, arg: Option<&str>, parsed: Command) -> Result<Command, CommandError> {
    match arg {
        None => Ok(parsed),
        Some(_) => Err(CommandError::TrailingArguments(command)),
    }
}

fn parse_arg<T: FromStr>(
    command: &'static str,
    arg: Option<&str>,
    expected: &'static str,
) -> Result<T, CommandError> {
    let value = arg.ok_or(CommandError::MissingArgument { command, expected })?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
        expected,
    })
}

fn timestamp_arg(command: &'static str, arg: Option<&str>) -> Result<EntryTimestamp, CommandError> {
    parse_arg::<i64>(command, arg, "an entry timestamp").map(EntryTimestamp::from_millis)
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArgument {
            command: "autostart",
            value: value.to_string(),
            expected: "on or off",
        }),
    }
}

fn static_name(head: &str) -> &'static str {
    const KNOWN: [&str; 11] = [
        "list", "filter", "preview", "close", "copy", "clear", "autostart", "hide", "show",
        "help", "quit",
    ];
    let head = head.to_ascii_lowercase();
    KNOWN
        .iter()
        .find(|name| **name == head)
        .copied()
        .unwrap_or("command")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        Command::parse_line(line)
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t").unwrap(), None);
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(parse("list").unwrap(), Some(Command::List));
        assert_eq!(parse("filter image").unwrap(), Some(Command::Filter(TypeFilter::Image)));
        assert_eq!(parse("FILTER All").unwrap(), Some(Command::Filter(TypeFilter::All)));
        assert_eq!(
            parse("preview 1700000000000").unwrap(),
            Some(Command::Preview(EntryTimestamp::from_millis(1_700_000_000_000)))
        );
        assert_eq!(parse("close").unwrap(), Some(Command::Close));
        assert_eq!(
            parse("copy 42").unwrap(),
            Some(Command::Copy(EntryTimestamp::from_millis(42)))
        );
        assert_eq!(parse("clear").unwrap(), Some(Command::Clear));
        assert_eq!(parse("autostart").unwrap(), Some(Command::Autostart(None)));
        assert_eq!(parse("autostart on").unwrap(), Some(Command::Autostart(Some(true))));
        assert_eq!(parse("autostart off").unwrap(), Some(Command::Autostart(Some(false))));
        assert_eq!(parse("hide").unwrap(), Some(Command::Hide));
        assert_eq!(parse("show").unwrap(), Some(Command::Show));
        assert_eq!(parse("help").unwrap(), Some(Command::Help));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse("paste 1").unwrap_err(),
            CommandError::Unknown("paste".to_string())
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(
            parse("copy").unwrap_err(),
            CommandError::MissingArgument { command: "copy", .. }
        ));
        assert!(matches!(
            parse("copy yesterday").unwrap_err(),
            CommandError::InvalidArgument { command: "copy", .. }
        ));
        assert!(matches!(
            parse("filter video").unwrap_err(),
            CommandError::InvalidArgument { command: "filter", .. }
        ));
        assert!(matches!(
            parse("autostart maybe").unwrap_err(),
            CommandError::InvalidArgument { command: "autostart", .. }
        ));
        assert_eq!(
            parse("clear now").unwrap_err(),
            CommandError::TrailingArguments("clear")
        );
        assert_eq!(
            parse("copy 1 2").unwrap_err(),
            CommandError::TrailingArguments("copy")
        );
    }

    #[test]
    fn from_str_rejects_blank_input() {
        assert!("".parse::<Command>().is_err());
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }
}
