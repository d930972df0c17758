//! Terminal commands.

use crate::AppError;
use std::str::FromStr;

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  +, inc            increment the counter
  -, dec            decrement the counter
  cat [tag]         fetch a random GIF (configured tag by default)
  state             print the whole state as JSON
  <namespace/NAME>  dispatch a trigger, e.g. containers/Counter/INCREMENT
  help              show this list
  quit              shut down and exit";

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Increment the counter
    Increment,
    /// Decrement the counter
    Decrement,
    /// Fetch a GIF, optionally for another tag
    FetchCat(Option<String>),
    /// Dispatch a trigger by its fully qualified type
    Dispatch(String),
    /// Print the state
    ShowState,
    /// Print [`HELP`]
    Help,
    /// Leave the loop
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Self::ShowState);
        };

        match word {
            "+" | "inc" | "increment" => Ok(Self::Increment),
            "-" | "dec" | "decrement" => Ok(Self::Decrement),
            "cat" => Ok(Self::FetchCat(words.next().map(str::to_string))),
            "state" => Ok(Self::ShowState),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ if word.contains('/') => Ok(Self::Dispatch(word.to_string())),
            _ => Err(AppError::UnknownCommand(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Command> {
        line.parse().ok()
    }

    #[test]
    fn test_counter_commands() {
        assert_eq!(parse("+"), Some(Command::Increment));
        assert_eq!(parse("  inc  "), Some(Command::Increment));
        assert_eq!(parse("-"), Some(Command::Decrement));
        assert_eq!(parse("decrement"), Some(Command::Decrement));
    }

    #[test]
    fn test_cat_with_and_without_tag() {
        assert_eq!(parse("cat"), Some(Command::FetchCat(None)));
        assert_eq!(parse("cat dog"), Some(Command::FetchCat(Some("dog".to_string()))));
    }

    #[test]
    fn test_raw_action_type() {
        assert_eq!(
            parse("services/GetGiphyCats/MAKE_REQUEST"),
            Some(Command::Dispatch("services/GetGiphyCats/MAKE_REQUEST".to_string()))
        );
    }

    #[test]
    fn test_empty_line_shows_state() {
        assert_eq!(parse(""), Some(Command::ShowState));
        assert_eq!(parse("   "), Some(Command::ShowState));
    }

    #[test]
    fn test_unknown_command() {
        let error = "dance".parse::<Command>().err();

        assert!(matches!(error, Some(AppError::UnknownCommand(ref word)) if word == "dance"));
    }
}
