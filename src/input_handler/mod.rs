//! Move input parsing for human players.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::amazons_move::AmazonsMove;

/// Six bare numbers, e.g. `2 0 2 3 2 4`.
static COORDINATES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([0-9]+) +([0-9]+) +([0-9]+) +([0-9]+) +([0-9]+) +([0-9]+)$")
        .expect("COORDINATES_RE regex should be valid")
});

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
    #[error("user requested exit")]
    UserExit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInput {
    /// A move in `row,col->row,col/row,col` notation.
    Notation { notation: String },
    UseEngine,
}

impl FromStr for MoveInput {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        match trimmed.to_lowercase().as_str() {
            "q" | "quit" | "exit" => return Err(InputError::UserExit),
            "e" | "engine" | "hint" => return Ok(MoveInput::UseEngine),
            _ => (),
        }

        if AmazonsMove::is_notation(trimmed) {
            return Ok(MoveInput::Notation {
                notation: trimmed.to_string(),
            });
        }

        if let Some(caps) = COORDINATES_RE.captures(trimmed) {
            return Ok(MoveInput::Notation {
                notation: format!(
                    "{},{}->{},{}/{},{}",
                    &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6]
                ),
            });
        }

        Err(InputError::InvalidInput {
            input: trimmed.to_string(),
        })
    }
}

/// Reads one line from `reader` and parses it. End of input counts as exit.
pub fn read_move_input<R: BufRead>(reader: &mut R) -> Result<MoveInput, InputError> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|error| InputError::IOError {
        error: error.to_string(),
    })?;
    if read == 0 {
        return Err(InputError::UserExit);
    }
    line.parse()
}

/// Prompts on stdout and reads a move from stdin.
pub fn parse_move_input() -> Result<MoveInput, InputError> {
    print!("> ");
    io::stdout().flush().map_err(|error| InputError::IOError {
        error: error.to_string(),
    })?;
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    read_move_input(&mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_notation() {
        let input: MoveInput = " 2,0->2,3/2,4 \n".parse().unwrap();
        assert_eq!(
            input,
            MoveInput::Notation {
                notation: "2,0->2,3/2,4".to_string()
            }
        );
    }

    #[test]
    fn test_parses_bare_coordinates() {
        let input: MoveInput = "2 0 2 3  2 4".parse().unwrap();
        assert_eq!(
            input,
            MoveInput::Notation {
                notation: "2,0->2,3/2,4".to_string()
            }
        );
    }

    #[test]
    fn test_engine_and_exit_keywords() {
        assert_eq!("engine".parse::<MoveInput>().unwrap(), MoveInput::UseEngine);
        assert!(matches!("QUIT".parse::<MoveInput>(), Err(InputError::UserExit)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            "e2e4".parse::<MoveInput>(),
            Err(InputError::InvalidInput { .. })
        ));
        assert!(matches!(
            "2,0->2,3".parse::<MoveInput>(),
            Err(InputError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_read_move_input_from_reader() {
        let mut reader = Cursor::new("1,1->1,2/0,2\n");
        assert!(matches!(
            read_move_input(&mut reader),
            Ok(MoveInput::Notation { .. })
        ));
        assert!(matches!(read_move_input(&mut reader), Err(InputError::UserExit)));
    }
}
