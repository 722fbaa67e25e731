use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

use crate::puzzle::Direction;

pub const QUIT: char = 'q';

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read from the console")]
    Io(#[from] io::Error),
    #[error("console input ended before a command was entered")]
    Exhausted,
}

/// Reads the first byte of the next whitespace-delimited token and throws
/// away the rest of its line without buffering it. Bytes outside ASCII come
/// back as their Latin-1 `char`, which is never a command. `None` once the
/// input is exhausted.
pub fn read_character<R: BufRead>(input: &mut R) -> io::Result<Option<char>> {
    let mut first = None;

    loop {
        let buf = match input.fill_buf() {
            Ok(buf) => buf,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if buf.is_empty() {
            return Ok(first.map(char::from));
        }

        let (used, line_done) = match buf.iter().position(|&b| b == b'\n') {
            Some(end) => (end + 1, true),
            None => (buf.len(), false),
        };
        if first.is_none() {
            first = buf[..used]
                .iter()
                .copied()
                .find(|b| !b.is_ascii_whitespace());
        }
        input.consume(used);

        if line_done && first.is_some() {
            return Ok(first.map(char::from));
        }
    }
}

pub fn is_valid_command(c: char) -> bool {
    matches!(c, 'w' | 'a' | 's' | 'd' | QUIT)
}

/// Blocks until a valid command arrives, silently skipping anything else.
pub fn read_command<R: BufRead>(input: &mut R) -> Result<char, InputError> {
    loop {
        match read_character(input)? {
            Some(c) if is_valid_command(c) => return Ok(c),
            Some(c) => debug!(command = %c, "ignoring invalid command"),
            None => return Err(InputError::Exhausted),
        }
    }
}

/// Only defined for the movement commands; quit must be handled first.
pub fn to_direction(c: char) -> Direction {
    match c {
        'w' => Direction::Up,
        's' => Direction::Down,
        'a' => Direction::Left,
        'd' => Direction::Right,
        _ => unreachable!("no direction for command {:?}", c),
    }
}
