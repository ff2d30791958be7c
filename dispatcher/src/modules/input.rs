/// ----- INPUT MODULE -----
/// Reads operator commands from stdin on its own thread and hands them to
/// the main loop over a channel. Parsing the floor number happens here;
/// the dispatcher only ever sees integers.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request(i32),
    Move,
    Reset,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid number.")]
    NotANumber(String),

    #[error("Please enter a floor number, move, reset or quit.")]
    Empty,
}

pub fn parse_line(line: &str) -> Result<Command, InputError> {
    match line.trim().to_lowercase().as_str() {
        "" => Err(InputError::Empty),
        "m" | "move" => Ok(Command::Move),
        "r" | "reset" => Ok(Command::Reset),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => other
            .parse::<i32>()
            .map(Command::Request)
            .map_err(|_| InputError::NotANumber(other.to_string())),
    }
}

/// The channel disconnects when stdin is closed.
pub fn init() -> io::Result<Receiver<Result<Command, InputError>>> {
    let (command_tx, command_rx) = unbounded();
    thread::Builder::new().name("stdin".to_string()).spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { return };
            if command_tx.send(parse_line(&line)).is_err() {
                return
            }
        }
    })?;
    Ok(command_rx)
}
