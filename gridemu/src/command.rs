use std::{
    error::Error,
    io,
    str::{FromStr, SplitWhitespace},
    sync::mpsc::{self, Receiver},
    thread,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("Missing argument {0}")]
    MissingArgument(usize),

    #[error("Bad argument ({0})")]
    ParseError(String),

    #[error("Coordinates ({0}, {1}) lie outside the grid")]
    OutOfGrid(usize, usize),
}

pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// Reads stdin lines on a separate thread so the emulator can keep ticking while waiting for input.
    /// The channel disconnects once stdin is exhausted.
    pub fn spawn_reader() -> Receiver<Command> {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            for line in io::stdin().lines() {
                let Ok(line) = line else {
                    break;
                };

                if sender.send(Command::new(line)).is_err() {
                    break;
                }
            }
        });

        receiver
    }

    pub fn args(&self) -> CommandArgs<SplitWhitespace<'_>> {
        CommandArgs {
            iter: self.0.split_whitespace(),
            index: 0,
        }
    }
}

pub struct CommandArgs<I> {
    iter: I,
    index: usize,
}

impl<'a, I> CommandArgs<I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn next(&mut self) -> Result<&'a str, CommandError> {
        self.index += 1;

        self.iter
            .next()
            .ok_or(CommandError::MissingArgument(self.index))
    }

    pub fn next_optional(&mut self) -> Option<&'a str> {
        self.next().ok()
    }

    pub fn next_parsed<T>(&mut self) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: Error + 'static,
    {
        let arg_str = self.next()?;

        T::from_str(arg_str).map_err(|e| CommandError::ParseError(format!("{}: {}", arg_str, e)))
    }

    /// Like `next_parsed`, but falls back to `default` when the argument was left out.
    pub fn next_parsed_or<T>(&mut self, default: T) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: Error + 'static,
    {
        match self.next_parsed() {
            Err(CommandError::MissingArgument(_)) => Ok(default),
            result => result,
        }
    }

    pub fn remaining(self) -> usize {
        self.iter.count()
    }
}
