//! Errors that end the program.

use std::{error, fmt, io};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum Error {
    /// Talking to the terminal failed.
    Io(io::Error),

    /// The command line describes a game that cannot be played.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal error: {}", e),
            Self::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
