//! Failures of the driver itself, as opposed to failures of the Lox program.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::exit_code;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },
    #[error("'{}' contains invalid UTF-8 data", path.display())]
    InvalidUtf8 { path: PathBuf },
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => DriverError::NotFound { path },
            io::ErrorKind::InvalidData => DriverError::InvalidUtf8 { path },
            _ => DriverError::Io { path, source },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Usage(_) => exit_code::USAGE,
            DriverError::NotFound { .. } | DriverError::InvalidUtf8 { .. } | DriverError::Io { .. } => {
                exit_code::IO_ERR
            }
        }
    }
}
