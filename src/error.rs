//! Boundary error types.
//!
//! The core analysis never errors on data-shape issues: unparseable lines are
//! skipped, malformed operands leave register slots unset, and an empty instruction
//! stream just reports zero of everything. The only hard failure is a missing input
//! file, surfaced here before any core work begins.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    InputNotFound(PathBuf),
    Io(std::io::Error, PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputNotFound(path) => write!(f, "input file not found: {}", path.display()),
            Error::Io(err, path) => write!(f, "I/O error on \"{}\": {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
