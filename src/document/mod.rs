//! `.jvd` documents: loading, saving and exporting a drawing.

pub mod storage;
pub mod workspace;

pub use storage::{JVD_EXTENSION, ensure_jvd_extension, load_file, load_files, save_lines};
pub use workspace::Workspace;

use crate::draw::FormatError;
use crate::export::ExportError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by document operations. Every variant names the file involved.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{}: line {line}: {source}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: FormatError,
    },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Drawing has no file path; save it under a new name first")]
    NoPath,

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

#[cfg(test)]
mod tests;
