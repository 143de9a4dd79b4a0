//! Reading and writing `.jvd` files.

use super::DocumentError;
use crate::draw::{FormatError, Shape, ShapeFactory};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of saved drawings.
pub const JVD_EXTENSION: &str = "jvd";

/// Appends `.jvd` unless the path already ends with it.
pub fn ensure_jvd_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == JVD_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(JVD_EXTENSION);
    PathBuf::from(name)
}

/// Reads and parses one file.
///
/// The file is parsed completely before anything is returned. The factory's
/// counters only advance when every line parses.
pub fn load_file(factory: &mut ShapeFactory, path: &Path) -> Result<Vec<Shape>, DocumentError> {
    load_files(factory, std::iter::once(path))
}

/// Reads and parses several files, concatenating their shapes in order.
///
/// All or nothing: if any file fails, no shapes are returned and the
/// factory's counters are left as they were.
pub fn load_files<'a, I>(factory: &mut ShapeFactory, paths: I) -> Result<Vec<Shape>, DocumentError>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut scratch = factory.clone();
    let mut shapes = Vec::new();

    for path in paths {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = scratch
            .parse_lines(text.lines())
            .map_err(|error| format_error(path, error))?;
        debug!("Parsed {} shapes from {}", parsed.len(), path.display());
        shapes.extend(parsed);
    }

    *factory = scratch;
    Ok(shapes)
}

/// Writes one line per entry, each terminated by a newline.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<(), DocumentError> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {} shapes to {}", lines.len(), path.display());
    Ok(())
}

fn format_error(path: &Path, error: FormatError) -> DocumentError {
    let (line, source) = match error {
        FormatError::AtLine { line, source } => (line, *source),
        other => (0, other),
    };
    DocumentError::Format {
        path: path.to_path_buf(),
        line,
        source,
    }
}
