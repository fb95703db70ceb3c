//! Loading JSON input files named on the command line.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::InputError;

const INPUT_TARGET: &str = "tributary_runtime::input";

/// Reads the file at `path` and parses it as JSON into `T`.
///
/// # Errors
///
/// Returns [`InputError::Read`] if the file cannot be read and
/// [`InputError::Parse`] if its contents do not describe a `T`.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use tributary_runtime::load_json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("config.json");
/// std::fs::write(&path, r#"{"directory": "/data"}"#)?;
///
/// let config: BTreeMap<String, String> = load_json(&path)?;
/// assert_eq!(config.get("directory").map(String::as_str), Some("/data"));
/// # Ok(())
/// # }
/// ```
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| read_error(path, source))?;
    debug!(
        target: INPUT_TARGET,
        path = %path.display(),
        bytes = contents.len(),
        "loaded input file"
    );
    parse(path, &contents)
}

/// Like [`load_json`], but a missing or blank file yields `T::default()`.
///
/// Sources use this for state: the first sync of a connection has no prior
/// checkpoint.
///
/// # Errors
///
/// Returns [`InputError::Read`] for read failures other than a missing file
/// and [`InputError::Parse`] for malformed contents.
pub fn load_json_or_default<T>(path: &Path) -> Result<T, InputError>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(target: INPUT_TARGET, path = %path.display(), "input file absent");
            return Ok(T::default());
        }
        Err(error) => return Err(read_error(path, error)),
    };
    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    parse(path, &contents)
}

fn parse<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, InputError> {
    serde_json::from_str(contents).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_error(path: &Path, source: io::Error) -> InputError {
    InputError::Read {
        path: path.to_path_buf(),
        source: Arc::new(source),
    }
}

#[cfg(test)]
mod tests;
