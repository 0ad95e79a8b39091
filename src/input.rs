//! Reading candidate lines from files and streams

use crate::errors::SafeEatsError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read every line of `reader`, without line terminators
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>, SafeEatsError> {
    let lines = BufReader::new(reader)
        .lines()
        .collect::<Result<Vec<String>, _>>()?;
    debug!("Read {} input lines", lines.len());
    Ok(lines)
}

/// Read every line of the file at `path`
///
/// # Errors
///
/// Returns `SafeEatsError::Io` when the file cannot be opened or is not valid UTF-8.
pub fn read_lines_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SafeEatsError> {
    let path = path.as_ref();
    info!("Reading ingredient lines from {}", path.display());
    let file = File::open(path)
        .map_err(|e| SafeEatsError::Io(format!("{}: {}", path.display(), e)))?;
    read_lines(file)
}
