// src/utils/name_source.rs - Loading the organization name list
use log::debug;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::errors::{DedupeError, DedupeResult};

/// Reads a JSON array of strings.
pub fn load_names(path: impl AsRef<Path>) -> DedupeResult<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DedupeError::NameSourceNotFound {
            path: path.to_path_buf(),
        },
        _ => DedupeError::NameSourceIo {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let names: Vec<String> = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            DedupeError::NameSourceIo {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            DedupeError::NameSourceInvalid {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!("Read {} names from {}", names.len(), path.display());
    Ok(names)
}
