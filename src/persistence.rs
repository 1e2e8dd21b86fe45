//! Binary persistence of fitted objects
//!
//! Fitted preprocessing state is a plain serde record, so artifacts written
//! here can be loaded, inspected, and reused at inference time without
//! refitting. Writes go through [save_object](fn.save_object.html), which
//! creates missing parent directories and overwrites any previous artifact
//! at the same path. Last writer wins; there is no locking.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializes `object` to `path` in binary form, creating parent directories
/// as needed and overwriting any existing file.
pub fn save_object<T: Serialize, P: AsRef<Path>>(path: P, object: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    bincode::serialize_into(BufWriter::new(file), object)?;
    Ok(())
}

/// Reads back an object written by [save_object](fn.save_object.html).
pub fn load_object<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}
