//! JSON persistence helpers for files under ~/.slither/.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.slither/ directory path, creating it if needed.
pub fn slither_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".slither");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.slither/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(slither_dir()?.join(filename))
}

/// Read a file from ~/.slither/. A missing file is `Ok(None)`; any other
/// failure is returned.
pub fn read_optional(filename: &str) -> io::Result<Option<String>> {
    let path = data_path(filename)?;
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON to ~/.slither/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
