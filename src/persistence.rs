//! JSON snapshot of the festival on disk.

use crate::models::Festival;
use atomic_write_file::AtomicWriteFile;
use std::io::{self, Write};
use std::path::Path;

/// Load a snapshot. A missing file yields `Ok(None)`.
pub async fn load_snapshot(path: &Path) -> io::Result<Option<Festival>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let festival = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(festival))
}

/// Serialize outside any lock, then hand the bytes to [`write_snapshot`].
pub fn encode_snapshot(festival: &Festival) -> io::Result<Vec<u8>> {
    serde_json::to_vec_pretty(festival).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Replace `path` with `bytes` atomically: the old snapshot stays intact until commit.
pub async fn write_snapshot(path: &Path, bytes: Vec<u8>) -> io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut file = AtomicWriteFile::open(&path)?;
        file.write_all(&bytes)?;
        file.commit()
    })
    .await
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}
