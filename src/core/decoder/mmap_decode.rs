//! Reading image files for path inputs.
//!
//! Large files are memory-mapped to avoid copying them through the kernel;
//! small files use a plain `fs::read`, which has lower overhead.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Files at or above this size are memory-mapped (1MB)
pub const DEFAULT_MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a file, memory-mapping it when it is at least `mmap_threshold` bytes.
pub fn read_file_bytes(path: &Path, mmap_threshold: u64) -> Result<FileBytes, HashError> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() >= mmap_threshold && metadata.len() > 0 {
        read_mmap(path)
    } else {
        read_standard(path)
    }
}

fn read_mmap(path: &Path) -> Result<FileBytes, HashError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;

    // SAFETY: the mapping is read-only and the file handle outlives the
    // decode that borrows it.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| io_error(path, e))?;

    Ok(FileBytes::Mmap(mmap))
}

fn read_standard(path: &Path) -> Result<FileBytes, HashError> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    Ok(FileBytes::Vec(bytes))
}

fn io_error(path: &Path, source: std::io::Error) -> HashError {
    HashError::IoError {
        path: path.to_path_buf(),
        source,
    }
}

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes (zero-copy from disk)
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(v) => v,
            FileBytes::Mmap(m) => m,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn small_file_is_read_into_memory() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3, 4]).unwrap();

        let bytes = read_file_bytes(file.path(), DEFAULT_MMAP_THRESHOLD).unwrap();

        assert!(matches!(bytes, FileBytes::Vec(_)));
        assert_eq!(&*bytes, &[1, 2, 3, 4]);
    }

    #[test]
    fn file_at_threshold_is_mapped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[9; 64]).unwrap();
        file.flush().unwrap();

        let bytes = read_file_bytes(file.path(), 64).unwrap();

        assert!(matches!(bytes, FileBytes::Mmap(_)));
        assert_eq!(bytes.len(), 64);
        assert!(bytes.iter().all(|&b| b == 9));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/nonexistent/path/photo.png");
        let result = read_file_bytes(path, DEFAULT_MMAP_THRESHOLD);

        match result {
            Err(HashError::IoError { path: reported, .. }) => assert_eq!(reported, path),
            _ => panic!("expected an I/O error"),
        }
    }
}
