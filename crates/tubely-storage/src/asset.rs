//! Buffered upload data handed to storage backends.

use bytes::Bytes;
use std::io::{self, SeekFrom};
use std::path::Path;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

const TEMP_FILE_PREFIX: &str = "tubely-upload-";

/// Upload content that has been fully received and is ready to be stored.
#[derive(Debug)]
pub enum BufferedAsset {
    /// Small assets held in memory
    Memory(Bytes),
    /// Large assets staged in a private temporary file
    Staged(StagedFile),
}

impl BufferedAsset {
    pub fn len(&self) -> u64 {
        match self {
            BufferedAsset::Memory(bytes) => bytes.len() as u64,
            BufferedAsset::Staged(staged) => staged.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A temporary file owned by exactly one upload.
///
/// The file is unlinked when the `StagedFile` (or the `TempPath` taken out of it) is
/// dropped, so every exit path of a request removes it, including early returns and
/// panics that unwind.
#[derive(Debug)]
pub struct StagedFile {
    file: File,
    path: TempPath,
    len: u64,
}

impl StagedFile {
    /// Create an empty staging file in `temp_dir`, or the OS temp dir when `None`.
    pub fn create(temp_dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_FILE_PREFIX);
        let named = match temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let (file, path) = named.into_parts();

        Ok(StagedFile {
            file: File::from_std(file),
            path,
            len: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.len += chunk.len() as u64;
        Ok(())
    }

    /// Flush pending writes and move the read cursor back to the start so the
    /// content can be re-read by a backend.
    pub async fn rewind(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.seek(SeekFrom::Start(0)).await?;
        Ok(())
    }

    /// Split into the open file and its deletion guard. Keep the guard alive until the
    /// file is no longer read.
    pub fn into_parts(self) -> (File, TempPath, u64) {
        (self.file, self.path, self.len)
    }
}
