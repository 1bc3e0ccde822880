//! Destinations for generated declarations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Sequential text destination.
pub trait Sink {
    fn write_str(&mut self, text: &str) -> Result<()>;
}

impl Sink for String {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.push_str(text);
        Ok(())
    }
}

/// File destination, released when dropped.
///
/// Call [`OutputSink::finish`] to flush and observe close errors; dropping an
/// unfinished sink still closes the file but discards any flush error.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputSink {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened output");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered output and sync the file to disk.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Close {
            path: self.path.clone(),
            source,
        })?;
        self.writer.get_ref().sync_all().map_err(|source| Error::Close {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "closed output");
        Ok(())
    }
}

impl Sink for OutputSink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| Error::Write {
                path: self.path.clone(),
                source,
            })
    }
}
