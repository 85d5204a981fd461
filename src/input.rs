//! Input plumbing: where URLs come from and the spool file they pass through.
//!
//! Every source is read line by line. Lines that pass the validator (with the
//! optional `?key=` filter) are written to a spool file, which is read back as
//! one batch once all sources are drained. A source that fails to open or read
//! is logged and skipped; the others still run. Failing to write the spool
//! aborts the run.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::IdaruError;
use crate::validate::is_valid_url;

pub const SPOOL_PREFIX: &str = ".urls.tmp.idaru.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        Ok(match self {
            Self::Stdin => Box::new(io::stdin().lock()),
            Self::File(path) => Box::new(BufReader::new(File::open(path)?)),
        })
    }

    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Stdin counts as a source only when something is piped or redirected into it.
#[cfg(unix)]
pub fn stdin_is_piped() -> bool {
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    io::stdin()
        .as_fd()
        .try_clone_to_owned()
        .map(File::from)
        .and_then(|f| f.metadata())
        .is_ok_and(|m| !m.file_type().is_char_device())
}

#[cfg(not(unix))]
pub fn stdin_is_piped() -> bool {
    use std::io::IsTerminal;
    !io::stdin().is_terminal()
}

/// Stdin first (when available), then files in the order given.
pub fn resolve_sources(files: &[PathBuf], stdin_available: bool) -> Result<Vec<InputSource>> {
    let mut sources = Vec::with_capacity(files.len() + 1);
    if stdin_available {
        sources.push(InputSource::Stdin);
    }
    sources.extend(files.iter().cloned().map(InputSource::File));

    if sources.is_empty() {
        return Err(IdaruError::NoInput.into());
    }
    Ok(sources)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub valid: usize,
    pub invalid: usize,
    pub skipped: bool,
}

/// Scratch file holding the URLs accepted during ingestion. Removed on drop.
#[derive(Debug)]
pub struct Spool {
    file: NamedTempFile,
}

impl Spool {
    pub fn create(dir: &Path) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(SPOOL_PREFIX)
            .tempfile_in(dir)
            .map_err(|source| IdaruError::Spool {
                path: dir.join(SPOOL_PREFIX),
                source,
            })?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Streams one source into the spool, keeping the lines that validate.
    ///
    /// A source that cannot be opened or read is logged and skipped. Failing to
    /// write the spool itself is fatal.
    pub fn ingest(
        &mut self,
        source: &InputSource,
        require_query_param: bool,
    ) -> Result<IngestStats> {
        let reader = match source.open() {
            Ok(reader) => reader,
            Err(err) => {
                warn!("Error opening the input file {}: {err}", source.label());
                return Ok(IngestStats {
                    skipped: true,
                    ..IngestStats::default()
                });
            }
        };

        let writer = BufWriter::new(self.file.as_file());
        let stats = spool_valid_lines(reader, writer, &source.label(), require_query_param)
            .map_err(|err| IdaruError::Spool {
                path: self.file.path().to_path_buf(),
                source: err,
            })?;
        Ok(stats)
    }

    pub fn read_back(&self) -> Result<Vec<String>> {
        read_lines(self.path())
    }
}

/// Copies the lines of `reader` that validate into `writer`.
///
/// Lines that are not UTF-8 count as invalid URLs. A read error ends this
/// source early; a write error is returned.
fn spool_valid_lines<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    label: &str,
    require_query_param: bool,
) -> io::Result<IngestStats> {
    let mut stats = IngestStats::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                warn!("Error reading from {label}: {err}");
                break;
            }
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        let Ok(url) = std::str::from_utf8(&buf) else {
            warn!("Invalid URL: {}", String::from_utf8_lossy(&buf));
            stats.invalid += 1;
            continue;
        };
        if !is_valid_url(url, require_query_param) {
            warn!("Invalid URL: {url}");
            stats.invalid += 1;
            continue;
        }

        info!("Valid URL: {url}");
        writeln!(writer, "{url}")?;
        stats.valid += 1;
    }
    writer.flush()?;
    Ok(stats)
}

/// Reads a newline-delimited file into its lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read {}", path.display()))
}
