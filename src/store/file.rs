//! Durable append-log backend.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::backend::StorageBackend;
use super::error::{StoreError, StoreResult};
use super::types::{Record, UpsertOutcome};

/// Log file name inside the data directory.
const LOG_FILE: &str = "records.log";
/// Scratch file written during compaction, then renamed over [`LOG_FILE`].
const COMPACT_FILE: &str = "records.log.compact";
/// Superseded entries tolerated in the log before it is rewritten.
const STALE_ENTRY_LIMIT: usize = 10_000;

/// One log line. Every upsert appends exactly one of these as a JSON object,
/// so replaying the log front to back reproduces the current mapping.
#[derive(Debug, Serialize, Deserialize)]
struct LogEntry {
    key: String,
    value: String,
}

/// Durable backend over an append-only JSON-lines log.
///
/// The full mapping is mirrored in an in-memory index rebuilt from the log
/// on open, so reads never touch the disk. Each upsert appends one entry and
/// flushes it before the index is updated; writes serialize behind a single
/// writer lock, which reads do not take.
///
/// A final entry torn by a crash mid-append is truncated away on open.
/// Superseded entries accumulate until [`STALE_ENTRY_LIMIT`], at which point
/// the log is rewritten with live entries only and swapped into place.
pub struct FileBackend {
    index: DashMap<String, String>,
    writer: Mutex<LogWriter>,
    log_path: PathBuf,
    compact_path: PathBuf,
}

struct LogWriter {
    out: BufWriter<File>,
    /// Entries in the log already overwritten by a later upsert.
    stale: usize,
}

impl FileBackend {
    /// Opens the backend rooted at `dir`, creating the directory and log as
    /// needed and replaying any existing entries.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;
        let log_path = dir.join(LOG_FILE);
        let compact_path = dir.join(COMPACT_FILE);

        let (index, stale) = replay(&log_path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            index,
            writer: Mutex::new(LogWriter {
                out: BufWriter::new(file),
                stale,
            }),
            log_path,
            compact_path,
        })
    }

    /// Rewrites the log with one entry per live record.
    ///
    /// Runs automatically once enough superseded entries pile up; callable
    /// directly to force a rewrite.
    pub fn compact(&self) -> StoreResult<()> {
        let mut writer = self.writer.lock();
        self.rewrite_log(&mut writer)
    }

    fn rewrite_log(&self, writer: &mut LogWriter) -> StoreResult<()> {
        // Index mutations only happen under the writer lock, so this
        // iteration sees a stable mapping.
        let mut out = BufWriter::new(File::create(&self.compact_path)?);
        for entry in self.index.iter() {
            let line = serde_json::to_string(&LogEntry {
                key: entry.key().clone(),
                value: entry.value().clone(),
            })?;
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        out.get_ref().sync_all()?;
        fs::rename(&self.compact_path, &self.log_path)?;

        // The old handle still points at the unlinked file.
        let file = OpenOptions::new().append(true).open(&self.log_path)?;
        writer.out = BufWriter::new(file);
        writer.stale = 0;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn find_by_key(&self, key: &str) -> StoreResult<Option<Record>> {
        Ok(self
            .index
            .get(key)
            .map(|entry| Record::new(key, entry.value().clone())))
    }

    fn upsert_by_key(&self, key: &str, value: &str) -> StoreResult<UpsertOutcome> {
        let mut writer = self.writer.lock();

        let line = serde_json::to_string(&LogEntry {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        writeln!(writer.out, "{}", line)?;
        writer.out.flush()?;

        // Index update stays behind the log append: a crash between the two
        // is repaired by replay, the reverse would lose an acknowledged write.
        let created = self
            .index
            .insert(key.to_string(), value.to_string())
            .is_none();
        if !created {
            writer.stale += 1;
            if writer.stale >= STALE_ENTRY_LIMIT {
                self.rewrite_log(&mut writer)?;
            }
        }

        Ok(UpsertOutcome {
            record: Record::new(key, value),
            created,
        })
    }

    fn find_all(&self) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .index
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }
}

/// Rebuilds the in-memory index from the log at `path`.
///
/// Returns the index plus the number of superseded entries found. A torn
/// final entry, the signature of a crash mid-append, is truncated away.
/// Damage anywhere else is refused as [`StoreError::Unavailable`] rather
/// than silently dropping committed records.
fn replay(path: &Path) -> StoreResult<(DashMap<String, String>, usize)> {
    let index = DashMap::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok((index, 0)),
        Err(err) => return Err(err.into()),
    };

    let mut stream = serde_json::Deserializer::from_reader(BufReader::new(file))
        .into_iter::<LogEntry>();
    let mut entries = 0usize;
    let mut good_offset = 0u64;

    while let Some(next) = stream.next() {
        match next {
            Ok(entry) => {
                entries += 1;
                index.insert(entry.key, entry.value);
                good_offset = stream.byte_offset() as u64;
            }
            Err(err) if err.is_eof() => {
                truncate_log(path, good_offset)?;
                break;
            }
            Err(err) => {
                return Err(StoreError::Unavailable(format!(
                    "log at {} is corrupt: {}",
                    path.display(),
                    err
                )));
            }
        }
    }

    let stale = entries - index.len();
    Ok((index, stale))
}

/// Cuts the log back to its last complete entry.
fn truncate_log(path: &Path, len: u64) -> StoreResult<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    file.sync_all()?;
    Ok(())
}
