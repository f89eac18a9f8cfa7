//! Append-only line writer with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the live file is rotated.
const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to one file, rotating it to
/// `<name>.<YYYYmmddTHHMMSS>` once it grows past the size limit.
///
/// The handle is opened lazily so construction never touches the disk.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if rotation, opening, or writing fails, or if the lock is
    /// poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.file_path)?,
        };
        let file = guard.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.file_path, PathBuf::from(backup))?;

        self.prune_backups()
    }

    /// Deletes all but the newest backups. Backup names sort by time.
    fn prune_backups(&self) -> io::Result<()> {
        let dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));
        let Some(name) = self.file_path.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));
        for stale in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cinemapa-otlp.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_the_limit_and_keeps_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cinemapa-otlp.json");
        let writer = FileWriter::with_limit(path.clone(), 4);

        for i in 0..6 {
            writer.write_line(&format!("line-{i}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("cinemapa-otlp.json."))
            .count();
        assert_eq!(backups, MAX_BACKUP_FILES);
        assert_eq!(fs::read_to_string(path).unwrap(), "line-5\n");
    }
}
