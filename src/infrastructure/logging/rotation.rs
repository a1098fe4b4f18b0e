//! Size-based log file rotation
//!
//! The active file keeps its name. When a record would push it past the size
//! limit, backups shift up by one (`<file>.1` becomes `<file>.2`, ...), the
//! active file becomes `<file>.1`, and a fresh active file is opened. The
//! backup numbered `backup_count` is overwritten, so at most `backup_count`
//! backups ever exist.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Log file writer with size-based rotation
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    /// Maximum file size in bytes before rotation; 0 disables rotation
    max_bytes: u64,
    /// Number of backups kept; 0 disables rotation
    backup_count: usize,
    /// `None` between a failed reopen and the next successful write
    file: Option<File>,
    size: u64,
}

impl RotatingFileWriter {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file: Some(file),
            size,
        })
    }

    /// Bytes currently in the active file
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Path of the backup with the given index (1 is the newest)
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Whether writing `incoming` more bytes requires a rollover first.
    ///
    /// An empty active file never rotates, so a single record larger than the
    /// limit is written whole instead of rotating forever.
    pub const fn should_rotate(&self, incoming: u64) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.size > 0
            && self.size + incoming > self.max_bytes
    }

    /// Shift the backups and start a fresh active file
    pub fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        for index in (1..self.backup_count).rev() {
            let source = self.backup_path(index);
            if source.exists() {
                let target = self.backup_path(index + 1);
                if target.exists() {
                    fs::remove_file(&target)?;
                }
                fs::rename(&source, &target)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        self.reopen()
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = open_append(&self.path)?;
        self.size = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    /// Write one complete record, rotating beforehand if it would not fit
    pub fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        let incoming = record.len() as u64;
        if self.should_rotate(incoming) {
            self.rotate()?;
        }
        if self.file.is_none() {
            self.reopen()?;
        }

        if let Some(file) = self.file.as_mut() {
            file.write_all(record)?;
            self.size += incoming;
        }
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    /// Each call is treated as one record and never split across files.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_open_picks_up_existing_size() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("app.log");
        fs::write(&log_path, b"existing content").unwrap();

        let writer = RotatingFileWriter::open(&log_path, 1024, 3).unwrap();
        assert_eq!(writer.size(), 16);
    }

    #[test]
    fn test_should_rotate_when_record_exceeds_limit() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = RotatingFileWriter::open(temp_dir.path().join("app.log"), 100, 2).unwrap();

        assert!(!writer.should_rotate(500), "empty file never rotates");
        writer.write_record(&[b'a'; 60]).unwrap();
        assert!(!writer.should_rotate(40));
        assert!(writer.should_rotate(41));
    }

    #[test]
    fn test_rotation_disabled_by_zero_limits() {
        let temp_dir = TempDir::new().unwrap();
        let mut unlimited = RotatingFileWriter::open(temp_dir.path().join("a.log"), 0, 3).unwrap();
        unlimited.write_record(&[b'a'; 64]).unwrap();
        assert!(!unlimited.should_rotate(1_000_000));

        let mut no_backups = RotatingFileWriter::open(temp_dir.path().join("b.log"), 10, 0).unwrap();
        no_backups.write_record(&[b'b'; 64]).unwrap();
        no_backups.write_record(&[b'b'; 64]).unwrap();
        assert_eq!(no_backups.size(), 128);
        assert_eq!(count_files(temp_dir.path()), 2);
    }

    #[test]
    fn test_rollover_moves_active_file_to_first_backup() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&log_path, 20, 2).unwrap();

        writer.write_record(b"first record 12345\n").unwrap();
        writer.write_record(b"second record\n").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "second record\n");
        assert_eq!(
            fs::read_to_string(writer.backup_path(1)).unwrap(),
            "first record 12345\n"
        );
        assert_eq!(writer.size(), 14);
    }

    #[test]
    fn test_oldest_backup_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&log_path, 8, 2).unwrap();

        for record in ["rec-0001\n", "rec-0002\n", "rec-0003\n", "rec-0004\n"] {
            writer.write_record(record.as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "rec-0004\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "rec-0003\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "rec-0002\n");
        assert!(!writer.backup_path(3).exists());
        assert_eq!(count_files(temp_dir.path()), 3);
    }

    #[test]
    fn test_write_trait_treats_buffer_as_one_record() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&log_path, 10, 1).unwrap();

        writer.write_all(b"0123456789abcdef").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "0123456789abcdef");
        assert!(!writer.backup_path(1).exists());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_backups_never_exceed_backup_count(
            records in proptest::collection::vec(1usize..64, 1..60),
            max_bytes in 16u64..256,
            backup_count in 0usize..4,
        ) {
            let temp_dir = TempDir::new().unwrap();
            let log_path = temp_dir.path().join("app.log");
            let mut writer = RotatingFileWriter::open(&log_path, max_bytes, backup_count).unwrap();

            for len in &records {
                writer.write_record(&vec![b'x'; *len]).unwrap();
            }

            prop_assert!(count_files(temp_dir.path()) <= backup_count + 1);
            if backup_count > 0 {
                let largest = *records.iter().max().unwrap() as u64;
                prop_assert!(writer.size() <= max_bytes.max(largest));
            }
        }
    }
}
