use crate::utils::Result;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only run log. One file per run, named by run start time, one
/// timestamped line per processed channel. Lines are flushed immediately so
/// an aborted run keeps everything written so far.
pub struct RunLog {
    path: PathBuf,
    file: File,
}

impl RunLog {
    pub fn create(dir: &Path) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("slack_sweep_{stamp}.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One log line per processed channel: time, name, id, outcome.
    pub fn record(&mut self, name: &str, id: &str, outcome: &str) -> Result<()> {
        self.line(&format!("{} ({}): {}", name, id, outcome))
    }

    /// Free-form line for run-level events (batch skipped, run aborted).
    pub fn note(&mut self, message: &str) -> Result<()> {
        self.line(message)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.file, "{stamp} {text}")?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_log_file_named_by_run_start() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::create(dir.path()).unwrap();
        let file_name = log.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("slack_sweep_"));
        assert!(file_name.ends_with(".log"));
    }

    #[test]
    fn test_record_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = RunLog::create(dir.path()).unwrap();
        log.record("old-project", "C0123456789", "archived").unwrap();
        log.note("batch 2 skipped by operator").unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("old-project (C0123456789): archived"));
        assert!(lines[1].ends_with("batch 2 skipped by operator"));
        // Every line carries a timestamp prefix.
        for line in lines {
            assert!(line.starts_with("20"), "missing timestamp: {line}");
        }
    }
}
