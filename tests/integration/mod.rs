// Integration test utilities shared across test binaries
#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory populated with chat transcripts
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a transcript, one message per line
    pub fn create_transcript<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write transcript");
        file_path
    }

    /// Write raw bytes, for malformed input tests
    pub fn create_raw_file<P: AsRef<Path>>(&self, relative_path: P, bytes: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        fs::write(&file_path, bytes).expect("Failed to write raw file");
        file_path
    }

    pub fn create_config(&self, content: &str) -> PathBuf {
        let config_path = self.root_path.join("scan.toml");
        fs::write(&config_path, content).expect("Failed to write config file");
        config_path
    }

    pub fn stats_path(&self) -> PathBuf {
        self.root_path.join("scan_stats.json")
    }

    pub fn read_stats(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.stats_path()).expect("Failed to read stats file");
        serde_json::from_str(&content).expect("Stats file is not valid JSON")
    }
}
