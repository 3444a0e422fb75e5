use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default transcript pattern, relative to the scan root
pub const DEFAULT_PATTERN: &str = "**/*.txt";

/// Configuration for transcript discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Glob pattern relative to the root directory
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Result of validating a discovered path
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Stream every path under `root_dir` matching `config.pattern`, validated
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        },
    )
}

/// Internal state for discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
    finished: bool,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
            finished: false,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.finished {
            return None;
        }

        if self.glob_iter.is_none() {
            let pattern = format!("{}/{}", self.root_dir.display(), self.config.pattern);
            debug!("Starting transcript discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => self.glob_iter = Some(paths),
                Err(e) => {
                    // A bad pattern ends the stream after this error
                    self.finished = true;
                    return Some(Err(anyhow::anyhow!("Invalid glob pattern {}: {}", pattern, e)));
                }
            }
        }

        loop {
            let next = self.glob_iter.as_mut()?.next()?;
            match next {
                Ok(path) => {
                    if path.is_dir() {
                        continue;
                    }
                    return Some(self.validate_file(path).await);
                }
                Err(e) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);
                    if self.config.fail_fast {
                        self.finished = true;
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
            }
        }
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
            Ok(_) => {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                Ok(FileValidation { path, error: Some(error) })
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);
                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(FileValidation { path, error: Some(error) })
                }
            }
        }
    }
}

/// Collect all discovered transcripts, sorted by path
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;
    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }
    info!("Discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Paths of all valid transcripts under `root_dir` using the default pattern
pub async fn find_transcript_files<P: AsRef<Path>>(root_dir: P) -> Result<Vec<PathBuf>> {
    let validations = collect_discovered_files(root_dir, DiscoveryConfig::default()).await?;
    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file_path, content).await?;
        Ok(file_path)
    }

    #[tokio::test]
    async fn test_discover_files_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_discovered_files(temp_dir.path(), DiscoveryConfig::default()).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_default_pattern_is_recursive() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "chat-1.txt", "привіт").await.unwrap();
        create_test_file(temp_dir.path(), "orders/chat-2.txt", "ок").await.unwrap();
        create_test_file(temp_dir.path(), "notes.md", "ignored").await.unwrap();

        let files = find_transcript_files(temp_dir.path()).await.unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["chat-1.txt", "chat-2.txt"]);
    }

    #[tokio::test]
    async fn test_custom_pattern() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "a.log", "x").await.unwrap();
        create_test_file(temp_dir.path(), "b.txt", "y").await.unwrap();

        let config = DiscoveryConfig { fail_fast: false, pattern: "*.log".to_string() };
        let files = collect_discovered_files(temp_dir.path(), config).await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("a.log"));
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = DiscoveryConfig { fail_fast: false, pattern: "[".to_string() };
        assert!(collect_discovered_files(temp_dir.path(), config).await.is_err());
    }

    #[tokio::test]
    async fn test_directories_matching_pattern_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::create_dir_all(temp_dir.path().join("archive.txt")).await.unwrap();
        create_test_file(temp_dir.path(), "real.txt", "x").await.unwrap();

        let files = find_transcript_files(temp_dir.path()).await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.txt"));
    }
}
