use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for transcript reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Return the first read error instead of partial results
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// One chat message: a non-blank transcript line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// 1-based line number in the source file
    pub line: usize,
    pub text: String,
}

/// Statistics for a single transcript read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Reads chat transcripts line by line, one message per line
pub struct TranscriptReader {
    config: ReaderConfig,
}

impl TranscriptReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read every non-blank line of `file_path` as a message
    ///
    /// Without `fail_fast`, open and decode errors are reported through
    /// `ReadStats::read_error` along with whatever was read before the error.
    pub async fn read_messages<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<Message>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Reading transcript: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", path.display(), e);
                return self.fail(path, error_msg, Vec::new(), 0, 0, start_time);
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut messages = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1;
                    line_count += 1;
                    if !line.trim().is_empty() {
                        messages.push(Message {
                            line: line_count as usize,
                            text: line,
                        });
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    let error_msg = format!(
                        "UTF-8 decoding error in {} at line {}: {}",
                        path.display(),
                        line_count + 1,
                        e
                    );
                    return self.fail(path, error_msg, messages, line_count, byte_count, start_time);
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {}: {} lines, {} messages, {} bytes in {}ms",
            path.display(),
            line_count,
            messages.len(),
            byte_count,
            stats.duration_ms
        );

        Ok((messages, stats))
    }

    fn fail(
        &self,
        path: &Path,
        error_msg: String,
        messages: Vec<Message>,
        lines_read: u64,
        bytes_read: u64,
        start_time: std::time::Instant,
    ) -> Result<(Vec<Message>, ReadStats)> {
        warn!("{}", error_msg);

        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read,
            bytes_read,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: Some(error_msg),
        };
        Ok((messages, stats))
    }
}

/// Read a whole transcript with default settings, failing on any error
pub async fn read_transcript<P: AsRef<Path>>(file_path: P) -> Result<Vec<Message>> {
    let reader = TranscriptReader::new(ReaderConfig {
        fail_fast: true,
        ..ReaderConfig::default()
    });
    let (messages, _stats) = reader.read_messages(file_path).await?;
    Ok(messages)
}
