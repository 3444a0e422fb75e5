pub mod config;
pub mod contact_detector;
pub mod discovery;
pub mod reader;
pub mod redaction;
pub mod scan_pipeline;
pub mod warnings;

// Re-export main types for convenient access
pub use contact_detector::{
    contains_contacts, default_detector, detect_contacts, ContactDetector, ContactKind, ContactMatch,
};

pub use config::{NoticeConfig, ScanConfig};

pub use redaction::{build_segments, join_segments, mask_text, RedactedText, Segment};

pub use warnings::{NotificationSink, RecordingSink, TracingSink, Warning, WarningCatalog};

// Re-export pipeline types for the CLI and benchmarks
pub use scan_pipeline::{scan_file, scan_files, FileScan, FileStats, MessageReport, RunStats, ScanOptions};
