//! `echoscribe` — the client engine of the EchoScribe transcription product.
//!
//! This crate provides:
//! - Metadata-only validation of candidate audio files
//! - A blocking upload client with transfer-progress reporting
//! - The view state machine the product's panels render from
//! - Transcript/summary view models and markdown exports
//!
//! The heavy lifting (speech-to-text, speaker diarization, summarization)
//! happens in the remote backend; everything here is the contract around it,
//! designed to be embedded by thin hosts (the CLI, a desktop shell) with an
//! emphasis on injected capabilities and minimal surprises.

// High-level API (most consumers should start here).
pub mod session;
pub mod state;

// The wire contract: request submission and response schema.
pub mod client;
pub mod transcript;

// Pre-submission checks.
pub mod validate;

// Read-only views and exports derived from a result.
pub mod export;
pub mod render;
pub mod summary;

// Injected capabilities the host environment provides.
pub mod notify;
pub mod platform;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use client::{ClientConfig, UploadClient};
pub use error::{Error, Result};
pub use export::{ExportKind, copy_text, download_export, export_file_name, transcript_document};
pub use notify::{MemoryNotifier, Notice, NoticeKind, Notifier, TracingNotifier};
pub use platform::{Clipboard, DirectoryFileSaver, FileSaver};
pub use render::{SegmentView, SpeakerAccent, TranscriptView, render_summary, render_transcript};
pub use session::UploadSession;
pub use state::{ScrollRequest, ViewController, ViewState};
pub use summary::{Inline, SummaryBlock, parse_summary};
pub use transcript::{
    HealthStatus, ServiceInfo, SpeakerSegment, TranscriptResult, format_time, speaker_label,
};
pub use validate::{
    ACCEPTED_EXTENSIONS, FileMetadata, MAX_UPLOAD_BYTES, guess_media_type, validate_audio_file,
};

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
