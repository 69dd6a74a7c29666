//! Markdown exports and the copy/download actions built on them.
//!
//! Document builders take the generation instant as a parameter so their
//! output is deterministic; the action wrappers stamp the current time and
//! report through the notifier.

use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::notify::{Notice, Notifier};
use crate::platform::{Clipboard, FileSaver};
use crate::transcript::{TranscriptResult, format_time};

/// Which document an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Transcript,
    Summary,
}

impl ExportKind {
    /// Slug used in generated filenames.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Summary => "summary",
        }
    }

    /// User-facing name, in the product's copy.
    pub fn label(self) -> &'static str {
        match self {
            Self::Transcript => "Transkrip",
            Self::Summary => "Ringkasan",
        }
    }
}

/// Filename for a generated export: `echoscribe-<kind>-<unix-ms>.md`.
///
/// The millisecond stamp is the only collision avoidance; there is no
/// further detection by contract.
pub fn export_file_name(kind: ExportKind, at_unix_ms: i64) -> String {
    format!("echoscribe-{}-{}.md", kind.slug(), at_unix_ms)
}

/// Build the transcript markdown document.
///
/// Layout is fixed: the literal title line, a generation date line, a rule,
/// then one block per segment carrying the raw speaker id (the display
/// label with its space belongs to the on-screen view only).
pub fn transcript_document(result: &TranscriptResult, generated_at: DateTime<Local>) -> String {
    let mut content = String::from("# Transkrip Lengkap EchoScribe\n\n");
    content.push_str(&format!(
        "Tanggal: {}\n\n---\n\n",
        generated_at.format("%-d/%-m/%Y, %H.%M.%S")
    ));

    for segment in &result.speaker_transcript {
        content.push_str(&format!(
            "**{}** [{} - {}]\n",
            segment.speaker,
            format_time(&segment.start),
            format_time(&segment.end)
        ));
        content.push_str(&format!("{}\n\n", segment.text));
    }

    content
}

/// The summary export is the raw summary string, unchanged.
pub fn summary_document(result: &TranscriptResult) -> &str {
    &result.summary
}

/// Copy text to the host clipboard, reporting the outcome.
///
/// Best-effort by contract: the failure is surfaced as a notice (and
/// returned for callers that care) but must never be treated as fatal.
pub fn copy_text(
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
    text: &str,
    what: ExportKind,
) -> Result<()> {
    match clipboard.write_text(text) {
        Ok(()) => {
            notifier.notify(Notice::success(
                "Tersalin!",
                format!("{} telah disalin ke clipboard", what.label()),
            ));
            Ok(())
        }
        Err(err) => {
            notifier.notify(Notice::error(
                "Gagal menyalin",
                format!("Terjadi kesalahan saat menyalin {}", what.label().to_lowercase()),
            ));
            Err(err)
        }
    }
}

/// Generate an export and offer it through the host's save capability.
///
/// Returns the generated filename on success.
pub fn download_export(
    saver: &dyn FileSaver,
    notifier: &dyn Notifier,
    result: &TranscriptResult,
    kind: ExportKind,
) -> Result<String> {
    let now = Local::now();
    let name = export_file_name(kind, now.timestamp_millis());
    let body = match kind {
        ExportKind::Transcript => transcript_document(result, now),
        ExportKind::Summary => summary_document(result).to_string(),
    };

    match saver.save_text_file(&name, &body) {
        Ok(()) => {
            notifier.notify(Notice::success(
                "Download Berhasil",
                format!("{} telah diunduh", kind.label()),
            ));
            Ok(name)
        }
        Err(err) => {
            notifier.notify(Notice::error(
                "Download Gagal",
                format!("Terjadi kesalahan saat mengunduh {}", kind.label().to_lowercase()),
            ));
            Err(Error::msg(format!("failed to save {name}: {err}")))
        }
    }
}
