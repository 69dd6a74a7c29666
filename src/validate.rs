use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum accepted upload size. Matches the backend's request cap.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Extensions the product advertises support for.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg"];

/// Metadata of a staged file: what the user selected but has not submitted.
///
/// Validation is metadata-only and therefore advisory; the backend remains
/// the authority on acceptance. No content sniffing happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// File name as selected, extension included.
    pub name: String,

    /// Declared size in bytes.
    pub size_bytes: u64,

    /// Declared media type (e.g. `audio/mpeg`). May be empty when the
    /// environment does not report one.
    pub media_type: String,
}

impl FileMetadata {
    pub fn new(name: impl Into<String>, size_bytes: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
        }
    }

    /// Build metadata from a file on disk, guessing the media type from the
    /// extension. This is the CLI's path; browser-style callers construct
    /// the struct from what their platform reports.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::validation("file has no usable name"))?
            .to_string();
        let size_bytes = std::fs::metadata(path)?.len();
        let media_type = guess_media_type(&name).unwrap_or_default().to_string();

        Ok(Self {
            name,
            size_bytes,
            media_type,
        })
    }

    /// Lowercased extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Declared size in megabytes, for display.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Validate a candidate file before submission.
///
/// Policy:
/// - Size is checked first: over [`MAX_UPLOAD_BYTES`] is rejected with a
///   size-specific reason regardless of media type.
/// - The extension must be one of [`ACCEPTED_EXTENSIONS`], and a non-empty
///   declared media type must carry the `audio/` prefix.
pub fn validate_audio_file(file: &FileMetadata) -> Result<()> {
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(Error::validation(format!(
            "file is too large: {:.2} MB (maximum is 100 MB)",
            file.size_mb()
        )));
    }

    let extension_ok = file
        .extension()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
    let media_type_ok = file.media_type.is_empty() || file.media_type.starts_with("audio/");

    if !extension_ok || !media_type_ok {
        return Err(Error::validation(format!(
            "unsupported file type `{}`: expected an audio file (WAV, MP3, M4A, or OGG)",
            if file.media_type.is_empty() {
                &file.name
            } else {
                &file.media_type
            }
        )));
    }

    Ok(())
}

/// Media type for a known audio extension.
pub fn guess_media_type(name: &str) -> Option<&'static str> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();

    match ext.as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "m4a" => Some("audio/mp4"),
        "ogg" => Some("audio/ogg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size_bytes: u64, media_type: &str) -> FileMetadata {
        FileMetadata::new(name, size_bytes, media_type)
    }

    #[test]
    fn accepts_each_advertised_format() {
        for name in ["a.wav", "b.mp3", "c.m4a", "d.ogg", "loud.MP3"] {
            let meta = file(name, 2 * 1024 * 1024, "audio/mpeg");
            assert!(validate_audio_file(&meta).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn accepts_missing_media_type_when_extension_is_known() {
        let meta = file("meeting.m4a", 1024, "");
        assert!(validate_audio_file(&meta).is_ok());
    }

    #[test]
    fn oversized_file_gets_size_reason_regardless_of_type() {
        for media_type in ["audio/wav", "video/mp4", ""] {
            let meta = file("big.wav", MAX_UPLOAD_BYTES + 1, media_type);
            let err = validate_audio_file(&meta).unwrap_err();
            assert!(
                err.to_string().contains("too large"),
                "wrong reason for {media_type}: {err}"
            );
        }
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        let meta = file("edge.wav", MAX_UPLOAD_BYTES, "audio/wav");
        assert!(validate_audio_file(&meta).is_ok());
    }

    #[test]
    fn non_audio_media_type_gets_type_reason() {
        let meta = file("movie.mp3", 1024, "video/mp4");
        let err = validate_audio_file(&meta).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
        assert!(err.to_string().contains("video/mp4"));
    }

    #[test]
    fn unknown_extension_gets_type_reason() {
        for name in ["notes.txt", "song.flac", "noext"] {
            let meta = file(name, 1024, "audio/flac");
            let err = validate_audio_file(&meta).unwrap_err();
            assert!(
                err.to_string().contains("unsupported file type"),
                "wrong reason for {name}: {err}"
            );
        }
    }

    #[test]
    fn guess_media_type_knows_the_advertised_formats() {
        assert_eq!(guess_media_type("a.wav"), Some("audio/wav"));
        assert_eq!(guess_media_type("a.MP3"), Some("audio/mpeg"));
        assert_eq!(guess_media_type("a.m4a"), Some("audio/mp4"));
        assert_eq!(guess_media_type("a.ogg"), Some("audio/ogg"));
        assert_eq!(guess_media_type("a.flac"), None);
        assert_eq!(guess_media_type("noext"), None);
    }

    #[test]
    fn size_mb_matches_display_convention() {
        let meta = file("a.wav", 2 * 1024 * 1024, "audio/wav");
        assert!((meta.size_mb() - 2.0).abs() < f64::EPSILON);
    }
}
