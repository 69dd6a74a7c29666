use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A contiguous span of transcribed speech attributed to one speaker.
///
/// `start` and `end` are numeric seconds kept as strings, exactly as the
/// backend emits them. We do not normalize them on receipt; formatting
/// happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    pub speaker: String,
    pub start: String,
    pub end: String,
    pub text: String,
}

/// The structured result of one successful upload.
///
/// Immutable after receipt. Segment ordering is chronological as returned by
/// the backend; we never re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub full_transcript: String,
    pub speaker_transcript: Vec<SpeakerSegment>,
    pub summary: String,
}

/// Identity payload of the backend's root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(rename = "Project")]
    pub project: String,
    pub status: String,
    pub version: String,
}

/// Payload of the backend's health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub models_loaded: bool,
    pub device: String,
}

/// Parse a transcript response body, rejecting anything that does not carry
/// the full schema.
///
/// serde would already fail on a missing field, but we check the shape first
/// so the error names what is wrong ("missing field `summary`") instead of
/// surfacing a byte offset into an opaque body.
pub fn parse_transcript_response(body: &str) -> Result<TranscriptResult> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|err| Error::malformed(format!("body is not valid JSON: {err}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| Error::malformed("body is not a JSON object"))?;

    for field in ["full_transcript", "speaker_transcript", "summary"] {
        if !object.contains_key(field) {
            return Err(Error::malformed(format!("missing field `{field}`")));
        }
    }

    serde_json::from_value(value).map_err(|err| Error::malformed(err.to_string()))
}

/// Format a numeric-seconds string as `m:ss`, flooring to whole seconds.
///
/// Any input that does not parse as a finite non-negative number (including
/// the empty string) renders as `0:00`.
pub fn format_time(seconds: &str) -> String {
    let total = match seconds.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => return "0:00".to_string(),
    };

    let total = total.floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{mins}:{secs:02}")
}

/// Display form of a speaker identifier: `SPEAKER_00` becomes `SPEAKER 00`.
pub fn speaker_label(speaker: &str) -> String {
    speaker.replacen('_', " ", 1)
}
