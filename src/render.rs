//! Read-only view models derived from a transcript result.
//!
//! Everything here is a pure function of [`TranscriptResult`]: hosts render
//! these models; they never reach back into the wire types.

use crate::summary::{SummaryBlock, parse_summary};
use crate::transcript::{SpeakerSegment, TranscriptResult, format_time, speaker_label};

/// Accent styling for one speaker, expressed as the product's stylesheet
/// tokens (a left border and a badge fill).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerAccent {
    pub border: &'static str,
    pub badge: &'static str,
}

/// Fixed palette keyed by the backend's diarization identifiers. Unknown
/// speakers fall back to the neutral accent.
const SPEAKER_PALETTE: &[(&str, SpeakerAccent)] = &[
    ("SPEAKER_00", SpeakerAccent { border: "border-blue-500", badge: "bg-blue-500" }),
    ("SPEAKER_01", SpeakerAccent { border: "border-purple-500", badge: "bg-purple-500" }),
    ("SPEAKER_02", SpeakerAccent { border: "border-green-500", badge: "bg-green-500" }),
    ("SPEAKER_03", SpeakerAccent { border: "border-orange-500", badge: "bg-orange-500" }),
    ("SPEAKER_04", SpeakerAccent { border: "border-pink-500", badge: "bg-pink-500" }),
    ("SPEAKER_05", SpeakerAccent { border: "border-cyan-500", badge: "bg-cyan-500" }),
];

const NEUTRAL_ACCENT: SpeakerAccent = SpeakerAccent {
    border: "border-gray-500",
    badge: "bg-gray-500",
};

/// Deterministic accent for a speaker identifier.
pub fn speaker_accent(speaker: &str) -> SpeakerAccent {
    SPEAKER_PALETTE
        .iter()
        .find(|(key, _)| *key == speaker)
        .map(|(_, accent)| *accent)
        .unwrap_or(NEUTRAL_ACCENT)
}

/// One rendered entry of the per-speaker view.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    /// Display label, underscore swapped for a space (`SPEAKER 00`).
    pub speaker_label: String,
    pub accent: SpeakerAccent,
    /// Formatted `m:ss - m:ss` range, floored to whole seconds.
    pub time_range: String,
    pub text: String,
}

impl SegmentView {
    fn from_segment(segment: &SpeakerSegment) -> Self {
        Self {
            speaker_label: speaker_label(&segment.speaker),
            accent: speaker_accent(&segment.speaker),
            time_range: format!(
                "{} - {}",
                format_time(&segment.start),
                format_time(&segment.end)
            ),
            text: segment.text.clone(),
        }
    }
}

/// The complete transcript view: both tabs plus header data.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptView {
    /// Per-speaker tab, one entry per segment, backend order preserved.
    pub segments: Vec<SegmentView>,

    /// Full-text tab: the raw transcript, whitespace preserved.
    pub full_text: String,

    /// Character count shown under the full-text tab.
    pub character_count: usize,
}

impl TranscriptView {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Build the transcript view for a result.
pub fn render_transcript(result: &TranscriptResult) -> TranscriptView {
    TranscriptView {
        segments: result
            .speaker_transcript
            .iter()
            .map(SegmentView::from_segment)
            .collect(),
        full_text: result.full_transcript.clone(),
        character_count: result.full_transcript.chars().count(),
    }
}

/// Build the summary view for a result.
pub fn render_summary(result: &TranscriptResult) -> Vec<SummaryBlock> {
    parse_summary(&result.summary)
}
