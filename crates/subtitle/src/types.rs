/// A single transcribed word with model-assigned timing.
///
/// `end` is `None` for a trailing word the model never closed. `text`
/// carries whatever separators the model encodes (typically a leading
/// space); nothing here normalizes it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub start: f64,
    pub end: Option<f64>,
    pub text: String,
}

/// A transcribed span as produced by the inference engine, with
/// optional per-word timing. Invariant: `end >= start`. One request
/// yields an ordered, non-overlapping sequence of these; they never
/// outlive the request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// A finalized subtitle span, ready for SRT serialization.
///
/// Kept as a separate type from [`RawSegment`] on purpose: once a
/// segment is flattened its word detail is gone, and conflating the
/// two shapes invites reading `words` off a segment that no longer
/// has any.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubtitleSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<RawSegment> for SubtitleSegment {
    fn from(segment: RawSegment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            text: segment.text,
        }
    }
}
