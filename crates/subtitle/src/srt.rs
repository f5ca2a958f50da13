use std::io::Write;

use crate::timestamp::format_timestamp;
use crate::types::SubtitleSegment;

/// Writes `segments` to `sink` in SRT form: 1-based index line, time
/// range line, trimmed text line, blank separator line. The final
/// block keeps its trailing blank line.
///
/// Text goes out verbatim apart from trimming; SRT has no escaping.
/// A segment with empty text still produces a well-formed block. The
/// only failure mode is the sink refusing the bytes.
pub fn write_srt<W: Write>(sink: &mut W, segments: &[SubtitleSegment]) -> std::io::Result<()> {
    for (i, segment) in segments.iter().enumerate() {
        write!(
            sink,
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(segment.start),
            format_timestamp(segment.end),
            segment.text.trim(),
        )?;
    }
    Ok(())
}

/// In-memory form of [`write_srt`].
pub fn to_srt_string(segments: &[SubtitleSegment]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    write_srt(&mut buf, segments).expect("infallible write to Vec");
    String::from_utf8(buf).expect("SRT output is UTF-8")
}
