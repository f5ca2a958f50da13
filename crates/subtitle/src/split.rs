use crate::types::{RawSegment, SubtitleSegment, Word};

/// Rewrites engine segments so that no emitted segment runs longer
/// than `max_duration` seconds, wherever word timing makes that
/// possible.
///
/// Segments without word timing, and segments already within the
/// limit, pass through unchanged. A long segment is partitioned
/// greedily at word boundaries: words accumulate into a sub-segment
/// until the next word's known end time would push it past
/// `max_duration`, at which point the sub-segment is closed at the
/// last buffered word's end and the offending word opens the next one.
///
/// Two consequences of that policy are intentional:
///
/// - a sub-segment can still exceed `max_duration` when a single word
///   spans most of the window, because cuts happen only *between*
///   words and only when at least one word is already buffered;
/// - words with unknown end times never trigger a cut, so a segment
///   whose words all lack end timing comes out in one piece.
///
/// Word texts are concatenated exactly as the engine produced them
/// (engines encode their own separators); only the final sub-segment
/// text is trimmed. Output order matches input order.
pub fn split_long_segments(segments: Vec<RawSegment>, max_duration: f64) -> Vec<SubtitleSegment> {
    let mut out = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.words.is_empty() || segment.end - segment.start <= max_duration {
            out.push(segment.into());
            continue;
        }

        let parent_end = segment.end;
        let mut sub_start = segment.start;
        let mut sub_text = String::new();
        let mut buffered: Vec<Word> = Vec::new();

        for word in segment.words {
            let over_limit = word
                .end
                .is_some_and(|word_end| word_end - sub_start > max_duration);

            if over_limit && !buffered.is_empty() {
                out.push(SubtitleSegment {
                    start: sub_start,
                    end: buffered_end(&buffered, parent_end),
                    text: sub_text.trim().to_string(),
                });

                sub_start = word.start;
                sub_text = word.text.clone();
                buffered.clear();
                buffered.push(word);
            } else {
                sub_text.push_str(&word.text);
                buffered.push(word);
            }
        }

        if !buffered.is_empty() {
            out.push(SubtitleSegment {
                start: sub_start,
                end: buffered_end(&buffered, parent_end),
                text: sub_text.trim().to_string(),
            });
        }
    }

    out
}

// A trailing word may arrive without an end time; the parent segment's
// end is the tightest bound still known to cover it.
fn buffered_end(buffered: &[Word], parent_end: f64) -> f64 {
    buffered
        .last()
        .and_then(|w| w.end)
        .unwrap_or(parent_end)
}
