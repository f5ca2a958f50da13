mod split;
mod srt;
mod timestamp;
mod types;

pub use split::split_long_segments;
pub use srt::{to_srt_string, write_srt};
pub use timestamp::format_timestamp;
pub use types::{RawSegment, SubtitleSegment, Word};
