/// Formats a non-negative offset in seconds as an SRT timestamp,
/// `HH:MM:SS,mmm`.
///
/// Every position truncates rather than rounds: `59.9999` becomes
/// `00:00:59,999`, never `00:01:00,000`. Players diff subtitle files
/// byte-for-byte, so the truncation policy is part of the output
/// contract.
///
/// Hours grow past two digits without wrapping. Negative or non-finite
/// input is a caller bug; this function is only defined for finite
/// `seconds >= 0`.
pub fn format_timestamp(seconds: f64) -> String {
    let h = (seconds / 3600.0).floor() as u64;
    let m = ((seconds % 3600.0) / 60.0).floor() as u64;
    let s = (seconds % 60.0).floor() as u64;
    let ms = ((seconds - seconds.floor()) * 1000.0).floor() as u64;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}
