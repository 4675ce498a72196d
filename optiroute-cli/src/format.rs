//! Human-readable trip durations.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render `seconds` as `"N days M hrs P min Q sec"`.
///
/// Leading zero units are omitted, and seconds are only shown for trips
/// shorter than an hour.
///
/// # Examples
/// ```
/// use optiroute_cli::format_duration;
///
/// assert_eq!(format_duration(583), "9 min 43 sec");
/// assert_eq!(format_duration(6489), "1 hrs 48 min");
/// ```
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let days = seconds.div_euclid(DAY);
    let hours = seconds.rem_euclid(DAY).div_euclid(HOUR);
    let minutes = seconds.rem_euclid(HOUR).div_euclid(MINUTE);
    let secs = seconds.rem_euclid(MINUTE);

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days} days"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours} hrs"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes} min"));
    }
    if days == 0 && hours == 0 {
        parts.push(format!("{secs} sec"));
    }
    parts.join(" ")
}
