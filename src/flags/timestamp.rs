//! Time-of-day rendering for flag offsets.
//!
//! Offsets are rendered as `HH:MM:SS.mmm`. Values wrap modulo one day in
//! both directions: `-1000` ms renders as `23:59:59.000` and `25h` renders
//! as `01:00:00.000`.

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Render a millisecond offset as `HH:MM:SS.mmm`.
pub fn format_millis(ms: i64) -> String {
    let ms = ms.rem_euclid(MILLIS_PER_DAY);

    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Render a fractional second offset, rounded to the nearest millisecond.
pub fn format_seconds(secs: f64) -> String {
    format_millis((secs * 1000.0).round() as i64)
}

/// Convert a JSON number of milliseconds to an integer offset.
///
/// Fractions are truncated toward zero. Values outside the `i64` range
/// saturate before the day modulo is applied.
pub fn millis_from_json(raw: f64) -> i64 {
    raw.trunc() as i64
}
