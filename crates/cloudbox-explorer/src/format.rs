//! Display formatting for sizes, dates, names and quotas.

use chrono::{DateTime, Utc};

use cloudbox_entity::timestamp;

/// Units used by [`format_file_size`], in powers of 1024.
pub const SIZE_UNITS: [&str; 6] = ["Octets", "Ko", "Mo", "Go", "To", "Po"];

/// Colour returned by [`color_for_name`] for an empty name.
pub const NEUTRAL_COLOR: &str = "#6c757d";

/// Render a byte count with the largest unit whose value is at least 1.
///
/// The value is rounded to `decimals` places and trailing zeros are dropped,
/// so `1024` gives `"1 Ko"` and `(1536, 1)` gives `"1.5 Ko"`.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimal(value, decimals), SIZE_UNITS[unit])
}

/// Round to `decimals` places and drop trailing zeros.
fn trim_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Render an ISO-8601 timestamp as `dd/mm/yyyy hh:mm` (UTC).
///
/// Empty or unparseable input gives an empty string.
pub fn format_date(iso: &str) -> String {
    match timestamp::parse(iso) {
        Some(at) => format_datetime(at),
        None => String::new(),
    }
}

/// Render a timestamp as `dd/mm/yyyy hh:mm`.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Shorten `s` to at most `max` characters, ending with `suffix` when cut.
pub fn truncate_string(s: &str, max: usize, suffix: &str) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(suffix.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Lower-cased text after the last `.`, or empty when there is no dot.
pub fn file_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// `value / total` as a percentage rounded to `decimals` places. A zero
/// total gives 0.
pub fn calculate_percentage(value: u64, total: u64, decimals: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    ((value as f64 / total as f64) * 100.0 * factor).round() / factor
}

/// Stable `#rrggbb` colour derived from a name, for avatars and badges.
pub fn color_for_name(name: &str) -> String {
    if name.is_empty() {
        return NEUTRAL_COLOR.to_string();
    }

    // 32-bit rolling hash over UTF-16 units, `hash * 31 + unit`.
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });

    let mut color = String::from("#");
    for i in 0..3 {
        let byte = (hash >> (i * 8)) & 0xFF;
        color.push_str(&format!("{byte:02x}"));
    }
    color
}
