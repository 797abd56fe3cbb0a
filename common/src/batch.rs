use serde::{Deserialize, Serialize};

/// Prefix shared by every MKRM batch identifier.
pub const BATCH_PREFIX: &str = "MKRM";

/// Fields parsed out of a batch identifier string.
///
/// Identifiers look like `MKRM-SonaMasoori23-2024-Chattisgarh8`: the brand
/// prefix, a variety key followed by a sequence number, a four-digit harvest
/// year, and an origin-location key followed by a plot number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchIdentifier {
    pub variety_key: String,
    pub sequence: u32,
    pub year: i32,
    pub location_key: String,
}

/// Parse one line as a batch identifier.
///
/// Returns `None` when the line does not match the pattern — a non-match is
/// not an error, the caller simply skips the line.
pub fn parse_batch_id(line: &str) -> Option<BatchIdentifier> {
    let line = line.trim();
    let parts: Vec<&str> = line.split('-').collect();
    if parts.len() != 4 || parts[0] != BATCH_PREFIX {
        return None;
    }

    // Variety key may contain internal spaces, e.g. "Sona Masoori23".
    let (variety_key, sequence) = split_alpha_digits(parts[1], true)?;
    let sequence: u32 = sequence.parse().ok()?;

    let year_str = parts[2];
    if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_str.parse().ok()?;

    let (location_key, plot) = split_alpha_digits(parts[3], false)?;
    let _: u32 = plot.parse().ok()?;

    Some(BatchIdentifier {
        variety_key: variety_key.to_string(),
        sequence,
        year,
        location_key: location_key.to_string(),
    })
}

/// Split a segment into a leading alphabetic head and a trailing digit tail.
/// Both must be non-empty and nothing may follow the digits.
fn split_alpha_digits(segment: &str, allow_spaces: bool) -> Option<(&str, &str)> {
    let digit_start = segment.find(|c: char| c.is_ascii_digit())?;
    let (head, tail) = segment.split_at(digit_start);
    if head.is_empty() || tail.is_empty() {
        return None;
    }
    let head_ok = head
        .chars()
        .all(|c| c.is_ascii_alphabetic() || (allow_spaces && c == ' '))
        && head.chars().any(|c| c.is_ascii_alphabetic());
    if !head_ok || !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((head, tail))
}
