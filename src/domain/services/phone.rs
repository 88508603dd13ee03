/// Strips everything but digits from a submitted phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Korean mobile numbers only: 010 prefix, 10 or 11 digits total.
/// Landlines (02-...) and short inputs are rejected.
pub fn is_valid_mobile(normalized: &str) -> bool {
    (normalized.len() == 10 || normalized.len() == 11) && normalized.starts_with("010")
}
