//! Shared clinical vocabulary: state codes and specialty relations.

/// USPS two-letter codes for the 50 states plus DC.
const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Specialties considered adjacent for partial-credit matching. Pairs are
/// symmetric; lookups normalize case first.
const RELATED_SPECIALTIES: [(&str, &str); 6] = [
    ("family medicine", "internal medicine"),
    ("family medicine", "general practice"),
    ("internal medicine", "general practice"),
    ("psychiatry", "behavioral health"),
    ("pediatrics", "family medicine"),
    ("emergency medicine", "urgent care"),
];

/// Uppercases and validates a two-letter state code.
pub fn normalize_state_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    if STATE_CODES.contains(&code.as_str()) {
        Some(code)
    } else {
        None
    }
}

/// Case-insensitive specialty equality.
pub fn specialty_matches(requested: &str, offered: &str) -> bool {
    requested.trim().eq_ignore_ascii_case(offered.trim())
}

/// True when the two specialties are listed as adjacent, or the offered
/// specialty is general practice (a generalist can supervise adjacently).
pub fn specialties_related(requested: &str, offered: &str) -> bool {
    let requested = requested.trim().to_ascii_lowercase();
    let offered = offered.trim().to_ascii_lowercase();

    if offered == "general practice" {
        return true;
    }

    RELATED_SPECIALTIES.iter().any(|(a, b)| {
        (*a == requested && *b == offered) || (*b == requested && *a == offered)
    })
}
