const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const CANADIAN_PROVINCES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

/// Two-letter US state (including DC) or Canadian province/territory code.
pub fn is_known_region(code: &str) -> bool {
    let code = code.trim();
    US_STATES.contains(&code) || CANADIAN_PROVINCES.contains(&code)
}

pub fn is_canadian_province(code: &str) -> bool {
    CANADIAN_PROVINCES.contains(&code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_states_and_provinces() {
        assert!(is_known_region("IA"));
        assert!(is_known_region("DC"));
        assert!(is_known_region("ON"));
        assert!(!is_known_region("ia"));
        assert!(!is_known_region(""));
        assert!(is_canadian_province("QC"));
        assert!(!is_canadian_province("CO"));
    }
}
