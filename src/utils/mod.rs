//! Utility functions and helpers.

pub mod http;

/// Trim and collapse every run of whitespace into a single space.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Dark\n   Roast \t"), "Dark Roast");
        assert_eq!(normalize_whitespace("Kenya"), "Kenya");
        assert_eq!(normalize_whitespace(" \n "), "");
    }
}
