//! Validation utilities for HuntStack query inputs and survey data

/// Bounds for the ranked-recommendation list size
pub const MIN_RESULT_LIMIT: u32 = 1;
pub const MAX_RESULT_LIMIT: u32 = 50;

/// Validate a requested recommendation list size
pub fn validate_limit(limit: u32) -> Result<(), &'static str> {
    if !(MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&limit) {
        return Err("Limit must be between 1 and 50");
    }
    Ok(())
}

/// Validate a two-letter state code (uppercase ASCII)
pub fn validate_state_code(code: &str) -> Result<(), &'static str> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err("State code must be two uppercase letters");
    }
    Ok(())
}

/// Validate a comma-separated state filter, returning the parsed codes
pub fn parse_state_filter(raw: &str) -> Result<Vec<String>, &'static str> {
    let codes: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if codes.is_empty() {
        return Err("At least one state code is required");
    }
    for code in &codes {
        validate_state_code(code)?;
    }
    Ok(codes)
}

/// Validate a survey count (non-negative by definition)
pub fn validate_count(count: i64) -> Result<(), &'static str> {
    if count < 0 {
        return Err("Survey counts cannot be negative");
    }
    Ok(())
}

/// Validate a species slug: lowercase ASCII, digits, and hyphens
pub fn validate_species_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() || slug.len() > 64 {
        return Err("Species slug must be 1-64 characters");
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Species slug may only contain lowercase letters, digits, and hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(50).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(51).is_err());
    }

    #[test]
    fn state_codes() {
        assert!(validate_state_code("TX").is_ok());
        assert!(validate_state_code("tx").is_err());
        assert!(validate_state_code("TEX").is_err());
        assert!(validate_state_code("").is_err());
    }

    #[test]
    fn state_filter_parses_and_normalizes() {
        let codes = parse_state_filter("tx, NM ,ar").unwrap();
        assert_eq!(codes, vec!["TX", "NM", "AR"]);
    }

    #[test]
    fn state_filter_rejects_empty_and_bad_codes() {
        assert!(parse_state_filter("").is_err());
        assert!(parse_state_filter(" , ").is_err());
        assert!(parse_state_filter("TX,Texas").is_err());
    }

    #[test]
    fn counts_must_be_non_negative() {
        assert!(validate_count(0).is_ok());
        assert!(validate_count(120_000).is_ok());
        assert!(validate_count(-1).is_err());
    }

    #[test]
    fn species_slugs() {
        assert!(validate_species_slug("mallard").is_ok());
        assert!(validate_species_slug("canada-goose").is_ok());
        assert!(validate_species_slug("Mallard").is_err());
        assert!(validate_species_slug("").is_err());
    }
}
