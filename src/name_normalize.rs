//! Yacht name normalisation for cache keys and source queries.
//!
//! Yacht names appear with designation prefixes (`M/Y Eclipse`, `S/Y A`)
//! on some sites and without on others. Cache keys fold case and
//! whitespace; source queries strip the designation so both spellings
//! match the same listing.

/// Designation prefixes stripped when building source queries. Longer
/// variants first so `M/Y` is not consumed as `M` + `/Y`.
const DESIGNATIONS: &[&str] = &["M/Y", "S/Y", "M/V", "MY", "SY"];

/// Normalise a yacht name into a cache key: trimmed and lowercased.
pub fn cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Strip a leading designation prefix (`M/Y`, `S/Y`, `MY`, `SY`, `M/V`)
/// from a yacht name, case-insensitively. The prefix must be followed by
/// whitespace, so fused names (`Mystic`, `Symphony`) pass through intact.
pub fn strip_designation(name: &str) -> &str {
    let trimmed = name.trim();
    for designation in DESIGNATIONS {
        let Some(rest) = strip_prefix_ignore_case(trimmed, designation) else {
            continue;
        };
        // Prefix must be delimited, not part of a longer word.
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    trimmed
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_folds_case_and_whitespace() {
        assert_eq!(cache_key("  Eclipse  "), "eclipse");
        assert_eq!(cache_key("ECLIPSE"), "eclipse");
        assert_eq!(cache_key("Sailing Yacht A"), "sailing yacht a");
    }

    #[test]
    fn cache_key_same_for_equivalent_spellings() {
        assert_eq!(cache_key("Eclipse"), cache_key(" eclipse "));
    }

    #[test]
    fn strips_slash_designations() {
        assert_eq!(strip_designation("M/Y Eclipse"), "Eclipse");
        assert_eq!(strip_designation("S/Y A"), "A");
        assert_eq!(strip_designation("m/y Eclipse"), "Eclipse");
    }

    #[test]
    fn strips_bare_designations() {
        assert_eq!(strip_designation("MY Eclipse"), "Eclipse");
        assert_eq!(strip_designation("SY Black Pearl"), "Black Pearl");
    }

    #[test]
    fn keeps_names_without_designation() {
        assert_eq!(strip_designation("Eclipse"), "Eclipse");
        assert_eq!(strip_designation("Azzam"), "Azzam");
    }

    #[test]
    fn keeps_designation_fused_to_name() {
        // No whitespace after the prefix: not a designation.
        assert_eq!(strip_designation("Mystic"), "Mystic");
        assert_eq!(strip_designation("Symphony"), "Symphony");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(strip_designation("  M/Y Eclipse  "), "Eclipse");
        assert_eq!(strip_designation("  Eclipse  "), "Eclipse");
    }

    #[test]
    fn empty_name_stays_empty() {
        assert_eq!(strip_designation(""), "");
        assert_eq!(cache_key(""), "");
    }

    #[test]
    fn non_ascii_names_pass_through() {
        assert_eq!(strip_designation("Ségolène"), "Ségolène");
        assert_eq!(cache_key("Ségolène"), "ségolène");
    }
}
