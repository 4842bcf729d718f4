/// Category string normalization.
///
/// Authors type categories as a single comma-delimited string; storage wants
/// an ordered, deduplicated list.
pub fn normalize_categories(raw: &str, force_lowercase: bool) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut categories = Vec::new();

    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value = if force_lowercase {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        };

        // First occurrence wins; later duplicates keep the original position.
        if seen.insert(value.clone()) {
            categories.push(value);
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_trim() {
        assert_eq!(
            normalize_categories(" Rust , Web Dev ,Tools", false),
            vec!["Rust", "Web Dev", "Tools"]
        );
    }

    #[test]
    fn test_empty_tokens_discarded() {
        assert_eq!(normalize_categories("a,,b, ,c,", false), vec!["a", "b", "c"]);
        assert_eq!(normalize_categories(",,,", false), Vec::<String>::new());
    }

    #[test]
    fn test_force_lowercase() {
        assert_eq!(
            normalize_categories("Rust,WEB", true),
            vec!["rust", "web"]
        );
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        assert_eq!(
            normalize_categories("b,a,b,c,a", false),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_dedup_after_case_folding() {
        assert_eq!(normalize_categories("Rust,rust,RUST", true), vec!["rust"]);
        // Without folding, case-distinct names are distinct categories
        assert_eq!(
            normalize_categories("Rust,rust", false),
            vec!["Rust", "rust"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_categories("", false), Vec::<String>::new());
    }
}
