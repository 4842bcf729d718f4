/// Slug normalization for post URLs.
///
/// Slugs are unique within a project and appear verbatim in URLs, so the
/// output alphabet is restricted to `[a-z0-9-]`.
///
/// Total and deterministic: every input produces a valid slug (possibly
/// empty), and normalizing an already-normal slug is a no-op.
pub fn normalize_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_separator {
                slug.push('-');
                pending_separator = false;
            }
            slug.push(ch);
        } else if !slug.is_empty() {
            // Runs of separators collapse to one dash; a trailing run is
            // dropped because the dash is only emitted before the next
            // alphanumeric character.
            pending_separator = true;
        }
    }

    slug
}
