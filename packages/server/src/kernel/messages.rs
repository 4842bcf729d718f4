//! User-facing message catalog.
//!
//! The save pipeline surfaces exactly two kinds of user-visible text: the
//! slug-collision validation message and the generic unexpected-fault
//! message. Both are looked up here by project language code, falling back
//! to English for unknown languages or keys.

use std::collections::HashMap;

/// Message keys consumed by the save pipeline.
pub mod keys {
    /// Validation message for a slug already taken within the project.
    pub const SLUG_IN_USE: &str = "slug-in-use";
    /// Opaque message returned when a collaborator fails unexpectedly.
    pub const UNEXPECTED_FAULT: &str = "unexpected-fault";
}

/// Language used when a project's language has no translation.
pub const FALLBACK_LANGUAGE: &str = "en";

pub struct MessageCatalog {
    messages: HashMap<(&'static str, &'static str), &'static str>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        let mut messages = HashMap::new();

        messages.insert(
            ("en", keys::SLUG_IN_USE),
            "This URL slug is already used by another post.",
        );
        messages.insert(
            ("en", keys::UNEXPECTED_FAULT),
            "Something went wrong while saving the post. Please try again.",
        );

        messages.insert(
            ("es", keys::SLUG_IN_USE),
            "Esta URL ya está en uso por otra publicación.",
        );
        messages.insert(
            ("es", keys::UNEXPECTED_FAULT),
            "Algo salió mal al guardar la publicación. Inténtalo de nuevo.",
        );

        Self { messages }
    }

    /// Look up a message for a language, falling back to English.
    pub fn lookup(&self, language_code: &str, key: &str) -> &'static str {
        self.messages
            .iter()
            .find(|((lang, k), _)| *lang == language_code && *k == key)
            .or_else(|| {
                self.messages
                    .iter()
                    .find(|((lang, k), _)| *lang == FALLBACK_LANGUAGE && *k == key)
            })
            .map(|(_, v)| *v)
            .unwrap_or("An unexpected error occurred.")
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lookup() {
        let catalog = MessageCatalog::new();
        assert!(catalog.lookup("en", keys::SLUG_IN_USE).contains("slug"));
    }

    #[test]
    fn test_spanish_lookup() {
        let catalog = MessageCatalog::new();
        assert!(catalog.lookup("es", keys::SLUG_IN_USE).contains("URL"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.lookup("fr", keys::UNEXPECTED_FAULT),
            catalog.lookup("en", keys::UNEXPECTED_FAULT)
        );
    }

    #[test]
    fn test_unknown_key_yields_generic_text() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.lookup("en", "no-such-key"), "An unexpected error occurred.");
    }
}
