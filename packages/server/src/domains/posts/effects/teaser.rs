use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::domains::posts::models::TruncationMode;
use crate::kernel::{BaseTeaserGenerator, Teaser, TeaserRequest};

/// Ellipsis appended when the body was actually cut.
const ELLIPSIS: &str = "...";

/// Teaser generator that strips markup and truncates the plain text under
/// the project's truncation policy.
pub struct TruncationTeaser;

#[async_trait]
impl BaseTeaserGenerator for TruncationTeaser {
    async fn generate(&self, request: TeaserRequest) -> Result<Teaser> {
        let text = strip_tags(&request.html);

        if text.is_empty() && request.log_warnings {
            warn!(
                slug = %request.slug,
                cache_key = %request.cache_key,
                "Teaser source is empty after stripping markup"
            );
        }

        let limit = request.truncation_length.max(0) as usize;
        let (mut teaser, truncated) = match request.truncation_mode {
            TruncationMode::Characters => truncate_chars(&text, limit),
            TruncationMode::Words => truncate_words(&text, limit),
        };

        if truncated {
            teaser.push_str(ELLIPSIS);
        }

        Ok(Teaser { content: teaser })
    }
}

/// Drop HTML tags and collapse whitespace runs to single spaces.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                // Tag boundaries separate words ("</p><p>" must not glue
                // adjacent paragraphs together)
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    words.join(" ")
}

/// Keep at most `limit` characters, cutting at a whitespace boundary.
fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    if text.chars().count() <= limit {
        return (text.to_string(), false);
    }

    let mut out = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let next_len = if out.is_empty() {
            word_len
        } else {
            out.chars().count() + 1 + word_len
        };
        if next_len > limit {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    // A single word longer than the whole budget gets a hard cut
    if out.is_empty() {
        out = text.chars().take(limit).collect();
    }

    (out, true)
}

/// Keep at most `limit` whitespace-separated words.
fn truncate_words(text: &str, limit: usize) -> (String, bool) {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return (text.to_string(), false);
    }
    (words[..limit].join(" "), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn request(html: &str, mode: TruncationMode, length: i32) -> TeaserRequest {
        TeaserRequest {
            truncation_mode: mode,
            truncation_length: length,
            html: html.to_string(),
            cache_key: Uuid::new_v4(),
            slug: "test-post".to_string(),
            language_code: "en".to_string(),
            log_warnings: false,
        }
    }

    #[tokio::test]
    async fn test_short_body_is_untruncated() {
        let teaser = TruncationTeaser
            .generate(request("<p>Hello world</p>", TruncationMode::Characters, 250))
            .await
            .unwrap();
        assert_eq!(teaser.content, "Hello world");
    }

    #[tokio::test]
    async fn test_character_truncation_cuts_at_word_boundary() {
        let teaser = TruncationTeaser
            .generate(request(
                "<p>one two three four five</p>",
                TruncationMode::Characters,
                13,
            ))
            .await
            .unwrap();
        // "one two three" is 13 chars; "four" would overflow
        assert_eq!(teaser.content, "one two three...");
    }

    #[tokio::test]
    async fn test_word_truncation() {
        let teaser = TruncationTeaser
            .generate(request(
                "<p>one two three four five</p>",
                TruncationMode::Words,
                3,
            ))
            .await
            .unwrap();
        assert_eq!(teaser.content, "one two three...");
    }

    #[tokio::test]
    async fn test_tags_are_stripped_and_paragraphs_separated() {
        let teaser = TruncationTeaser
            .generate(request(
                "<p>first</p><p>second</p>",
                TruncationMode::Words,
                10,
            ))
            .await
            .unwrap();
        assert_eq!(teaser.content, "first second");
    }

    #[tokio::test]
    async fn test_single_giant_word_hard_cut() {
        let teaser = TruncationTeaser
            .generate(request("aaaaaaaaaaaaaaaaaaaa", TruncationMode::Characters, 5))
            .await
            .unwrap();
        assert_eq!(teaser.content, "aaaaa...");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let teaser = TruncationTeaser
            .generate(request("", TruncationMode::Characters, 250))
            .await
            .unwrap();
        assert_eq!(teaser.content, "");
    }
}
