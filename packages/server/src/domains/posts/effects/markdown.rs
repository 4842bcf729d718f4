use pulldown_cmark::{html, Options, Parser};

use crate::kernel::BaseMarkdownRenderer;

/// CommonMark renderer used when a post's content type is markdown.
pub struct CmarkRenderer;

impl BaseMarkdownRenderer for CmarkRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut rendered = String::new();
        html::push_html(&mut rendered, parser);
        rendered
    }
}
