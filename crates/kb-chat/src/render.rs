//! Turns a retrieved article into answer text for the requested format.

use kb_core::types::excerpt;
use kb_core::Article;

use crate::templates::ResponseFormat;

/// Content chars shown by the detailed format.
pub const DETAIL_CHARS: usize = 1200;
pub const LIST_ITEMS: usize = 6;

pub fn render_article(article: &Article, format: ResponseFormat) -> String {
    let title = article.title.trim();
    let summary = article.summary.trim();
    let content = article.content.trim();
    match format {
        ResponseFormat::Summary => {
            if summary.is_empty() {
                title.to_string()
            } else {
                format!("{title}: {summary}")
            }
        }
        ResponseFormat::Detailed => {
            let mut out =
                format!("{}\n\nDomain: {} · {} words", title.to_uppercase(), article.domain, article.word_count);
            // A derived summary is just the head of the content; don't print it twice.
            if !summary.is_empty() && !content.starts_with(summary) {
                out.push_str("\n\n");
                out.push_str(summary);
            }
            if !content.is_empty() {
                out.push_str("\n\n");
                out.push_str(&excerpt(content, DETAIL_CHARS));
                if content.chars().count() > DETAIL_CHARS {
                    out.push('…');
                }
            }
            out
        }
        ResponseFormat::List => {
            let source = if content.is_empty() { summary } else { content };
            let mut out = title.to_uppercase();
            out.push('\n');
            for s in sentences(source).into_iter().take(LIST_ITEMS) {
                out.push_str("\n• ");
                out.push_str(s);
            }
            out
        }
        ResponseFormat::Essay => {
            let body = if content.is_empty() { summary } else { content };
            if body.is_empty() {
                title.to_string()
            } else {
                format!("{title}\n\n{body}")
            }
        }
    }
}

/// Split after `.`, `!` or `?` followed by whitespace.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?') && iter.peek().map_or(true, |(_, n)| n.is_whitespace()) {
            let end = i + c.len_utf8();
            let s = text[start..end].trim();
            if !s.is_empty() {
                out.push(s);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article::new("Robot", "A robot is a machine. Robots can be guided externally! Some are autonomous? Yes.")
            .with_domain("robotics")
    }

    #[test]
    fn splits_sentences_but_not_decimals() {
        assert_eq!(sentences("Pi is 3.14 roughly. Next"), vec!["Pi is 3.14 roughly.", "Next"]);
        assert_eq!(sentences(""), Vec::<&str>::new());
    }

    #[test]
    fn summary_format_is_title_and_summary() {
        let mut a = article();
        a.summary = "A programmable machine.".into();
        assert_eq!(render_article(&a, ResponseFormat::Summary), "Robot: A programmable machine.");
    }

    #[test]
    fn detailed_format_skips_derived_summary() {
        let text = render_article(&article(), ResponseFormat::Detailed);
        assert!(text.starts_with("ROBOT\n\nDomain: robotics · 14 words"));
        assert_eq!(text.matches("A robot is a machine.").count(), 1);
    }

    #[test]
    fn list_format_bullets_sentences() {
        let text = render_article(&article(), ResponseFormat::List);
        assert_eq!(text.lines().filter(|l| l.starts_with("• ")).count(), 4);
    }

    #[test]
    fn essay_format_is_full_content() {
        let a = article();
        assert_eq!(render_article(&a, ResponseFormat::Essay), format!("Robot\n\n{}", a.content));
    }
}
