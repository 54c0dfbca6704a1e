//! Block comment extraction

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// A complete `/* ... */` comment. Lazy, so comments never nest and the
/// first `*/` closes.
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"));

/// Extract every complete block comment from `text`, delimiters included,
/// in the order they appear.
///
/// An unterminated `/*` produces nothing.
pub fn extract_block_comments(text: &str) -> Vec<String> {
    BLOCK_COMMENT
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Byte ranges of every complete block comment in `text`, in order.
pub fn block_comment_spans(text: &str) -> Vec<Range<usize>> {
    BLOCK_COMMENT.find_iter(text).map(|m| m.range()).collect()
}

/// The comment span containing `offset`, if it falls inside one.
pub fn enclosing_comment(spans: &[Range<usize>], offset: usize) -> Option<&Range<usize>> {
    spans.iter().find(|span| span.contains(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_comment() {
        let comments = extract_block_comments("  /* hello */\nclass A {}");
        assert_eq!(comments, vec!["/* hello */"]);
    }

    #[test]
    fn test_multiple_comments_in_order() {
        let text = "/*\n * first\n */ code(); /* second */";
        let comments = extract_block_comments(text);

        assert_eq!(comments, vec!["/*\n * first\n */", "/* second */"]);
    }

    #[test]
    fn test_adjacent_comments_are_separate() {
        let comments = extract_block_comments("/* a *//* b */");
        assert_eq!(comments, vec!["/* a */", "/* b */"]);
    }

    #[test]
    fn test_comments_do_not_nest() {
        let comments = extract_block_comments("/* outer /* inner */ rest */");
        assert_eq!(comments, vec!["/* outer /* inner */"]);
    }

    #[test]
    fn test_unterminated_comment_is_dropped() {
        assert!(extract_block_comments("/* never closed").is_empty());
        assert_eq!(
            extract_block_comments("/* done */ /* open"),
            vec!["/* done */"]
        );
    }

    #[test]
    fn test_slash_star_slash_does_not_close_itself() {
        assert!(extract_block_comments("/*/").is_empty());
        assert_eq!(extract_block_comments("/*/ x */"), vec!["/*/ x */"]);
    }

    #[test]
    fn test_comment_spans() {
        let text = "a /* one */ b /* two */";
        let spans = block_comment_spans(text);

        assert_eq!(spans, vec![2..11, 14..23]);
        assert_eq!(enclosing_comment(&spans, 5), Some(&(2..11)));
        assert_eq!(enclosing_comment(&spans, 11), None);
        assert_eq!(enclosing_comment(&spans, 0), None);
    }

    #[test]
    fn test_line_comments_ignored() {
        assert!(extract_block_comments("// not a block\nfunction f() {}").is_empty());
    }
}
