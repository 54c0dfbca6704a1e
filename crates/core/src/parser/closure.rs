//! Balanced-brace body resolution
//!
//! A closure is the `{ ... }` block following a declaration signature. Every
//! brace character counts, including ones inside strings or comments.

/// Byte offsets of a resolved `{ ... }` block, both braces inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closure {
    /// Offset of the opening `{`
    pub body_start: usize,

    /// Offset of the matching closing `}`
    pub body_end: usize,
}

impl Closure {
    /// Exclusive end of the block
    pub fn end(&self) -> usize {
        self.body_end + 1
    }

    /// Range strictly between the two braces
    pub fn interior(&self) -> std::ops::Range<usize> {
        self.body_start + 1..self.body_end
    }
}

/// Find the next balanced `{ ... }` block at or after `search_start`.
///
/// Closing braces seen before the first `{` are ignored. Returns `None` when
/// there is no opening brace, when the braces never balance before the end
/// of `text`, or when `search_start` lies past the end of `text`.
pub fn resolve_closure(text: &str, search_start: usize) -> Option<Closure> {
    let bytes = text.as_bytes().get(search_start..)?;

    let mut depth = 0usize;
    let mut body_start = None;

    for (position, byte) in bytes.iter().enumerate() {
        match byte {
            b'{' => {
                depth += 1;
                body_start.get_or_insert(search_start + position);
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return body_start.map(|body_start| Closure {
                        body_start,
                        body_end: search_start + position,
                    });
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_block() {
        let text = "function a() { return 1; }";
        let closure = resolve_closure(text, 0).unwrap();

        assert_eq!(closure.body_start, 13);
        assert_eq!(closure.body_end, text.len() - 1);
        assert_eq!(&text[closure.body_start..closure.end()], "{ return 1; }");
    }

    #[test]
    fn test_nested_blocks() {
        let text = "x { a { b { } } c } tail";
        let closure = resolve_closure(text, 0).unwrap();

        assert_eq!(&text[closure.body_start..closure.end()], "{ a { b { } } c }");
        assert_eq!(&text[closure.interior()], " a { b { } } c ");
    }

    #[test]
    fn test_search_start_skips_earlier_blocks() {
        let text = "{ first } { second }";
        let closure = resolve_closure(text, 9).unwrap();

        assert_eq!(&text[closure.body_start..closure.end()], "{ second }");
    }

    #[test]
    fn test_stray_closing_brace_before_open_is_ignored() {
        let text = "} } method() { body }";
        let closure = resolve_closure(text, 0).unwrap();

        assert_eq!(&text[closure.body_start..closure.end()], "{ body }");
    }

    #[test]
    fn test_braces_in_strings_are_counted() {
        // Known approximation: no string awareness
        let text = "f() { let s = \"}\"; }";
        let closure = resolve_closure(text, 0).unwrap();

        assert_eq!(&text[closure.body_start..closure.end()], "{ let s = \"}");
    }

    #[test]
    fn test_not_found() {
        assert_eq!(resolve_closure("", 0), None);
        assert_eq!(resolve_closure("no braces here", 0), None);
        assert_eq!(resolve_closure("{ { }", 0), None);
        assert_eq!(resolve_closure("{}", 10), None);
    }

    #[test]
    fn test_search_start_at_end() {
        assert_eq!(resolve_closure("{}", 2), None);
    }
}
