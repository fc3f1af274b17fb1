//! Lexical analysis of Hack VM source text.
//!
//! Strips full-line comments and blank lines, then splits each remaining
//! line into whitespace-separated tokens. This is the only component that
//! looks at raw characters; everything downstream works on token vectors.
//!
//! A `//` only introduces a comment when it is the first thing on the
//! (whitespace-trimmed) line — there is no support for trailing inline
//! comments, so a `//` appearing after real code is left in the token
//! stream for the parser to reject.

pub const COMMENT: &str = "//";

/// One non-blank, non-comment source line, already split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'source> {
    /// 1-based line number in the original file, for diagnostics.
    pub line: usize,
    pub tokens: Vec<&'source str>,
    /// The trimmed, comment-stripped source text of the line.
    pub text: &'source str,
}

/// Lazily tokenizes VM source text, one [`Line`] per non-blank instruction.
pub struct Lexer<'source> {
    lines: std::str::Lines<'source>,
    line_no: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            lines: source.lines(),
            line_no: 0,
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Line<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line_no += 1;

            let text = raw.trim();
            if text.is_empty() || text.starts_with(COMMENT) {
                continue;
            }

            let tokens = text.split_whitespace().collect();
            return Some(Line {
                line: self.line_no,
                tokens,
                text,
            });
        }
    }
}
