//! Character-level tokenizer for the ClrMamePro text grammar.
//!
//! Tokens are separated by whitespace. A `"` toggles a quoted span in which
//! whitespace and parentheses lose their meaning; the quote marks themselves
//! are never part of a token.

/// Token that opens a nested group.
pub const OPEN_GROUP: &str = "(";
/// Token that closes the innermost open group.
pub const CLOSE_GROUP: &str = ")";
/// Character that toggles a quoted span.
pub const QUOTE: char = '"';

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Flatten lines into a character stream, re-inserting a `'\n'` after every
/// line (including the last one) so a trailing token always gets flushed.
pub fn line_chars<I, S>(lines: I) -> impl Iterator<Item = char>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().flat_map(|line| {
        let mut chars: Vec<char> = line.as_ref().chars().collect();
        chars.push('\n');
        chars
    })
}

/// Tokenize a sequence of lines.
pub fn tokenize<I, S>(lines: I) -> Tokens<impl Iterator<Item = char>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Tokens::new(line_chars(lines))
}

/// Lazy token stream over a character iterator.
///
/// Empty tokens are never produced, so `""` on its own yields nothing. A
/// closing quote terminates the current token just like whitespace does;
/// an opening quote does not, so `ab"c d"` is the single token `abc d`.
#[derive(Debug, Clone)]
pub struct Tokens<C> {
    chars: C,
    quoted: bool,
    buf: String,
}

impl<C: Iterator<Item = char>> Tokens<C> {
    pub fn new(chars: C) -> Self {
        Self {
            chars,
            quoted: false,
            buf: String::new(),
        }
    }

    /// Whether the tokenizer is currently inside an unterminated quoted span.
    pub fn in_quote(&self) -> bool {
        self.quoted
    }
}

impl<C: Iterator<Item = char>> Iterator for Tokens<C> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for c in self.chars.by_ref() {
            if c == QUOTE {
                self.quoted = !self.quoted;
                if self.quoted {
                    continue;
                }
            } else if self.quoted || !is_delimiter(c) {
                self.buf.push(c);
                continue;
            }

            if !self.buf.is_empty() {
                return Some(std::mem::take(&mut self.buf));
            }
        }

        // Input ended without a terminator after the last token.
        if !self.buf.is_empty() {
            log::debug!(
                "dropping unterminated token ({} chars, quoted: {}) at end of input",
                self.buf.chars().count(),
                self.in_quote()
            );
            self.buf.clear();
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/tokenizer_tests.rs"]
mod tests;
