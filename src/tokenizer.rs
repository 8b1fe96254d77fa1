//! Command Line Tokenizer
//!
//! Splits a raw input line into whitespace-separated tokens while
//! honoring single and double quotes. Quote characters delimit spans
//! and are consumed; the opposite quote character inside an open span
//! is kept literally. Tokenization is total: any input produces a
//! (possibly empty) token list and never fails.

/// Split a command line into tokens
///
/// Whitespace outside quotes separates tokens and is discarded. A quote
/// span opened with `"` or `'` is closed only by the same character; an
/// unterminated span closes silently at the end of the line. Adjacent
/// quoted and unquoted segments merge into a single token.
///
/// # Examples
///
/// ```
/// let tokens = micashell::tokenizer::tokenize("a \"b c\" d");
/// assert_eq!(tokens, vec!["a", "b c", "d"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote_char: Option<char> = None;

    for ch in line.chars() {
        match ch {
            '"' | '\'' => match quote_char {
                None => quote_char = Some(ch),
                Some(open) if open == ch => quote_char = None,
                Some(_) => current.push(ch),
            },
            _ if ch.is_whitespace() && quote_char.is_none() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Extract the lowercased command name from a raw line
///
/// Returns `None` when the line tokenizes to nothing. Arguments keep
/// their case; only the head token is folded.
pub fn command_name(line: &str) -> Option<String> {
    tokenize(line).into_iter().next().map(|t| t.to_lowercase())
}
