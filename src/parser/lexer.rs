//! Lexer (tokenizer) for C header text
//!
//! Produces one [`Token`] at a time from a raw source buffer. Lexing is a pure
//! function of the buffer and a byte position: [`next_token`] never mutates
//! anything, and positions only move forward. Cursor bookkeeping (the
//! current/previous token pair) lives in [`super::cursor`].
//!
//! Whitespace, `//` line comments and `/* */` block comments are skipped
//! before every token. Preprocessor lines are not treated specially; `#`
//! becomes an ordinary [`TokenKind::Pound`] token and the scan loops above
//! simply step over directive bodies token by token.

use std::fmt;

/// All token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Placeholder before the first advance of a cursor.
    None,
    /// End of input. Produced forever once the buffer is exhausted.
    Eof,
    Ident,
    Number,
    /// A quoted string, quotes included.
    Str,
    /// An identifier run containing a `.`, e.g. a quote-less include target
    /// such as `file2.h`.
    Path,
    Pound,
    Star,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Semicolon,
    /// Any character the lexer has no class for; always a single character.
    Unknown,
}

/// A token: a slice of the source buffer plus its class.
///
/// The slice carries the span (start and length) into the buffer, so tokens
/// are cheap copies and never own their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl Token<'_> {
    /// The pre-lexing placeholder token.
    pub fn none() -> Token<'static> {
        Token {
            text: "",
            kind: TokenKind::None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Exact, case-sensitive comparison against a literal.
    ///
    /// Both length and bytes must match, so `matches("struct")` is false for
    /// a token spelled `structs`. String tokens keep their quotes in `text`,
    /// which means a keyword can never match inside a literal.
    pub fn matches(&self, literal: &str) -> bool {
        self.text == literal
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::None => write!(f, "start of file"),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number '{}'", self.text),
            TokenKind::Str => write!(f, "string literal {}", self.text),
            TokenKind::Path => write!(f, "path '{}'", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Width in bytes of the UTF-8 character whose first byte is `lead`.
///
/// Keeps every computed position on a character boundary even though the
/// lexer walks the buffer as bytes.
fn char_width(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead >= 0xf0 {
        4
    } else if lead >= 0xe0 {
        3
    } else if lead >= 0xc0 {
        2
    } else {
        1
    }
}

/// Advance past whitespace and both comment styles.
///
/// An unterminated block comment swallows the rest of the buffer.
fn skip_trivia(src: &str, mut pos: usize) -> usize {
    let bytes = src.as_bytes();
    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        if b == b'/' && bytes.get(pos + 1) == Some(&b'/') {
            pos += 2;
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += char_width(bytes[pos]);
            }
            continue;
        }
        if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            pos += 2;
            while pos + 1 < bytes.len() && !(bytes[pos] == b'*' && bytes[pos + 1] == b'/') {
                pos += char_width(bytes[pos]);
            }
            pos = (pos + 2).min(bytes.len());
            continue;
        }
        break;
    }
    pos
}

/// Scan the token at `pos`, returning it together with the position of the
/// first byte after it.
///
/// At or past the end of the buffer this returns an [`TokenKind::Eof`] token
/// and leaves the position unchanged, so callers can call it forever.
pub fn next_token(src: &str, pos: usize) -> (Token<'_>, usize) {
    let pos = skip_trivia(src, pos);
    let bytes = src.as_bytes();

    if pos >= bytes.len() {
        let eof = Token {
            text: "",
            kind: TokenKind::Eof,
        };
        return (eof, pos);
    }

    let start = pos;
    let (kind, end) = match bytes[pos] {
        b'[' => (TokenKind::LBracket, pos + 1),
        b']' => (TokenKind::RBracket, pos + 1),
        b'*' => (TokenKind::Star, pos + 1),
        b'<' => (TokenKind::Lt, pos + 1),
        b'>' => (TokenKind::Gt, pos + 1),
        b'#' => (TokenKind::Pound, pos + 1),
        b'{' => (TokenKind::LBrace, pos + 1),
        b'}' => (TokenKind::RBrace, pos + 1),
        b'(' => (TokenKind::LParen, pos + 1),
        b')' => (TokenKind::RParen, pos + 1),
        b';' => (TokenKind::Semicolon, pos + 1),
        b'"' => {
            // Opening quote through the next unescaped quote, inclusive.
            let mut end = pos + 1;
            while end < bytes.len() {
                match bytes[end] {
                    b'\\' => {
                        end += 1;
                        if end < bytes.len() {
                            end += char_width(bytes[end]);
                        }
                    }
                    b'"' => {
                        end += 1;
                        break;
                    }
                    c => end += char_width(c),
                }
            }
            (TokenKind::Str, end)
        }
        b'0'..=b'9' => {
            let mut end = pos;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end < bytes.len() && bytes[end] == b'.' {
                end += 1;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
            // Float suffix as in `2.5f`.
            if end < bytes.len() && bytes[end] == b'f' {
                end += 1;
            }
            (TokenKind::Number, end)
        }
        b'a'..=b'z' | b'A'..=b'Z' => {
            let mut end = pos + 1;
            let mut kind = TokenKind::Ident;
            while end < bytes.len() {
                match bytes[end] {
                    c if c.is_ascii_alphanumeric() || c == b'_' => end += 1,
                    // A dot mid-run reclassifies the whole token as a path.
                    b'.' => {
                        kind = TokenKind::Path;
                        end += 1;
                    }
                    _ => break,
                }
            }
            (kind, end)
        }
        lead => (TokenKind::Unknown, pos + char_width(lead)),
    };

    let token = Token {
        text: &src[start..end],
        kind,
    };
    (token, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> Vec<Token<'_>> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        loop {
            let (token, next) = next_token(src, pos);
            pos = next;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_punctuation_kinds() {
        let tokens = lex_all("[ ] * < > # { } ( ) ;");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Star,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Pound,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_skips_whitespace_and_comments() {
        let tokens = lex_all("int x; // trailing\nint y; /* block\ncomment */ int z;");
        let idents: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text)
            .collect();
        assert_eq!(idents, vec!["int", "x", "int", "y", "int", "z"]);
    }

    #[test]
    fn test_unterminated_block_comment_stops_at_end() {
        let tokens = lex_all("int a; /* never closed");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_string_literal_includes_quotes() {
        let tokens = lex_all(r#"char *s = "hello";"#);
        let lit = tokens.iter().find(|t| t.kind == TokenKind::Str).unwrap();
        assert_eq!(lit.text, "\"hello\"");
    }

    #[test]
    fn test_string_literal_escaped_quote() {
        let tokens = lex_all(r#""say \"hi\"" x"#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text, r#""say \"hi\"""#);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_keyword_inside_string_does_not_match() {
        let (token, _) = next_token(r#""struct""#, 0);
        assert_eq!(token.kind, TokenKind::Str);
        assert!(!token.matches("struct"));
    }

    #[test]
    fn test_numbers() {
        let tokens = lex_all("42 3.14 2.5f 7f");
        let nums: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text)
            .collect();
        assert_eq!(nums, vec!["42", "3.14", "2.5f", "7f"]);
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex_all("generate_properties size_t_property x2");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Ident));
        assert_eq!(tokens[0].text, "generate_properties");
        assert_eq!(tokens[1].text, "size_t_property");
        assert_eq!(tokens[2].text, "x2");
    }

    #[test]
    fn test_dotted_identifier_is_path() {
        let tokens = lex_all("#include <file2.h>");
        assert_eq!(tokens[0].kind, TokenKind::Pound);
        assert_eq!(tokens[1].text, "include");
        assert_eq!(tokens[2].kind, TokenKind::Lt);
        assert_eq!(tokens[3].kind, TokenKind::Path);
        assert_eq!(tokens[3].text, "file2.h");
        assert_eq!(tokens[4].kind, TokenKind::Gt);
    }

    #[test]
    fn test_leading_underscore_is_not_an_identifier_start() {
        let tokens = lex_all("_foo");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "_");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "foo");
    }

    #[test]
    fn test_unknown_byte() {
        let tokens = lex_all("@");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "@");
    }

    #[test]
    fn test_matches_is_exact_and_case_sensitive() {
        let (token, _) = next_token("struct", 0);
        assert!(token.matches("struct"));
        assert!(!token.matches("structs"));
        assert!(!token.matches("struc"));
        assert!(!token.matches("Struct"));
    }

    #[test]
    fn test_empty_input_is_eof() {
        let (token, pos) = next_token("", 0);
        assert!(token.is_eof());
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_eof_position_is_stable() {
        let src = "x";
        let (_, pos) = next_token(src, 0);
        let (first_eof, pos2) = next_token(src, pos);
        let (second_eof, pos3) = next_token(src, pos2);
        assert!(first_eof.is_eof());
        assert!(second_eof.is_eof());
        assert_eq!(pos2, pos3);
    }
}
