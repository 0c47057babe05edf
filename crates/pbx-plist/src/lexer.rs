//! Tokenizer for the legacy structured-text grammar.
//!
//! A single forward pass with no backtracking. The lexer is byte-oriented;
//! non-ASCII text only ever appears inside quoted strings, where bytes are
//! copied through untouched, so UTF-8 survives intact.

use crate::error::{CodecError, Pos, Result};

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    LBrace,
    RBrace,
    LParen,
    RParen,
    Equals,
    Semi,
    Comma,
    /// A bare word: identifier, integer, or reference token.
    Word(String),
    /// A quoted string with escapes already resolved.
    Quoted(String),
}

impl Token {
    /// Short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Equals => "'='".to_string(),
            Token::Semi => "';'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Word(w) => format!("{w:?}"),
            Token::Quoted(s) => format!("{s:?}"),
        }
    }
}

/// Bytes that may appear in a bare word. Wider than what the encoder
/// emits unquoted, so descriptors written by Xcode (bare paths, build
/// settings like `5.0`) still lex.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'/' | b'$' | b'-' | b'+' | b'@')
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unread byte.
    fn pos(&self) -> Pos {
        Pos {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.bytes.get(self.offset + 1).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.offset += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    /// Skip whitespace and comments. The on-disk format is full of
    /// `/* section */` and `// !$*UTF8*$!` comments even though the
    /// encoder only ever emits the UTF-8 marker line.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.peek2() == Some(b'/') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some(b'/') if self.peek2() == Some(b'*') => {
                    let start = self.pos();
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek() {
                            None => return Err(CodecError::UnterminatedComment(start)),
                            Some(b'*') if self.peek2() == Some(b'/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            Some(_) => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn word(&mut self) -> String {
        let start = self.offset;
        while let Some(b) = self.peek() {
            // A slash only continues the word when it does not open a
            // comment.
            if b == b'/' && matches!(self.peek2(), Some(b'/') | Some(b'*')) {
                break;
            }
            if !is_word_byte(b) {
                break;
            }
            self.bump();
        }
        self.src[start..self.offset].to_string()
    }

    fn quoted(&mut self, start: Pos) -> Result<String> {
        self.bump(); // opening quote
        let mut out = Vec::new();
        loop {
            match self.bump() {
                None => return Err(CodecError::UnterminatedString(start)),
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    None => return Err(CodecError::UnterminatedString(start)),
                    Some(b'"') => out.push(b'"'),
                    Some(b'\\') => out.push(b'\\'),
                    Some(b'n') => out.push(b'\n'),
                    Some(b't') => out.push(b'\t'),
                    // Unknown escapes pass through verbatim.
                    Some(other) => {
                        out.push(b'\\');
                        out.push(other);
                    }
                },
                Some(b) => out.push(b),
            }
        }
        // All splits above happen at ASCII bytes, so the collected bytes
        // remain valid UTF-8; lossy conversion never actually replaces.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Tokenize the whole input, attaching the start position to each token.
pub(crate) fn tokenize(src: &str) -> Result<Vec<(Token, Pos)>> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        lexer.skip_trivia()?;
        let pos = lexer.pos();
        let Some(b) = lexer.peek() else { break };
        let token = match b {
            b'{' => {
                lexer.bump();
                Token::LBrace
            }
            b'}' => {
                lexer.bump();
                Token::RBrace
            }
            b'(' => {
                lexer.bump();
                Token::LParen
            }
            b')' => {
                lexer.bump();
                Token::RParen
            }
            b'=' => {
                lexer.bump();
                Token::Equals
            }
            b';' => {
                lexer.bump();
                Token::Semi
            }
            b',' => {
                lexer.bump();
                Token::Comma
            }
            b'"' => Token::Quoted(lexer.quoted(pos)?),
            _ if is_word_byte(b) => Token::Word(lexer.word()),
            _ => {
                let ch = src[pos.offset..].chars().next().unwrap_or('\u{FFFD}');
                return Err(CodecError::UnexpectedChar { pos, ch });
            }
        };
        tokens.push((token, pos));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        tokenize(src).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn punctuation_and_words() {
        assert_eq!(
            kinds("{ key = value; }"),
            vec![
                Token::LBrace,
                Token::Word("key".into()),
                Token::Equals,
                Token::Word("value".into()),
                Token::Semi,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn quoted_strings_resolve_escapes() {
        assert_eq!(
            kinds(r#""a \"b\" \\ c""#),
            vec![Token::Quoted(r#"a "b" \ c"#.into())]
        );
        assert_eq!(kinds(r#""tab\there""#), vec![Token::Quoted("tab\there".into())]);
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let err = tokenize("{ key = \"oops").unwrap_err();
        assert!(matches!(err, CodecError::UnterminatedString(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("// !$*UTF8*$!\n{ /* Begin */ a = 1; /* End */ }"),
            vec![
                Token::LBrace,
                Token::Word("a".into()),
                Token::Equals,
                Token::Word("1".into()),
                Token::Semi,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn unterminated_comment_is_rejected() {
        let err = tokenize("{ /* never closed").unwrap_err();
        assert!(matches!(err, CodecError::UnterminatedComment(_)));
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("{\n  answer = 42;\n}").unwrap();
        let (token, pos) = &tokens[1];
        assert_eq!(*token, Token::Word("answer".into()));
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 4);
    }

    #[test]
    fn bare_words_allow_path_characters() {
        assert_eq!(
            kinds("path = Sources/App.swift;"),
            vec![
                Token::Word("path".into()),
                Token::Equals,
                Token::Word("Sources/App.swift".into()),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn stray_character_is_rejected() {
        let err = tokenize("{ a = #bad; }").unwrap_err();
        match err {
            CodecError::UnexpectedChar { ch, .. } => assert_eq!(ch, '#'),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
