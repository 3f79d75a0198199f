//! Logos-based lexer for Cobra source lines
//!
//! The outline parser works line by line, so the lexer never sees a
//! newline. Whitespace is skipped; everything else becomes a token.

use logos::Logos;
use text_size::TextSize;

/// Token kinds the outline parser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Number,
    String,
    /// `"""`
    DocStringDelim,
    /// `# ...` to end of line
    Comment,
    /// `/#`
    BlockCommentOpen,
    Dot,
    Comma,
    LParen,
    RParen,
    Lt,
    Gt,
    Question,
    Eq,
    Colon,
    /// Any other character
    Other,
}

/// A token with its kind, text, and position in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Other,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire line into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum LogosToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    #[token("\"\"\"")]
    DocStringDelim,

    #[regex(r"#[^\n]*")]
    Comment,

    #[token("/#")]
    BlockCommentOpen,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Number => TokenKind::Number,
            LogosToken::String => TokenKind::String,
            LogosToken::DocStringDelim => TokenKind::DocStringDelim,
            LogosToken::Comment => TokenKind::Comment,
            LogosToken::BlockCommentOpen => TokenKind::BlockCommentOpen,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::Question => TokenKind::Question,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Colon => TokenKind::Colon,
        }
    }
}
