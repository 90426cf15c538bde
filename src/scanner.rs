use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Diagnostics, ScanError};
use crate::literal::Literal;
use crate::token::{Token, TokenType};

/// Converts source text into a token stream. Tracks only the three indices
/// the book's scanner needs: lexeme start, current position, and line.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    /// Characters consumed since the current token's `start`, rebuilt on
    /// every `advance()` — the scanner walks a `Chars` iterator rather than
    /// indexing the source, so this is how `number`/`identifier` recover
    /// their own lexeme text.
    consumed: String,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            consumed: String::new(),
        }
    }

    /// Scans the whole source, reporting lexical errors as they're found
    /// and continuing to scan past them, and returns the resulting tokens
    /// (always EOF-terminated).
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.consumed.clear();
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::new(TokenType::Eof, String::new(), None, self.line));
        self.tokens
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance called past end of source");
        self.current += 1;
        self.consumed.push(c);
        c
    }

    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        matches!(self.source.peek_next(), Some(c) if *c == expected)
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn add_token(&mut self, kind: TokenType, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn add_single_char_token(&mut self, kind: TokenType) {
        let c = self.advance();
        self.add_token(kind, c.to_string(), None);
    }

    fn add_double_char_token(&mut self, kind: TokenType) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(kind, format!("{first}{second}"), None);
    }

    /// Handles a (possibly multi-line) string literal.
    fn string(&mut self, diagnostics: &mut Diagnostics) {
        self.advance(); // opening quote
        let start_line = self.line;

        let mut value = String::new();
        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            diagnostics.report_scan(&ScanError {
                line: start_line,
                lexeme: "\"".to_string(),
                message: "unterminated string".to_string(),
            });
            return;
        }

        self.advance(); // closing quote

        // The literal does not include the surrounding quotes; the lexeme does.
        self.add_token(TokenType::String, value.clone(), Some(Literal::String(value)));
    }

    /// Handles a number literal: digits, optionally a `.` followed by more
    /// digits. A leading `.` is not part of a number; a trailing `.` with no
    /// following digit is not consumed.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // the '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme: String = self.consumed.clone();
        let value: f64 = lexeme.parse().expect("scanned number to be valid f64 text");
        self.add_token(TokenType::Number, lexeme, Some(Literal::Number(value)));
    }

    /// Handles an identifier, or a keyword if the lexeme matches one.
    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.consumed.clone();
        let kind = match lexeme.as_str() {
            "and" => TokenType::And,
            "class" => TokenType::Class,
            "else" => TokenType::Else,
            "false" => TokenType::False,
            "for" => TokenType::For,
            "fun" => TokenType::Fun,
            "if" => TokenType::If,
            "nil" => TokenType::Nil,
            "or" => TokenType::Or,
            "print" => TokenType::Print,
            "return" => TokenType::Return,
            "super" => TokenType::Super,
            "this" => TokenType::This,
            "true" => TokenType::True,
            "var" => TokenType::Var,
            "while" => TokenType::While,
            _ => TokenType::Identifier,
        };

        self.add_token(kind, lexeme, None);
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.peek();
        match c {
            '(' => self.add_single_char_token(TokenType::LeftParen),
            ')' => self.add_single_char_token(TokenType::RightParen),
            '{' => self.add_single_char_token(TokenType::LeftBrace),
            '}' => self.add_single_char_token(TokenType::RightBrace),
            ',' => self.add_single_char_token(TokenType::Comma),
            '.' => self.add_single_char_token(TokenType::Dot),
            '-' => self.add_single_char_token(TokenType::Minus),
            '+' => self.add_single_char_token(TokenType::Plus),
            ';' => self.add_single_char_token(TokenType::Semicolon),
            '*' => self.add_single_char_token(TokenType::Star),

            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenType::BangEqual);
                } else {
                    self.add_single_char_token(TokenType::Bang);
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenType::EqualEqual);
                } else {
                    self.add_single_char_token(TokenType::Equal);
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenType::LessEqual);
                } else {
                    self.add_single_char_token(TokenType::Less);
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenType::GreaterEqual);
                } else {
                    self.add_single_char_token(TokenType::Greater);
                }
            }
            '/' => {
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_single_char_token(TokenType::Slash);
                }
            }

            ' ' | '\r' | '\t' => {
                self.advance();
            }

            '\n' => {
                self.advance();
                self.line += 1;
            }

            '"' => self.string(diagnostics),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                diagnostics.report_scan(&ScanError {
                    line: self.line,
                    lexeme: c.to_string(),
                    message: "unexpected character".to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics<'static>) {
        let mut sink: Vec<u8> = Vec::new();
        // Leak the sink so the returned Diagnostics can outlive this helper;
        // test-only, and each call is a handful of bytes.
        let sink: &'static mut Vec<u8> = Box::leak(Box::new(std::mem::take(&mut sink)));
        let mut diagnostics = Diagnostics::new(sink);
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(source: &str) -> Vec<TokenType> {
        scan(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_and_double_char_tokens() {
        assert_eq!(
            kinds("!= == <= >= ="),
            vec![
                TokenType::BangEqual,
                TokenType::EqualEqual,
                TokenType::LessEqual,
                TokenType::GreaterEqual,
                TokenType::Equal,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn keywords_vs_identifiers() {
        assert_eq!(
            kinds("class classy"),
            vec![TokenType::Class, TokenType::Identifier, TokenType::Eof]
        );
    }

    #[test]
    fn number_literal() {
        let (tokens, _) = scan("123.45");
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.45)));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        let (tokens, _) = scan("123.");
        assert_eq!(tokens[0].kind, TokenType::Number);
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[1].kind, TokenType::Dot);
    }

    #[test]
    fn leading_dot_is_not_a_number() {
        assert_eq!(kinds(".5"), vec![TokenType::Dot, TokenType::Number, TokenType::Eof]);
    }

    #[test]
    fn multiline_string_tracks_line_count() {
        let (tokens, _) = scan("\"a\nb\" +");
        assert_eq!(tokens[0].literal, Some(Literal::String("a\nb".to_string())));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_reports_error() {
        let (_, diagnostics) = scan("\"unterminated");
        assert!(diagnostics.had_syntax_error);
    }

    #[test]
    fn unexpected_character_reports_and_continues() {
        let (tokens, diagnostics) = scan("1 @ 2");
        assert!(diagnostics.had_syntax_error);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenType::Number, TokenType::Number, TokenType::Eof]
        );
    }

    #[test]
    fn line_comment_consumes_to_end_of_line() {
        assert_eq!(
            kinds("1 // a comment\n2"),
            vec![TokenType::Number, TokenType::Number, TokenType::Eof]
        );
    }
}
