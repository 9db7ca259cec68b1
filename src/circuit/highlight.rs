//! Line-based token classification for Arduino sketches.
//!
//! This is not a lexer. Each line is classified on its own: whole-line
//! comments and preprocessor directives become a single token, every other
//! line is cut into word, whitespace and punctuation runs.

use crate::prelude::HashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const COMMENT_MARKER: &str = "//";
const PREPROCESSOR_MARKER: &str = "#";

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "void",
        "int",
        "float",
        "bool",
        "byte",
        "const",
        "if",
        "else",
        "for",
        "while",
        "return",
        "digitalWrite",
        "digitalRead",
        "analogRead",
        "analogWrite",
        "pinMode",
        "delay",
        "HIGH",
        "LOW",
        "INPUT",
        "OUTPUT",
        "setup",
        "loop",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Plain,
    Keyword,
    Number,
    Comment,
    Preprocessor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(text: &str, kind: TokenKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_alphanumeric() || c == '_' {
            Self::Word
        } else if c.is_whitespace() {
            Self::Space
        } else {
            Self::Other
        }
    }
}

/// Cut a line at every whitespace run and word boundary.
/// The fragments concatenate back to `line` exactly.
fn fragments(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, c) in line.char_indices() {
        let class = CharClass::of(c);
        match current {
            Some(prev) if prev != class => {
                parts.push(&line[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current = Some(class);
    }
    if start < line.len() {
        parts.push(&line[start..]);
    }
    parts
}

fn classify(fragment: &str) -> TokenKind {
    if is_keyword(fragment) {
        TokenKind::Keyword
    } else if !fragment.is_empty() && fragment.bytes().all(|b| b.is_ascii_digit()) {
        TokenKind::Number
    } else {
        TokenKind::Plain
    }
}

/// Classify one line of source
pub fn highlight_line(line: &str) -> Vec<Token> {
    let trimmed = line.trim_start();

    if trimmed.starts_with(COMMENT_MARKER) {
        return vec![Token::new(line, TokenKind::Comment)];
    }
    if trimmed.starts_with(PREPROCESSOR_MARKER) {
        return vec![Token::new(line, TokenKind::Preprocessor)];
    }

    fragments(line)
        .into_iter()
        .map(|part| Token::new(part, classify(part)))
        .collect()
}

/// Classify every `\n`-separated line of a sketch
pub fn highlight_source(source: &str) -> Vec<Vec<Token>> {
    source.split('\n').map(highlight_line).collect()
}
