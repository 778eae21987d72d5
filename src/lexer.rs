//! Tokenizer for propositional expressions.
//!
//! Whitespace is insignificant: `aandb` and `a and b` produce the same tokens.
//! Keywords (`not`, `and`, `or`) are matched greedily at every letter, so a
//! variable letter may touch a keyword without a separating space.

use std::fmt::{self, Display, Formatter};

use crate::error::FormatError;
use crate::ops::Op;
use crate::types::Var;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Op(Op),
    Var(Var),
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Op(op) => write!(f, "{}", op),
            TokenKind::Var(var) => write!(f, "{}", var),
        }
    }
}

/// A token together with its character offset in the input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

const KEYWORDS: [Op; 3] = [Op::Not, Op::And, Op::Or];

pub fn tokenize(input: &str) -> Result<Vec<Token>, FormatError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let position = i;

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        let (kind, width) = match ch {
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '<' | '=' => {
                if chars.get(i + 1) != Some(&'=') {
                    return Err(FormatError::InvalidCharacter { ch, position });
                }
                let op = if ch == '<' { Op::Implies } else { Op::Equiv };
                (TokenKind::Op(op), 2)
            }
            _ if ch.is_ascii_alphabetic() => match keyword_at(&chars[i..]) {
                Some(op) => (TokenKind::Op(op), op.token().len()),
                None => (TokenKind::Var(Var::new(ch)), 1),
            },
            _ => return Err(FormatError::InvalidCharacter { ch, position }),
        };

        tokens.push(Token { kind, position });
        i += width;
    }

    Ok(tokens)
}

fn keyword_at(chars: &[char]) -> Option<Op> {
    KEYWORDS.into_iter().find(|op| {
        let token = op.token();
        token.len() <= chars.len() && token.chars().zip(chars).all(|(a, &b)| a == b)
    })
}
