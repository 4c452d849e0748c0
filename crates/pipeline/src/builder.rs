//! Sentence assembly from typed tokens.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use synonymizer_core::token::{Token, TypedToken};

use crate::resolver::{Lookup, ThesaurusResolver};
use crate::selector::select;

static SPACES_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +\n").expect("static regex"));

/// One output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Word(String),
    Newline,
}

/// Join pieces with single spaces, never before or after a line break.
pub fn assemble(pieces: &[Piece]) -> String {
    let mut out = String::new();
    let mut after_newline = false;

    for piece in pieces {
        match piece {
            Piece::Newline => {
                if out.ends_with(' ') {
                    out.pop();
                }
                out.push('\n');
                after_newline = true;
            }
            Piece::Word(word) => {
                if !out.is_empty() && !after_newline {
                    out.push(' ');
                }
                out.push_str(word);
                after_newline = false;
            }
        }
    }

    SPACES_BEFORE_NEWLINE.replace_all(&out, "\n").into_owned()
}

/// Resolve and select a replacement for every word, then assemble.
///
/// `mode` decides whether cache misses may go to the network.
pub async fn build<R: Rng + ?Sized>(
    typed: &[TypedToken],
    resolver: &ThesaurusResolver,
    mode: Lookup,
    rng: &mut R,
) -> String {
    let mut pieces = Vec::with_capacity(typed.len());

    for t in typed {
        match &t.token {
            Token::Newline => pieces.push(Piece::Newline),
            Token::Word(word) => {
                let entry = resolver.lookup(word, mode).await;
                pieces.push(Piece::Word(select(word, t.category, entry.as_ref(), rng)));
            }
        }
    }

    assemble(&pieces)
}
