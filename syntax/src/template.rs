//! Splits a prompt template into text and code blocks.
//!
//! Code blocks are delimited by `{{` and `}}`. A `}}` inside a quoted value
//! does not close the block unless the quote is never closed. An unterminated
//! `{{` is kept as plain text.

use crate::{
    error::SyntaxError,
    expression::Expression,
};

/// One piece of a template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Block {
    /// Literal text, rendered as-is.
    Text(String),

    /// A code block.
    Code(Expression),
}

/// A parsed template.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Template {
    blocks: Vec<Block>,
}

impl Template {
    /// Parse a template, validating every code block in it.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let bytes = source.as_bytes();
        let mut blocks = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i + 1 < bytes.len() {
            if bytes[i] == b'{' && bytes[i + 1] == b'{' {
                let end = match find_block_end(bytes, i + 2) {
                    Some(end) => end,
                    None => break,
                };

                if text_start < i {
                    blocks.push(Block::Text(source[text_start..i].to_owned()));
                }

                let content = &source[i + 2..end];

                if !content.trim().is_empty() {
                    blocks.push(Block::Code(Expression::from_source(content)?));
                }

                i = end + 2;
                text_start = i;
                continue;
            }

            i += 1;
        }

        if text_start < source.len() {
            blocks.push(Block::Text(source[text_start..].to_owned()));
        }

        log::trace!("template parsed into {} block(s)", blocks.len());

        Ok(Self {
            blocks,
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterate over the code blocks of this template.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Code(expression) => Some(expression),
            Block::Text(_) => None,
        })
    }
}

/// Find the offset of the `}}` closing a code block whose content starts at
/// `start`, skipping over quoted values.
///
/// A backslash escapes only the enclosing quote or another backslash. If a
/// quote is still open at the end of input, the first `}}` closes the block
/// so that the unterminated value is reported by the lexer.
fn find_block_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote = None;
    let mut first_close = None;
    let mut i = start;

    while i < bytes.len() {
        let byte = bytes[i];
        let closes = byte == b'}' && bytes.get(i + 1) == Some(&b'}');

        if closes && first_close.is_none() {
            first_close = Some(i);
        }

        match quote {
            Some(q) => {
                if byte == b'\\' && matches!(bytes.get(i + 1), Some(&next) if next == q || next == b'\\') {
                    i += 1;
                } else if byte == q {
                    quote = None;
                }
            }
            None => {
                if byte == b'\'' || byte == b'"' {
                    quote = Some(byte);
                } else if closes {
                    return Some(i);
                }
            }
        }

        i += 1;
    }

    quote.and(first_close)
}
