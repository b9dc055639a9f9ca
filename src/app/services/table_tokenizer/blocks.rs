//! Location of embedded `OPEN ... close` sub-blocks inside a record body

use super::schema::ColumnSchema;
use super::tokenizer::{self, Table};
use crate::app::models::Occurrence;
use crate::app::services::lexer::{Lexer, Token};
use crate::constants::{TABLE_CLOSE, TABLE_OPEN};
use crate::{Error, Result};
use tracing::debug;

/// One embedded block, borrowed from the record body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Text from the opening keyword through the closing keyword
    pub outer: &'a str,
    /// Text strictly between the keywords
    pub inner: &'a str,
}

/// Every `open ... close` block in document order
///
/// Keywords are whole tokens outside quoted strings. A block runs from an
/// opening keyword to the next closing keyword; an opening keyword with no
/// closing one is ignored.
pub fn find_blocks<'a>(body: &'a str, open: &str, close: &str) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut opened: Option<Token<'a>> = None;

    for token in Lexer::new(body) {
        match opened {
            None if token.text == open => opened = Some(token),
            Some(start) if token.text == close => {
                blocks.push(Block {
                    outer: &body[start.start..token.end],
                    inner: &body[start.end..token.start],
                });
                opened = None;
            }
            _ => {}
        }
    }

    if let Some(start) = opened {
        debug!("Ignoring unterminated {} block at byte {}", open, start.start);
    }
    blocks
}

/// The block chosen by an occurrence policy
pub fn select_block<'a>(
    body: &'a str,
    open: &str,
    close: &str,
    occurrence: Occurrence,
) -> Result<Block<'a>> {
    let blocks = find_blocks(body, open, close);
    let index = occurrence
        .index(blocks.len())
        .map_err(|_| Error::missing_block(open, close, occurrence, blocks.len()))?;
    Ok(blocks[index])
}

/// Locate the selected `TBLE ... tble` block of a body and tokenize it
pub fn parse_table(body: &str, schema: &ColumnSchema, occurrence: Occurrence) -> Result<Table> {
    let block = select_block(body, TABLE_OPEN, TABLE_CLOSE, occurrence)?;
    Ok(tokenizer::tokenize(block.inner, schema))
}
