//! Byte blocks: the encoding unit for a single node.
//!
//! A standard block is the word's bytes, one end-word tag, then the child
//! count. A back-reference block swaps the word bytes for the codec's
//! back-reference byte plus a one-byte dictionary index. Word bytes sit
//! strictly below the back-reference byte, so the decoder can tell the three
//! cases apart from a single byte of lookahead.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::varint;
use std::io::Read;

/// How a block names its word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WordField {
    /// The word's bytes were spelled out in the block.
    Literal(String),
    /// The word lives in the given back-reference dictionary slot.
    Backref(u8),
}

/// One decoded block, before dictionary resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawBlock {
    pub word: WordField,
    pub n_children: u32,
}

/// Validates that `word` can be framed by `codec`.
pub(crate) fn check_word(codec: &Codec, word: &str) -> Result<()> {
    if word.is_empty() {
        return Err(Error::EmptyWord);
    }
    for &byte in word.as_bytes() {
        if !codec.is_word_byte(byte) {
            return Err(Error::IllegalByte {
                byte,
                word: word.to_owned(),
            });
        }
    }
    Ok(())
}

/// Encodes a standard block: word bytes, end-word tag, child count.
pub(crate) fn encode_standard(codec: &Codec, word: &str, n_children: u32) -> Result<Vec<u8>> {
    check_word(codec, word)?;
    let count_len = varint::byte_len(n_children);
    let mut block = Vec::with_capacity(word.len() + 1 + count_len);
    block.extend_from_slice(word.as_bytes());
    block.push(codec.end_word_tag(count_len)?);
    varint::push_be(&mut block, n_children, count_len);
    Ok(block)
}

/// Encodes a back-reference block: `B`, dictionary index, tag, child count.
pub(crate) fn encode_backref(codec: &Codec, index: usize, n_children: u32) -> Result<Vec<u8>> {
    debug_assert!(index < codec.dict_size());
    let count_len = varint::byte_len(n_children);
    let mut block = Vec::with_capacity(3 + count_len);
    block.push(codec.backref_byte());
    block.push(index as u8);
    block.push(codec.end_word_tag(count_len)?);
    varint::push_be(&mut block, n_children, count_len);
    Ok(block)
}

/// Streaming block reader over a byte source.
///
/// Pulls one block at a time without buffering the stream; the word
/// accumulation buffer is the only state carried between calls.
pub(crate) struct BlockReader<R> {
    reader: R,
    codec: Codec,
    buf: Vec<u8>,
}

impl<R: Read> BlockReader<R> {
    pub(crate) fn new(reader: R, codec: Codec) -> Self {
        Self {
            reader,
            codec,
            buf: Vec::new(),
        }
    }

    /// Next byte of the stream, `None` at a clean EOF.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn require_byte(&mut self, context: &'static str) -> Result<u8> {
        self.next_byte()?
            .ok_or(Error::TruncatedStream(context))
    }

    /// Reads the next block, or `None` at the end of the stream.
    pub(crate) fn next_block(&mut self) -> Result<Option<RawBlock>> {
        loop {
            let byte = match self.next_byte()? {
                Some(byte) => byte,
                None if self.buf.is_empty() => return Ok(None),
                None => return Err(Error::TruncatedStream("stream ended inside a word")),
            };

            if self.codec.is_word_byte(byte) {
                self.buf.push(byte);
                continue;
            }

            let (word, tag) = if byte == self.codec.backref_byte() {
                let index = self.require_byte("stream ended inside a back-reference")?;
                let tag = self.require_byte("stream ended before an end-word tag")?;
                // bytes accumulated ahead of a back-reference carry no word
                self.buf.clear();
                (WordField::Backref(index), tag)
            } else {
                (WordField::Literal(self.take_word()?), byte)
            };

            let count_len = tag
                .checked_sub(self.codec.end_word_range_start())
                .ok_or(Error::IllegalByte {
                    byte: tag,
                    word: String::new(),
                })? as usize;
            let n_children = varint::read_be(&mut self.reader, count_len)?;

            return Ok(Some(RawBlock { word, n_children }));
        }
    }

    /// Drains the accumulation buffer into a word.
    fn take_word(&mut self) -> Result<String> {
        String::from_utf8(std::mem::take(&mut self.buf)).map_err(|e| {
            let byte = e.as_bytes()[e.utf8_error().valid_up_to()];
            Error::IllegalByte {
                byte,
                word: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }
        })
    }
}
