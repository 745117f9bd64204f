//! Binary serialization: the `ntsf` header followed by a pre-order block
//! stream.
//!
//! Encoding flattens the tree with an explicit DFS stack, consulting the
//! back-reference dictionary once per node. Decoding streams blocks straight
//! into the [`TreeBuilder`]; nothing but the dictionary, the parent stack,
//! and the growing tree is held in memory.

use crate::backrefs::BackrefTable;
use crate::block::{self, BlockReader, WordField};
use crate::builder::TreeBuilder;
use crate::codec::{Codec, HEADER_LEN};
use crate::error::{Error, Result};
use crate::tree::NGramTree;
use std::io::{Read, Write};

/// Statistics from one binary serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Nodes emitted (equals the tree's node count).
    pub nodes_written: usize,
    /// Nodes emitted as back-reference blocks.
    pub backreferences: usize,
    /// Total bytes written, header included.
    pub bytes_written: usize,
}

impl EncodeStats {
    /// Fraction of nodes that were emitted as back-references.
    pub fn backreference_ratio(&self) -> f64 {
        if self.nodes_written == 0 {
            0.0
        } else {
            self.backreferences as f64 / self.nodes_written as f64
        }
    }
}

/// Serializes `tree` with the default codec.
///
/// The writer should be buffered; blocks are written as they are produced
/// and the stream is not flushed here.
pub fn serialize_binary<W: Write>(tree: &NGramTree, out: &mut W) -> Result<EncodeStats> {
    serialize_binary_with_codec(tree, Codec::DEFAULT, out)
}

/// Serializes `tree` with an explicit codec.
pub fn serialize_binary_with_codec<W: Write>(
    tree: &NGramTree,
    codec: Codec,
    out: &mut W,
) -> Result<EncodeStats> {
    let mut table = BackrefTable::new(codec.dict_size());
    let mut stats = EncodeStats {
        nodes_written: 0,
        backreferences: 0,
        bytes_written: HEADER_LEN,
    };

    out.write_all(&codec.header())?;

    let mut stack = vec![tree.root()];
    while let Some(key) = stack.pop() {
        let word = tree.word(key);
        let n_children = tree.child_count(key) as u32;

        let block = match table.check(word) {
            Some(index) => {
                stats.backreferences += 1;
                block::encode_backref(&codec, index, n_children)?
            }
            None => block::encode_standard(&codec, word, n_children)?,
        };
        out.write_all(&block)?;

        stats.nodes_written += 1;
        stats.bytes_written += block.len();
        stack.extend(tree.children(key));
    }

    Ok(stats)
}

/// Deserializes a binary stream back into a tree.
///
/// The reader should be buffered; the stream is consumed byte by byte and
/// never rewound.
pub fn deserialize_binary<R: Read>(input: &mut R) -> Result<NGramTree> {
    let codec = read_header(input)?;
    let mut table = BackrefTable::new(codec.dict_size());
    let mut reader = BlockReader::new(input, codec);
    let mut builder = TreeBuilder::new();

    while let Some(block) = reader.next_block()? {
        let word = match block.word {
            WordField::Literal(word) => word,
            WordField::Backref(index) => table.resolve(index as usize)?.to_owned(),
        };
        table.record(&word);
        builder.push_node(word, block.n_children)?;
    }

    builder.finish()
}

/// Reads and validates the 6-byte header.
///
/// A stream with no bytes at all is [`Error::EmptyStream`]; a stream that
/// ends partway through the header is [`Error::MalformedHeader`].
fn read_header<R: Read>(input: &mut R) -> Result<Codec> {
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        match input.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    match filled {
        0 => Err(Error::EmptyStream),
        n if n < HEADER_LEN => Err(Error::MalformedHeader("file too small")),
        _ => Codec::from_header(&header),
    }
}
