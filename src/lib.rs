//! # NTS - N-Gram Tree Serialization
//!
//! A compact, self-describing binary (and parallel textual) encoding for
//! rooted, unordered, word-labeled trees — the shape used by n-gram
//! language models, where each root-to-node path spells an n-gram.
//!
//! A tree is flattened into a pre-order stream of per-node blocks. Nodes
//! whose word was recently seen are emitted as two-byte back-references
//! into a rolling-hash dictionary that the encoder and decoder maintain in
//! lockstep, and child counts take only as many bytes as they need (none
//! at all for leaves). Decoding is single-pass: a stack of parent frames
//! reattaches every node in O(depth) memory without buffering the stream.
//!
//! ## Example
//!
//! ```
//! use nts_rs::{deserialize_binary, serialize_binary, NGramTree};
//!
//! let mut tree = NGramTree::new("hello");
//! tree.add_ngram(["my", "name", "is"]);
//! tree.add_ngram(["my", "friend"]);
//!
//! let mut bytes = Vec::new();
//! let stats = serialize_binary(&tree, &mut bytes).unwrap();
//! assert_eq!(stats.nodes_written, tree.node_count());
//!
//! let decoded = deserialize_binary(&mut bytes.as_slice()).unwrap();
//! assert!(tree.deep_equals(&decoded));
//! ```
//!
//! ## Textual format
//!
//! The same trees also serialize to a printable, transport-safe form with
//! identical semantics:
//!
//! ```
//! use nts_rs::{deserialize_text, serialize_text, NGramTree};
//!
//! let mut tree = NGramTree::new("x");
//! tree.add_word(tree.root(), "y");
//!
//! let text = serialize_text(&tree).unwrap();
//! assert_eq!(text, "x|1]y|0]");
//! assert!(tree.deep_equals(&deserialize_text(&text).unwrap()));
//! ```
//!
//! ## Guarantees
//!
//! - Round-trips preserve structure and words exactly; child order is
//!   unspecified (children are a word-keyed set), so equality is
//!   [`NGramTree::deep_equals`], not byte equality of two encodings.
//! - Back-references are an optimization, not a promise: a hash collision
//!   silently evicts the earlier word, and the next occurrence is simply
//!   spelled out again.
//! - A stream encodes exactly one complete rooted tree; anything less is a
//!   decode error, never a partial tree.

mod backrefs;
mod binary;
mod block;
mod builder;
mod codec;
mod error;
mod files;
mod generate;
mod text;
mod tree;
mod varint;

pub mod levenshtein;

#[cfg(test)]
mod tests;

pub use binary::{deserialize_binary, serialize_binary, serialize_binary_with_codec, EncodeStats};
pub use codec::{Codec, HEADER_LEN, MAGIC};
pub use error::{Error, Result};
pub use files::{
    is_recognized_extension, read_binary_file, read_text_file, read_tree_file, write_binary_file,
    write_text_file, RECOGNIZED_EXTENSIONS,
};
pub use generate::{random_tree, random_tree_seeded};
pub use text::{
    deserialize_text, deserialize_text_with_codec, serialize_text, serialize_text_with_codec,
};
pub use tree::{NGramTree, NodeKey, TreeStats};
