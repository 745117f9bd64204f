//! Textual serialization: printable framing, identical semantics.
//!
//! A standard block is `word|count]`, a back-reference block is
//! `}index|count]`, with counts and indexes as decimal digits. The format
//! carries no header, so both sides must agree on the codec out of band
//! (the default dictionary of 255 slots unless stated otherwise). Hashing,
//! dictionary updates, and reconstruction are shared with the binary codec.

use crate::backrefs::BackrefTable;
use crate::builder::TreeBuilder;
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::tree::NGramTree;
use std::str::FromStr;

/// Ends the word (or index) field of a block.
const WORD_END: char = '|';
/// Ends a block.
const BLOCK_END: char = ']';
/// Marks the next field as a back-reference index.
const BACKREF_MARK: char = '}';

/// Validates that `word` contains no framing characters.
fn check_word(word: &str) -> Result<()> {
    if word.is_empty() {
        return Err(Error::EmptyWord);
    }
    for ch in word.chars() {
        if matches!(ch, WORD_END | BLOCK_END | BACKREF_MARK) {
            return Err(Error::IllegalChar {
                ch,
                word: word.to_owned(),
            });
        }
    }
    Ok(())
}

/// Serializes `tree` as text with the default codec.
pub fn serialize_text(tree: &NGramTree) -> Result<String> {
    serialize_text_with_codec(tree, Codec::DEFAULT)
}

/// Serializes `tree` as text with an explicit codec (only the dictionary
/// size matters here).
pub fn serialize_text_with_codec(tree: &NGramTree, codec: Codec) -> Result<String> {
    let mut table = BackrefTable::new(codec.dict_size());
    let mut flattened = String::new();

    let mut stack = vec![tree.root()];
    while let Some(key) = stack.pop() {
        let word = tree.word(key);
        check_word(word)?;

        match table.check(word) {
            Some(index) => {
                flattened.push(BACKREF_MARK);
                flattened.push_str(&index.to_string());
            }
            None => flattened.push_str(word),
        }
        flattened.push(WORD_END);
        flattened.push_str(&tree.child_count(key).to_string());
        flattened.push(BLOCK_END);

        stack.extend(tree.children(key));
    }

    Ok(flattened)
}

/// Deserializes a textual stream back into a tree, default codec.
pub fn deserialize_text(data: &str) -> Result<NGramTree> {
    deserialize_text_with_codec(data, Codec::DEFAULT)
}

/// Deserializes a textual stream with an explicit codec.
pub fn deserialize_text_with_codec(data: &str, codec: Codec) -> Result<NGramTree> {
    let mut table = BackrefTable::new(codec.dict_size());
    let mut builder = TreeBuilder::new();

    let mut buf = String::new();
    let mut letter: Option<String> = None;
    let mut is_backref = false;

    for ch in data.chars() {
        match ch {
            BLOCK_END => {
                let n_children: u32 = parse_field(&buf)?;
                buf.clear();
                let word = letter.take().unwrap_or_default();
                is_backref = false;

                table.record(&word);
                builder.push_node(word, n_children)?;
            }
            BACKREF_MARK => is_backref = true,
            WORD_END => {
                let resolved = if is_backref {
                    let index: usize = parse_field(&buf)?;
                    table.resolve(index)?.to_owned()
                } else {
                    buf.clone()
                };
                buf.clear();
                letter = Some(resolved);
            }
            _ => buf.push(ch),
        }
    }

    if !buf.is_empty() || letter.is_some() {
        return Err(Error::TruncatedStream("text ended inside a block"));
    }

    builder.finish()
}

fn parse_field<T: FromStr>(field: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| Error::BadNumber(field.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_child_exact_text() {
        let mut tree = NGramTree::new("x");
        tree.add_word(tree.root(), "y");
        assert_eq!(serialize_text(&tree).unwrap(), "x|1]y|0]");
    }

    #[test]
    fn test_decode_scenario() {
        let tree = deserialize_text("x|1]y|0]").unwrap();
        assert_eq!(tree.word(tree.root()), "x");
        assert!(tree.child_by_word(tree.root(), "y").is_some());
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_backreference_roundtrip() {
        let mut tree = NGramTree::new("a");
        tree.add_word(tree.root(), "a");
        tree.add_word(tree.root(), "b");

        let text = serialize_text(&tree).unwrap();
        // the repeated "a" is emitted through the dictionary
        assert!(text.contains('}'));

        let decoded = deserialize_text(&text).unwrap();
        assert!(tree.deep_equals(&decoded));
    }

    #[test]
    fn test_decode_explicit_backreference() {
        // hash("a") = ('a' - 0x20 + 1) mod 255 = 66
        let tree = deserialize_text("a|1]}66|0]").unwrap();
        let child = tree.child_by_word(tree.root(), "a").unwrap();
        assert_eq!(tree.word(child), "a");
    }

    #[test]
    fn test_rejects_framing_chars_in_words() {
        for bad in ["pipe|d", "brack]et", "brace}d"] {
            let tree = NGramTree::new(bad);
            assert!(matches!(
                serialize_text(&tree),
                Err(Error::IllegalChar { .. })
            ));
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(deserialize_text(""), Err(Error::EmptyStream)));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(matches!(
            deserialize_text("x|0]abc"),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_bad_count_field() {
        assert!(matches!(
            deserialize_text("x|zz]"),
            Err(Error::BadNumber(_))
        ));
    }

    #[test]
    fn test_backref_out_of_range() {
        assert!(matches!(
            deserialize_text("}300|0]"),
            Err(Error::IndexOutOfRange { index: 300, .. })
        ));
        assert!(matches!(
            deserialize_text("}5|0]"),
            Err(Error::IndexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_structural_truncation() {
        assert!(matches!(
            deserialize_text("x|2]y|0]"),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_trailing_block() {
        assert!(matches!(
            deserialize_text("x|0]y|0]"),
            Err(Error::TrailingData)
        ));
    }

    #[test]
    fn test_custom_dictionary_size() {
        let codec = Codec::new(0xF0, 10).unwrap();
        let mut tree = NGramTree::new("the");
        tree.add_ngram(["quick", "the", "quick"]);

        let text = serialize_text_with_codec(&tree, codec).unwrap();
        let decoded = deserialize_text_with_codec(&text, codec).unwrap();
        assert!(tree.deep_equals(&decoded));
    }
}
