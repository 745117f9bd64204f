//! Reading and writing serialized tree files.
//!
//! Thin buffered wrappers over the codecs, plus format sniffing by the
//! `ntsf` magic. Writes are not atomic; callers that need atomic
//! replacement should write to a temporary path and rename.

use crate::binary::{deserialize_binary, serialize_binary, EncodeStats};
use crate::codec::MAGIC;
use crate::error::{Error, Result};
use crate::text::{deserialize_text, serialize_text};
use crate::tree::NGramTree;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// File extensions conventionally carrying serialized trees.
pub const RECOGNIZED_EXTENSIONS: [&str; 2] = ["nts", "ngrams"];

/// True for paths ending in `.nts` or `.ngrams`.
pub fn is_recognized_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(&ext))
}

/// Writes `tree` to `path` in the binary format (default codec).
pub fn write_binary_file(path: impl AsRef<Path>, tree: &NGramTree) -> Result<EncodeStats> {
    let mut writer = BufWriter::new(File::create(path)?);
    let stats = serialize_binary(tree, &mut writer)?;
    writer.flush()?;
    Ok(stats)
}

/// Reads a binary-format tree from `path`.
pub fn read_binary_file(path: impl AsRef<Path>) -> Result<NGramTree> {
    deserialize_binary(&mut BufReader::new(File::open(path)?))
}

/// Writes `tree` to `path` in the textual format.
pub fn write_text_file(path: impl AsRef<Path>, tree: &NGramTree) -> Result<()> {
    fs::write(path, serialize_text(tree)?)?;
    Ok(())
}

/// Reads a textual-format tree from `path`.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<NGramTree> {
    deserialize_text(&fs::read_to_string(path)?)
}

/// Reads a tree from `path`, inferring the format.
///
/// Files opening with the `ntsf` magic are decoded as binary; anything
/// else is treated as text.
pub fn read_tree_file(path: impl AsRef<Path>) -> Result<NGramTree> {
    let bytes = fs::read(path)?;
    if bytes.starts_with(&MAGIC) {
        deserialize_binary(&mut bytes.as_slice())
    } else {
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| Error::MalformedHeader("neither an ntsf stream nor text"))?;
        deserialize_text(text)
    }
}
