//! Streaming tree reconstruction.
//!
//! Both decoders hand this builder one `(word, child_count)` pair per block,
//! in pre-order. The builder keeps a LIFO stack of parent frames; because
//! pre-order emits a parent before its whole subtree, the top live frame is
//! always the parent of the next arriving node, at O(depth) memory and O(1)
//! amortized work per node.

use crate::error::{Error, Result};
use crate::tree::{NGramTree, NodeKey};

/// A parent whose children have not all been attached yet.
#[derive(Debug)]
struct Frame {
    node: NodeKey,
    remaining: u32,
}

/// Reconstructs a tree from a pre-order stream of nodes.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    tree: Option<NGramTree>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            tree: None,
            stack: Vec::new(),
        }
    }

    /// Accepts the next node of the stream and attaches it to its parent.
    ///
    /// The first node becomes the root. Frames are pushed only while they
    /// still expect children, and completed frames are deflated off the top
    /// so the live parent stays exposed.
    pub(crate) fn push_node(&mut self, word: String, n_children: u32) -> Result<()> {
        let tree = match self.tree.as_mut() {
            None => {
                let tree = NGramTree::new(word);
                if n_children > 0 {
                    self.stack.push(Frame {
                        node: tree.root(),
                        remaining: n_children,
                    });
                }
                self.tree = Some(tree);
                return Ok(());
            }
            Some(tree) => tree,
        };

        let parent = self.stack.last_mut().ok_or(Error::TrailingData)?;
        let parent_key = parent.node;
        parent.remaining -= 1;
        if parent.remaining == 0 {
            self.stack.pop();
        }

        let child = tree.add_child(parent_key, word);
        if n_children > 0 {
            self.stack.push(Frame {
                node: child,
                remaining: n_children,
            });
        }

        // deflate: pop completed frames until a parent with outstanding
        // children is on top
        while let Some(top) = self.stack.last() {
            if top.remaining > 0 {
                break;
            }
            self.stack.pop();
        }

        Ok(())
    }

    /// Finishes the stream and hands over the reconstructed tree.
    ///
    /// # Errors
    /// [`Error::EmptyStream`] when no node arrived at all;
    /// [`Error::TruncatedStream`] when parents are still waiting for
    /// children.
    pub(crate) fn finish(self) -> Result<NGramTree> {
        let tree = self.tree.ok_or(Error::EmptyStream)?;
        if !self.stack.is_empty() {
            return Err(Error::TruncatedStream("tree ended with unfilled parents"));
        }
        Ok(tree)
    }
}
