//! The in-memory n-gram tree.
//!
//! Each root-to-node path spells an n-gram of words. Nodes live in a
//! `SlotMap` arena and point at each other through generational keys, so
//! walks, drops, and comparisons are all iterative no matter how deep the
//! tree gets. Children are a word-keyed map: a node has at most one child
//! per distinct word, and attaching a duplicate word replaces the previous
//! child.

use crate::levenshtein;
use ahash::AHashMap as HashMap;
use slotmap::{DefaultKey, SlotMap};

/// Key addressing one node inside an [`NGramTree`] arena.
pub type NodeKey = DefaultKey;

#[derive(Debug, Clone)]
pub(crate) struct WordNode {
    pub(crate) word: String,
    pub(crate) children: HashMap<String, NodeKey>,
}

/// A rooted, unordered, word-labeled tree.
#[derive(Debug, Clone)]
pub struct NGramTree {
    pub(crate) nodes: SlotMap<NodeKey, WordNode>,
    root: NodeKey,
}

impl NGramTree {
    /// Creates a tree holding a single root node.
    pub fn new(root_word: impl Into<String>) -> Self {
        let mut nodes = SlotMap::new();
        let root = nodes.insert(WordNode {
            word: root_word.into(),
            children: HashMap::new(),
        });
        Self { nodes, root }
    }

    /// Key of the root node.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// The word carried by `key`.
    pub fn word(&self, key: NodeKey) -> &str {
        &self.nodes[key].word
    }

    /// Number of children directly attached to `key`.
    pub fn child_count(&self, key: NodeKey) -> usize {
        self.nodes[key].children.len()
    }

    /// The direct children of `key`, in unspecified order.
    pub fn children(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes[key].children.values().copied()
    }

    /// The words of `key`'s direct children, in unspecified order.
    pub fn child_words(&self, key: NodeKey) -> impl Iterator<Item = &str> {
        self.nodes[key].children.keys().map(String::as_str)
    }

    /// Looks up the child of `key` carrying exactly `word`.
    pub fn child_by_word(&self, key: NodeKey, word: &str) -> Option<NodeKey> {
        self.nodes[key].children.get(word).copied()
    }

    /// Attaches a fresh node under `parent`.
    ///
    /// If `parent` already has a child with this word, that child and its
    /// whole subtree are replaced.
    pub fn add_child(&mut self, parent: NodeKey, word: impl Into<String>) -> NodeKey {
        let word = word.into();
        let child = self.nodes.insert(WordNode {
            word: word.clone(),
            children: HashMap::new(),
        });
        if let Some(displaced) = self.nodes[parent].children.insert(word, child) {
            self.remove_branch(displaced);
        }
        child
    }

    /// Returns the child of `parent` carrying `word`, inserting it first if
    /// absent.
    pub fn add_word(&mut self, parent: NodeKey, word: &str) -> NodeKey {
        match self.nodes[parent].children.get(word) {
            Some(&existing) => existing,
            None => self.add_child(parent, word),
        }
    }

    /// Inserts an n-gram as a branch starting at the root.
    ///
    /// `["the", "quick", "brown", "fox"]` creates (or follows) the branch
    /// `the -> quick -> brown -> fox`.
    pub fn add_ngram<'a, I>(&mut self, ngram: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self.root;
        for word in ngram {
            node = self.add_word(node, word);
        }
    }

    /// Deep node count of the subtree rooted at `key`, including `key`.
    pub fn branch_size(&self, key: NodeKey) -> usize {
        let mut stack = vec![key];
        let mut seen = 0;
        while let Some(node) = stack.pop() {
            seen += 1;
            stack.extend(self.children(node));
        }
        seen
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.branch_size(self.root)
    }

    /// Structural equality with another tree, ignoring child order.
    pub fn deep_equals(&self, other: &NGramTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((mine, theirs)) = stack.pop() {
            let a = &self.nodes[mine];
            let b = &other.nodes[theirs];
            if a.word != b.word || a.children.len() != b.children.len() {
                return false;
            }
            for (word, &child) in &a.children {
                match b.children.get(word) {
                    Some(&counterpart) => stack.push((child, counterpart)),
                    None => return false,
                }
            }
        }
        true
    }

    /// Guesses for the word following `ngram`.
    ///
    /// Walks from the root, descending through the child closest to each
    /// query word by edit distance, and returns the child words of the node
    /// reached. The walk stops early at leaves and at empty query words.
    pub fn predict_next_word(&self, ngram: &[&str]) -> Vec<&str> {
        let mut node = self.root;
        for word in ngram {
            if self.nodes[node].children.is_empty() || word.is_empty() {
                break;
            }
            let closest = levenshtein::find_closest(word, self.child_words(node))
                .expect("node has children");
            node = self.nodes[node].children[closest];
        }
        self.child_words(node).collect()
    }

    /// Shape statistics for the whole tree.
    pub fn stats(&self) -> TreeStats {
        let mut stack = vec![(self.root, 0usize)];
        let mut stats = TreeStats {
            node_count: 0,
            leaf_count: 0,
            max_depth: 0,
        };
        while let Some((key, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if self.nodes[key].children.is_empty() {
                stats.leaf_count += 1;
            }
            stack.extend(self.children(key).map(|child| (child, depth + 1)));
        }
        stats
    }

    /// Removes a detached subtree from the arena.
    fn remove_branch(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(node) = stack.pop() {
            if let Some(removed) = self.nodes.remove(node) {
                stack.extend(removed.children.into_values());
            }
        }
    }
}

/// Shape statistics about a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes, root included.
    pub node_count: usize,
    /// Nodes with no children.
    pub leaf_count: usize,
    /// Longest root-to-leaf path, in edges.
    pub max_depth: usize,
}
