//! Random tree generation for round-trip checks and benches.

use crate::tree::NGramTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates a tree bounded by depth, branching factor, and node count.
///
/// Words are short lowercase ASCII, so generated trees are valid for both
/// the binary and the textual codec. Sibling word collisions are skipped,
/// which only makes a node's fan-out smaller than the dice roll.
pub fn random_tree<R: Rng>(
    rng: &mut R,
    max_depth: usize,
    max_branch: usize,
    max_nodes: usize,
) -> NGramTree {
    let mut tree = NGramTree::new(random_word(rng));
    let mut frontier = vec![(tree.root(), 0usize)];
    let mut nodes = 1usize;

    while let Some((key, depth)) = frontier.pop() {
        if depth >= max_depth {
            continue;
        }
        let branches = rng.gen_range(0..=max_branch);
        for _ in 0..branches {
            if nodes >= max_nodes {
                return tree;
            }
            let word = random_word(rng);
            if tree.child_by_word(key, &word).is_some() {
                continue;
            }
            let child = tree.add_word(key, &word);
            nodes += 1;
            frontier.push((child, depth + 1));
        }
    }

    tree
}

/// [`random_tree`] with a deterministic generator, for reproducible tests.
pub fn random_tree_seeded(
    seed: u64,
    max_depth: usize,
    max_branch: usize,
    max_nodes: usize,
) -> NGramTree {
    random_tree(&mut StdRng::seed_from_u64(seed), max_depth, max_branch, max_nodes)
}

fn random_word<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(1..=8);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}
