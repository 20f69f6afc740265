//! Order-statistic set backed by a size-augmented treap.
//!
//! Every node records the size of its subtree, so the key at a given rank
//! can be found on a single root-to-leaf walk. Insert, remove and select
//! are all expected O(log n).
//!
//! # Structure
//!
//! Keys obey binary-search-tree order, node priorities obey max-heap order.
//! Priorities are drawn from a seeded RNG so a given sequence of operations
//! always builds the same tree.

use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default priority seed.
pub const DEFAULT_SEED: u64 = 0x7478_6772_6170_6800;

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    priority: u64,
    size: usize,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K, priority: u64) -> Box<Self> {
        Box::new(Self {
            key,
            priority,
            size: 1,
            left: None,
            right: None,
        })
    }

    fn refresh(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

fn size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Join two treaps where every key in `left` is below every key in `right`.
fn merge<K>(left: Link<K>, right: Link<K>) -> Link<K> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut l), Some(mut r)) => {
            if l.priority >= r.priority {
                l.right = merge(l.right.take(), Some(r));
                l.refresh();
                Some(l)
            } else {
                r.left = merge(Some(l), r.left.take());
                r.refresh();
                Some(r)
            }
        }
    }
}

/// Split into keys `< pivot` and keys `>= pivot`.
fn split<K: Ord>(link: Link<K>, pivot: &K) -> (Link<K>, Link<K>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    if node.key < *pivot {
        let (below, above) = split(node.right.take(), pivot);
        node.right = below;
        node.refresh();
        (Some(node), above)
    } else {
        let (below, above) = split(node.left.take(), pivot);
        node.left = above;
        node.refresh();
        (below, Some(node))
    }
}

fn remove<K: Ord>(link: &mut Link<K>, key: &K) -> Option<K> {
    let ordering = key.cmp(&link.as_ref()?.key);
    if ordering == Ordering::Equal {
        let node = link.take()?;
        let Node {
            key, left, right, ..
        } = *node;
        *link = merge(left, right);
        return Some(key);
    }

    let node = link.as_mut()?;
    let removed = match ordering {
        Ordering::Less => remove(&mut node.left, key),
        _ => remove(&mut node.right, key),
    };
    if removed.is_some() {
        node.size -= 1;
    }
    removed
}

/// A sorted set with rank queries.
pub struct RankTree<K> {
    root: Link<K>,
    rng: StdRng,
}

impl<K: Ord> RankTree<K> {
    /// Create an empty tree with the default priority seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create an empty tree with an explicit priority seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Insert a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        let priority = self.rng.gen::<u64>();
        let (below, above) = split(self.root.take(), &key);
        self.root = merge(merge(below, Some(Node::leaf(key, priority))), above);
        true
    }

    /// Remove a key, returning it if it was present.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        remove(&mut self.root, key)
    }

    /// The key at 0-indexed `rank` in ascending order.
    pub fn select(&self, rank: usize) -> Option<&K> {
        let mut rank = rank;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            let left = size(&node.left);
            cursor = match rank.cmp(&left) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    rank -= left + 1;
                    node.right.as_deref()
                }
            };
        }
        None
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&K> {
        self.select(0)
    }

    /// Largest key.
    pub fn last(&self) -> Option<&K> {
        self.len().checked_sub(1).and_then(|rank| self.select(rank))
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.descend(self.root.as_deref());
        iter
    }

    /// Remove every key. The priority sequence continues from where it was.
    pub fn clear(&mut self) {
        self.root = None;
    }
}

impl<K: Ord> Default for RankTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for RankTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord> IntoIterator for &'a RankTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`RankTree`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn descend(&mut self, mut cursor: Option<&'a Node<K>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
