//! Lazy in-order traversal of the id index.

use super::IndexNode;
use crate::types::NodeId;
use std::iter::FusedIterator;

/// Ascending iterator over `(key, &value)` pairs.
///
/// Keeps an explicit stack of `(node, next entry)` frames, so memory use is
/// bounded by the tree height.
pub struct Iter<'a, V> {
    stack: Vec<(&'a IndexNode<V>, usize)>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(root: Option<&'a IndexNode<V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_leftmost(root);
        }
        iter
    }

    fn descend_leftmost(&mut self, mut node: &'a IndexNode<V>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) if !node.leaf => node = child,
                _ => break,
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (NodeId, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let node = top.0;
            let idx = top.1;
            if idx < node.entries.len() {
                top.1 += 1;
                if !node.leaf {
                    self.descend_leftmost(&node.children[idx + 1]);
                }
                self.remaining = self.remaining.saturating_sub(1);
                let entry = &node.entries[idx];
                return Some((entry.key, &entry.value));
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
