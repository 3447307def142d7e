//! Parent/child reconstruction of a flat progress event list.
//!
//! The first input event is always the root. Every later event is attached
//! under the first node (pre-order) whose `id` matches its `parent_id`; events
//! whose parent is not in the tree yet are dropped, so inputs must list
//! parents before their children.

use super::ProgressEvent;

#[derive(Debug, Clone, PartialEq)]
struct IntervalNode {
    item: ProgressEvent,
    children: Vec<usize>,
}

/// Arena-backed interval tree. Index 0 is the root when non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalForest {
    nodes: Vec<IntervalNode>,
    dropped: usize,
}

impl IntervalForest {
    pub fn build(events: &[ProgressEvent]) -> Self {
        let mut forest = Self::default();
        let Some((root, rest)) = events.split_first() else {
            return forest;
        };

        forest.nodes.push(IntervalNode {
            item: root.clone(),
            children: Vec::new(),
        });

        for event in rest {
            match forest.find(event.parent_id) {
                Some(parent) => {
                    let index = forest.nodes.len();
                    forest.nodes.push(IntervalNode {
                        item: event.clone(),
                        children: Vec::new(),
                    });
                    forest.nodes[parent].children.push(index);
                }
                None => {
                    log::trace!(
                        "Dropping progress event {} '{}': parent {} not in tree",
                        event.id,
                        event.name,
                        event.parent_id
                    );
                    forest.dropped += 1;
                }
            }
        }

        forest
    }

    /// Arena index of the first node in pre-order whose id is `id`.
    pub fn find(&self, id: u64) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.item.id == id {
                return Some(index);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Arena indices in pre-order: root, then each child subtree in insertion order.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        order
    }

    pub fn flatten(&self) -> Vec<ProgressEvent> {
        self.preorder()
            .into_iter()
            .map(|index| self.nodes[index].item.clone())
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&ProgressEvent> {
        self.nodes.get(index).map(|node| &node.item)
    }

    pub fn children(&self, index: usize) -> &[usize] {
        self.nodes
            .get(index)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Input events that were left out because their parent was not found.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
