use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// A person within the organisation.
#[derive(Debug, Clone)]
pub struct Person {
    /// Display name, not required to be unique
    name: String,
    /// Index of the manager in the arena, None for the CEO
    parent: Option<Index>,
    /// Indices of direct reports, in insertion order
    children: Vec<Index>,
}

impl Person {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based storage for one organisation.
///
/// Nodes refer to each other by generational index only. The parent link is
/// never used to free memory: dropping the arena drops every person at once.
/// Nodes are only ever appended, so the root is always present.
#[derive(Debug)]
pub struct PersonArena {
    arena: Arena<Person>,
    root: Index,
}

impl PersonArena {
    pub fn with_root(name: String) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Person {
            name,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Appends a new person below `parent`. Returns None if `parent` is not in this arena.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: Index, name: String) -> Option<Index> {
        if !self.arena.contains(parent) {
            return None;
        }
        let child_idx = self.arena.insert(Person {
            name,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(child_idx);
        }
        Some(child_idx)
    }

    pub fn get(&self, idx: Index) -> Option<&Person> {
        self.arena.get(idx)
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk of the whole chart.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.root)
    }

    /// Pre-order walk of the subtree rooted at `start`.
    pub fn iter_from(&self, start: Index) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, start)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    pub fn iter_postorder_from(&self, start: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, start)
    }

    /// Distance from the root, counting the root as level 1.
    ///
    /// Walks the parent chain instead of recursing so tall charts stay off the call stack.
    #[instrument(level = "trace", skip(self))]
    pub fn level(&self, idx: Index) -> usize {
        let mut level = 1;
        let mut current = self.get(idx).and_then(Person::parent);
        while let Some(parent_idx) = current {
            level += 1;
            current = self.get(parent_idx).and_then(Person::parent);
        }
        level
    }

    /// Number of people in the subtree, `idx` included.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_size(&self, idx: Index) -> usize {
        self.iter_from(idx).count()
    }

    /// Longest downward edge path from `idx`; a leaf has height 0.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_height(&self, idx: Index) -> usize {
        let mut max_height = 0;
        let mut stack = vec![(idx, 0usize)];

        while let Some((current_idx, height)) = stack.pop() {
            if let Some(node) = self.get(current_idx) {
                max_height = max_height.max(height);
                for &child in &node.children {
                    stack.push((child, height + 1));
                }
            }
        }

        max_height
    }

    /// First person named `name` in pre-order below and including `idx`.
    ///
    /// Returns as soon as a match is seen; later siblings are never visited.
    #[instrument(level = "trace", skip(self))]
    pub fn find_from(&self, idx: Index, name: &str) -> Option<Index> {
        self.iter_from(idx)
            .find(|(_, node)| node.name == name)
            .map(|(found_idx, _)| found_idx)
    }

    /// Names of all people without reports, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self, idx: Index) -> Vec<&str> {
        self.iter_from(idx)
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.name.as_str())
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a PersonArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a PersonArena, start: Index) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push(start);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a Person);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a PersonArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a PersonArena, start: Index) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push((start, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a Person);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
