use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A single graph node, which is just an identifier and the sequence it carries.
/// Identity is the ID alone; two nodes with the same ID are the same node.
#[derive(Clone, Debug)]
pub struct Node {
    /// Unique node identifier from the graph source
    id: i64,
    /// The sequence on this node
    sequence: String,
}

impl Node {
    /// Constructor
    pub fn new(id: i64, sequence: String) -> Self {
        Self { id, sequence }
    }

    /// Length of the node sequence in bases
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the node carries no sequence
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    // getters
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_id() {
        let n1 = Node::new(3, "ACGT".to_string());
        let n2 = Node::new(3, "TTTTT".to_string());
        let n3 = Node::new(4, "ACGT".to_string());
        assert_eq!(n1, n2);
        assert_ne!(n1, n3);
        assert!(n1 < n3);
        assert_eq!(n2.len(), 5);
        assert!(Node::new(9, String::new()).is_empty());
    }
}
