use anyhow::{bail, ensure, Context};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

/// An ordered, de-duplicated collection of node IDs.
/// This is the identity of a candidate or accepted frequented region.
/// Ordering walks both sorted ID lists and the first differing ID decides; if one set is a prefix of the other, the shorter one sorts first.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NodeSet {
    /// Sorted, unique node IDs; never empty
    ids: Vec<i64>,
}

impl NodeSet {
    /// Constructor from an arbitrary collection of IDs; these get sorted and de-duplicated.
    /// # Arguments
    /// * `ids` - the node IDs in any order, duplicates allowed
    /// # Errors
    /// * if no IDs are provided
    pub fn new(ids: impl IntoIterator<Item = i64>) -> anyhow::Result<Self> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ensure!(!ids.is_empty(), "NodeSet must contain at least one node");
        ids.sort_unstable();
        ids.dedup();
        Ok(Self { ids })
    }

    /// Constructor for a single node, this is how every search gets seeded
    pub fn singleton(id: i64) -> Self {
        Self { ids: vec![id] }
    }

    /// Creates the union of two node sets
    pub fn union(&self, other: &NodeSet) -> NodeSet {
        // both sides are sorted, so a merge walk keeps it sorted
        let ids = self.ids.iter()
            .merge(other.ids.iter())
            .dedup()
            .copied()
            .collect();
        NodeSet { ids }
    }

    /// Returns true if the ID is part of this set
    pub fn contains(&self, id: i64) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Returns true if every ID in this set is also in `other`
    pub fn is_subset(&self, other: &NodeSet) -> bool {
        self.ids.iter().all(|&id| other.contains(id))
    }

    /// Number of nodes in the set
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false for a constructed set, provided for API completeness
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }
}

impl PartialOrd for NodeSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeSet {
    fn cmp(&self, other: &Self) -> Ordering {
        // slice ordering is exactly the lexicographic walk with the shorter prefix first
        self.ids.as_slice().cmp(other.ids.as_slice())
    }
}

impl Display for NodeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.ids.iter().join(","))
    }
}

impl FromStr for NodeSet {
    type Err = anyhow::Error;

    /// Parses the bracketed form written by `Display`, e.g. "[1,2,3]"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(inner) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) else {
            bail!("NodeSet must be bracketed: {s:?}");
        };

        let ids: Vec<i64> = inner.split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<i64>()
                    .with_context(|| format!("Invalid node ID {token:?} in {s:?}"))
            })
            .collect::<anyhow::Result<_>>()?;
        NodeSet::new(ids)
    }
}
