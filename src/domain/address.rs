//! Path addressing: a node is named by its sibling index at every depth.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

/// Ordered sibling indices from the root; the empty address is the root
/// itself.
///
/// Addresses are transient coordinates, not stable identifiers: any edit
/// can shift them, so they must be recomputed from the current tree
/// before each use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address(Vec<usize>);

impl Address {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Address of the child at `index` under `self`.
    pub fn child(&self, index: usize) -> Address {
        let mut components = self.0.clone();
        components.push(index);
        Address(components)
    }

    /// Parent address and final sibling index; `None` for the root.
    pub fn split_last(&self) -> Option<(Address, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Address(parent.to_vec()), last))
    }

    /// Whether `other` passes through the node at `self`, i.e. `self` is
    /// a prefix of `other`. Every address contains itself; the root
    /// contains everything.
    pub fn contains(&self, other: &Address) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Edit-sequencing order between two addresses: a deeper address
    /// sorts ahead of a shorter one it extends past, and equal depths
    /// compare by sibling index. Removal at the earlier-sorting address
    /// leaves the later-sorting one meaningful.
    pub fn depth_major_cmp(&self, other: &Address) -> Ordering {
        other
            .len()
            .cmp(&self.len())
            .then_with(|| self.0.cmp(&other.0))
    }

    /// Rewrites `self` (a destination captured before an edit) into the
    /// coordinates that hold after removing the node at `removed`. Only
    /// the component at the removal depth shifts, and only when this
    /// path runs through a later sibling of the removed node.
    pub fn adjusted_for_removal(&self, removed: &Address) -> Address {
        let mut components = self.0.clone();
        if let Some((&last, parent)) = removed.0.split_last() {
            let depth = parent.len();
            if components.len() > depth && components[..depth] == *parent && components[depth] > last
            {
                components[depth] -= 1;
            }
        }
        Address(components)
    }
}

impl From<Vec<usize>> for Address {
    fn from(components: Vec<usize>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[usize; N]> for Address {
    fn from(components: [usize; N]) -> Self {
        Self(components.to_vec())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0.iter().join("/"))
        }
    }
}

/// A segment of an address string failed to parse as a sibling index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address segment `{segment}`")]
pub struct AddressParseError {
    pub segment: String,
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Accepts `/` (or the empty string) for the root and `/`-separated
    /// indices otherwise, with an optional leading slash: `0/2/1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(Address::root());
        }
        body.split('/')
            .map(|segment| {
                segment.parse::<usize>().map_err(|_| AddressParseError {
                    segment: segment.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_address_strings_when_parsing_then_round_trips_through_display() {
        let address: Address = "0/2/1".parse().unwrap();
        assert_eq!(address, Address::from([0, 2, 1]));
        assert_eq!(address.to_string(), "0/2/1");

        let root: Address = "/".parse().unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");

        let with_leading: Address = "/1/0".parse().unwrap();
        assert_eq!(with_leading, Address::from([1, 0]));
    }

    #[test]
    fn given_bad_segments_when_parsing_then_errors() {
        assert!("a/b".parse::<Address>().is_err());
        assert!("-1".parse::<Address>().is_err());
        assert!("0//1".parse::<Address>().is_err());
    }

    #[test]
    fn given_prefix_relations_when_testing_containment_then_matches_paths() {
        let outer = Address::from([1]);
        let inner = Address::from([1, 0, 2]);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
        assert!(Address::root().contains(&inner));
        assert!(!Address::from([0]).contains(&inner));
    }

    #[test]
    fn given_equal_depths_when_sequencing_then_orders_by_sibling_index() {
        let earlier = Address::from([0]);
        let later = Address::from([2]);

        assert_eq!(earlier.depth_major_cmp(&later), Ordering::Less);
        assert_eq!(later.depth_major_cmp(&earlier), Ordering::Greater);
    }

    #[test]
    fn given_extension_when_sequencing_then_deeper_sorts_first() {
        let shallow = Address::from([1]);
        let deep = Address::from([1, 0]);

        assert_eq!(deep.depth_major_cmp(&shallow), Ordering::Less);
        assert_eq!(shallow.depth_major_cmp(&deep), Ordering::Greater);
        // Depth wins even where the sibling indices diverge.
        assert_eq!(
            Address::from([0]).depth_major_cmp(&Address::from([1, 0])),
            Ordering::Greater
        );
    }

    #[test]
    fn given_removal_before_this_path_when_adjusting_then_shifts_one_level() {
        let destination = Address::from([1, 0]);
        let adjusted = destination.adjusted_for_removal(&Address::from([0]));
        assert_eq!(adjusted, Address::from([0, 0]));
    }

    #[test]
    fn given_unrelated_removal_when_adjusting_then_leaves_path_alone() {
        let destination = Address::from([1, 0]);

        assert_eq!(
            destination.adjusted_for_removal(&Address::from([2])),
            destination
        );
        assert_eq!(
            destination.adjusted_for_removal(&Address::from([0, 1])),
            destination
        );
        assert_eq!(destination.adjusted_for_removal(&Address::root()), destination);
    }
}
