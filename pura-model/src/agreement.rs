//! The agreement (quorum) algorithm.
//!
//! A pure function over a list of per-service candidate lists and a quorum
//! `k`: returns the intersection of some size-`k` subset of the candidate
//! lists, re-wrapped as identifiers, or an empty list if no such
//! intersection exists.

use std::collections::HashSet;

use crate::compound::{CompoundIdentifier, CompoundIdentifierKind};

/// Enumerate all size-`k` index combinations of `0..n`, in lexicographic
/// order, matching Python's `itertools.combinations` — the original
/// resolution algorithm's `reduce_options` enumerates subsets this way.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());
        // Find the rightmost index that can be incremented.
        let mut i = k;
        loop {
            if i == 0 {
                return result;
            }
            i -= 1;
            if indices[i] != i + n - k {
                break;
            }
        }
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// Reduce a list of per-service candidate lists to the first size-`quorum`
/// subset whose values intersect.
///
/// 1. Empty lists are discarded; the output kind is taken from the first
///    non-empty list (all non-empty lists are required to share one kind).
/// 2. Each retained list becomes a set of its `value` strings.
/// 3. Every size-`quorum` combination of retained sets is tried in
///    lexicographic order of index; the first non-empty intersection wins.
/// 4. If no combination intersects (or fewer than `quorum` lists are
///    non-empty), the result is empty.
///
/// Pure: equal inputs always produce equal outputs, independent of
/// wall-clock time or concurrency.
pub fn agree(candidates: &[Vec<CompoundIdentifier>], quorum: usize) -> Vec<CompoundIdentifier> {
    assert!(quorum >= 1, "quorum must be at least 1");

    let mut kind: Option<CompoundIdentifierKind> = None;
    let mut sets: Vec<HashSet<&str>> = Vec::new();
    for list in candidates {
        if list.is_empty() {
            continue;
        }
        if kind.is_none() {
            kind = Some(list[0].kind);
        }
        sets.push(list.iter().map(|id| id.value.as_str()).collect());
    }

    let Some(kind) = kind else {
        return Vec::new();
    };

    for combo in combinations(sets.len(), quorum) {
        let mut iter = combo.into_iter();
        let first = iter.next().expect("quorum >= 1 guarantees a first index");
        let mut intersection: HashSet<&str> = sets[first].clone();
        for idx in iter {
            intersection = intersection.intersection(&sets[idx]).copied().collect();
            if intersection.is_empty() {
                break;
            }
        }
        if !intersection.is_empty() {
            return intersection
                .into_iter()
                .map(|value| CompoundIdentifier::new(kind, value))
                .collect();
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::CompoundIdentifierKind::Smiles;

    fn list(values: &[&str]) -> Vec<CompoundIdentifier> {
        values
            .iter()
            .map(|v| CompoundIdentifier::new(Smiles, *v))
            .collect()
    }

    #[test]
    fn quorum_one_returns_first_non_empty_list() {
        let candidates = vec![list(&["A", "B"]), list(&["C"])];
        let mut result: Vec<_> = agree(&candidates, 1).into_iter().map(|i| i.value).collect();
        result.sort();
        assert_eq!(result, vec!["A", "B"]);
    }

    #[test]
    fn quorum_two_agreement() {
        let candidates = vec![list(&["A"]), list(&["A"])];
        let result = agree(&candidates, 2);
        assert_eq!(result, vec![CompoundIdentifier::new(Smiles, "A")]);
    }

    #[test]
    fn quorum_two_disagreement_is_empty() {
        let candidates = vec![list(&["A"]), list(&["B"])];
        assert!(agree(&candidates, 2).is_empty());
    }

    #[test]
    fn fewer_than_quorum_non_empty_lists_is_empty() {
        let candidates = vec![list(&["A"]), Vec::new()];
        assert!(agree(&candidates, 2).is_empty());
    }

    #[test]
    fn empty_lists_are_discarded_before_combining() {
        let candidates = vec![Vec::new(), list(&["A"]), list(&["A"])];
        let result = agree(&candidates, 2);
        assert_eq!(result, vec![CompoundIdentifier::new(Smiles, "A")]);
    }

    #[test]
    fn first_matching_combination_wins_in_lexicographic_order() {
        // Three services; only (0, 2) and (1, 2) agree on "A". Lexicographic
        // combination order is (0,1), (0,2), (1,2) — (0,2) must win.
        let candidates = vec![list(&["X"]), list(&["Y"]), list(&["A"])];
        assert!(agree(&candidates, 2).is_empty()); // no combo of 2 agrees here
        let candidates = vec![list(&["A"]), list(&["Y"]), list(&["A"])];
        let result = agree(&candidates, 2);
        assert_eq!(result, vec![CompoundIdentifier::new(Smiles, "A")]);
    }

    #[test]
    fn quorum_monotonicity() {
        let candidates = vec![list(&["A"]), list(&["A"]), list(&["A"])];
        for k in (2..=3).rev() {
            if !agree(&candidates, k).is_empty() {
                assert!(!agree(&candidates, k - 1).is_empty());
            }
        }
    }

    #[test]
    fn deterministic_regardless_of_call_order() {
        let candidates = vec![list(&["A", "B"]), list(&["B", "C"])];
        let first = agree(&candidates, 2);
        let second = agree(&candidates, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn combinations_enumerates_lexicographically() {
        assert_eq!(
            combinations(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn combinations_k_greater_than_n_is_empty() {
        assert!(combinations(2, 3).is_empty());
    }
}
