//! Name-equality mapping between two arbitrary channel sequences.
use std::collections::{HashMap, HashSet};

use ndarray::Array2;

/// Map `source` channels onto `destination` channels by name.
///
/// Returns a `[source.len(), destination.len()]` matrix with `1.0` at
/// `(i, j)` for every name present in both sequences (first occurrence on
/// each side).  Channel kinds are ignored.
///
/// Returns `None` when the two sequences are identical in content and
/// order, unless `force` is set, in which case the identity is returned.
///
/// # Examples
///
/// ```
/// use chanmap::subset_mapping;
///
/// assert!(subset_mapping(&["Fp1", "Cz"], &["Fp1", "Cz"], false).is_none());
///
/// let m = subset_mapping(&["Fp1", "Cz", "Pz"], &["Cz", "Fp1"], false).unwrap();
/// assert_eq!(m.dim(), (3, 2));
/// assert_eq!(m[[0, 1]], 1.0);
/// assert_eq!(m[[1, 0]], 1.0);
/// ```
pub fn subset_mapping<S: AsRef<str>, D: AsRef<str>>(
    source: &[S],
    destination: &[D],
    force: bool,
) -> Option<Array2<f32>> {
    let identical = source.len() == destination.len()
        && source.iter().zip(destination).all(|(a, b)| a.as_ref() == b.as_ref());
    if identical {
        return force.then(|| Array2::eye(source.len()));
    }

    let mut dst_first: HashMap<&str, usize> = HashMap::with_capacity(destination.len());
    for (j, name) in destination.iter().enumerate() {
        dst_first.entry(name.as_ref()).or_insert(j);
    }

    let mut mapping = Array2::<f32>::zeros((source.len(), destination.len()));
    let mut seen: HashSet<&str> = HashSet::new();
    for (i, name) in source.iter().enumerate() {
        let name = name.as_ref();
        if !seen.insert(name) {
            continue;
        }
        if let Some(&j) = dst_first.get(name) {
            mapping[[i, j]] = 1.0;
        }
    }
    Some(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_needs_no_mapping() {
        let chs = ["A", "B", "C"];
        assert!(subset_mapping(&chs, &chs, false).is_none());
    }

    #[test]
    fn forced_identity() {
        let chs = ["A", "B", "C"];
        let m = subset_mapping(&chs, &chs, true).unwrap();
        assert_eq!(m, Array2::<f32>::eye(3));
    }

    #[test]
    fn same_names_different_order_is_a_permutation() {
        let m = subset_mapping(&["A", "B"], &["B", "A"], false).unwrap();
        assert_eq!(m, ndarray::array![[0.0_f32, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn duplicates_use_first_occurrence() {
        let m = subset_mapping(&["A", "A", "B"], &["C", "A", "A"], false).unwrap();
        assert_eq!(m[[0, 1]], 1.0);
        assert_eq!(m.sum(), 1.0);
    }
}
