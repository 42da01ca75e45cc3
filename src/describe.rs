//! Human-readable audit of a mapping.
//!
//! ```text
//! EEG (original(new)): Fp1(FP1) EEG Cz-REF(CZ)
//! EOG (original(new)): EOG(VEOGL,VEOGR,HEOGL,HEOGR)
//! REF (original(new)): EAR L(A1,A2)
//! EXTRA (original(new)): ECG(EX1)
//! Heuristically Assigned: EEG Cz-REF(CZ) EOG(VEOGL,VEOGR,HEOGL,HEOGR) …
//! ```
use ndarray::Array2;

use crate::layout::{CanonicalLayout, Category};

const REPORTED: [Category; 4] = [Category::Eeg, Category::Eog, Category::Ref, Category::Extra];

/// Canonical labels within `category` that `row` feeds, comma-joined.
fn targets(matrix: &Array2<f32>, row: usize, category: Category, layout: &CanonicalLayout) -> String {
    matrix
        .row(row)
        .indexed_iter()
        .filter(|&(col, &w)| w != 0.0 && layout.category(col) == category)
        .map(|(col, _)| layout.name(col))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the mapping of `original_names` (rows of `matrix`) onto `layout`.
///
/// Entries whose canonical target differs from the uppercased original
/// name are repeated on the final "Heuristically Assigned" line.
pub fn describe_mapping<S: AsRef<str>>(
    original_names: &[S],
    matrix: &Array2<f32>,
    layout: &CanonicalLayout,
) -> String {
    let mut out = String::new();
    let mut heuristic: Vec<String> = Vec::new();

    for category in REPORTED {
        out.push_str(&format!("{} (original(new)): ", category.label()));
        for (row, name) in original_names.iter().enumerate() {
            let name = name.as_ref();
            let news = targets(matrix, row, category, layout);
            if news.is_empty() {
                continue;
            }
            let entry = format!("{name}({news}) ");
            out.push_str(&entry);
            if news != name.to_uppercase() {
                heuristic.push(entry);
            }
        }
        out.push('\n');
    }

    out.push_str("Heuristically Assigned: ");
    out.push_str(&heuristic.join(" "));
    out
}
