//! Construction of the Deep1010 mapping matrix.
//!
//! Two entry points:
//!
//! * [`map_named_channels`] — the caller names the EOG / reference / extra
//!   channels explicitly; everything else is placed by exact label match.
//! * [`map_dataset_channels`] — classification, heuristic resolution and
//!   capacity checks derive those lists from declared channel kinds, then
//!   the same placement runs.
//!
//! Both return a `[n_channels, 90]` matrix `M` such that
//! `deep1010_data = Mᵀ · data` for `data` of shape `[C, T]`.
use std::collections::HashSet;

use ndarray::{Array1, Array2, ArrayViewD};

use crate::classify::{classify_channels, ChannelClass};
use crate::config::MappingConfig;
use crate::error::{Diagnostic, MappingError, OverrideRole};
use crate::kind::{ChannelKind, InputChannel};
use crate::layout::{deep1010, CanonicalLayout};
use crate::normalize::normalize_columns_inplace;
use crate::overflow::enforce_capacity;
use crate::resolve::resolve_names;

/// Explicit channel assignments for [`map_named_channels`].
///
/// ```text
/// eog        0, 1, 2 or 4 names   1 → all four EOG slots
///                                 2 → [L, R] → VEOGL=L VEOGR=R HEOGL=L HEOGR=R
///                                 4 → VEOGL VEOGR HEOGL HEOGR
/// reference  0, 1 or 2 names      1 → A1 and A2;  2 → A1, A2
/// extra      up to 5 entries      one-to-one onto EX1…EX5, `None` skipped
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelOverrides {
    pub eog:       Vec<String>,
    pub reference: Vec<String>,
    pub extra:     Vec<Option<String>>,
}

impl ChannelOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eog<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.eog = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reference<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.reference = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra<S: Into<String>>(mut self, names: impl IntoIterator<Item = Option<S>>) -> Self {
        self.extra = names.into_iter().map(|n| n.map(Into::into)).collect();
        self
    }
}

/// A finished mapping.
#[derive(Debug, Clone)]
pub struct ChannelMapping {
    /// `[n_channels, n_canonical]`, column-normalised.
    pub matrix:      Array2<f32>,
    /// Number of contributing rows per canonical column, before normalising.
    pub column_sums: Array1<f32>,
    /// Non-fatal problems, in the order they were met.
    pub diagnostics: Vec<Diagnostic>,
}

/// Input rows assigned to the bounded slots.
struct SlotRows {
    eog:       Vec<usize>,
    reference: Vec<usize>,
    extra:     Vec<Option<usize>>,
}

/// Reference lists longer than two are only accepted from the type-driven
/// path, where the third entry fills the generic `REF` slot.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ReferenceLimit {
    Explicit,
    Capacity,
}

/// Source positions feeding VEOGL, VEOGR, HEOGL, HEOGR for an EOG list of
/// length `n`.
fn eog_pattern(n: usize) -> Result<&'static [usize], MappingError> {
    match n {
        0 => Ok(&[]),
        1 => Ok(&[0, 0, 0, 0]),
        2 => Ok(&[0, 1, 0, 1]),
        4 => Ok(&[0, 1, 2, 3]),
        got => Err(MappingError::OverrideLength { role: OverrideRole::Eog, got, accepted: "0, 1, 2 or 4" }),
    }
}

/// Source positions feeding A1, A2, REF for a reference list of length `n`.
fn reference_pattern(n: usize, limit: ReferenceLimit) -> Result<&'static [usize], MappingError> {
    match (n, limit) {
        (0, _) => Ok(&[]),
        (1, _) => Ok(&[0, 0]),
        (2, _) => Ok(&[0, 1]),
        (3, ReferenceLimit::Capacity) => Ok(&[0, 1, 2]),
        (got, ReferenceLimit::Explicit) => {
            Err(MappingError::OverrideLength { role: OverrideRole::Reference, got, accepted: "0, 1 or 2" })
        }
        (got, ReferenceLimit::Capacity) => {
            Err(MappingError::OverrideLength { role: OverrideRole::Reference, got, accepted: "0, 1, 2 or 3" })
        }
    }
}

fn check_extra_len(n: usize, layout: &CanonicalLayout) -> Result<(), MappingError> {
    if n > layout.extra_indices().len() {
        return Err(MappingError::OverrideLength { role: OverrideRole::Extra, got: n, accepted: "at most 5" });
    }
    Ok(())
}

/// `(row, column)` pairs for every slot assignment.
fn slot_pairs(
    slots: &SlotRows,
    layout: &CanonicalLayout,
    limit: ReferenceLimit,
) -> Result<Vec<(usize, usize)>, MappingError> {
    let eog = eog_pattern(slots.eog.len())?;
    let reference = reference_pattern(slots.reference.len(), limit)?;
    check_extra_len(slots.extra.len(), layout)?;

    let mut pairs: Vec<(usize, usize)> = eog
        .iter()
        .map(|&k| slots.eog[k])
        .zip(layout.eog_indices().iter().copied())
        .collect();
    pairs.extend(
        reference
            .iter()
            .map(|&k| slots.reference[k])
            .zip(layout.ref_indices().iter().copied()),
    );
    pairs.extend(
        slots
            .extra
            .iter()
            .zip(layout.extra_indices())
            .filter_map(|(row, &col)| row.map(|r| (r, col))),
    );
    Ok(pairs)
}

/// Place slot assignments and exact label matches, then normalise.
///
/// Rows named by a slot assignment are consumed; every other row accepted
/// by `exact_match` is placed where its uppercased name equals a label.
fn place<F>(
    layout: &CanonicalLayout,
    names: &[String],
    slots: &SlotRows,
    limit: ReferenceLimit,
    exact_match: F,
    mut diagnostics: Vec<Diagnostic>,
) -> Result<ChannelMapping, MappingError>
where
    F: Fn(usize) -> bool,
{
    let pairs = slot_pairs(slots, layout, limit)?;

    let mut matrix = Array2::<f32>::zeros((names.len(), layout.len()));
    let mut consumed: HashSet<&str> = HashSet::new();
    for &(row, col) in &pairs {
        matrix[[row, col]] = 1.0;
        consumed.insert(names[row].as_str());
    }

    for (row, name) in names.iter().enumerate() {
        if consumed.contains(name.as_str()) || !exact_match(row) {
            continue;
        }
        match layout.index_of(&name.to_uppercase()) {
            Some(col) => matrix[[row, col]] = 1.0,
            None => diagnostics.push(Diagnostic::NotInLayout { name: name.clone() }.emit()),
        }
    }

    let column_sums = normalize_columns_inplace(&mut matrix);
    Ok(ChannelMapping { matrix, column_sums, diagnostics })
}

fn lookup<S: AsRef<str>>(names: &[S], wanted: &str, role: OverrideRole) -> Result<usize, MappingError> {
    names
        .iter()
        .position(|n| n.as_ref() == wanted)
        .ok_or_else(|| MappingError::UnknownChannel { role, name: wanted.to_string() })
}

/// Map channels onto Deep1010 from explicit EOG / reference / extra lists.
///
/// # Errors
///
/// * [`MappingError::OverrideLength`] — an override list has an unsupported
///   number of entries.
/// * [`MappingError::UnknownChannel`] — an override names a channel that is
///   not in `names`.
///
/// # Examples
///
/// ```
/// use chanmap::{map_named_channels, ChannelOverrides};
///
/// let names = ["Fp1", "Cz", "EOG"];
/// let m = map_named_channels(&names, &ChannelOverrides::new().with_eog(["EOG"])).unwrap();
/// assert_eq!(m.matrix.dim(), (3, 90));
/// assert_eq!(m.matrix[[2, 77]], 1.0); // VEOGL
/// ```
pub fn map_named_channels<S: AsRef<str>>(
    names: &[S],
    overrides: &ChannelOverrides,
) -> Result<ChannelMapping, MappingError> {
    let layout = deep1010();

    // Validate list lengths before any lookup.
    eog_pattern(overrides.eog.len())?;
    reference_pattern(overrides.reference.len(), ReferenceLimit::Explicit)?;
    check_extra_len(overrides.extra.len(), layout)?;

    let slots = SlotRows {
        eog: overrides
            .eog
            .iter()
            .map(|n| lookup(names, n, OverrideRole::Eog))
            .collect::<Result<_, _>>()?,
        reference: overrides
            .reference
            .iter()
            .map(|n| lookup(names, n, OverrideRole::Reference))
            .collect::<Result<_, _>>()?,
        extra: overrides
            .extra
            .iter()
            .map(|n| n.as_deref().map(|n| lookup(names, n, OverrideRole::Extra)).transpose())
            .collect::<Result<_, _>>()?,
    };

    let owned: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    place(layout, &owned, &slots, ReferenceLimit::Explicit, |_| true, Vec::new())
}

/// Map channels onto Deep1010 using their declared kinds.
///
/// Runs classification, heuristic name resolution and the EOG / REF
/// capacity check, then places the surviving channels.  Only channels
/// classified as EEG are placed by label; dropped channels keep an all-zero
/// row.
///
/// # Errors
///
/// [`MappingError::OverrideLength`] when exactly three EOG channels survive
/// (EOG broadcasting accepts 0, 1, 2 or 4).
///
/// # Examples
///
/// ```
/// use chanmap::{map_dataset_channels, ChannelKind, InputChannel, MappingConfig};
///
/// let chs = [
///     InputChannel::new("EEG Fp1-REF", ChannelKind::Eeg),
///     InputChannel::new("EAR L", ChannelKind::Other(502)),
/// ];
/// let m = map_dataset_channels(&chs, &MappingConfig::default()).unwrap();
/// assert_eq!(m.matrix[[0, 1]], 1.0);  // FP1
/// assert_eq!(m.matrix[[1, 81]], 1.0); // A1
/// ```
pub fn map_dataset_channels(
    channels: &[InputChannel],
    cfg: &MappingConfig,
) -> Result<ChannelMapping, MappingError> {
    let layout = deep1010();
    let names: Vec<String> = channels.iter().map(|c| c.name.clone()).collect();

    let classified = classify_channels(channels, layout, cfg.exclude_stim);
    let resolved = resolve_names(&names, &classified.classes, layout);
    let mut classes = resolved.classes;
    let bounded = enforce_capacity(&resolved.names, &mut classes, layout);

    tracing::debug!(
        target: "chanmap",
        n_channels = channels.len(),
        n_eeg = classes.iter().filter(|c| **c == Some(ChannelClass::Eeg)).count(),
        n_eog = bounded.eog.len(),
        n_ref = bounded.reference.len(),
        "classified channels"
    );

    let mut diagnostics = classified.diagnostics;
    diagnostics.extend(resolved.diagnostics);
    diagnostics.extend(bounded.diagnostics);

    let slots = SlotRows {
        eog:       bounded.eog,
        reference: bounded.reference,
        extra:     classified.extra_slots.to_vec(),
    };
    place(
        layout,
        &resolved.names,
        &slots,
        ReferenceLimit::Capacity,
        |row| classes[row] == Some(ChannelClass::Eeg),
        diagnostics,
    )
}

/// Convert an `[n_channels, 2]` table of `(name, kind)` strings into
/// channels.  The kind column holds FIFF codes (`"2"`, `"202"`, …) or
/// short kind names.
pub fn channels_from_table(table: ArrayViewD<'_, String>) -> Result<Vec<InputChannel>, MappingError> {
    let shape = table.shape();
    if shape.len() != 2 || shape[1] != 2 {
        return Err(MappingError::MalformedTable { shape: shape.to_vec() });
    }
    (0..shape[0])
        .map(|i| {
            let name = table[[i, 0]].clone();
            let code = &table[[i, 1]];
            let kind = code
                .parse::<ChannelKind>()
                .map_err(|_| MappingError::InvalidKindCode { name: name.clone(), code: code.clone() })?;
            Ok(InputChannel { name, kind: Some(kind) })
        })
        .collect()
}

/// Type-driven mapping from an `[n_channels, 2]` name/kind table.
///
/// The table shape is validated before any processing.
pub fn map_channel_table(
    table: ArrayViewD<'_, String>,
    cfg: &MappingConfig,
) -> Result<ChannelMapping, MappingError> {
    let channels = channels_from_table(table)?;
    map_dataset_channels(&channels, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    #[test]
    fn two_eog_entries_alternate() {
        let names = ["L", "R"];
        let m = map_named_channels(&names, &ChannelOverrides::new().with_eog(["L", "R"])).unwrap();
        assert_eq!(m.matrix[[0, 77]], 1.0);
        assert_eq!(m.matrix[[1, 78]], 1.0);
        assert_eq!(m.matrix[[0, 79]], 1.0);
        assert_eq!(m.matrix[[1, 80]], 1.0);
    }

    #[test]
    fn three_eog_entries_rejected() {
        let names = ["a", "b", "c"];
        let err = map_named_channels(&names, &ChannelOverrides::new().with_eog(["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, MappingError::OverrideLength { role: OverrideRole::Eog, got: 3, .. }));
    }

    #[test]
    fn three_explicit_references_rejected() {
        let names = ["a", "b", "c"];
        let err = map_named_channels(&names, &ChannelOverrides::new().with_reference(["a", "b", "c"]))
            .unwrap_err();
        assert!(matches!(err, MappingError::OverrideLength { role: OverrideRole::Reference, .. }));
    }

    #[test]
    fn length_checked_before_lookup() {
        let names = ["a"];
        let err = map_named_channels(&names, &ChannelOverrides::new().with_eog(["x", "y", "z"])).unwrap_err();
        assert!(matches!(err, MappingError::OverrideLength { .. }));
    }

    #[test]
    fn extra_none_entries_skip_slots() {
        let names = ["ECG", "RESP"];
        let ov = ChannelOverrides::new().with_extra([None, Some("ECG"), Some("RESP")]);
        let m = map_named_channels(&names, &ov).unwrap();
        assert_eq!(m.matrix[[0, 86]], 1.0);
        assert_eq!(m.matrix[[1, 87]], 1.0);
        assert_eq!(m.column_sums[85], 0.0);
    }

    #[test]
    fn table_must_be_n_by_2() {
        let t = Array::from_shape_vec(IxDyn(&[2, 3]), vec![String::new(); 6]).unwrap();
        let err = map_channel_table(t.view(), &MappingConfig::default()).unwrap_err();
        assert_eq!(err, MappingError::MalformedTable { shape: vec![2, 3] });

        let t = Array::from_shape_vec(IxDyn(&[4]), vec![String::new(); 4]).unwrap();
        assert!(matches!(
            map_channel_table(t.view(), &MappingConfig::default()),
            Err(MappingError::MalformedTable { .. })
        ));
    }

    #[test]
    fn table_kind_must_parse() {
        let t = Array::from_shape_vec(IxDyn(&[1, 2]), vec!["Cz".to_string(), "x2".to_string()]).unwrap();
        let err = channels_from_table(t.view()).unwrap_err();
        assert!(matches!(err, MappingError::InvalidKindCode { .. }));
    }

    #[test]
    fn table_drives_type_mapping() {
        let cells: Vec<String> = ["Cz", "2", "HEOG", "202"].iter().map(|s| s.to_string()).collect();
        let t = Array::from_shape_vec(IxDyn(&[2, 2]), cells).unwrap();
        let m = map_channel_table(t.view(), &MappingConfig::default()).unwrap();
        assert_eq!(m.matrix[[0, 37]], 1.0);
        for col in 77..81 {
            assert_eq!(m.matrix[[1, col]], 1.0);
        }
    }
}
