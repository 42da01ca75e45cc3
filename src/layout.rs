//! The canonical Deep1010 channel layout.
//!
//! Every recording is mapped onto this fixed, ordered list of 90 labels:
//!
//! ```text
//!  0 ..  77   EEG    10-10 scalp positions (NZ … IZ)
//! 77 ..  81   EOG    VEOGL VEOGR HEOGL HEOGR
//! 81 ..  84   REF    A1 A2 REF
//! 84          SCALE  SCALE
//! 85 ..  90   EXTRA  EX1 … EX5
//! ```
//!
//! The layout is built once on first use and never mutated; see
//! [`deep1010`].
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::error::LayoutError;
use crate::kind::{ChannelKind, InputChannel, DEEP1010_EXTRA_CH, DEEP1010_SCALE_CH};

/// Number of EXTRA slots at the end of the layout.
pub const EXTRA_CHANNELS: usize = 5;

/// Canonical EOG labels, in slot order.
pub const EOG_LABELS: [&str; 4] = ["VEOGL", "VEOGR", "HEOGL", "HEOGR"];
/// Canonical reference labels, in slot order.
pub const REF_LABELS: [&str; 3] = ["A1", "A2", "REF"];
/// The single scaling channel.
pub const SCALE_LABEL: &str = "SCALE";

const LEFT_NUMBERS: [u8; 4] = [7, 5, 3, 1];
const RIGHT_NUMBERS: [u8; 4] = [2, 4, 6, 8];

/// Category of a canonical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Eeg,
    Eog,
    Ref,
    Scale,
    Extra,
}

impl Category {
    /// Upper-case tag used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Eeg => "EEG",
            Category::Eog => "EOG",
            Category::Ref => "REF",
            Category::Scale => "SCALE",
            Category::Extra => "EXTRA",
        }
    }

    /// Channel kind a mapped recording reports for slots of this category.
    /// Reference slots carry EEG potentials and report as EEG.
    pub fn kind(self) -> ChannelKind {
        match self {
            Category::Eeg | Category::Ref => ChannelKind::Eeg,
            Category::Eog => ChannelKind::Eog,
            Category::Scale => ChannelKind::Other(DEEP1010_SCALE_CH),
            Category::Extra => ChannelKind::Other(DEEP1010_EXTRA_CH),
        }
    }
}

/// One slot of the canonical layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalChannel {
    pub name:     String,
    pub position: usize,
    pub category: Category,
}

/// Ordered canonical label registry with derived category index sets.
#[derive(Debug, Clone)]
pub struct CanonicalLayout {
    channels:     Vec<CanonicalChannel>,
    eeg:          Vec<usize>,
    eog:          [usize; 4],
    refs:         [usize; 3],
    scale:        usize,
    extra:        Vec<usize>,
    eeg_alphabet: BTreeSet<char>,
}

impl CanonicalLayout {
    /// Build a layout from an ordered label list whose last `n_extra`
    /// labels are the EXTRA slots.
    ///
    /// Everything before the first EOG label is EEG.  Fails when a
    /// landmark label (`VEOGL … HEOGR`, `A1`, `A2`, `REF`, `SCALE`) is
    /// missing.
    pub fn from_labels(labels: Vec<String>, n_extra: usize) -> Result<Self, LayoutError> {
        let min_len = EOG_LABELS.len() + REF_LABELS.len() + 1 + n_extra;
        if labels.len() < min_len {
            return Err(LayoutError::TooShort { got: labels.len(), need: min_len });
        }

        let find = |label: &str| -> Result<usize, LayoutError> {
            labels
                .iter()
                .position(|l| l == label)
                .ok_or_else(|| LayoutError::MissingLabel(label.to_string()))
        };

        let mut eog = [0usize; 4];
        for (slot, label) in eog.iter_mut().zip(EOG_LABELS) {
            *slot = find(label)?;
        }
        let mut refs = [0usize; 3];
        for (slot, label) in refs.iter_mut().zip(REF_LABELS) {
            *slot = find(label)?;
        }
        let scale = find(SCALE_LABEL)?;
        let extra: Vec<usize> = (labels.len() - n_extra..labels.len()).collect();
        let eeg: Vec<usize> = (0..eog[0]).collect();

        let category_of = |i: usize| {
            if eog.contains(&i) {
                Category::Eog
            } else if refs.contains(&i) {
                Category::Ref
            } else if i == scale {
                Category::Scale
            } else if extra.contains(&i) {
                Category::Extra
            } else {
                Category::Eeg
            }
        };

        let channels: Vec<CanonicalChannel> = labels
            .into_iter()
            .enumerate()
            .map(|(position, name)| CanonicalChannel { name, position, category: category_of(position) })
            .collect();

        let eeg_alphabet = eeg
            .iter()
            .flat_map(|&i| channels[i].name.chars())
            .collect();

        Ok(Self { channels, eeg, eog, refs, scale, extra, eeg_alphabet })
    }

    /// Total number of canonical slots (90 for Deep1010).
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channels(&self) -> &[CanonicalChannel] {
        &self.channels
    }

    /// Label at slot `idx`.
    pub fn name(&self, idx: usize) -> &str {
        &self.channels[idx].name
    }

    /// All labels in slot order.
    pub fn names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name.as_str()).collect()
    }

    /// Slot of an exact (case-sensitive) label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.name == label)
    }

    pub fn category(&self, idx: usize) -> Category {
        self.channels[idx].category
    }

    /// Channel kind of slot `idx`.
    pub fn kind(&self, idx: usize) -> ChannelKind {
        self.channels[idx].category.kind()
    }

    /// `(label, kind)` for every slot, i.e. the channel list of a recording
    /// after it has been mapped onto this layout.
    pub fn channel_table(&self) -> Vec<InputChannel> {
        self.channels
            .iter()
            .map(|c| InputChannel::new(c.name.clone(), c.category.kind()))
            .collect()
    }

    pub fn eeg_indices(&self) -> &[usize] {
        &self.eeg
    }

    pub fn eog_indices(&self) -> &[usize; 4] {
        &self.eog
    }

    pub fn ref_indices(&self) -> &[usize; 3] {
        &self.refs
    }

    pub fn scale_index(&self) -> usize {
        self.scale
    }

    pub fn extra_indices(&self) -> &[usize] {
        &self.extra
    }

    /// Slot indices belonging to `category`.
    pub fn indices(&self, category: Category) -> &[usize] {
        match category {
            Category::Eeg => &self.eeg,
            Category::Eog => &self.eog,
            Category::Ref => &self.refs,
            Category::Scale => std::slice::from_ref(&self.scale),
            Category::Extra => &self.extra,
        }
    }

    /// EEG labels in slot order.
    pub fn eeg_labels(&self) -> impl Iterator<Item = &str> {
        self.eeg.iter().map(|&i| self.channels[i].name.as_str())
    }

    /// Is `name` exactly one of the EOG labels?
    pub fn is_eog_label(&self, name: &str) -> bool {
        self.eog.iter().any(|&i| self.channels[i].name == name)
    }

    /// Union of every character appearing in an EEG label.
    pub fn eeg_alphabet(&self) -> &BTreeSet<char> {
        &self.eeg_alphabet
    }
}

/// The Deep1010 label listing, in slot order.
pub fn deep1010_labels() -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(90);
    let mut push = |s: &str| labels.push(s.to_string());

    for s in ["NZ", "FP1", "FPZ", "FP2", "AF7", "AF3", "AFZ", "AF4", "AF8", "F9"] {
        push(s);
    }
    for n in LEFT_NUMBERS { push(&format!("F{n}")); }
    push("FZ");
    for n in RIGHT_NUMBERS { push(&format!("F{n}")); }
    for s in ["F10", "FT9", "FT7"] { push(s); }
    for n in &LEFT_NUMBERS[1..] { push(&format!("FC{n}")); }
    push("FCZ");
    for n in &RIGHT_NUMBERS[..3] { push(&format!("FC{n}")); }
    for s in ["FT8", "FT10", "T9", "T7", "T3"] { push(s); }
    for n in &LEFT_NUMBERS[1..] { push(&format!("C{n}")); }
    push("CZ");
    for n in &RIGHT_NUMBERS[..3] { push(&format!("C{n}")); }
    for s in ["T4", "T8", "T10", "TP9", "TP7"] { push(s); }
    for n in &LEFT_NUMBERS[1..] { push(&format!("CP{n}")); }
    push("CPZ");
    for n in &RIGHT_NUMBERS[..3] { push(&format!("CP{n}")); }
    for s in ["TP8", "TP10", "P9", "P7", "T5"] { push(s); }
    for n in &LEFT_NUMBERS[1..] { push(&format!("P{n}")); }
    push("PZ");
    for n in &RIGHT_NUMBERS[..3] { push(&format!("P{n}")); }
    for s in ["T6", "P8", "P10", "PO7", "PO3", "POZ", "PO4", "PO8", "O1", "OZ", "O2", "IZ"] {
        push(s);
    }

    for s in EOG_LABELS { push(s); }
    for s in REF_LABELS { push(s); }
    push(SCALE_LABEL);
    for n in 1..=EXTRA_CHANNELS { push(&format!("EX{n}")); }

    labels
}

static DEEP_1010: OnceLock<CanonicalLayout> = OnceLock::new();

/// The process-wide Deep1010 layout.
///
/// # Panics
///
/// Panics on first use if the built-in listing is missing a landmark
/// label.  That is a build defect, never an input error.
pub fn deep1010() -> &'static CanonicalLayout {
    DEEP_1010.get_or_init(|| {
        CanonicalLayout::from_labels(deep1010_labels(), EXTRA_CHANNELS)
            .unwrap_or_else(|e| panic!("built-in Deep1010 layout is malformed: {e}"))
    })
}
