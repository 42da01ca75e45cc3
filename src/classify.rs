//! Type classification of input channels.
//!
//! One pass in input order.  First match wins:
//!
//! ```text
//! declared EOG, or name is an EOG label          → eog
//! declared EEG and name contains an EEG label    → eeg
//! declared STIM                                  → dropped, or extra pinned to EX5
//! name contains REF / A1 / A2 / EAR              → ref
//! anything else                                  → extra (next free slot)
//! ```
use std::fmt;

use crate::error::Diagnostic;
use crate::kind::{ChannelKind, InputChannel};
use crate::layout::{CanonicalLayout, EXTRA_CHANNELS};

/// Class assigned to an input channel.  `None` in a class vector means
/// the channel is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    Eeg,
    Eog,
    Ref,
    Extra,
}

impl fmt::Display for ChannelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChannelClass::Eeg => "eeg",
            ChannelClass::Eog => "eog",
            ChannelClass::Ref => "ref",
            ChannelClass::Extra => "extra",
        })
    }
}

const REF_MARKERS: [&str; 4] = ["REF", "A1", "A2", "EAR"];

/// Output of [`classify_channels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One entry per input channel.
    pub classes: Vec<Option<ChannelClass>>,
    /// Input row occupying each EXTRA slot.
    pub extra_slots: [Option<usize>; EXTRA_CHANNELS],
    pub diagnostics: Vec<Diagnostic>,
}

/// Does some canonical EEG label occur inside `name` (uppercased)?
pub fn likely_eeg_channel(name: &str, layout: &CanonicalLayout) -> bool {
    let upper = name.to_uppercase();
    layout.eeg_labels().any(|label| upper.contains(label))
}

fn looks_like_reference(upper: &str) -> bool {
    REF_MARKERS.iter().any(|m| upper.contains(m))
}

/// Classify every channel of a recording.
pub fn classify_channels(
    channels: &[InputChannel],
    layout: &CanonicalLayout,
    exclude_stim: bool,
) -> Classification {
    let mut classes = Vec::with_capacity(channels.len());
    let mut extra_slots = [None; EXTRA_CHANNELS];
    let mut diagnostics = Vec::new();
    let mut extra_idx = 0usize;

    for (row, ch) in channels.iter().enumerate() {
        let upper = ch.name.to_uppercase();

        let class = if ch.kind == Some(ChannelKind::Eog) || layout.is_eog_label(&upper) {
            Some(ChannelClass::Eog)
        } else if ch.kind == Some(ChannelKind::Eeg) && likely_eeg_channel(&ch.name, layout) {
            Some(ChannelClass::Eeg)
        } else if ch.kind == Some(ChannelKind::Stim) {
            if exclude_stim {
                None
            } else {
                extra_slots[EXTRA_CHANNELS - 1] = Some(row);
                Some(ChannelClass::Extra)
            }
        } else if looks_like_reference(&upper) {
            Some(ChannelClass::Ref)
        } else if extra_idx == EXTRA_CHANNELS {
            diagnostics.push(Diagnostic::NoRoomForExtra { name: ch.name.clone() }.emit());
            None
        } else {
            if extra_idx == EXTRA_CHANNELS - 1 && !exclude_stim {
                diagnostics.push(Diagnostic::StimOverwritten { name: ch.name.clone() }.emit());
            }
            extra_slots[extra_idx] = Some(row);
            extra_idx += 1;
            Some(ChannelClass::Extra)
        };
        classes.push(class);
    }

    Classification { classes, extra_slots, diagnostics }
}
