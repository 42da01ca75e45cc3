//! # chanmap — map any EEG montage onto the Deep1010 layout
//!
//! Recordings from different devices carry different numbers and names of
//! channels.  `chanmap` builds a fixed linear map from a recording's
//! channels onto the 90-slot **Deep1010** vocabulary (77 10-10 EEG
//! positions, 4 EOG, 3 reference, 1 scale, 5 extra) so that downstream
//! models see the same input layout for every dataset.
//!
//! ## Pipeline overview
//!
//! ```text
//! [(name, kind)] × C
//!   │
//!   ├─ classify::classify_channels()    eeg / eog / ref / extra / dropped
//!   ├─ resolve::resolve_names()         "EEG Fp1-REF" → "FP1", "EAR L" → "A1"
//!   ├─ overflow::enforce_capacity()     ≤ 4 EOG, ≤ 3 REF
//!   ├─ mapping (slot + label placement) 0/1 matrix [C, 90]
//!   └─ normalize::normalize_columns_inplace()
//!        │
//!        └─→ ChannelMapping { matrix [C, 90] f32, column_sums, diagnostics }
//! ```
//!
//! ## Quick start
//!
//! ```
//! use chanmap::{map_dataset_channels, describe_mapping, deep1010};
//! use chanmap::{ChannelKind, InputChannel, MappingConfig};
//!
//! let channels = vec![
//!     InputChannel::new("EEG Fp1-REF", ChannelKind::Eeg),
//!     InputChannel::new("EEG Cz-REF",  ChannelKind::Eeg),
//!     InputChannel::new("EOG",         ChannelKind::Eog),
//!     InputChannel::new("STI 014",     ChannelKind::Stim),
//! ];
//!
//! let mapping = map_dataset_channels(&channels, &MappingConfig::default()).unwrap();
//! assert_eq!(mapping.matrix.dim(), (4, 90));
//!
//! let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
//! println!("{}", describe_mapping(&names, &mapping.matrix, deep1010()));
//! ```
//!
//! Given data `x` of shape `[C, T]`, the Deep1010 view is
//! `mapping.matrix.t().dot(&x)`, shape `[90, T]`.
//!
//! ## Explicit assignments
//!
//! ```
//! use chanmap::{map_named_channels, ChannelOverrides};
//!
//! let names = ["Fp1", "Fp2", "LOC", "ROC", "M1", "M2"];
//! let overrides = ChannelOverrides::new()
//!     .with_eog(["LOC", "ROC"])
//!     .with_reference(["M1", "M2"]);
//! let mapping = map_named_channels(&names, &overrides).unwrap();
//! assert_eq!(mapping.matrix[[4, 81]], 1.0); // M1 → A1
//! ```
//!
//! Heuristic problems (unresolvable names, overflowing categories, labels
//! outside the layout) never abort a mapping: they are logged through
//! [`tracing`] at `WARN` and returned in [`ChannelMapping::diagnostics`].

pub mod classify;
pub mod config;
pub mod describe;
pub mod error;
pub mod io;
pub mod kind;
pub mod layout;
pub mod mapping;
pub mod normalize;
pub mod overflow;
pub mod resolve;
pub mod source;
pub mod subset;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::MappingConfig;

// layout
pub use layout::{deep1010, CanonicalChannel, CanonicalLayout, Category, EXTRA_CHANNELS};

// kinds
pub use kind::{ChannelKind, InputChannel};

// errors
pub use error::{Diagnostic, LayoutError, MappingError, OverrideRole};

// pipeline stages
pub use classify::{classify_channels, ChannelClass, Classification};
pub use overflow::enforce_capacity;
pub use resolve::{resolve_eeg, resolve_eog, resolve_names, resolve_ref};

// mapping
pub use mapping::{
    channels_from_table, map_channel_table, map_dataset_channels, map_named_channels,
    ChannelMapping, ChannelOverrides,
};
pub use normalize::normalize_columns_inplace;

// reporting / utilities
pub use describe::describe_mapping;
pub use source::{map_source, ChannelSource};
pub use subset::subset_mapping;

// io
pub use io::{write_mapping, ChannelTable, StWriter, StoredMapping};
