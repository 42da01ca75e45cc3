//! Declared hardware channel kinds.
//!
//! Codes are the FIFF `ch_info.kind` values used by MNE-Python, so a
//! channel list exported from an MNE `Info` can be fed in unchanged.
use std::fmt;
use std::str::FromStr;

/// EEG scalp-potential channel.
pub const FIFFV_EEG_CH:  i32 = 2;
/// Stimulus / trigger channel.
pub const FIFFV_STIM_CH: i32 = 3;
/// Electro-oculogram channel.
pub const FIFFV_EOG_CH:  i32 = 202;
/// Electromyogram channel.
pub const FIFFV_EMG_CH:  i32 = 302;
/// Electrocardiogram channel.
pub const FIFFV_ECG_CH:  i32 = 402;
/// Miscellaneous auxiliary channel.
pub const FIFFV_MISC_CH: i32 = 502;

/// Kind reported for the Deep1010 `SCALE` slot.
pub const DEEP1010_SCALE_CH: i32 = 3000;
/// Kind reported for the Deep1010 `EX1…EX5` slots.
pub const DEEP1010_EXTRA_CH: i32 = 3001;

/// Declared type of an input channel.
///
/// Only EEG, EOG and STIM influence classification; every other code is
/// carried through as [`ChannelKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Eeg,
    Eog,
    Stim,
    Other(i32),
}

impl ChannelKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            FIFFV_EEG_CH => ChannelKind::Eeg,
            FIFFV_EOG_CH => ChannelKind::Eog,
            FIFFV_STIM_CH => ChannelKind::Stim,
            other => ChannelKind::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ChannelKind::Eeg => FIFFV_EEG_CH,
            ChannelKind::Eog => FIFFV_EOG_CH,
            ChannelKind::Stim => FIFFV_STIM_CH,
            ChannelKind::Other(c) => c,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Eeg => f.write_str("eeg"),
            ChannelKind::Eog => f.write_str("eog"),
            ChannelKind::Stim => f.write_str("stim"),
            ChannelKind::Other(c) => write!(f, "other({c})"),
        }
    }
}

/// Parses either a numeric FIFF code (`"202"`) or a short name
/// (`"eog"`, `"ecg"`, `"misc"`, …; case-insensitive).
impl FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Ok(ChannelKind::from_code(code));
        }
        match s.to_ascii_lowercase().as_str() {
            "eeg" => Ok(ChannelKind::Eeg),
            "eog" => Ok(ChannelKind::Eog),
            "stim" => Ok(ChannelKind::Stim),
            "emg" => Ok(ChannelKind::Other(FIFFV_EMG_CH)),
            "ecg" => Ok(ChannelKind::Other(FIFFV_ECG_CH)),
            "misc" => Ok(ChannelKind::Other(FIFFV_MISC_CH)),
            other => Err(format!("unknown channel kind {other:?}")),
        }
    }
}

/// One channel of a recording, in the caller's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChannel {
    pub name: String,
    pub kind: Option<ChannelKind>,
}

impl InputChannel {
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> Self {
        Self { name: name.into(), kind: Some(kind) }
    }

    /// A channel with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: None }
    }
}
