/// Shared helpers for mapping tests.
use chanmap::{ChannelKind, InputChannel};
use ndarray::Array2;

#[allow(unused)]
pub fn eeg(name: &str) -> InputChannel {
    InputChannel::new(name, ChannelKind::Eeg)
}

#[allow(unused)]
pub fn eog(name: &str) -> InputChannel {
    InputChannel::new(name, ChannelKind::Eog)
}

#[allow(unused)]
pub fn stim(name: &str) -> InputChannel {
    InputChannel::new(name, ChannelKind::Stim)
}

#[allow(unused)]
pub fn misc(name: &str) -> InputChannel {
    InputChannel::new(name, ChannelKind::Other(chanmap::kind::FIFFV_MISC_CH))
}

#[allow(unused)]
/// A typical 10-20 clinical montage with EOG, ear references and a trigger.
pub fn clinical_montage() -> Vec<InputChannel> {
    let mut chs: Vec<InputChannel> = [
        "EEG Fp1-REF", "EEG Fp2-REF", "EEG F3-REF", "EEG F4-REF", "EEG C3-REF",
        "EEG C4-REF", "EEG P3-REF", "EEG P4-REF", "EEG O1-REF", "EEG O2-REF",
        "EEG F7-REF", "EEG F8-REF", "EEG T3-REF", "EEG T4-REF", "EEG T5-REF",
        "EEG T6-REF", "EEG Fz-REF", "EEG Cz-REF", "EEG Pz-REF",
    ]
    .iter()
    .map(|n| eeg(n))
    .collect();
    chs.push(eog("EOG LOC"));
    chs.push(eog("EOG ROC"));
    chs.push(misc("EEG A1-REF"));
    chs.push(misc("EEG A2-REF"));
    chs.push(misc("ECG"));
    chs.push(stim("STI 014"));
    chs
}

#[allow(unused)]
/// Assert every column sums to 0 or 1 and no entry exceeds 1.
pub fn assert_column_stochastic(m: &Array2<f32>) {
    for (j, col) in m.columns().into_iter().enumerate() {
        let s: f32 = col.sum();
        assert!(
            s.abs() < 1e-6 || (s - 1.0).abs() < 1e-5,
            "column {j} sums to {s}"
        );
        assert!(col.iter().all(|&v| (0.0..=1.0).contains(&v)), "column {j} has entry outside [0, 1]");
    }
}

#[allow(unused)]
/// Columns with nonzero weight in `row`.
pub fn targets(m: &Array2<f32>, row: usize) -> Vec<usize> {
    m.row(row)
        .indexed_iter()
        .filter(|&(_, &w)| w != 0.0)
        .map(|(j, _)| j)
        .collect()
}
