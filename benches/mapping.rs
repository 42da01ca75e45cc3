use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use chanmap::{
    deep1010, describe_mapping, map_dataset_channels, map_named_channels, subset_mapping,
    ChannelKind, ChannelOverrides, InputChannel, MappingConfig,
};

/// 64-channel cap with EOG, ear references and auxiliaries.
fn montage() -> Vec<InputChannel> {
    let mut chs: Vec<InputChannel> = deep1010()
        .eeg_labels()
        .take(60)
        .map(|l| InputChannel::new(format!("EEG {l}-REF"), ChannelKind::Eeg))
        .collect();
    chs.push(InputChannel::new("VEOG", ChannelKind::Eog));
    chs.push(InputChannel::new("HEOG", ChannelKind::Eog));
    chs.push(InputChannel::new("EAR L", ChannelKind::Other(502)));
    chs.push(InputChannel::new("STI 014", ChannelKind::Stim));
    chs
}

fn bench_type_driven(c: &mut Criterion) {
    let chs = montage();
    let cfg = MappingConfig::default();
    c.bench_function("map_dataset_channels [64 ch]", |b| {
        b.iter(|| {
            let m = map_dataset_channels(black_box(&chs), &cfg).unwrap();
            black_box(m.matrix[[0, 0]])
        })
    });
}

fn bench_named(c: &mut Criterion) {
    let names: Vec<String> = montage().into_iter().map(|c| c.name).collect();
    let ov = ChannelOverrides::new().with_eog(["VEOG", "HEOG"]).with_reference(["EAR L"]);
    c.bench_function("map_named_channels [64 ch]", |b| {
        b.iter(|| {
            let m = map_named_channels(black_box(&names), &ov).unwrap();
            black_box(m.matrix[[0, 0]])
        })
    });
}

fn bench_describe(c: &mut Criterion) {
    let chs = montage();
    let names: Vec<&str> = chs.iter().map(|c| c.name.as_str()).collect();
    let m = map_dataset_channels(&chs, &MappingConfig::default()).unwrap();
    c.bench_function("describe_mapping [64 ch]", |b| {
        b.iter(|| black_box(describe_mapping(&names, black_box(&m.matrix), deep1010()).len()))
    });
}

fn bench_subset(c: &mut Criterion) {
    let src = deep1010().names();
    let dst: Vec<&str> = src.iter().rev().copied().collect();
    c.bench_function("subset_mapping [90 → 90 reversed]", |b| {
        b.iter(|| black_box(subset_mapping(black_box(&src), &dst, false)))
    });
}

criterion_group!(benches, bench_type_driven, bench_named, bench_describe, bench_subset);
criterion_main!(benches);
