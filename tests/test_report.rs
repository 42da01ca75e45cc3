mod common;
use chanmap::{
    deep1010, describe_mapping, map_dataset_channels, map_source, write_mapping, ChannelTable,
    MappingConfig, StoredMapping,
};
use common::clinical_montage;

#[test]
fn report_lists_heuristic_assignments() {
    let chs = clinical_montage();
    let names: Vec<&str> = chs.iter().map(|c| c.name.as_str()).collect();
    let m = map_dataset_channels(&chs, &MappingConfig::default()).unwrap();
    let report = describe_mapping(&names, &m.matrix, deep1010());
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("EEG (original(new)): EEG Fp1-REF(FP1) EEG Fp2-REF(FP2) "));
    assert_eq!(lines[1], "EOG (original(new)): EOG LOC(VEOGL,HEOGL) EOG ROC(VEOGR,HEOGR) ");
    assert_eq!(lines[2], "REF (original(new)): EEG A1-REF(A1) EEG A2-REF(A2) ");
    assert_eq!(lines[3], "EXTRA (original(new)): ECG(EX1) ");
    assert!(lines[4].starts_with("Heuristically Assigned: EEG Fp1-REF(FP1) "));
    assert!(lines[4].contains("ECG(EX1)"));
    assert!(!report.contains("STI 014"));
}

#[test]
fn table_to_safetensors_and_back() {
    let json = r#"{"name": "sub-03", "channels": [
        ["EEG Fp1-REF", 2], ["EEG Cz-REF", 2], ["EOG", 202], ["STI 014", 3]
    ]}"#;
    let table = ChannelTable::from_json_str(json, "fallback").unwrap();
    let m = map_source(&table, &MappingConfig::default()).unwrap();

    let path = std::env::temp_dir().join(format!("chanmap_test_{}.safetensors", std::process::id()));
    write_mapping(&m, &table.names(), deep1010(), &path).unwrap();
    let stored = StoredMapping::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(stored.matrix, m.matrix);
    assert_eq!(stored.ch_names, table.names());
    assert_eq!(stored.layout_kinds.len(), 90);
    assert_eq!(stored.layout_kinds[77], 202);
    assert_eq!(stored.layout_kinds[83], 2);
    assert_eq!(stored.layout_kinds[84], 3000);
    assert_eq!(stored.layout_kinds[85], 3001);
}
