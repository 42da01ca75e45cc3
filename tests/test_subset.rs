use chanmap::subset_mapping;
use ndarray::Array2;

#[test]
fn identical_sequences_need_no_mapping() {
    let chs = ["Fp1", "Fp2", "Cz", "Pz"];
    assert!(subset_mapping(&chs, &chs, false).is_none());
}

#[test]
fn forced_identical_sequences_give_identity() {
    let chs = ["Fp1", "Fp2", "Cz", "Pz"];
    let m = subset_mapping(&chs, &chs, true).unwrap();
    assert_eq!(m, Array2::<f32>::eye(4));
}

#[test]
fn subset_selects_common_channels() {
    let src = ["Fp1", "Fp2", "Cz", "ECG", "Pz"];
    let dst = ["Cz", "Pz", "Oz"];
    let m = subset_mapping(&src, &dst, false).unwrap();
    assert_eq!(m.dim(), (5, 3));
    assert_eq!(m[[2, 0]], 1.0);
    assert_eq!(m[[4, 1]], 1.0);
    assert_eq!(m.sum(), 2.0);
    // Oz has no source.
    assert_eq!(m.column(2).sum(), 0.0);
}

#[test]
fn matching_is_case_sensitive() {
    let m = subset_mapping(&["cz"], &["CZ"], false).unwrap();
    assert_eq!(m.sum(), 0.0);
}

#[test]
fn prefix_is_not_identical() {
    let m = subset_mapping(&["Fp1", "Fp2"], &["Fp1", "Fp2", "Cz"], false).unwrap();
    assert_eq!(m.dim(), (2, 3));
    assert_eq!(m[[0, 0]], 1.0);
    assert_eq!(m[[1, 1]], 1.0);
}
