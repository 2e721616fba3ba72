#[path = "common/mod.rs"]
mod common;

use cifprep::{read_augmented, CifAugmenter, DropReason};
use common::*;

fn expected_kept(n: usize) -> usize {
    (0..n).filter(|i| i % 13 != 12 && i % 7 != 6 && i % 11 != 10).count()
}

/// The hematite record goes through every stage: identifier rewritten, property
/// block inserted before the space group, symmetry table collapsed, floats rounded.
#[test]
fn hematite_end_to_end() {
    let report = CifAugmenter::new().progress(false).run(vec![FE2O3.to_string()]).unwrap();
    assert_eq!(report.records, vec![FE2O3_AUGMENTED.to_string()]);
    assert_eq!(report.ticks, 1);
}

/// Z = 0 and missing space-group records vanish; everything else survives.
#[test]
fn zero_z_and_missing_space_group_are_dropped() {
    let batch = vec![
        make_cif("Fe2 O3", 2, 5.0, true),
        make_cif("Fe2 O3", 0, 5.0, true),
        make_cif("Fe2 O3", 2, 5.0, false),
    ];
    let report = CifAugmenter::new().progress(false).workers(2).run(batch).unwrap();
    assert_eq!(report.kept(), 1);
    assert_eq!(report.dropped.get(DropReason::ZeroFormulaUnits), 1);
    assert_eq!(report.dropped.get(DropReason::FieldNotFound), 1);
    assert!(report.records[0].contains("data_Fe2O3\n"));
}

/// Surviving records and tick totals do not depend on the worker count.
#[test]
fn output_is_invariant_under_worker_count() {
    let n = 200;
    let batch = mixed_batch(n);

    let single = CifAugmenter::new().progress(false).workers(1).run(batch.clone()).unwrap();
    assert_eq!(single.kept(), expected_kept(n));
    assert_eq!(single.ticks, n as u64);
    assert!(single.kept() <= n);

    for w in [2, 4, 16] {
        let many = CifAugmenter::new().progress(false).workers(w).run(batch.clone()).unwrap();
        assert_eq!(many.ticks, n as u64, "workers={w}");
        assert_eq!(many.dropped, single.dropped, "workers={w}");
        assert_eq!(sorted(many.records), sorted(single.records.clone()), "workers={w}");
    }
}

/// Drop diagnostics separate intentional filtering from malformed input.
#[test]
fn drop_reasons_are_tallied() {
    let n = 100;
    let report = CifAugmenter::new().progress(false).workers(3).run(mixed_batch(n)).unwrap();

    let zero = (0..n).filter(|i| i % 13 != 12 && i % 7 == 6).count() as u64;
    let unknown = (0..n).filter(|i| i % 13 == 12).count() as u64;
    assert_eq!(report.dropped.get(DropReason::ZeroFormulaUnits), zero);
    assert_eq!(report.dropped.get(DropReason::UnresolvedElementProperty), unknown);
    assert_eq!(report.kept() as u64 + report.dropped_total(), n as u64);
    assert_eq!(report.dropped.filtered(), zero);
}

/// Zero-Z records never survive, whatever the worker count.
#[test]
fn zero_z_never_survives() {
    let batch: Vec<String> = (0..40).map(|i| make_cif("Na1 Cl1", 0, 5.0 + i as f64, true)).collect();
    for w in [1, 5] {
        let report = CifAugmenter::new().progress(false).workers(w).run(batch.clone()).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.ticks, 40);
    }
}

/// Container in, container out: identifiers are not carried into the output.
#[test]
fn augment_file_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let mut batch = mixed_batch(30);
    batch.push(FE2O3.to_string());
    let input = write_input(tmp.path(), &batch);
    let output = tmp.path().join("out").join("augmented.jsonl.zst");

    let report = CifAugmenter::new()
        .progress(false)
        .workers(4)
        .augment_file(&input, &output)
        .unwrap();

    let written = read_augmented(&output, 64 * 1024).unwrap();
    assert_eq!(written.len(), report.kept());
    assert_eq!(written.len(), expected_kept(30) + 1);
    assert!(written.iter().any(|c| c == FE2O3_AUGMENTED));
    assert!(written.iter().all(|c| !c.contains("rec-")));
}

/// A missing input container is fatal before any work starts.
#[test]
fn missing_input_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = CifAugmenter::new()
        .progress(false)
        .augment_file(&tmp.path().join("absent.jsonl.zst"), &tmp.path().join("out.jsonl.zst"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("absent.jsonl.zst"));
    assert!(!tmp.path().join("out.jsonl.zst").exists());
}

/// Precision is configurable; oxidation mode adds the oxidation column.
#[test]
fn decimal_places_and_oxidation_mode() {
    let two = CifAugmenter::new().progress(false).decimal_places(2).run(vec![FE2O3.to_string()]).unwrap();
    assert!(two.records[0].contains("_cell_length_a   5.04\n"));
    assert!(two.records[0].contains("  Fe   1.83   1.40   "));

    let with_oxi = format!(
        "{FE2O3}loop_\n _atom_type_symbol\n _atom_type_oxidation_number\n  Fe3+  3.0\n  O2-  -2.0\n"
    );
    let report = CifAugmenter::new().progress(false).oxidation(true).run(vec![with_oxi, FE2O3.to_string()]).unwrap();
    assert_eq!(report.kept(), 1, "record without oxidation data is dropped");
    assert!(report.records[0].contains(" _atom_type_oxidation_number\n  Fe   1.8300   1.4000   0.7850  3.0\n"));
}
