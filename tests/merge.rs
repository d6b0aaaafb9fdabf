mod common;

use lcov_merger::model::BranchHits;
use lcov_merger::{merge_coverage_report_files, merge_files, Configuration, MergeError};

#[test]
fn merge_sums_line_hits() {
    let record = "SF:foo.js\nDA:1,1\nend_of_record\n";
    let (_dir, paths) = common::write_inputs(&[
        ("a/lcov.info", record),
        ("b/lcov.info", record),
    ]);

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "SF:foo.js\nDA:1,2\nend_of_record\n");
}

#[test]
fn merge_keeps_unexecuted_branch_when_both_unexecuted() {
    let record = "SF:foo.js\nBRDA:1,0,0,-\nend_of_record\n";
    let (_dir, paths) = common::write_inputs(&[
        ("a.info", record),
        ("b.info", record),
    ]);

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "SF:foo.js\nBRDA:1,0,0,-\nend_of_record\n");
}

#[test]
fn merge_executed_branch_wins_over_unexecuted() {
    let (_dir, paths) = common::write_inputs(&[
        ("a.info", "SF:foo.js\nBRDA:1,0,0,-\nend_of_record\n"),
        ("b.info", "SF:foo.js\nBRDA:1,0,0,3\nend_of_record\n"),
    ]);

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "SF:foo.js\nBRDA:1,0,0,3\nend_of_record\n");
}

#[test]
fn merge_unexecuted_with_zero_becomes_zero() {
    let (_dir, paths) = common::write_inputs(&[
        ("a.info", "SF:foo.js\nBRDA:1,0,0,0\nend_of_record\n"),
        ("b.info", "SF:foo.js\nBRDA:1,0,0,-\nend_of_record\n"),
    ]);

    let report = merge_files(&paths, &Configuration::default()).unwrap();
    let file = report.find_coverage_file("foo.js").unwrap();
    assert_eq!(
        file.find_branch_record(1, 0, 0).unwrap().hits,
        BranchHits::Taken(0)
    );
}

#[test]
fn merge_file_with_itself_doubles_counts() {
    let lcov = "SF:x.js\nDA:1,3\nDA:2,0\nBRDA:1,0,0,2\nBRDA:1,0,1,-\nBRDA:1,0,2,0\nend_of_record\n";
    let (_dir, paths) = common::write_inputs(&[
        ("once.info", lcov),
        ("twice.info", lcov),
    ]);

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(
        out,
        "SF:x.js\nDA:1,6\nDA:2,0\nBRDA:1,0,0,4\nBRDA:1,0,1,-\nBRDA:1,0,2,0\nend_of_record\n"
    );
}

#[test]
fn merge_output_sorted_regardless_of_input_order() {
    let (_dir, paths) = common::write_inputs(&[
        ("first.info", "SF:b.js\nDA:1,1\nend_of_record\n"),
        ("second.info", "SF:a.js\nDA:1,1\nend_of_record\n"),
    ]);
    let mut reversed = paths.clone();
    reversed.reverse();

    let config = Configuration::default();
    let forward = merge_coverage_report_files(&paths, &config).unwrap();
    let backward = merge_coverage_report_files(&reversed, &config).unwrap();

    assert_eq!(
        forward,
        "SF:a.js\nDA:1,1\nend_of_record\nSF:b.js\nDA:1,1\nend_of_record\n"
    );
    assert_eq!(forward, backward);
}

#[test]
fn merge_skips_missing_files() {
    let (dir, mut paths) =
        common::write_inputs(&[("a.info", "SF:foo.js\nDA:1,1\nend_of_record\n")]);
    paths.insert(0, dir.path().join("gone.info"));
    paths.push(dir.path().join("also-gone.info"));

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "SF:foo.js\nDA:1,1\nend_of_record\n");
}

#[test]
fn merge_only_missing_files_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![dir.path().join("missing.info")];

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "");
}

#[test]
fn merge_fails_on_malformed_count() {
    let (_dir, paths) = common::write_inputs(&[
        ("good.info", "SF:foo.js\nDA:1,1\nend_of_record\n"),
        ("bad.info", "SF:foo.js\nDA:2,1.5\nend_of_record\n"),
    ]);

    let err = merge_files(&paths, &Configuration::default()).unwrap_err();
    match err {
        MergeError::InFile { path, source } => {
            assert!(path.ends_with("bad.info"));
            assert!(matches!(*source, MergeError::AtLine { line: 2, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn merge_fails_on_record_before_source_file() {
    let (_dir, paths) = common::write_inputs(&[(
        "orphan.info",
        "DA:1,1\nSF:foo.js\nDA:1,1\nend_of_record\n",
    )]);

    let err = merge_files(&paths, &Configuration::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("outside of an SF section"), "{msg}");
}

#[test]
fn merge_preserves_first_seen_record_order() {
    let (_dir, paths) = common::write_inputs(&[
        ("a.info", "SF:foo.js\nDA:5,1\nDA:2,1\nend_of_record\n"),
        ("b.info", "SF:foo.js\nDA:1,1\nDA:5,1\nend_of_record\n"),
    ]);

    let out = merge_coverage_report_files(&paths, &Configuration::default()).unwrap();
    assert_eq!(out, "SF:foo.js\nDA:5,2\nDA:2,1\nDA:1,1\nend_of_record\n");
}

#[test]
fn merge_fails_when_counts_overflow() {
    let record = "SF:foo.js\nDA:1,18446744073709551615\nBRDA:1,0,0,-\nend_of_record\n";
    let (_dir, paths) = common::write_inputs(&[
        ("a.info", record),
        ("b.info", record),
    ]);

    let err = merge_files(&paths, &Configuration::default()).unwrap_err();
    match err {
        MergeError::InFile { path, source } => {
            assert!(path.ends_with("b.info"));
            match *source {
                MergeError::AtLine { line, source } => {
                    assert_eq!(line, 2);
                    assert!(matches!(*source, MergeError::Overflow { line_number: 1, .. }));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}
