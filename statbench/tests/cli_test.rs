use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn get_statbench_cmd() -> Command {
    Command::cargo_bin("statbench").unwrap()
}

/// root/{a.txt, sub/{b.txt}}
fn sample_tree() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("a.txt"), "a").unwrap();
    fs::create_dir(root.path().join("sub")).unwrap();
    fs::write(root.path().join("sub").join("b.txt"), "b").unwrap();
    root
}

fn write_list(dir: &Path, paths: &[&Path]) -> std::path::PathBuf {
    let list = dir.join("paths.txt");
    let contents: String = paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect();
    fs::write(&list, contents).unwrap();
    list
}

// --- stat ---

#[test]
fn test_stat_counts_existing_and_missing_paths() {
    let tree = sample_tree();
    let list_dir = tempfile::tempdir().unwrap();
    let a = tree.path().join("a.txt");
    let sub = tree.path().join("sub");
    let b = tree.path().join("sub").join("b.txt");
    let missing = tree.path().join("missing.txt");
    let list = write_list(list_dir.path(), &[&a, &sub, &b, &missing]);

    for method in ["stat", "attrs", "handle"] {
        let mut cmd = get_statbench_cmd();
        cmd.arg("stat").arg("--query").arg(method).arg(&list);

        cmd.assert()
            .success()
            .stderr(predicate::str::contains("entries: 4"))
            .stderr(predicate::str::contains("full time: "))
            .stderr(predicate::str::contains("time per entry: "))
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_stat_prints_result_in_nanoseconds() {
    let tree = sample_tree();
    let list = write_list(tree.path(), &[&tree.path().join("a.txt")]);

    let mut cmd = get_statbench_cmd();
    cmd.arg("stat").arg("-q").arg("stat").arg("-r").arg(&list);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\n$").unwrap());
}

#[test]
fn test_stat_json_report() {
    let tree = sample_tree();
    let list = write_list(tree.path(), &[&tree.path().join("a.txt"), &tree.path().join("sub")]);

    let output = get_statbench_cmd()
        .arg("stat")
        .arg("--query")
        .arg("handle")
        .arg("--json")
        .arg(&list)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["command"], "stat");
    assert_eq!(report["method"], "handle");
    assert_eq!(report["entries"], 2);
    assert!(report.get("check").is_none());
    assert!(report["per_entry_ns"].as_u64().unwrap() <= report["elapsed_ns"].as_u64().unwrap());
}

#[test]
fn test_stat_empty_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("empty.txt");
    fs::write(&list, "").unwrap();

    let mut cmd = get_statbench_cmd();
    cmd.arg("stat").arg("--query").arg("stat").arg(&list);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: no entries in"));
}

#[test]
fn test_stat_list_not_found() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("stat")
        .arg("--query")
        .arg("stat")
        .arg("/path/to/nonexistent/list.txt");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: open() failed for /path/to/nonexistent/list.txt"));
}

#[test]
fn test_stat_requires_query_method() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("stat").arg("list.txt");

    cmd.assert().failure().code(1);
}

#[test]
fn test_stat_rejects_unknown_query_method() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("stat").arg("--query").arg("findfirst").arg("list.txt");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("findfirst"));
}

// --- iter ---

#[test]
fn test_iter_counts_entries() {
    let tree = sample_tree();

    for list in ["readdir", "bulk"] {
        let mut cmd = get_statbench_cmd();
        cmd.arg("iter").arg("--list").arg(list).arg(tree.path());

        cmd.assert()
            .success()
            .stderr(predicate::str::contains("entries: 3"))
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_iter_cross_check() {
    let tree = sample_tree();

    for check in ["stat", "attrs", "handle"] {
        let mut cmd = get_statbench_cmd();
        cmd.arg("iter")
            .arg("--list")
            .arg("bulk")
            .arg("--check")
            .arg(check)
            .arg(tree.path());

        cmd.assert()
            .success()
            .stderr(predicate::str::contains("entries: 3"));
    }
}

#[test]
fn test_iter_print_levels() {
    let tree = sample_tree();
    let b = tree.path().join("sub").join("b.txt");

    let mut cmd = get_statbench_cmd();
    cmd.arg("iter").arg("-l").arg("readdir").arg("-P").arg("1").arg(tree.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!("{}\n", b.display())))
        .stdout(predicate::str::contains(" mod ").not());

    let mut cmd = get_statbench_cmd();
    cmd.arg("iter")
        .arg("-l")
        .arg("bulk")
        .arg("-c")
        .arg("stat")
        .arg("-P")
        .arg("2")
        .arg(tree.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!("{} reg mod ", b.display())))
        .stdout(predicate::str::contains(" smod "))
        .stdout(predicate::str::contains(" dir mod "));
}

#[test]
fn test_iter_json_report_with_result() {
    let tree = sample_tree();

    let output = get_statbench_cmd()
        .arg("iter")
        .arg("--list")
        .arg("bulk")
        .arg("--check")
        .arg("attrs")
        .arg("-r")
        .arg("--json")
        .arg(tree.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    let nanos: u64 = lines.next().unwrap().parse().unwrap();
    let report: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(report["command"], "iter");
    assert_eq!(report["method"], "bulk");
    assert_eq!(report["check"], "attrs");
    assert_eq!(report["entries"], 3);
    assert_eq!(report["per_entry_ns"].as_u64().unwrap(), nanos);
}

#[test]
fn test_iter_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = get_statbench_cmd();
    cmd.arg("iter").arg("--list").arg("bulk").arg(dir.path());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: no entries in"));
}

#[test]
fn test_iter_root_not_found() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("iter")
        .arg("--list")
        .arg("readdir")
        .arg("/path/to/nonexistent/dir");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("opendir() failed for /path/to/nonexistent/dir"))
        .stderr(predicate::str::contains("No such file or directory"));
}

// --- avg ---

#[test]
fn test_avg() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("avg").arg("1000").arg("3");

    cmd.assert().success().stdout("333\n");
}

#[test]
fn test_avg_zero_count() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("avg").arg("1000").arg("0");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: count must be non-zero"));
}

#[test]
fn test_avg_not_a_number() {
    let mut cmd = get_statbench_cmd();
    cmd.arg("avg").arg("many").arg("3");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid SUM 'many'"));
}

#[test]
fn test_no_command() {
    get_statbench_cmd().assert().failure().code(1);
}
