use assert_cmd::Command;
use predicates::prelude::*;

fn write_spec(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn mean_on_bounded_stream_prints_final_interval() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(
        dir.path(),
        "spec.yaml",
        "name: latency\nalpha: 0.05\nkind: bounded\nsupport:\n  a: 0.0\n  b: 1.0\ntwo_sided: true\nclip_mode: clip\n",
    );
    let data = write_spec(dir.path(), "data.csv", "0.1\n0.2\n0.3\n0.4\n0.5\n");

    Command::cargo_bin("cs-cli")
        .unwrap()
        .args(["mean", "--spec", spec.to_str().unwrap(), "--data", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- final ---"))
        .stdout(predicate::str::contains("tier=GUARANTEED"));
}

#[test]
fn mean_rejects_malformed_spec_with_exit_code_two() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "spec.yaml", "name: x\nalpha: 1.9\nkind: bounded\nsupport:\n  a: 0.0\n  b: 1.0\ntwo_sided: true\nclip_mode: clip\n");
    let data = write_spec(dir.path(), "data.csv", "0.1\n");

    Command::cargo_bin("cs-cli")
        .unwrap()
        .args(["mean", "--spec", spec.to_str().unwrap(), "--data", data.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn mean_raises_assumption_violation_with_exit_code_three() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(
        dir.path(),
        "spec.yaml",
        "name: x\nalpha: 0.05\nkind: bounded\nsupport:\n  a: 0.0\n  b: 1.0\ntwo_sided: true\nclip_mode: error\n",
    );
    let data = write_spec(dir.path(), "data.csv", "0.1\n5.0\n");

    Command::cargo_bin("cs-cli")
        .unwrap()
        .args(["mean", "--spec", spec.to_str().unwrap(), "--data", data.to_str().unwrap()])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn abtest_on_bernoulli_streams_prints_final_interval() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(
        dir.path(),
        "ab.yaml",
        "name: checkout\nalpha: 0.05\nkind: bernoulli\nsupport:\n  a: 0.0\n  b: 1.0\ntwo_sided: true\nclip_mode: clip\n",
    );
    let data = write_spec(
        dir.path(),
        "data.csv",
        "1,A\n0,A\n1,A\n1,B\n1,B\n0,B\n1,B\n",
    );

    Command::cargo_bin("cs-cli")
        .unwrap()
        .args([
            "abtest",
            "--spec",
            spec.to_str().unwrap(),
            "--data",
            data.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- final ---"));
}

#[test]
fn json_flag_emits_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(
        dir.path(),
        "spec.yaml",
        "name: latency\nalpha: 0.05\nkind: bounded\nsupport:\n  a: 0.0\n  b: 1.0\ntwo_sided: true\nclip_mode: clip\n",
    );
    let data = write_spec(dir.path(), "data.csv", "0.1\n0.2\n");

    Command::cargo_bin("cs-cli")
        .unwrap()
        .args([
            "--json",
            "mean",
            "--spec",
            spec.to_str().unwrap(),
            "--data",
            data.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tier\":\"GUARANTEED\""));
}
