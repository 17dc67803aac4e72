use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// Runs the binary with HOME and the config dir pointed into `home`, so no
/// user config file can leak in.
fn bench_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("threesum-bench").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Parses a results file into (size, mean) rows, checking the header.
fn read_results(path: &Path) -> Vec<(usize, f64)> {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with('#'), "missing header in {}", path.display());
    lines
        .map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(cols.len(), 2, "bad row {:?}", line);
            (cols[0].parse().unwrap(), cols[1].parse().unwrap())
        })
        .collect()
}

fn small_run_args(dir: &Path) -> Vec<String> {
    vec![
        "--results-dir".into(),
        dir.to_string_lossy().into_owned(),
        "--max-size".into(),
        "8".into(),
        "--trials".into(),
        "2".into(),
        "--seed".into(),
        "1".into(),
    ]
}

// ---- Self-check ----

#[test]
fn verify_subcommand_passes() {
    let home = TempDir::new().unwrap();
    bench_cmd(&home)
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-check: PASS"))
        .stdout(predicate::str::contains("with triples = 3"))
        .stdout(predicate::str::contains("without triples = 0"));
}

// ---- Runs ----

#[test]
fn default_runs_write_three_files() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("results");

    bench_cmd(&home)
        .args(small_run_args(&out))
        .assert()
        .success()
        .stdout(predicate::str::contains("ThreeSumFast-Exp2.txt"))
        .stdout(predicate::str::contains("Self-check: PASS"))
        .stderr(predicate::str::contains("running experiment 3/3"));

    for name in [
        "ThreeSumFast-Exp1-ThrowAway.txt",
        "ThreeSumFast-Exp2.txt",
        "ThreeSumFast-Exp3.txt",
    ] {
        let rows = read_results(&out.join(name));
        let sizes: Vec<usize> = rows.iter().map(|(s, _)| *s).collect();
        assert_eq!(sizes, vec![1, 2, 4, 8]);
        assert!(rows.iter().all(|(_, t)| *t >= 0.0));
    }
}

#[test]
fn explicit_run_names_and_subcommand_form() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("custom");

    bench_cmd(&home)
        .arg("run")
        .args(small_run_args(&out))
        .args(["--run", "only.txt", "--min-size", "2"])
        .assert()
        .success();

    let rows = read_results(&out.join("only.txt"));
    let sizes: Vec<usize> = rows.iter().map(|(s, _)| *s).collect();
    assert_eq!(sizes, vec![2, 4, 8]);
    assert!(!out.join("ThreeSumFast-Exp2.txt").exists());
}

#[test]
fn negative_value_bounds_and_brute_algorithm() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("r");

    bench_cmd(&home)
        .args(small_run_args(&out))
        .args(["--run", "brute.txt", "--min-value", "-10", "--max-value", "10"])
        .args(["--algorithm", "brute", "--no-warmup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("brute"));

    assert_eq!(read_results(&out.join("brute.txt")).len(), 4);
}

#[test]
fn json_summary_is_parseable() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("json");

    let assert = bench_cmd(&home)
        .args(small_run_args(&out))
        .args(["--run", "a.txt", "--run", "b.txt", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Self-check: PASS"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["config"]["trials"], 2);
    assert_eq!(parsed["config"]["seed"], 1);
    let runs = parsed["runs"].as_array().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["samples"].as_array().unwrap().len(), 4);
    assert_eq!(runs[1]["samples"][3]["size"], 8);
}

#[test]
fn skip_verify_omits_self_check() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("s");

    bench_cmd(&home)
        .args(small_run_args(&out))
        .args(["--run", "x.txt", "--skip-verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-check").not());
}

// ---- Failures ----

#[test]
fn unopenable_results_file_fails_only_that_run() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("mixed");
    // A directory where the results file should go cannot be opened.
    fs::create_dir_all(out.join("blocked.txt")).unwrap();

    bench_cmd(&home)
        .args(small_run_args(&out))
        .args(["--run", "blocked.txt", "--run", "ok.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not create results file"))
        .stderr(predicate::str::contains("1 of 2 benchmark runs failed"))
        .stdout(predicate::str::contains("Self-check: PASS"));

    assert_eq!(read_results(&out.join("ok.txt")).len(), 4);
}

#[test]
fn zero_trials_rejected() {
    let home = TempDir::new().unwrap();
    bench_cmd(&home)
        .args(["--trials", "0", "--results-dir"])
        .arg(home.path().join("z"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    assert!(!home.path().join("z").exists());
}

#[test]
fn inverted_value_range_rejected() {
    let home = TempDir::new().unwrap();
    bench_cmd(&home)
        .args(["--min-value", "10", "--max-value", "-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));
}

#[test]
fn verbose_and_quiet_conflict() {
    let home = TempDir::new().unwrap();
    bench_cmd(&home).args(["-v", "-q", "verify"]).assert().failure();
}

// ---- Config file ----

#[test]
fn config_file_with_cli_override() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("from-config");
    let config = home.path().join("bench.toml");
    fs::write(
        &config,
        format!(
            "results_dir = {:?}\nruns = [\"cfg.txt\"]\ntrials = 1\nmax_size = 64\nseed = 3\n",
            out.to_string_lossy()
        ),
    )
    .unwrap();

    bench_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["--max-size", "4"])
        .assert()
        .success();

    let sizes: Vec<usize> = read_results(&out.join("cfg.txt")).iter().map(|(s, _)| *s).collect();
    assert_eq!(sizes, vec![1, 2, 4]);
}

#[cfg(target_os = "linux")]
#[test]
fn default_config_location_is_used() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("xdg");
    let config_dir = home.path().join(".config").join("threesum-bench");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            "results_dir = {:?}\nruns = [\"xdg.txt\"]\ntrials = 1\nmax_size = 2\n",
            out.to_string_lossy()
        ),
    )
    .unwrap();

    bench_cmd(&home).assert().success();

    assert_eq!(read_results(&out.join("xdg.txt")).len(), 2);
}

#[test]
fn malformed_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "trials = \"many\"\n").unwrap();

    bench_cmd(&home)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
