use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn ddrs_cmd(home: &Path, workdir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ddrs"));
    cmd.current_dir(workdir);
    cmd.env("HOME", home);
    cmd.env_remove("DDRS_CONFIG");
    cmd.env_remove("DDRS_UI_COLOR");
    cmd.env_remove("DDRS_REPORT_CYCLE");
    cmd.env_remove("DDRS_COMPARE_LIST");
    cmd.env_remove("DDRS_COMPARE_LOG");
    cmd
}

fn run(home: &Path, workdir: &Path, args: &[&str]) -> Output {
    ddrs_cmd(home, workdir).args(args).output().expect("run ddrs")
}

fn make_temp_dir(tag: &str) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("ddrs-{tag}-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdirs");
    }
    std::fs::write(path, bytes).expect("write");
}

fn seed_matching_pair(home: &Path, work: &Path, list_name: &str) {
    let out = run(
        home,
        work,
        &["generate", "--rows", "2", "--out", "left", "--seed", "4"],
    );
    assert!(out.status.success(), "generate failed: {out:?}");
    std::fs::copy(work.join("left.csv"), work.join("right.csv")).expect("copy");
    write_file(&work.join(list_name), b"left|.csv|right|.csv\n");
}

#[test]
fn config_toml_sets_list_and_log_names() {
    let home = make_temp_dir("toml-home");
    let work = make_temp_dir("toml-work");
    write_file(
        &home.join(".config/ddrs/config.toml"),
        br#"
[compare]
list = "pairs.conf"
log = "audit.log"
"#,
    );
    seed_matching_pair(&home, &work, "pairs.conf");

    let out = run(&home, &work, &["--json", "compare"]);
    assert!(out.status.success(), "compare failed: {out:?}");

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["matched"], 1);
    assert!(work.join("audit.log").exists());

    let _ = std::fs::remove_dir_all(&home);
    let _ = std::fs::remove_dir_all(&work);
}

#[test]
fn env_overrides_the_config_file() {
    let home = make_temp_dir("env-home");
    let work = make_temp_dir("env-work");
    write_file(
        &home.join(".config/ddrs/config.toml"),
        br#"
[compare]
log = "toml.log"
"#,
    );
    seed_matching_pair(&home, &work, "ddr_config.txt");

    let out = ddrs_cmd(&home, &work)
        .env("DDRS_COMPARE_LOG", "env.log")
        .args(["--json", "compare"])
        .output()
        .expect("run ddrs");
    assert!(out.status.success(), "compare failed: {out:?}");

    assert!(work.join("env.log").exists());
    assert!(!work.join("toml.log").exists());

    let _ = std::fs::remove_dir_all(&home);
    let _ = std::fs::remove_dir_all(&work);
}

#[test]
fn flags_override_env_and_config() {
    let home = make_temp_dir("flag-home");
    let work = make_temp_dir("flag-work");
    seed_matching_pair(&home, &work, "ddr_config.txt");

    let out = ddrs_cmd(&home, &work)
        .env("DDRS_COMPARE_LOG", "env.log")
        .args(["--json", "compare", "--log", "flag.log"])
        .output()
        .expect("run ddrs");
    assert!(out.status.success(), "compare failed: {out:?}");

    assert!(work.join("flag.log").exists());
    assert!(!work.join("env.log").exists());

    let _ = std::fs::remove_dir_all(&home);
    let _ = std::fs::remove_dir_all(&work);
}

#[test]
fn config_show_emits_effective_config() {
    let home = make_temp_dir("show-home");
    let work = make_temp_dir("show-work");
    write_file(
        &home.join(".config/ddrs/config.toml"),
        br#"
[report]
cycle = 2019
"#,
    );

    let out = run(&home, &work, &["config", "--show"]);
    assert!(out.status.success(), "config show failed: {out:?}");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cycle = 2019"), "stdout={stdout}");
    assert!(stdout.contains("config_path"), "stdout={stdout}");
    assert!(stdout.contains("list = \"ddr_config.txt\""), "stdout={stdout}");

    let _ = std::fs::remove_dir_all(&home);
    let _ = std::fs::remove_dir_all(&work);
}

#[test]
fn cycle_override_flows_into_generated_reports() {
    let home = make_temp_dir("cycle-home");
    let work = make_temp_dir("cycle-work");

    let out = ddrs_cmd(&home, &work)
        .env("DDRS_REPORT_CYCLE", "2019")
        .args(["generate", "--rows", "2", "--out", "next", "--seed", "1"])
        .output()
        .expect("run ddrs");
    assert!(out.status.success(), "generate failed: {out:?}");

    let text = std::fs::read_to_string(work.join("next.csv")).expect("read report");
    assert!(text.contains("\"Cycle: 2019\""), "text={text}");
    for line in text.lines().skip(19) {
        assert!(line.starts_with("2019,"), "line={line}");
        // the data year trails the cycle
        assert!(line.contains(",2018,"), "line={line}");
    }

    let _ = std::fs::remove_dir_all(&home);
    let _ = std::fs::remove_dir_all(&work);
}
