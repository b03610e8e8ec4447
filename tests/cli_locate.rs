use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn normalize_output(output: &[u8]) -> String {
    String::from_utf8_lossy(output).replace("\r\n", "\n")
}

/// A workspace with one source root and an unrelated working directory.
struct Fixture {
    _tmp: TempDir,
    root: std::path::PathBuf,
    work: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let tmp = tempdir().expect("tempdir");
    let base = tmp.path().canonicalize().expect("canonical tempdir");
    let root = base.join("go");
    let work = base.join("work");
    fs::create_dir_all(&root).expect("create root");
    fs::create_dir_all(&work).expect("create work");
    Fixture {
        _tmp: tmp,
        root,
        work,
    }
}

fn projgen(cwd: &Path, roots: &Path) -> Command {
    let mut cmd = Command::cargo_bin("projgen").expect("binary");
    cmd.current_dir(cwd).env("PROJGEN_PATH", roots);
    cmd
}

#[test]
fn locate_new_name_falls_back_to_first_root() {
    let fx = fixture();
    let expected = fx.root.join("github.com").join("user").join("app");

    projgen(&fx.work, &fx.root)
        .args(["locate", "github.com/user/app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name:         github.com/user/app"))
        .stdout(predicate::str::contains(expected.display().to_string()))
        .stdout(predicate::str::contains("license:      None"));
}

#[test]
fn locate_absolute_path_in_command_dir_reports_project_root() {
    let fx = fixture();
    let project = fx.root.join("github.com").join("user").join("app");
    let cmd_dir = project.join("cmd");
    fs::create_dir_all(&cmd_dir).expect("create cmd");
    fs::write(cmd_dir.join("root.rs"), "// root\n").expect("write root.rs");

    let assert = projgen(&fx.work, &fx.root)
        .args(["locate", cmd_dir.to_str().expect("utf-8 path"), "--format", "yaml"])
        .assert()
        .success();

    let stdout = normalize_output(&assert.get_output().stdout);
    assert!(stdout.contains("name: github.com/user/app"), "stdout was: {stdout}");
    assert!(stdout.contains(&project.display().to_string()), "stdout was: {stdout}");
}

#[test]
fn locate_path_outside_source_roots_fails_loudly() {
    let fx = fixture();
    let outside = fx.work.join("elsewhere");

    let assert = projgen(&fx.work, &fx.root)
        .args(["locate", outside.to_str().expect("utf-8 path")])
        .assert()
        .code(1);

    let stderr = normalize_output(&assert.get_output().stderr);
    assert!(stderr.contains("error (locate)"));
    assert!(stderr.contains("within a configured source root"));
}

#[test]
fn locate_uses_license_from_project_config() {
    let fx = fixture();
    fs::write(fx.work.join("LICENSE.header"), "Copyright the authors\n").expect("write header");
    fs::write(
        fx.work.join("projgen.yml"),
        "license:\n  name: Apache-2.0\n  file: LICENSE.header\n",
    )
    .expect("write projgen.yml");

    projgen(&fx.work, &fx.root)
        .args(["locate", "tool", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Apache-2.0"))
        .stdout(predicate::str::contains("Copyright the authors"));
}

#[test]
fn license_flag_none_opts_out() {
    let fx = fixture();
    fs::write(
        fx.work.join("projgen.yml"),
        "license:\n  name: MIT\n  text: MIT header\n",
    )
    .expect("write projgen.yml");

    projgen(&fx.work, &fx.root)
        .args(["locate", "tool", "--license", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("license:      None"));
}

#[test]
fn roots_marks_the_root_holding_the_working_directory() {
    let fx = fixture();
    let inside = fx.root.join("src");
    fs::create_dir_all(&inside).expect("create src");
    let roots = std::env::join_paths([&fx.work.join("other"), &fx.root]).expect("join paths");

    let mut cmd = Command::cargo_bin("projgen").expect("binary");
    let assert = cmd
        .current_dir(&inside)
        .env("PROJGEN_PATH", roots)
        .arg("roots")
        .assert()
        .success();

    let stdout = normalize_output(&assert.get_output().stdout);
    assert!(
        stdout.contains(&format!("* 2. {}", fx.root.display())),
        "stdout was: {stdout}"
    );
    assert!(stdout.contains("command dirs: cmd, cmds, command, commands"));
}

#[test]
fn config_init_writes_template_once() {
    let fx = fixture();

    projgen(&fx.work, &fx.root)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(fx.work.join("projgen.yml").exists());

    projgen(&fx.work, &fx.root)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
