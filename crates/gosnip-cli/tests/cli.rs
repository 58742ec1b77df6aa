#![cfg(unix)]
//! Binary-level tests. A shell script stands in for the Go toolchain.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Prints the generated program back.
const CAT_TOOLCHAIN: &str = "cat \"$2\"\n";

struct Fixture {
    dir: TempDir,
    toolchain: String,
}

impl Fixture {
    fn new(script: &str) -> Self {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toolchain.sh");
        fs::write(&path, script).unwrap();
        let toolchain = format!("sh '{}'", path.display());
        Self { dir, toolchain }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn scratch_dir(&self) -> PathBuf {
        self.root().join(".gosnip").join("files")
    }

    /// `gosnip` with environment overrides cleared, run inside the fixture.
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gosnip").unwrap();
        cmd.current_dir(self.root())
            .env_remove("GOSNIP_SCRATCH_DIR")
            .env_remove("GOSNIP_TOOLCHAIN")
            .env_remove("GOSNIP_KEEP_FILES")
            .env_remove("GOSNIP_TIMEOUT_SECS")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Top-level evaluation wired to the stand-in toolchain.
    fn eval(&self) -> Command {
        let mut cmd = self.command();
        cmd.args(["--toolchain", &self.toolchain]);
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().clone();
    String::from_utf8(output.stdout).unwrap()
}

fn stderr_of_failure(cmd: &mut Command) -> (String, String) {
    let output = cmd.assert().failure().get_output().clone();
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn auto_print_program_reaches_toolchain() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let stdout = stdout_of(fixture.eval().args(["-c", "3 + 2", "-l", "fmt, strings"]));

    assert!(stdout.starts_with("package main\nimport (\n\t\"fmt\"\n\"strings\"\n)"));
    assert!(stdout.contains("\treturn 3 + 2\n"));
    assert!(stdout.ends_with("}\n"));
}

#[test]
fn single_dash_long_flags() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let stdout = stdout_of(fixture.eval().args(["-content", "3 + 2", "-libs=strings"]));

    assert!(stdout.contains("\t\"fmt\"\n\"strings\"\n)"));
    assert!(stdout.contains("\treturn 3 + 2\n"));

    let program = "package main\n\nfunc main() {}";
    let path = fixture.root().join("main.go");
    fs::write(&path, program).unwrap();
    let stdout = stdout_of(fixture.eval().args(["-mode", "raw", "-file", path.to_str().unwrap()]));
    assert_eq!(stdout, format!("{}\n", program));
}

#[test]
fn scratch_files_are_removed_by_default() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    stdout_of(fixture.eval().args(["-c", "1"]));

    assert!(fixture.scratch_dir().exists());
    assert_eq!(fs::read_dir(fixture.scratch_dir()).unwrap().count(), 0);
}

#[test]
fn missing_input_fails_before_any_file_activity() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let (stdout, stderr) = stderr_of_failure(&mut fixture.eval());

    assert!(stdout.is_empty());
    assert!(stderr.contains("no code to run"));
    assert!(!fixture.root().join(".gosnip").exists());
}

#[test]
fn print_call_is_rejected() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let (stdout, stderr) = stderr_of_failure(fixture.eval().args(["-c", "fmt.Println(1)"]));

    assert!(stdout.is_empty());
    assert!(stderr.contains("fmt.Println"));
}

#[test]
fn file_wins_over_content() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let program = "package main\n\nfunc main() {\n\tprintln(\"from file\")\n}";
    let path = fixture.root().join("main.go");
    fs::write(&path, format!("\n{}\n\n", program)).unwrap();

    let stdout = stdout_of(fixture.eval().args([
        "-f",
        path.to_str().unwrap(),
        "-c",
        "1 + 1",
        "-m",
        "auto",
    ]));
    assert_eq!(stdout, format!("{}\n", program));
}

#[test]
fn toolchain_failure_is_reported_on_stderr() {
    let fixture = Fixture::new("echo 'syntax error: unexpected }' >&2\nexit 2\n");
    let (stdout, stderr) = stderr_of_failure(fixture.eval().args(["-c", "1 +"]));

    assert!(stdout.is_empty());
    assert!(stderr.contains("exit status 2"));
    assert!(stderr.contains("syntax error: unexpected }"));
}

#[test]
fn json_output() {
    let fixture = Fixture::new("echo 5\n");
    let stdout = stdout_of(fixture.eval().args(["--json", "-c", "3 + 2"]));
    assert_eq!(stdout, "{\"output\":\"5\",\"error\":null}\n");

    let fixture = Fixture::new("echo boom >&2\nexit 1\n");
    let output = fixture
        .eval()
        .args(["--json", "-c", "3 + 2"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["output"], "");
    assert_eq!(json["error"], "exit status 1\nboom");
}

#[test]
fn timeout_kills_the_program() {
    let fixture = Fixture::new("sleep 30\n");
    let (stdout, stderr) =
        stderr_of_failure(fixture.eval().args(["--timeout", "0.3", "-c", "1"]));

    assert!(stdout.is_empty());
    assert!(stderr.contains("did not finish"));
}

#[test]
fn emit_does_not_run_anything() {
    let fixture = Fixture::new("echo ran > ran.txt\n");
    let stdout = stdout_of(fixture.command().args([
        "emit",
        "-m",
        "program-body",
        "-l",
        "os",
        "-c",
        "func main() { os.Exit(0) }",
    ]));

    assert_eq!(
        stdout,
        "package main\nimport (\n\t\"fmt\"\n\"os\"\n)\n\nfunc main() { os.Exit(0) }\n"
    );
    assert!(!fixture.root().join(".gosnip").exists());
    assert!(!fixture.root().join("ran.txt").exists());
}

#[test]
fn kept_files_survive_until_purge() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    stdout_of(fixture.eval().args(["--keep", "-c", "1"]));
    stdout_of(fixture.eval().args(["--keep", "-c", "2"]));
    assert_eq!(fs::read_dir(fixture.scratch_dir()).unwrap().count(), 2);

    let stdout = stdout_of(fixture.command().arg("purge"));
    assert!(stdout.starts_with("Removed"));
    assert!(!fixture.scratch_dir().exists());

    // Nothing left to remove is still a success.
    stdout_of(fixture.command().arg("purge"));
}

#[test]
fn env_config_is_honored() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let elsewhere = fixture.root().join("elsewhere");

    let mut cmd = fixture.command();
    cmd.env("GOSNIP_TOOLCHAIN", &fixture.toolchain)
        .env("GOSNIP_SCRATCH_DIR", &elsewhere)
        .env("GOSNIP_KEEP_FILES", "1")
        .args(["-c", "7"]);
    stdout_of(&mut cmd);

    assert_eq!(fs::read_dir(elsewhere.join("files")).unwrap().count(), 1);
    assert!(!fixture.root().join(".gosnip").exists());
}

#[test]
fn info_reports_configuration() {
    let fixture = Fixture::new(CAT_TOOLCHAIN);
    let stdout = stdout_of(fixture.command().args(["info", "--toolchain", "go1.22"]));

    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stdout.contains("go1.22 run <file>"));
    assert!(stdout.contains("program-body"));
    assert!(stdout.contains("Templates (version 1)"));
    assert!(stdout.contains("__LIBS__ __CMD__ __MAIN__"));
}
