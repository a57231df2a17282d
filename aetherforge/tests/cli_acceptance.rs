use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.xdg_config.join("aetherforge/config.toml")
    }

    fn write_config(&self, path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().expect("missing config parent"))
            .expect("failed to create config directory");
        fs::write(path, contents).expect("failed to write config");
    }
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("aetherforge"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute aetherforge: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "aetherforge {} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        output.status,
        stdout,
        stderr
    );
}

#[test]
fn check_reports_defaults_without_config_file() {
    let env = CliTestEnv::new();

    let args = ["--check"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Standard model:  gemini-2.5-flash"));
    assert!(stdout.contains("Strategic model: gemini-3-pro-preview"));
    assert!(stdout.contains("Thinking budget: 16000"));
    assert!(stdout.contains("API key:         missing"));
    assert!(
        stdout.contains(&env.config_path().display().to_string()),
        "expected default config path in output, got:\n{stdout}"
    );
}

#[test]
fn check_reads_config_from_xdg_dir() {
    let env = CliTestEnv::new();
    env.write_config(
        &env.config_path(),
        r#"
[oracle]
api_key = "test-key"
standard_model = "gemini-test-flash"
grounding = false
"#,
    );

    let args = ["--check"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Standard model:  gemini-test-flash"));
    assert!(stdout.contains("Grounding:       off"));
    assert!(stdout.contains("API key:         present"));
}

#[test]
fn check_honors_explicit_config_flag() {
    let env = CliTestEnv::new();
    let custom = env.home.join("custom.toml");
    env.write_config(
        &custom,
        r#"
[oracle]
strategic_model = "gemini-test-pro"
thinking_budget = 2048
"#,
    );

    let custom_arg = custom.display().to_string();
    let args = ["--config", custom_arg.as_str(), "--check"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Strategic model: gemini-test-pro"));
    assert!(stdout.contains("Thinking budget: 2048"));
    assert!(stdout.contains(&custom_arg));
}

#[test]
fn malformed_config_fails_with_context() {
    let env = CliTestEnv::new();
    env.write_config(&env.config_path(), "[oracle\nthis is not toml");

    let output = run_bin(&env, &["--check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to load configuration"),
        "expected load context in stderr, got:\n{stderr}"
    );
}

#[test]
fn unknown_stage_is_rejected() {
    let env = CliTestEnv::new();

    let output = run_bin(&env, &["--stage", "sprout", "--check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown stage: sprout"));
}
