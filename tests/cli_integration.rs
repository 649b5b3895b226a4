//! Integration tests for the azq CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Anything that talks to Azure needs a signed-in `az` and real vaults,
//! so we stick to argument handling, completions, and config errors
//! that surface before the first Azure call.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the azq binary.
fn azq() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("azq").expect("binary should exist");
    cmd.env_remove("AZQ_CONFIG").env_remove("AZQ_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    azq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Azure Key Vault"))
        .stdout(predicate::str::contains("keyvault"))
        .stdout(predicate::str::contains("subscription"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    azq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("azq"));
}

#[test]
fn no_args_shows_help() {
    azq()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn keyvault_help_lists_flags() {
    azq()
        .args(["kv", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--vault"))
        .stdout(predicate::str::contains("--pick-vault"))
        .stdout(predicate::str::contains("--copy"))
        .stdout(predicate::str::contains("--no-copy"));
}

#[test]
fn vault_and_pick_vault_are_mutually_exclusive() {
    azq()
        .args(["kv", "db-pass", "--vault", "kv-prod", "--pick-vault"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn subscription_help_shows_actions() {
    azq()
        .args(["sub", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn subscription_requires_an_action() {
    azq().arg("subscription").assert().failure();
}

#[test]
fn completions_bash_generates_script() {
    azq()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("azq"));
}

#[test]
fn completions_zsh_generates_compdef() {
    azq()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef azq"));
}

#[test]
fn completions_unknown_shell_fails() {
    azq()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'csh'"));
}

#[test]
fn malformed_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.child("config.toml");
    config.write_str("page_size = \"twenty\"\n").unwrap();

    azq()
        .args(["kv", "db-pass", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn zero_page_size_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.child("config.toml");
    config.write_str("page_size = 0\n").unwrap();

    azq()
        .args(["sub", "list"])
        .env("AZQ_CONFIG", config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}
