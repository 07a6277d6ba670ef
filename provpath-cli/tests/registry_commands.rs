//! Integration tests for `convert-registry` and `providers`.

mod common;

use common::TestEnv;
use predicates::prelude::*;

const SID: &str = "S-1-5-21-1000";

#[test]
fn test_convert_expands_hive_alias() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", r"HKLM\SOFTWARE\Vendor"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Provpath.Core\\Registry::HKEY_LOCAL_MACHINE\\SOFTWARE\\Vendor\n",
        ));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_convert_32bit_view() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", "--32bit", r"HKLM:\SOFTWARE\Vendor"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r"HKEY_LOCAL_MACHINE\SOFTWARE\Wow6432Node\Vendor",
        ));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_convert_32bit_view_from_config() {
    let env = TestEnv::new();
    env.write_file("provpath.yaml", "use_32bit_view: true\n");

    env.command()
        .args(["convert-registry", r"HKLM:\SOFTWARE\Vendor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wow6432Node"));
}

#[test]
fn test_convert_sid_rebase() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", "--sid", SID, r"HKCU\Software\Vendor"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            r"Registry::HKEY_USERS\{SID}\Software\Vendor"
        )));
}

#[test]
fn test_convert_sid_on_machine_key_declines() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", "--sid", SID, r"HKLM\SOFTWARE"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_convert_sid_mismatch_logged_when_verbose() {
    let env = TestEnv::new();

    env.command()
        .args(["--verbose", "convert-registry", "--sid", SID, r"HKLM\SOFTWARE"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("RegistryRootMismatch"));
}

#[test]
fn test_convert_rejects_malformed_sid() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", "--sid", r"..\HKLM", r"HKCU\Software"])
        .assert()
        .code(4);
}

#[test]
fn test_convert_filesystem_path_is_mismatch() {
    let env = TestEnv::new();

    env.command()
        .args(["convert-registry", "FileSystem::/tmp"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("provider mismatch"));
}

#[test]
fn test_providers_lists_default_first() {
    let env = TestEnv::new();

    env.command()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Provpath.Core\\FileSystem (default)\nProvpath.Core\\Registry\n",
        ));
}

#[test]
fn test_providers_json_with_configured_default() {
    let env = TestEnv::new();
    env.write_file("provpath.yaml", "default_provider: Registry\n");

    let output = env
        .command()
        .args(["--format", "json", "providers"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "FileSystem");
    assert_eq!(value[0]["default"], false);
    assert_eq!(value[1]["name"], "Registry");
    assert_eq!(value[1]["default"], true);
}
