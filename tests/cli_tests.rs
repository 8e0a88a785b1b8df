use std::process::Command;

fn claimer_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arb-claimer"))
}

#[test]
fn test_cli_help() {
    let output = claimer_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "claim", "withdraw", "transfer-eth", "status"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
    assert!(stdout.contains("--config"));

    println!("✅ CLI help command works correctly");
}

#[test]
fn test_cli_invalid_command() {
    let output = claimer_bin()
        .arg("invalid-command")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));

    println!("✅ CLI correctly rejects invalid commands");
}

#[test]
fn test_cli_missing_config_fails_before_network() {
    let output = claimer_bin()
        .args(["--config", "configs/does_not_exist.toml", "claim"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does_not_exist.toml"));
}

#[test]
fn test_cli_rejects_malformed_destination() {
    let output = claimer_bin()
        .args(["--env", "withdraw"])
        .env("HTTP_NODE", "http://127.0.0.1:1")
        .env("PRV_KEY", "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
        .env("DEST_ADDRESS", "0x1234")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("0x1234"));
    assert!(!stderr.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
}

#[test]
fn test_derive_address_prints_account() {
    let output = Command::new(env!("CARGO_BIN_EXE_derive-address"))
        .arg("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
}
