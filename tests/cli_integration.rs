#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CARD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nN:Doe;Jane;;;\r\nTEL;TYPE=cell:555-1111\r\nTEL;TYPE=work:555-2222\r\nEMAIL:jane@example.com\r\nEND:VCARD\r\n";

fn qrvc_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qrvc").unwrap();
    cmd.current_dir(dir)
        .env_remove("QRVC_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn temp_with_card(name: &str) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join(name), CARD).unwrap();
    temp
}

#[test]
fn silent_run_writes_vcard_and_png() {
    let temp = temp_with_card("jane.vcf");

    qrvc_cmd(temp.path())
        .args(["-s", "-i", "jane.vcf", "-o", "out", "-z", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are running qrvc").not())
        .stdout(predicate::str::contains("👋"));

    let vcf = fs::read_to_string(temp.path().join("out.vcf")).unwrap();
    assert_eq!(
        vcf,
        "BEGIN:VCARD\r\nVERSION:3.0\r\nADR:;;;;;;\r\nEMAIL:jane@example.com\r\nN:Doe;Jane;;;\r\nTEL;TYPE=cell:555-1111\r\nTEL;TYPE=work:555-2222\r\nEND:VCARD\r\n"
    );

    let png = image::open(temp.path().join("out.png")).unwrap();
    assert_eq!((png.width(), png.height()), (120, 120));
}

#[test]
fn output_stem_defaults_to_input_base_name() {
    let temp = temp_with_card("contact.vcf");

    qrvc_cmd(temp.path())
        .args(["-s", "-i", "contact.vcf"])
        .assert()
        .success();

    assert!(temp.path().join("contact.png").exists());
    let png = image::open(temp.path().join("contact.png")).unwrap();
    assert_eq!(png.width(), 400);
}

#[test]
fn input_without_extension_uses_vcf_file() {
    let temp = temp_with_card("jane.vcf");

    qrvc_cmd(temp.path())
        .args(["-s", "-i", "jane", "-o", "result"])
        .assert()
        .success();

    let vcf = fs::read_to_string(temp.path().join("result.vcf")).unwrap();
    assert!(vcf.contains("TEL;TYPE=work:555-2222\r\n"));
}

#[test]
fn silent_without_input_fails() {
    let temp = tempfile::tempdir().unwrap();

    qrvc_cmd(temp.path())
        .arg("-s")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing input file path"))
        .stdout(predicate::str::contains("👋").not());

    assert!(!temp.path().join("vcard.vcf").exists());
}

#[test]
fn malformed_input_fails_with_path() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("broken.vcf"), "NOT A VCARD").unwrap();

    qrvc_cmd(temp.path())
        .args(["-s", "-i", "broken.vcf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Could not read the vCard"))
        .stderr(predicate::str::contains("broken.vcf"))
        .stdout(predicate::str::contains("👋"));

    assert!(!temp.path().join("broken.png").exists());
}

#[test]
fn invalid_color_fails() {
    let temp = temp_with_card("jane.vcf");

    qrvc_cmd(temp.path())
        .args(["-s", "-i", "jane.vcf", "-f", "no-such-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn bom_prints_cyclonedx_json() {
    let temp = tempfile::tempdir().unwrap();

    let output = qrvc_cmd(temp.path()).arg("--bom").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("👋"));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["bomFormat"], "CycloneDX");
    assert_eq!(value["metadata"]["component"]["name"], "qrvc");
    assert!(!temp.path().join("vcard.vcf").exists());
}

#[test]
fn help_shows_flags_and_version() {
    let temp = tempfile::tempdir().unwrap();

    qrvc_cmd(temp.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("qrvc "))
        .stdout(predicate::str::contains("--silent"))
        .stdout(predicate::str::contains("--recovery"));
}
