use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "stitchwork-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_validates_bundled_catalogs() {
    let exe = env!("CARGO_BIN_EXE_stitchwork-tester");
    let output_path = temp_path("bundled");
    let status = Command::new(exe)
        .args(["--mode", "validate", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("parts.jsonc Validated!"));
    assert!(content.contains("titles.jsonc Validated!"));
}

#[test]
fn cli_fails_on_catalog_missing_slots() {
    let exe = env!("CARGO_BIN_EXE_stitchwork-tester");
    let data_dir = temp_path("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    std::fs::write(
        data_dir.join("parts.jsonc"),
        r#"{
            // slots missing on purpose
            "arm": {
                "baseStats": { "health": 30, "defense": 30, "attack": 30 },
                "sockets": { "female": 1, "male": 0 }
            }
        }"#,
    )
    .expect("write parts");
    std::fs::write(data_dir.join("titles.jsonc"), "{}").expect("write titles");

    let output_path = temp_path("broken");
    let status = Command::new(exe)
        .args(["--mode", "both", "--data-dir"])
        .arg(&data_dir)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(!status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("parts.jsonc"));
    assert!(content.contains("missing `slots`"));
}

#[test]
fn cli_spawns_with_titles() {
    let exe = env!("CARGO_BIN_EXE_stitchwork-tester");
    let output_path = temp_path("spawn");
    let status = Command::new(exe)
        .args([
            "--mode", "spawn", "--parts", "arm,leg", "--titles", "giant", "--seeds", "1,2",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(content.matches("Part `arm`").count(), 2);
    assert_eq!(content.matches("Part `leg`").count(), 2);
}
