use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_snapshot!(out.stdout.trim_end(), @"✓ Created .todoctlrc.json");

    let content = test.read_file(".todoctlrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("ignores").is_some());
    assert!(parsed.get("sourceRoot").is_some());
    assert!(parsed.get("languages").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".todoctlrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".todoctlrc.json already exists"));
    assert_eq!(test.read_file(".todoctlrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    run(cmd)?;
    test.write_file("src/main.rs", "// TODO: implement\nfn main() {}\n")?;

    let out = run(test.scan_command())?;
    assert_eq!(
        out.code,
        Some(0),
        "scan should work with initialized config. stderr: {}",
        out.stderr
    );
    assert!(out.stdout.contains("todo: implement"));

    Ok(())
}
