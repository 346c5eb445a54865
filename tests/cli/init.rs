use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (output, stdout, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Created .relangrc.json"));

    let content = test.read_file(".relangrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["ignoreFileSuffixes"][0], ".Designer.cs");
    assert_eq!(parsed["sourceRoot"], "./");
    assert!(parsed["ignores"].is_array());
    assert!(parsed["includes"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".relangrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (output, _, stderr) = run(cmd)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(".relangrc.json already exists"));
    assert_eq!(test.read_file(".relangrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (output, stdout, _) = run(test.command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("fix"));
    assert!(!test.root().join(".relangrc.json").exists());

    Ok(())
}
