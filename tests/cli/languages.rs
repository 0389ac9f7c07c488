use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_languages_lists_builtin_styles() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("languages");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    let ruby = out
        .stdout
        .lines()
        .find(|l| l.starts_with("ruby "))
        .expect("ruby should be listed");
    assert!(ruby.contains('#'));
    assert!(ruby.contains(".rb"));

    Ok(())
}
