use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_scan_text_output() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.py",
        "# TODO: add caching\ndef load():\n    pass\n",
    )?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("todo: add caching\n"));
    assert!(out.stdout.contains("app.py:1\n"));
    assert!(out.stdout.contains(" 2 | def load():\n"));
    assert!(
        out.stdout
            .contains("Found 1 annotation in 1 file (1 file scanned)")
    );

    Ok(())
}

#[test]
fn test_scan_clean_project() -> Result<()> {
    let test = CliTest::with_file("lib/a.rb", "puts 'hello'\n")?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "\u{2713} No annotations found (1 file scanned)\n");

    Ok(())
}

#[test]
fn test_scan_json_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("db/database.py", include_str!("../fixtures/database.py"))?;
    test.write_file("web/server.js", include_str!("../fixtures/server.js"))?;
    test.write_file("README.md", "TODO: not a source file\n")?;

    let mut cmd = test.scan_command();
    cmd.args(["--format", "json"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    let value: Value = serde_json::from_str(&out.stdout)?;
    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0]["path"].as_str().unwrap().ends_with("database.py"));
    assert_eq!(files[0]["language"], "python");
    assert_eq!(files[1]["language"], "javascript");
    assert_eq!(value["summary"]["files_scanned"], 2);
    assert_eq!(value["summary"]["annotations"], 19 + 18);

    Ok(())
}

#[test]
fn test_scan_collection_block_json() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "// TODOS.START\n// Add auth\n// - JWT support\n// TODOS.END\nfunction f() {}\n",
    )?;

    let mut cmd = test.scan_command();
    cmd.args(["--format", "json"]);
    let out = run(cmd)?;

    let value: Value = serde_json::from_str(&out.stdout)?;
    let annotation = &value["files"][0]["annotations"][0];
    assert_eq!(annotation["type"], "collection_block");
    assert_eq!(annotation["start_line"], 1);
    assert_eq!(annotation["end_line"], 4);
    assert_eq!(annotation["body"][1]["text"], "- JWT support");
    assert_eq!(annotation["anchor"]["line"], 5);

    Ok(())
}

#[test]
fn test_scan_deny_warnings() -> Result<()> {
    let test = CliTest::with_file("a.js", "// }\nlet x = 1;\n")?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("stray-closer"));
    assert!(out.stdout.contains("1 problem (0 errors, 1 warning)"));

    let mut cmd = test.scan_command();
    cmd.arg("--deny-warnings");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(1));

    Ok(())
}

#[test]
fn test_scan_unterminated_block_still_reported() -> Result<()> {
    let test = CliTest::with_file("a.py", "# TODO: {\n# first step\nx = 1\n")?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("todo block (1 line)\n"));
    assert!(out.stdout.contains("= first step\n"));
    assert!(out.stdout.contains("unterminated-block"));

    Ok(())
}

#[test]
fn test_scan_explicit_unknown_file() -> Result<()> {
    let test = CliTest::with_file("NOTES", "# TODO: write changelog\n")?;

    let mut cmd = test.scan_command();
    cmd.arg("NOTES");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("todo: write changelog"));
    assert!(out.stdout.contains("unresolved-language"));

    Ok(())
}

#[test]
fn test_scan_kind_filter() -> Result<()> {
    let test = CliTest::with_file(
        "a.rb",
        "# TODO: one\n# FIXME: two\n# XXX: three\nputs 1\n",
    )?;

    let mut cmd = test.scan_command();
    cmd.args(["--kind", "fixme", "--no-context"]);
    let out = run(cmd)?;

    assert!(out.stdout.contains("fixme: two"));
    assert!(!out.stdout.contains("todo: one"));
    assert!(!out.stdout.contains("xxx: three"));
    assert!(!out.stdout.contains("puts 1"));

    Ok(())
}

#[test]
fn test_scan_output_file() -> Result<()> {
    let test = CliTest::with_file("a.go", "// XXX: racy\nfunc main() {}\n")?;

    let mut cmd = test.scan_command();
    cmd.args(["--format", "json", "--output", "report.json"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.is_empty());
    let value: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(value["files"][0]["annotations"][0]["keyword"], "XXX");

    Ok(())
}

#[test]
fn test_scan_custom_language_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".todoctlrc.json",
        r#"{
          "extensions": { "nut": "squirrel" },
          "languages": { "squirrel": { "leaders": ["//"] } }
        }"#,
    )?;
    test.write_file("game.nut", "// TODO: spawn enemies\nlocal x = 1;\n")?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("todo: spawn enemies"));
    assert!(!out.stdout.contains("unresolved-language"));

    Ok(())
}

#[test]
fn test_scan_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".todoctlrc.json", r#"{ "ignores": ["[oops"] }"#)?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Error:"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Usage:"));

    Ok(())
}
