use anyhow::Result;

use crate::{CliTest, MAIN_FORM_CS, MARKED_RESX, run};

const RESTORED_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <data name="$this.Text" xml:space="preserve">
    <value>Main</value>
  </data>
</root>
"#;

#[test]
fn test_fix_dry_run_prints_diff() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;

    let (output, stdout, _) = run(test.fix_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("+++ b/./Forms/MainForm.resx"));
    assert!(stdout.contains(
        "-  <metadata name=\"$this.Language\" type=\"System.Globalization.CultureInfo, mscorlib\">"
    ));
    assert!(stdout.contains("-    <value>de-DE</value>"));
    assert!(stdout.contains("-  </metadata>"));
    assert!(stdout.contains("Would restore the default language in 1 resource file(s)."));
    assert!(stdout.contains("Run with --apply to rewrite these files."));

    // Dry run never writes.
    assert_eq!(test.read_file("Forms/MainForm.resx")?, MARKED_RESX);

    Ok(())
}

#[test]
fn test_fix_apply_restores_default_language() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, stdout, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains(
        "Restored the default language in 1 resource file(s) (processed 1 issue(s))."
    ));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, RESTORED_RESX);

    let (output, _, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_fix_apply_twice_is_idempotent() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;

    let mut first = test.fix_command();
    first.arg("--apply");
    run(first)?;

    let mut second = test.fix_command();
    second.arg("--apply");
    let (output, stdout, _) = run(second)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("no issues found"));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, RESTORED_RESX);

    Ok(())
}

#[test]
fn test_fix_partial_type_in_several_files_rewrites_once() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;
    test.write_file(
        "Forms/MainForm.Events.cs",
        "namespace App\n{\n    partial class MainForm\n    {\n    }\n}\n",
    )?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, stdout, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("in 1 resource file(s) (processed 2 issue(s))"));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, RESTORED_RESX);

    Ok(())
}

#[test]
fn test_fix_without_companion_resource_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Forms/MainForm.cs", MAIN_FORM_CS)?;
    test.write_file("Resources/MainForm.resx", MARKED_RESX)?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, stdout, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("1 issue(s) found, but no companion resource file needs changes."));
    assert_eq!(test.read_file("Resources/MainForm.resx")?, MARKED_RESX);

    Ok(())
}

#[test]
fn test_fix_without_closing_tag_keeps_header_only() -> Result<()> {
    let test = CliTest::with_main_form(
        "<root>\n  <metadata name=\"$this.Language\">\n    <value>de-DE</value>\n</root>\n",
    )?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, _, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, "<root>\n");

    Ok(())
}

#[test]
fn test_fix_preserves_crlf() -> Result<()> {
    let test = CliTest::with_main_form(&MARKED_RESX.replace('\n', "\r\n"))?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    run(cmd)?;

    assert_eq!(
        test.read_file("Forms/MainForm.resx")?,
        RESTORED_RESX.replace('\n', "\r\n")
    );

    Ok(())
}

#[test]
fn test_fix_document_restricts_to_one_source_file() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;
    test.write_file(
        "Forms/AboutBox.cs",
        "namespace App\n{\n    public class AboutBox : Form\n    {\n    }\n}\n",
    )?;
    test.write_file("Forms/AboutBox.resx", MARKED_RESX)?;

    let mut cmd = test.fix_command();
    cmd.args(["--apply", "--document", "Forms/AboutBox.cs"]);
    let (output, _, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("Forms/AboutBox.resx")?, RESTORED_RESX);
    assert_eq!(test.read_file("Forms/MainForm.resx")?, MARKED_RESX);

    Ok(())
}

#[test]
fn test_fix_missing_document_is_internal_error() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;

    let mut cmd = test.fix_command();
    cmd.args(["--document", "Forms/Missing.cs"]);
    let (output, _, stderr) = run(cmd)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Document not found: Forms/Missing.cs"));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, MARKED_RESX);

    Ok(())
}

#[test]
fn test_fix_apply_continues_after_failed_fix() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;
    test.write_file("Alpha.cs", "class Alpha { }\n")?;
    // Flagged by the lossy scan, but not valid UTF-8 for the rewrite.
    let mut bytes = MARKED_RESX.as_bytes().to_vec();
    bytes.push(0xff);
    std::fs::write(test.root().join("Alpha.resx"), bytes)?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, stdout, stderr) = run(cmd)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains(
        "Restored the default language in 1 resource file(s) (processed 2 issue(s))."
    ));
    assert!(stdout.contains("1 fix(es) failed"));
    assert!(stderr.contains("Failed to read resource file"));
    assert_eq!(test.read_file("Forms/MainForm.resx")?, RESTORED_RESX);

    Ok(())
}
