use anyhow::Result;

use crate::{CliTest, MAIN_FORM_CS, MARKED_RESX, run};

#[test]
fn test_check_reports_marked_form() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains(
        "error[A0001]: Type 'MainForm' has a resource file that overrides the default language  default-language"
    ));
    assert!(stdout.contains("Forms/MainForm.cs:5:26"));
    assert!(stdout.contains("5 |     public partial class MainForm : Form"));
    assert!(stdout.contains("1 problem (1 error, 0 warnings)"));
    // Designer declarations are never reported.
    assert!(!stdout.contains("MainForm.Designer.cs"));

    Ok(())
}

#[test]
fn test_check_unmarked_form_passes() -> Result<()> {
    let test = CliTest::with_main_form(
        "<root>\n  <data name=\"$this.Text\"><value>Main</value></data>\n</root>\n",
    )?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 2 source files, 1 resource file - no issues found"));

    Ok(())
}

#[test]
fn test_check_type_declared_only_in_designer_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Forms/AboutBox.Designer.cs",
        "namespace App\n{\n    partial class AboutBox\n    {\n    }\n}\n",
    )?;
    test.write_file("Forms/AboutBox.resx", MARKED_RESX)?;

    let (output, _, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_check_matches_resource_in_other_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Forms/MainForm.cs", MAIN_FORM_CS)?;
    test.write_file("Resources/MainForm.resx", MARKED_RESX)?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Forms/MainForm.cs:5:26"));

    Ok(())
}

#[test]
fn test_check_respects_ignore_file_suffixes() -> Result<()> {
    let test = CliTest::with_main_form(MARKED_RESX)?;
    test.write_file(".relangrc.json", r#"{ "ignoreFileSuffixes": ["Form.cs"] }"#)?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("MainForm.Designer.cs:3:19"));
    assert!(!stdout.contains("Forms/MainForm.cs:"));

    Ok(())
}

#[test]
fn test_check_ignores_bin_and_obj() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("obj/Debug/MainForm.cs", MAIN_FORM_CS)?;
    test.write_file("obj/Debug/MainForm.resx", MARKED_RESX)?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 0 source files, 0 resource files"));

    Ok(())
}

#[test]
fn test_check_with_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Forms/MainForm.cs", MAIN_FORM_CS)?;
    test.write_file("app/Forms/MainForm.resx", MARKED_RESX)?;
    test.write_file("other/Forms/Other.cs", "class Other { }\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "app"]);
    let (output, stdout, _) = run(cmd)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("app/Forms/MainForm.cs:5:26"));
    assert!(!stdout.contains("Other"));

    Ok(())
}

#[test]
fn test_check_reports_unreadable_source() -> Result<()> {
    let test = CliTest::new()?;
    // Invalid UTF-8 without a byte order mark.
    std::fs::write(test.root().join("Broken.cs"), [0x63, 0x6c, 0xc3, 0x28, 0xff])?;

    let (output, stdout, stderr) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> ./Broken.cs"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_check_reads_utf16_source_with_non_ascii_type_name() -> Result<()> {
    let test = CliTest::new()?;
    let code = "namespace App\r\n{\r\n    public partial class Formulär : Form { }\r\n}\r\n";
    let mut bytes = vec![0xff, 0xfe];
    bytes.extend(code.encode_utf16().flat_map(u16::to_le_bytes));
    std::fs::write(test.root().join("Formulär.cs"), bytes)?;
    test.write_file("Formulär.resx", MARKED_RESX)?;

    let (output, stdout, stderr) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("error[A0001]: Type 'Formulär'"));
    assert!(stdout.contains("--> ./Formulär.cs:3:26"));
    assert!(!stdout.contains("parse-error"));
    assert!(!stderr.contains("could not be parsed"));

    Ok(())
}

#[test]
fn test_check_skips_inactive_conditional_branch() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "MainForm.cs",
        "namespace App\n{\n#if NET48\n    partial class MainForm : Form\n    {\n#else\n    partial class MainForm : Control\n    {\n#endif\n    }\n\n    class Other { }\n}\n",
    )?;
    test.write_file("MainForm.resx", MARKED_RESX)?;

    let (output, stdout, _) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("--> ./MainForm.cs:7:19"));
    assert!(stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_check_missing_source_root_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "missing"]);
    let (output, _, stderr) = run(cmd)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error: Source root does not exist: missing"));

    Ok(())
}

#[test]
fn test_check_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".relangrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let (output, _, stderr) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}
