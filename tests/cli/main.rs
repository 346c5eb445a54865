use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod fix;
mod init;

const BIN_NAME: &str = "relang";

/// Resource file whose form overrides the default language.
pub const MARKED_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <metadata name="$this.Language" type="System.Globalization.CultureInfo, mscorlib">
    <value>de-DE</value>
  </metadata>
  <data name="$this.Text" xml:space="preserve">
    <value>Main</value>
  </data>
</root>
"#;

pub const MAIN_FORM_CS: &str = r#"using System.Windows.Forms;

namespace App
{
    public partial class MainForm : Form
    {
        public MainForm()
        {
            InitializeComponent();
        }
    }
}
"#;

pub const MAIN_FORM_DESIGNER_CS: &str = r#"namespace App
{
    partial class MainForm
    {
        private void InitializeComponent()
        {
        }
    }
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Project with `MainForm` split over a code file and a designer file.
    pub fn with_main_form(resx: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file("Forms/MainForm.cs", MAIN_FORM_CS)?;
        test.write_file("Forms/MainForm.Designer.cs", MAIN_FORM_DESIGNER_CS)?;
        test.write_file("Forms/MainForm.resx", resx)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn fix_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("fix");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run `cmd` and return its output with stdout/stderr decoded.
pub fn run(mut cmd: Command) -> Result<(Output, String, String)> {
    let output = cmd.output().context("Failed to run relang")?;
    let stdout = String::from_utf8(output.stdout.clone())?;
    let stderr = String::from_utf8(output.stderr.clone())?;
    Ok((output, stdout, stderr))
}
