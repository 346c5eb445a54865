//! Fix planning for resource files.
//!
//! Editing is line-oriented: the marker line and everything up to and
//! including the next `</metadata>` line are dropped, the rest is kept
//! byte for byte.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use diffy::PatchFormatter;

use crate::{core::file_scanner::RESOURCE_EXTENSION, rules::default_language::MARKER_TOKEN};

/// Line that closes the metadata block opened by the marker.
pub const CLOSING_TAG_TOKEN: &str = "</metadata>";

/// Line terminator used when writing a resource file back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` as soon as the text contains one `\r\n`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Before/after content of one resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPlan {
    pub resource_file_path: PathBuf,
    pub original_lines: Vec<String>,
    pub new_lines: Vec<String>,
    pub line_ending: LineEnding,
}

impl FixPlan {
    pub fn is_noop(&self) -> bool {
        self.original_lines == self.new_lines
    }

    /// Text written on commit.
    pub fn new_text(&self) -> String {
        join_lines(&self.new_lines, self.line_ending)
    }

    /// Unified diff between the original and the planned content.
    pub fn render_diff(&self) -> String {
        let old = join_lines(&self.original_lines, self.line_ending);
        let new = self.new_text();
        let path = self.resource_file_path.display();

        let patch = diffy::create_patch(&old, &new);
        let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
        // diffy names the sides "original" and "modified"; use the file path instead.
        let hunks = formatted.splitn(3, '\n').nth(2).unwrap_or_default();

        let mut out = format!("--- a/{0}\n+++ b/{0}\n", path);
        out.push_str(hunks);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn join_lines(lines: &[String], line_ending: LineEnding) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push_str(line_ending.as_str());
    }
    text
}

/// Drop the marker line and the rest of its metadata block.
///
/// Lines before the first marker line are kept. After it, lines are skipped
/// up to and including the first line containing [`CLOSING_TAG_TOKEN`]; if
/// there is no such line, nothing after the header survives.
pub fn strip_marker_lines(lines: &[String]) -> Vec<String> {
    let header_len = lines
        .iter()
        .position(|line| line.contains(MARKER_TOKEN))
        .unwrap_or(lines.len());
    let (header, rest) = lines.split_at(header_len);

    let tail = rest
        .iter()
        .position(|line| line.contains(CLOSING_TAG_TOKEN))
        .map(|closing| &rest[closing + 1..])
        .unwrap_or_default();

    header.iter().chain(tail).cloned().collect()
}

/// First file in `dir` named exactly `<type_name>.resx`, in directory order.
pub fn find_companion_resource(dir: &Path, type_name: &str) -> Result<Option<PathBuf>> {
    let file_name = format!("{}.{}", type_name, RESOURCE_EXTENSION);

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        if entry.file_name().to_str() == Some(file_name.as_str()) && entry.path().is_file() {
            return Ok(Some(entry.path()));
        }
    }

    Ok(None)
}

/// Plan the fix for `type_name` declared in `declaring_file`.
///
/// Returns `None` when the declaring directory has no companion resource file.
pub fn plan_fix(declaring_file: &Path, type_name: &str) -> Result<Option<FixPlan>> {
    let dir = match declaring_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let Some(resource_file_path) = find_companion_resource(dir, type_name)? else {
        return Ok(None);
    };

    let text = fs::read_to_string(&resource_file_path).with_context(|| {
        format!(
            "Failed to read resource file: {}",
            resource_file_path.display()
        )
    })?;

    let original_lines: Vec<String> = text.lines().map(String::from).collect();
    let new_lines = strip_marker_lines(&original_lines);

    Ok(Some(FixPlan {
        resource_file_path,
        original_lines,
        new_lines,
        line_ending: LineEnding::detect(&text),
    }))
}
