use std::{
    borrow::Cow,
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use encoding_rs::{Encoding, UTF_8};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        AdditionalFile, CancellationToken, NamedTypeSymbol,
        file_scanner::scan_files,
        parsers::{SyntaxTree, parse_csharp_source_with_symbols},
        symbols::collect_named_types,
    },
    issues::ParseErrorIssue,
    rules::default_language::IgnoreFilter,
};

/// Snapshot of one analysis run (the "compilation").
///
/// Holds the merged configuration and the scanned file lists. Everything
/// derived from file contents is computed lazily on first access:
/// - `syntax_trees()`: every C# file read and scanned for declarations
/// - `named_types()`: declarations merged into named type symbols
/// - `additional_files()`: `.resx` contents handed to the analyzer
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--source-root`)
/// 2. `.relangrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the scan started from.
    pub root_dir: PathBuf,

    /// C# source files to analyze.
    pub source_files: BTreeSet<String>,

    /// `.resx` files to scan for the marker.
    pub resource_files: BTreeSet<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// Never cancelled by the CLI, which has no interrupt hook; library
    /// hosts pass their own token through `with_cancellation`.
    cancellation: CancellationToken,

    syntax_trees: OnceCell<BTreeMap<String, SyntaxTree>>,

    /// Source files that could not be read, populated alongside `syntax_trees`.
    parse_errors: OnceCell<Vec<ParseErrorIssue>>,

    named_types: OnceCell<Vec<NamedTypeSymbol>>,

    additional_files: OnceCell<Vec<AdditionalFile>>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// Loads configuration, applies CLI overrides and scans the source root
    /// for `.cs` and `.resx` files. File contents are not read yet.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the source root does not exist.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let config_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let config_result = load_config(&config_dir)?;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let config = config_result.config;

        let root_dir = match &common_args.source_root {
            Some(dir) => dir.clone(),
            None => PathBuf::from(&config.source_root),
        };
        if !root_dir.is_dir() {
            return Err(anyhow!(
                "Source root does not exist: {}",
                root_dir.display()
            ));
        }
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let scan_result = scan_files(path, &config.includes, &config.ignores, verbose);

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            source_files: scan_result.source_files,
            resource_files: scan_result.resource_files,
            verbose,
            cancellation: CancellationToken::new(),
            syntax_trees: OnceCell::new(),
            parse_errors: OnceCell::new(),
            named_types: OnceCell::new(),
            additional_files: OnceCell::new(),
        })
    }

    /// Replace the cancellation token observed by the analysis and the fixes.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Ignore filter built from the `ignoreFileSuffixes` config entry.
    pub fn ignore_filter(&self) -> IgnoreFilter {
        IgnoreFilter::new(&self.config.ignore_file_suffixes)
    }

    /// Declarations of every source file (lazy initialization).
    ///
    /// Files are read and parsed in parallel, with `#if` branches picked by
    /// the configured preprocessor symbols. Unreadable or undecodable files
    /// are recorded as parse errors and left out of the map.
    pub fn syntax_trees(&self) -> &BTreeMap<String, SyntaxTree> {
        self.syntax_trees.get_or_init(|| {
            let symbols = &self.config.preprocessor_symbols;
            let results: Vec<_> = self
                .source_files
                .par_iter()
                .map(|file_path| {
                    let result = fs::read(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|bytes| decode_source(&bytes))
                        .and_then(|code| {
                            parse_csharp_source_with_symbols(code, file_path, symbols)
                        });
                    (file_path.clone(), result)
                })
                .collect();

            let mut trees = BTreeMap::new();
            let mut errors = Vec::new();

            for (file_path, result) in results {
                match result {
                    Ok(tree) => {
                        trees.insert(file_path, tree);
                    }
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} {} - {}", "warning:".bold().yellow(), file_path, e);
                        }
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: e.to_string(),
                        });
                    }
                }
            }

            let _ = self.parse_errors.set(errors);
            trees
        })
    }

    /// Errors from reading source files.
    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        self.syntax_trees();
        self.parse_errors.get_or_init(Vec::new)
    }

    /// Syntax tree of a single source file, if it was scanned and readable.
    pub fn syntax_tree(&self, file_path: &str) -> Option<&SyntaxTree> {
        self.syntax_trees().get(file_path)
    }

    /// Named types across all source files (lazy initialization).
    pub fn named_types(&self) -> &[NamedTypeSymbol] {
        self.named_types
            .get_or_init(|| collect_named_types(self.syntax_trees().values()))
    }

    /// `.resx` files with their text (lazy initialization).
    ///
    /// Files are decoded lossily (after byte order mark detection) so
    /// malformed text never fails the scan; unreadable files are skipped.
    pub fn additional_files(&self) -> &[AdditionalFile] {
        self.additional_files.get_or_init(|| {
            let verbose = self.verbose;
            self.resource_files
                .par_iter()
                .filter_map(|path| match fs::read(Path::new(path)) {
                    Ok(bytes) => Some(AdditionalFile::new(
                        path.as_str(),
                        UTF_8.decode(&bytes).0.into_owned(),
                    )),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Cannot read resource file {}: {}",
                                "warning:".bold().yellow(),
                                path,
                                e
                            );
                        }
                        None
                    }
                })
                .collect()
        })
    }
}

/// Decode source bytes: a byte order mark selects UTF-8 or UTF-16,
/// otherwise the text must be valid UTF-8.
fn decode_source(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .map(Cow::into_owned)
        .with_context(|| format!("File is not valid {}", encoding.name()))
}
