//! docblock — print the annotations and descriptions found in `/** ... */`
//! doc blocks of PHP-style source files.
//!
//! - **stdin mode**: `docblock < Mailer.php`
//! - **file mode**: `docblock src/*.php` (stdout) or `docblock -o docs src/` (one file per input)

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use docblock::render::{self, RenderOptions};
use docblock::{source, Annotated, DocSet, Filter, MemberRef, ParserConfig, Reflectable, ValueMode};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "docblock",
    about = "Extract @annotations and descriptions from doc block comments"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Write one output file per input into this directory instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Character that introduces an annotation
    #[arg(long, default_value_t = '@')]
    marker: char,

    /// Split annotation values on whitespace instead of keeping one value per line
    #[arg(long)]
    split_values: bool,

    /// Only show these annotations (with or without the marker). Repeatable.
    #[arg(long)]
    filter: Vec<String>,

    /// Only show members that carry all of these annotations. Repeatable.
    #[arg(long)]
    require: Vec<String>,

    /// Drop members without any description or annotation
    #[arg(long)]
    skip_undocumented: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

/// One loaded input: where it came from and its text.
struct Input {
    path: Option<PathBuf>,
    content: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let values = if cli.split_values {
        ValueMode::Whitespace
    } else {
        ValueMode::Whole
    };
    let config = ParserConfig::new(cli.marker)
        .context("invalid --marker")?
        .with_values(values);
    let renderer = render::create_renderer(&cli.format)?;
    let opts = RenderOptions {
        annotations: Filter::from(cli.filter.as_slice()),
    };

    let inputs = if cli.files.is_empty() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        vec![Input {
            path: None,
            content,
        }]
    } else {
        load_files(&collect_inputs(&cli.files)?)
    };

    let parsed: Vec<(Option<PathBuf>, DocSet)> = inputs
        .par_iter()
        .map(|input| {
            let mut docs = analyze_input(input, &config);
            select_members(&mut docs, &cli);
            (input.path.clone(), docs)
        })
        .collect();

    match cli.output {
        Some(ref dir) => write_outputs(dir, parsed, renderer.as_ref(), &opts),
        None => {
            let all: DocSet = parsed.into_iter().flat_map(|(_, docs)| docs).collect();
            print!("{}", renderer.render(&all, &opts)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Scan an input for members, parse their doc blocks and record where each
/// member was declared.
fn analyze_input(input: &Input, config: &ParserConfig) -> DocSet {
    let members = source::scan(&input.content);
    let file = input.path.as_ref().map(|p| p.to_string_lossy().to_string());
    if members.is_empty() {
        warn!(file = file.as_deref().unwrap_or("<stdin>"), "no members found");
    }

    let mut docs = docblock::analyze_par(&members, config);
    for (owner, member) in docs.owners_mut().iter_mut().zip(&members) {
        owner.set_reflection(MemberRef {
            file: file.clone(),
            line: member.line,
        });
    }
    debug!(
        file = file.as_deref().unwrap_or("<stdin>"),
        members = docs.len(),
        "parsed"
    );
    docs
}

/// Apply --skip-undocumented and --require.
fn select_members(docs: &mut DocSet, cli: &Cli) {
    if cli.skip_undocumented {
        docs.retain(|owner| !owner.is_empty());
    }
    if !cli.require.is_empty() {
        docs.retain(|owner| owner.has_annotations(&cli.require));
    }
}

/// Read every file, skipping the ones that cannot be read.
fn load_files(paths: &[PathBuf]) -> Vec<Input> {
    paths
        .iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(content) => Some(Input {
                path: Some(path.clone()),
                content,
            }),
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

fn write_outputs(
    dir: &Path,
    parsed: Vec<(Option<PathBuf>, DocSet)>,
    renderer: &dyn render::Renderer,
    opts: &RenderOptions,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut used = HashSet::new();
    for (path, docs) in parsed {
        // Files without any surviving member produce no output
        if docs.is_empty() {
            continue;
        }
        let name = path
            .as_deref()
            .map(derive_output_name)
            .unwrap_or_else(|| "stdin".to_string());
        let out_path = unique_output_path(dir, &name, renderer.file_extension(), &mut used);
        fs::write(&out_path, renderer.render(&docs, opts)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!("wrote {}", out_path.display());
    }
    Ok(())
}

/// File extensions picked up when walking a directory. Explicit files
/// and glob matches are taken as given.
const SUPPORTED_EXTENSIONS: &[&str] = &["php", "inc", "phtml"];

/// Resolve command-line inputs into a sorted list of files: plain files,
/// directories (walked recursively) and glob patterns.
fn collect_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(walk_sources(path));
        } else {
            let matches: Vec<_> = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            if matches.is_empty() {
                warn!("no files matched: {}", pattern);
            }
            files.extend(matches);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Source files under `dir` with a supported extension, at any depth.
fn walk_sources(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        let supported = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
        if entry.file_type().is_file() && supported {
            found.push(entry.into_path());
        }
    }
    found
}

/// `dir/name.ext`, or `dir/name-N.ext` when an earlier input already took
/// that name.
fn unique_output_path(dir: &Path, name: &str, ext: &str, used: &mut HashSet<PathBuf>) -> PathBuf {
    let mut out_path = dir.join(format!("{}.{}", name, ext));
    let mut n = 2;
    while used.contains(&out_path) {
        out_path = dir.join(format!("{}-{}.{}", name, n, ext));
        n += 1;
    }
    if n > 2 {
        warn!("output name {}.{} already used, writing {}", name, ext, out_path.display());
    }
    used.insert(out_path.clone());
    out_path
}

/// "src/Mailer.php" → "Mailer"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docblock::Described;

    #[test]
    fn output_name_strips_extension() {
        assert_eq!(derive_output_name(Path::new("src/Mailer.php")), "Mailer");
        assert_eq!(derive_output_name(Path::new("Mailer.inc")), "Mailer");
    }

    #[test]
    fn repeated_output_names_get_a_suffix() {
        let dir = Path::new("out");
        let mut used = HashSet::new();
        let paths: Vec<_> = (0..3)
            .map(|_| unique_output_path(dir, "Mailer", "md", &mut used))
            .collect();
        assert_eq!(
            paths,
            [
                dir.join("Mailer.md"),
                dir.join("Mailer-2.md"),
                dir.join("Mailer-3.md")
            ]
        );
        assert_eq!(unique_output_path(dir, "Cache", "md", &mut used), dir.join("Cache.md"));
    }

    #[test]
    fn walk_finds_nested_sources_only() {
        let root = tempfile::TempDir::new().unwrap();
        let nested = root.path().join("src/Mail");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Mailer.php"), "<?php\n").unwrap();
        fs::write(root.path().join("helpers.inc"), "<?php\n").unwrap();
        fs::write(root.path().join("README.md"), "docs\n").unwrap();

        let mut found = walk_sources(root.path());
        found.sort();
        assert_eq!(found, [root.path().join("helpers.inc"), nested.join("Mailer.php")]);
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn stdin_input_records_lines_without_file() {
        let input = Input {
            path: None,
            content: "<?php\n/**\n * Hi.\n */\nfunction hi() {}\n".to_string(),
        };
        let docs = analyze_input(&input, &ParserConfig::default());
        let owner = docs.owner("hi").unwrap();
        assert_eq!(owner.description(), "Hi.\n");
        assert_eq!(
            owner.reflection(),
            Some(&MemberRef {
                file: None,
                line: 5
            })
        );
    }
}
