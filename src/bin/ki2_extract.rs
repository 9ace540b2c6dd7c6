//! CLI front end: `extract`, `audit`, `compile` (§6 "CLI surface").

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ignore::WalkBuilder;
use rayon::prelude::*;

use ki2_extract::entry::SerializedFile;
use ki2_extract::recompiler::{self, Mode as RecompileMode, Patch};
use ki2_extract::KnownTables;

#[derive(Parser, Debug)]
#[command(
    name = "ki2-extract",
    bin_name = "ki2-extract",
    author = "Julgodis <self@julgodis.xyz>",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract, audit, and recompile translatable text in Kirikiri2/KAG script binaries",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Extend the compiled-in known-character-name table (one name per
    /// line) used by the season/date-marker classification rule.
    #[arg(long, global = true)]
    names: Option<PathBuf>,

    /// Extend the compiled-in known-UI-marker table (one marker per line).
    #[arg(long, global = true)]
    ui_markers: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every script in `input_dir` into translator-facing JSON in `output_dir`.
    Extract {
        input_dir:  PathBuf,
        output_dir: PathBuf,
    },
    /// Re-check the testable invariants against already-extracted JSON.
    Audit { output_dir: PathBuf },
    /// Recompile translated JSON in `translated_dir` back into script binaries.
    Compile {
        original_dir:   PathBuf,
        translated_dir: PathBuf,
        output_dir:     PathBuf,
        /// Splice in translations longer than their original byte range
        /// instead of refusing the file.
        #[arg(long)]
        expand: bool,
        /// Refuse any file with a length-overflowing translation (default).
        #[arg(long, conflicts_with = "expand")]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let tables = load_known_tables(args.names.as_deref(), args.ui_markers.as_deref())?;

    let failures = match args.command {
        Command::Extract { input_dir, output_dir } => run_extract(&input_dir, &output_dir, &tables)?,
        Command::Audit { output_dir } => run_audit(&output_dir)?,
        Command::Compile {
            original_dir,
            translated_dir,
            output_dir,
            expand,
            ..
        } => {
            let mode = if expand { RecompileMode::Expand } else { RecompileMode::Strict };
            run_compile(&original_dir, &translated_dir, &output_dir, mode, &tables)?
        },
    };

    if failures > 0 {
        eprintln!("{failures} file(s) failed");
        std::process::exit(1);
    }
    Ok(())
}

/// Build the classifier's extra name/UI-marker tables from the `--names`/
/// `--ui-markers` files, if given (one entry per line, blank lines ignored).
fn load_known_tables(names: Option<&Path>, ui_markers: Option<&Path>) -> Result<KnownTables> {
    Ok(KnownTables {
        extra_names:      names.map(load_lines).transpose()?.unwrap_or_default(),
        extra_ui_markers: ui_markers.map(load_lines).transpose()?.unwrap_or_default(),
    })
}

fn load_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(contents.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect())
}

/// Collect every regular file under `dir`, honoring `.gitignore`/`.ignore`
/// like the rest of the toolchain.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(dir).hidden(false).build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Write `contents` to `path` atomically: write to a sibling temp file, then
/// rename over the destination (§7: "no partial files are ever written").
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming into {}", path.display()))?;
    Ok(())
}

fn run_extract(input_dir: &Path, output_dir: &Path, tables: &KnownTables) -> Result<usize> {
    fs::create_dir_all(output_dir)?;
    let paths = collect_files(input_dir)?;

    let failures: usize = paths
        .par_iter()
        .map(|path| -> Result<()> {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let result = ki2_extract::extract_file_with_tables(&bytes, tables);
            if !result.problems.is_empty() {
                for problem in &result.problems {
                    eprintln!("{}: {problem}", path.display());
                }
            }

            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
            let output = result.record.to_output(name);
            let json = serde_json::to_vec_pretty(&output)?;

            let dest = output_dir.join(format!("{name}.json"));
            write_atomic(&dest, &json)
        })
        .filter(|r| r.is_err())
        .inspect(|r| {
            if let Err(err) = r {
                eprintln!("{err:#}");
            }
        })
        .count();

    Ok(failures)
}

fn run_audit(output_dir: &Path) -> Result<usize> {
    let paths = collect_files(output_dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "json"))
        .collect::<Vec<_>>();

    let mut total_findings = 0usize;
    for path in &paths {
        let contents = fs::read_to_string(path)?;
        let file: SerializedFile = serde_json::from_str(&contents)?;
        let findings = ki2_extract::audit(&file);
        for finding in &findings {
            println!("{}: line {}: {}", path.display(), finding.line, finding.message);
        }
        total_findings += findings.len();
    }
    Ok(total_findings)
}

fn run_compile(
    original_dir: &Path,
    translated_dir: &Path,
    output_dir: &Path,
    mode: RecompileMode,
    tables: &KnownTables,
) -> Result<usize> {
    fs::create_dir_all(output_dir)?;
    let paths = collect_files(original_dir)?;

    let failures: usize = paths
        .par_iter()
        .map(|path| -> Result<()> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
            let translated_path = translated_dir.join(format!("{name}.json"));
            if !translated_path.exists() {
                bail!("no translated JSON found for {name}");
            }

            let original_bytes = fs::read(path)?;
            let extraction = ki2_extract::extract_file_with_tables(&original_bytes, tables);

            let translated_json = fs::read_to_string(&translated_path)?;
            let translated: SerializedFile = serde_json::from_str(&translated_json)?;

            let patches = build_patches(&extraction.record, &translated)?;
            let result = recompiler::recompile(&original_bytes, &patches, mode)?;
            for problem in &result.problems {
                eprintln!("{name}: {problem}");
            }

            write_atomic(&output_dir.join(name), &result.bytes)
        })
        .filter(|r| r.is_err())
        .inspect(|r| {
            if let Err(err) = r {
                eprintln!("{err:#}");
            }
        })
        .count();

    Ok(failures)
}

/// Zip the freshly re-extracted entries (which still carry `offset`/
/// `byte_len`) against the translated JSON's entries (same line, same
/// insertion order, per §3/§5) to recover the `(offset, original_len,
/// translation)` tuples the recompiler needs.
fn build_patches(original: &ki2_extract::FileRecord, translated: &SerializedFile) -> Result<Vec<Patch>> {
    let mut patches = Vec::new();
    for (line, entries) in &original.lines {
        let Some(translated_entries) = translated.lines.get(&line.to_string()) else {
            continue;
        };
        if translated_entries.len() != entries.len() {
            bail!("line {line}: entry count mismatch between original and translated JSON");
        }
        for (entry, translated_entry) in entries.iter().zip(translated_entries) {
            let Some(Some(translation)) = &translated_entry.translation else { continue };
            patches.push(Patch {
                offset:       entry.offset,
                original_len: entry.byte_len,
                translation:  translation.clone(),
            });
        }
    }
    patches.sort_by_key(|p| p.offset);
    Ok(patches)
}
