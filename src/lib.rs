#![doc(html_root_url = "https://docs.rs/ki2-extract")]

//! # ki2-extract
//!
//! A byte-oriented extractor, classifier, and recompiler for the script
//! binaries of a Kirikiri2/KAG-derived visual-novel engine. The scripts are
//! compiled blobs mixing Shift-JIS dialogue, ASCII asset references, control
//! bytes, and opcodes; this crate walks them structurally (no bytecode
//! disassembly) to pull out every string a translator would care about, then
//! writes translations back in at their original byte offsets.
//!
//! # Usage
//!
//! ```no_run
//! # use std::fs;
//! fn main() -> ki2_extract::Result<()> {
//!     let bytes = fs::read("script/__t_001")?;
//!     let result = ki2_extract::extract_file(&bytes);
//!     let output = result.record.to_output("__t_001");
//!     println!("{}", serde_json::to_string_pretty(&output).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! * [`scanner`] - walks the binary, finds string candidates, tracks lines.
//! * [`pattern`] - recognizes known ASCII prefixes ahead of the scanner.
//! * [`extractor`] - extends a candidate into a decoded, terminated string.
//! * [`classifier`] - maps a decoded string onto the taxonomy.
//! * [`postprocess`] - per-line repairs: speaker promotion, placeholder
//!   merging, garbage filtering.
//! * [`pipeline`] - composes the above into `bytes -> FileRecord`.
//! * [`recompiler`] - writes translations back into the original bytes.

#![deny(unused_imports)]

pub mod audit;
pub mod classifier;
pub mod entry;
pub mod error;
pub mod extractor;
pub mod pattern;
pub mod pipeline;
pub mod postprocess;
pub mod recompiler;
pub mod scanner;
pub mod sjis;

#[doc(inline)]
pub use audit::{audit, Finding};
#[doc(inline)]
pub use classifier::KnownTables;
#[doc(inline)]
pub use entry::{Entry, EntryKind, FileMetadata, FileRecord, OutputEntry, SerializedFile};
#[doc(inline)]
pub use error::{Error, RecompileProblem, Result, ScanProblem};
#[doc(inline)]
pub use pipeline::{extract_file, extract_file_with_tables, ExtractionResult};
#[doc(inline)]
pub use recompiler::{recompile, Mode as RecompileMode, Patch, RecompileOutput};
