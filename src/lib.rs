//! Rust library for turning line-oriented biological text files into derived records.
//!
//! # Overview
//! SEQSMITH reads its inputs one line at a time, in a single forward pass, and writes
//! results to new files. It never overwrites an existing file.
//!
//! It provides:
//! * [`merge_multiline_fasta`]: collapse multi-line fasta sequences onto one line per record
//! * [`parse_blast_output`]: the sorted top hit description of every query in a BLAST report
//! * [`select_genes_to_fasta`]: translations of chosen genes, with neighbouring genes, from a
//!   GenBank feature table
//! * [`filter_fastq`]: stream fastq records through length, GC content and mean quality filters
//!
//! ## Parsers
//! Each parser is an explicit state machine fed one line at a time
//! ([`RecordAssembler`], [`FeatureParser`], [`LinePosition`]), wrapped in an iterator over
//! [`Lines`]. Inputs ending in `.gz` are decompressed and outputs ending in `.gz` are compressed.
//!
//! ## Fastq filter graph
//! The fastq filter is a [`Graph`] of nodes. Each record is pulled from the input node
//! and passed through the predicate nodes in order:
//! ```text
//! InputFastqNode -> RetainNode(length) -> RetainNode(gc) -> RetainNode(quality) -> OutputFastqNode
//! ```
//! A record that fails a predicate is dropped right there, so later predicates never see it.
//! Passing records are written immediately, so memory use does not grow with the input.
//!
//! ## Bounds
//! Filter bounds are given as a [`BoundsSpec`]: either a `[low, high]` range or a single
//! number `x`, which means `[0, x]`. See [`FilterConfig`] for the YAML form.

pub mod blast;
pub mod bounds;
pub mod config;
pub mod errors;
pub mod fasta;
pub mod fastq;
pub mod filter;
pub mod genbank;
pub mod graph;
pub mod lines;
pub mod output;
pub mod stats;

// commonly used functions and types

pub use crate::blast::*;
pub use crate::bounds::*;
pub use crate::config::*;
pub use crate::errors::*;
pub use crate::fasta::*;
pub use crate::fastq::*;
pub use crate::filter::*;
pub use crate::genbank::*;
pub use crate::graph::node::*;
pub use crate::graph::*;
pub use crate::lines::*;
pub use crate::output::*;
