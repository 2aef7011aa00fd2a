//! Streaming fastq filter: records are read, tested and written one at a time.

use tracing::info;

use std::io::Write;
use std::path::Path;

use crate::config::*;
use crate::errors::*;
use crate::graph::node::*;
use crate::graph::*;
use crate::lines::*;
use crate::output::*;

/// Directory the filtered output goes to when no destination is given.
pub const DEFAULT_OUTPUT_DIR: &str = "filtered";

/// Record counts from one filter run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FilterStats {
    pub records: usize,
    pub passed: usize,
    pub rejected_length: usize,
    pub rejected_gc: usize,
    pub rejected_quality: usize,
}

/// Predicates in the order they are evaluated.
pub fn predicates(config: &FilterConfig) -> [Predicate; 3] {
    [
        Predicate::Length(config.length_bounds.normalize()),
        Predicate::Gc(config.gc_bounds.normalize()),
        Predicate::MeanQuality(config.quality_threshold),
    ]
}

/// Run the filter graph from `input` to `output`.
pub fn filter_records<'a>(
    input: InputFastqNode<'a>,
    output: OutputFastqNode<'a>,
    config: &FilterConfig,
) -> Result<FilterStats> {
    let mut graph = Graph::new();
    let input = graph.add(input);
    let [length, gc, quality] = predicates(config).map(|p| graph.add(RetainNode::new(p)));
    let output = graph.add(output);

    graph.run()?;

    Ok(FilterStats {
        records: input.records(),
        passed: output.written(),
        rejected_length: length.rejected(),
        rejected_gc: gc.rejected(),
        rejected_quality: quality.rejected(),
    })
}

/// Filter fastq records from a line source into any writer.
pub fn filter_fastq_lines<'a>(
    lines: Lines<'a>,
    writer: impl Write + 'a,
    config: &FilterConfig,
) -> Result<FilterStats> {
    filter_records(
        InputFastqNode::from_lines(lines),
        OutputFastqNode::from_writer(writer),
        config,
    )
}

/// Default destination: the input file name inside [`DEFAULT_OUTPUT_DIR`].
pub fn default_fastq_output(input: &str) -> String {
    let name = Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_owned());
    Path::new(DEFAULT_OUTPUT_DIR)
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Filter a fastq file by sequence length, GC content and mean quality.
///
/// The output must not exist yet. It is checked once before anything is read, and
/// passing records are appended one at a time as they are found.
pub fn filter_fastq(input: &str, output: Option<&str>, config: &FilterConfig) -> Result<FilterStats> {
    let output = output
        .map(|o| o.to_owned())
        .unwrap_or_else(|| default_fastq_output(input));
    check_destination(&output)?;

    info!(
        input,
        output = output.as_str(),
        length_bounds = ?config.length_bounds.normalize(),
        gc_bounds = ?config.gc_bounds.normalize(),
        quality_threshold = config.quality_threshold,
        "filtering fastq"
    );

    let input = InputFastqNode::new(input)?;
    let output = OutputFastqNode::new(&output)?;
    let stats = filter_records(input, output, config)?;

    info!(
        records = stats.records,
        passed = stats.passed,
        rejected_length = stats.rejected_length,
        rejected_gc = stats.rejected_gc,
        rejected_quality = stats.rejected_quality,
        "filtered fastq"
    );
    Ok(stats)
}
