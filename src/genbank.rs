//! Selecting genes and their neighbours from the feature table of a GenBank file.
//!
//! Features are committed as `(gene, translation)` pairs in the order their
//! blocks end. Windows are taken over that committed list, so the index of an
//! entry is its commit position, not its line position in the source.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::errors::*;
use crate::fasta::*;
use crate::lines::*;
use crate::output::*;

pub const NAME_MARKER: &str = "/gene=";
pub const VALUE_MARKER: &str = "/translation=";
const QUOTE: char = '"';

/// A gene name and its (possibly multi-line) translation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntry {
    pub name: String,
    pub value: String,
}

impl FeatureEntry {
    pub fn to_fasta(&self) -> FastaRecord {
        FastaRecord {
            id: Some(format!("{}{}", HEADER_MARKER, self.name)),
            seq: self.value.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FeatureState {
    /// Looking for the next gene name.
    Scanning,
    /// A gene name was read and its translation has not started.
    AwaitingValue,
    /// Inside a translation whose closing quote has not been read.
    InValue,
}

/// Line-at-a-time state machine over a feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureParser {
    state: FeatureState,
    name: Option<String>,
    value: Option<String>,
}

impl FeatureParser {
    pub fn new() -> Self {
        Self {
            state: FeatureState::Scanning,
            name: None,
            value: None,
        }
    }

    pub fn state(&self) -> FeatureState {
        self.state
    }

    /// Feed one line. Returns the previous gene's entry when a new gene name commits it.
    pub fn push(&mut self, line: &str) -> Option<FeatureEntry> {
        let line = line.trim();

        if self.state == FeatureState::InValue {
            if let Some(value) = &mut self.value {
                value.push_str(line.trim_matches(QUOTE));
            }
            if line.ends_with(QUOTE) {
                self.state = FeatureState::Scanning;
            }
            return None;
        }

        if line.starts_with(NAME_MARKER) {
            let committed = self.commit();
            self.name = Some(after_equals(line).trim_matches(QUOTE).to_owned());
            self.value = None;
            self.state = FeatureState::AwaitingValue;
            return committed;
        }

        if line.starts_with(VALUE_MARKER) && self.state == FeatureState::AwaitingValue {
            self.value = Some(after_equals(line).trim().trim_matches(QUOTE).to_owned());
            self.state = if line.ends_with(QUOTE) {
                FeatureState::Scanning
            } else {
                FeatureState::InValue
            };
        }

        None
    }

    /// Commit the last gene at the end of the input.
    ///
    /// Fails if the input ended inside a translation.
    pub fn finish(mut self) -> std::result::Result<Option<FeatureEntry>, &'static str> {
        if self.state == FeatureState::InValue {
            return Err("reading a translation without a closing quote");
        }
        Ok(self.commit())
    }

    // both parts must be present and non-empty
    fn commit(&mut self) -> Option<FeatureEntry> {
        match (&self.name, &self.value) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some(FeatureEntry {
                    name: name.clone(),
                    value: value.clone(),
                })
            }
            _ => None,
        }
    }
}

impl Default for FeatureParser {
    fn default() -> Self {
        Self::new()
    }
}

fn after_equals(line: &str) -> &str {
    line.rsplit('=').next().unwrap_or(line)
}

/// Parse every committed feature entry, in commit order.
pub fn parse_features(mut lines: Lines) -> Result<Vec<FeatureEntry>> {
    let mut parser = FeatureParser::new();
    let mut entries = Vec::new();

    while let Some(line) = lines.next_line()? {
        if let Some(entry) = parser.push(line) {
            debug!(gene = entry.name.as_str(), "committed feature");
            entries.push(entry);
        }
    }

    let last = parser.finish().map_err(|context| Error::UnexpectedEof {
        origin: lines.origin().clone(),
        line: lines.line(),
        context,
    })?;
    entries.extend(last);

    Ok(entries)
}

/// For every entry whose name is in `genes`, the window of up to `before` entries before it
/// and `after` entries after it, clipped to the list.
///
/// Overlapping windows are each produced in full.
pub fn select_windows<'a>(
    entries: &'a [FeatureEntry],
    genes: &'a FxHashSet<String>,
    before: usize,
    after: usize,
) -> impl Iterator<Item = &'a [FeatureEntry]> + 'a {
    entries
        .iter()
        .enumerate()
        .filter(move |(_, e)| genes.contains(&e.name))
        .map(move |(i, _)| {
            let start = i.saturating_sub(before);
            let end = entries.len().min(i.saturating_add(after).saturating_add(1));
            &entries[start..end]
        })
}

/// Write the translations of the selected genes and their neighbours as fasta.
///
/// The output defaults to `<input stem>_selected.fasta` and must not exist yet.
/// Returns the number of records written.
pub fn select_genes_to_fasta<S: AsRef<str>>(
    input: &str,
    genes: impl IntoIterator<Item = S>,
    n_before: usize,
    n_after: usize,
    output: Option<&str>,
) -> Result<usize> {
    let output = output
        .map(|o| o.to_owned())
        .unwrap_or_else(|| default_output(input, "_selected.fasta"));
    check_destination(&output)?;

    let genes = genes
        .into_iter()
        .map(|g| g.as_ref().to_owned())
        .collect::<FxHashSet<_>>();

    info!(
        input,
        output = output.as_str(),
        genes = genes.len(),
        n_before,
        n_after,
        "selecting genes"
    );

    let entries = parse_features(Lines::from_file(input)?)?;
    debug!(entries = entries.len(), "parsed features");

    let mut writer = create_output(&output)?;
    let file_io = |e: std::io::Error| Error::FileIo {
        file: output.clone(),
        source: Box::new(e),
    };

    let mut count = 0;

    for window in select_windows(&entries, &genes, n_before, n_after) {
        for entry in window {
            write_fasta_record(&mut writer, &entry.to_fasta()).map_err(file_io)?;
            count += 1;
        }
    }

    writer.finish().map_err(file_io)?;

    info!(records = count, "wrote selected genes");
    Ok(count)
}
