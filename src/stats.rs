//! Per-sequence arithmetic used by the fastq filters.

use memchr::memchr2_iter;

/// Offset of Phred+33 encoded quality characters.
pub const PHRED_OFFSET: u8 = 33;

/// Percentage of `G`/`C` (either case) in a sequence, rounded to 3 decimal places.
///
/// An empty sequence has a GC content of 0.
pub fn gc_content(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }

    let gc = memchr2_iter(b'G', b'C', seq).count() + memchr2_iter(b'g', b'c', seq).count();
    let percent = (gc as f64) / (seq.len() as f64) * 100.0;
    (percent * 1000.0).round() / 1000.0
}

/// Mean Phred+33 quality score. An empty quality string has a mean of 0.
pub fn mean_quality(qual: &[u8]) -> f64 {
    if qual.is_empty() {
        return 0.0;
    }

    let sum = qual
        .iter()
        .map(|&q| (q as i64) - (PHRED_OFFSET as i64))
        .sum::<i64>();
    (sum as f64) / (qual.len() as f64)
}
