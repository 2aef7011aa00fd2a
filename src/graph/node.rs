/// Graph nodes that process fastq records.

pub mod input_fastq_node;
pub use input_fastq_node::*;

pub mod retain_node;
pub use retain_node::*;

pub mod output_fastq_node;
pub use output_fastq_node::*;
