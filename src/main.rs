use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::process::ExitCode;

use seqsmith::*;

/// Tools for fasta, BLAST, GenBank and fastq text files
#[derive(Parser)]
#[command(name = "seqsmith", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Put every fasta sequence on a single line
    MergeFasta {
        /// Input fasta file
        input: String,

        /// Output file [default: <input stem>_one_line.fasta]
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the sorted top hit description of each query in a BLAST report
    ParseBlast {
        /// Input BLAST text report
        input: String,

        /// Output file [default: <input stem>_parse.txt]
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write translations of selected genes and their neighbours to fasta
    SelectGenes {
        /// Input GenBank file
        input: String,

        /// Genes to select
        #[arg(short, long, required = true, num_args = 1..)]
        genes: Vec<String>,

        /// Number of genes to include before each selected gene
        #[arg(short = 'b', long, default_value_t = 1)]
        n_before: usize,

        /// Number of genes to include after each selected gene
        #[arg(short = 'a', long, default_value_t = 1)]
        n_after: usize,

        /// Output file [default: <input stem>_selected.fasta]
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Filter fastq records by length, GC content and mean quality
    FilterFastq {
        /// Input fastq file
        input: String,

        /// Output file [default: filtered/<input file name>]
        #[arg(short, long)]
        output: Option<String>,

        /// YAML file with gc_bounds, length_bounds and quality_threshold
        #[arg(short, long)]
        config: Option<String>,

        /// GC percentage bounds: "high" or "low,high"
        #[arg(long)]
        gc_bounds: Option<BoundsSpec>,

        /// Sequence length bounds: "high" or "low,high"
        #[arg(long)]
        length_bounds: Option<BoundsSpec>,

        /// Minimum mean quality (Phred+33)
        #[arg(short, long)]
        quality_threshold: Option<f64>,
    },
}

impl Cli {
    fn init_logging(&self) {
        let level = if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(
                EnvFilter::builder()
                    .with_default_directive(level.into())
                    .from_env_lossy(),
            )
            .init();
    }

    fn execute(self) -> Result<()> {
        match self.command {
            Command::MergeFasta { input, output } => {
                merge_multiline_fasta(&input, output.as_deref())?;
            }
            Command::ParseBlast { input, output } => {
                parse_blast_output(&input, output.as_deref())?;
            }
            Command::SelectGenes {
                input,
                genes,
                n_before,
                n_after,
                output,
            } => {
                select_genes_to_fasta(&input, &genes, n_before, n_after, output.as_deref())?;
            }
            Command::FilterFastq {
                input,
                output,
                config,
                gc_bounds,
                length_bounds,
                quality_threshold,
            } => {
                let mut filter_config = match config {
                    Some(file) => FilterConfig::from_file(file)?,
                    None => FilterConfig::default(),
                };

                if let Some(b) = gc_bounds {
                    filter_config.gc_bounds = b;
                }
                if let Some(b) = length_bounds {
                    filter_config.length_bounds = b;
                }
                if let Some(q) = quality_threshold {
                    filter_config.quality_threshold = q;
                }

                filter_fastq(&input, output.as_deref(), &filter_config)?;
            }
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
