//! Branch predictor trace replay CLI.
//!
//! Reads a branch trace, builds the configured predictor, and drives it in
//! predict-then-train order, writing one `0`/`1` prediction per branch.

mod trace;

use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process;

use bpsim::config::{BpType, PerceptronConfig, PredictorConfig};
use bpsim::Dispatcher;

use crate::trace::TraceReader;

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Trace-driven branch predictor simulator",
    long_about = None,
)]
struct Cli {
    /// Predictor: static, gshare, tournament or custom.
    #[arg(short, long, default_value = "static")]
    mode: String,

    /// Global history bits (gshare, tournament).
    #[arg(long)]
    ghistory: Option<u32>,

    /// Local history bits (tournament).
    #[arg(long)]
    lhistory: Option<u32>,

    /// Program-counter index bits (tournament).
    #[arg(long)]
    index: Option<u32>,

    /// Perceptron global history length (custom).
    #[arg(long)]
    perceptron_history: Option<u32>,

    /// Log2 of the perceptron table size (custom).
    #[arg(long)]
    perceptron_bits: Option<u32>,

    /// JSON predictor configuration; replaces the flags above.
    #[arg(
        short,
        long,
        conflicts_with_all = ["mode", "ghistory", "lhistory", "index", "perceptron_history", "perceptron_bits"]
    )]
    config: Option<String>,

    /// Debug logging and a per-branch echo on stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Trace file; stdin when absent.
    trace: Option<String>,
}

impl Cli {
    fn predictor_config(&self) -> PredictorConfig {
        let defaults = PredictorConfig::default();
        PredictorConfig {
            bp_type: BpType::from_name(&self.mode),
            ghistory_bits: self.ghistory.unwrap_or(defaults.ghistory_bits),
            lhistory_bits: self.lhistory.unwrap_or(defaults.lhistory_bits),
            pc_index_bits: self.index.unwrap_or(defaults.pc_index_bits),
            perceptron: PerceptronConfig {
                history_length: self
                    .perceptron_history
                    .unwrap_or(defaults.perceptron.history_length),
                table_bits: self
                    .perceptron_bits
                    .unwrap_or(defaults.perceptron.table_bits),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path),
        None => {
            let config = cli.predictor_config();
            if let Err(e) = config.validate() {
                fatal(&e.to_string());
            }
            config
        }
    };

    let input: Box<dyn BufRead> = match &cli.trace {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => fatal(&format!("cannot open trace {}: {}", path, e)),
        },
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    if let Err(e) = run(&config, input, cli.verbose) {
        fatal(&e.to_string());
    }
}

fn load_config(path: &str) -> PredictorConfig {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fatal(&format!("cannot read config {}: {}", path, e)));
    PredictorConfig::from_json(&content).unwrap_or_else(|e| fatal(&e.to_string()))
}

fn run(
    config: &PredictorConfig,
    input: Box<dyn BufRead>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dispatcher = Dispatcher::new(config);
    log::info!("replaying trace with the {} predictor", dispatcher.name());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for branch in TraceReader::new(input) {
        let branch = branch?;
        let prediction = dispatcher.predict(branch.pc);
        dispatcher.train(branch.taken);

        if verbose {
            eprintln!(
                "{:#010x} {} {}",
                branch.pc, branch.taken as u8, prediction as u8
            );
        }
        writeln!(out, "{}", prediction as u8)?;
    }

    out.flush()?;
    Ok(())
}

fn fatal(msg: &str) -> ! {
    eprintln!("\x1b[1;31merror:\x1b[0m {}", msg);
    process::exit(1);
}
