//! CLI entry point for the topic clustering tool.
//!
//! Provides a `run` command that clusters a pre-vectorized corpus and a
//! `config` command that prints the active merged settings.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use topika::clustering::{init, report};
use topika::{KMeansModel, KMeansParams, Settings, SparseCorpus, VectorProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Topic clustering over term-weighted document corpora
#[derive(Parser)]
#[command(
    name = "topika",
    version = env!("CARGO_PKG_VERSION"),
    about = "K-Means topic clustering for document corpora",
    long_about = "Cluster a pre-vectorized corpus into topics and report the \
                  top terms of each topic.",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to a custom topika.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Cluster a corpus
    #[command(about = "Run K-Means over a pre-vectorized corpus file")]
    Run {
        /// Corpus file: one document per line, `term_id:weight` pairs
        corpus: PathBuf,

        /// Vocabulary file: one term per line, line number = term id
        #[arg(long)]
        vocab: Option<PathBuf>,
    },

    /// Display active settings
    #[command(about = "Print the merged configuration as TOML")]
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Config => match settings.to_toml() {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("Failed to render settings: {e}");
                process::exit(1);
            }
        },
        Commands::Run { corpus, vocab } => {
            // Every missing key is reported before the run aborts.
            let params = match settings.kmeans.validate() {
                Ok(params) => params,
                Err(missing) => {
                    for error in &missing {
                        eprintln!("{error}");
                    }
                    process::exit(1);
                }
            };

            if let Err(e) = run_clustering(&params, &corpus, vocab.as_deref()) {
                eprintln!("Error: {e:#}");
                process::exit(1);
            }
        }
    }
}

fn run_clustering(params: &KMeansParams, corpus: &Path, vocab: Option<&Path>) -> anyhow::Result<()> {
    // Resolve the strategy first: a bad init-method must fail before any
    // corpus work happens.
    let initializer = init::from_name(&params.init_method)?;

    let corpus = SparseCorpus::from_files(corpus, vocab).context("failed to load corpus")?;
    info!(
        docs = corpus.num_docs(),
        terms = corpus.num_terms(),
        "loaded corpus"
    );

    let mut rng: Box<dyn RngCore> = match params.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_os_rng()),
    };

    let mut model = KMeansModel::new(&corpus, params.topics)?;
    let summary = model.run(
        &corpus,
        initializer.as_ref(),
        params.max_iters,
        rng.as_mut(),
    )?;
    info!(
        state = ?summary.state,
        iterations = summary.iterations,
        inertia = summary.inertia,
        "clustering finished"
    );

    model
        .save(&params.model_prefix)
        .with_context(|| format!("failed to save model under '{}'", params.model_prefix))?;

    if params.output_terms > 0 {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        report::print_topics(&model, &corpus, params.output_terms, &mut out)
            .context("failed to write topic report")?;
        out.flush().ok();
    }

    Ok(())
}
