//! Line wrapping demo
//!
//! Wraps text read from a file (or stdin) to a fixed width using `linebreak-core`. Every input
//! line is treated as one paragraph; blank lines are passed through.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p linebreak-cli -- --width 40 README.md
//! echo "The quick brown fox" | cargo run -p linebreak-cli -- --width 10 --rules word
//! ```
//!
//! Set `RUST_LOG=linebreak_core=trace` to see every break decision.

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use linebreak_core::{
    BoundaryClassifier, BreakClassifier, BreakRules, CellMetrics, CellTextMeasurer,
    DEFAULT_TAB_WIDTH, LineBreakMeasurer, Paragraph,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rules {
    Line,
    Word,
    Whitespace,
}

impl From<Rules> for BreakRules {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Line => BreakRules::Line,
            Rules::Word => BreakRules::Word,
            Rules::Whitespace => BreakRules::Whitespace,
        }
    }
}

#[derive(Parser)]
#[command(name = "linewrap", about = "Wrap text to a fixed width", version)]
struct Cli {
    /// Wrapping width, in cells.
    #[arg(short, long, default_value_t = 80.0, env = "LINEWRAP_WIDTH")]
    width: f32,

    /// Distance between tab stops, in cells.
    #[arg(short, long, default_value_t = DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    /// Break boundary rules.
    #[arg(short, long, value_enum, default_value = "line")]
    rules: Rules,

    /// Never split a word that is wider than the line; emit it on a line of its own instead.
    #[arg(long)]
    require_next_word: bool,

    /// Input file (defaults to stdin).
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linebreak_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.width.is_nan() || cli.width <= 0.0 {
        anyhow::bail!("width must be positive, got {}", cli.width);
    }

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let metrics = CellMetrics::default().with_tab_width(cli.tab_width);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut offset = 0usize;
    for line in text.lines() {
        let paragraph = Paragraph::with_begin(line, offset);
        offset += paragraph.len() + 1;

        if paragraph.is_empty() {
            writeln!(out)?;
            continue;
        }

        tracing::debug!(
            begin = paragraph.begin_index(),
            len = paragraph.len(),
            "wrapping paragraph"
        );
        let mut lbm = LineBreakMeasurer::with_classifier(
            &paragraph,
            BoundaryClassifier::new(cli.rules.into()),
            CellTextMeasurer::with_metrics(&paragraph, metrics),
        )?;
        wrap_paragraph(&mut lbm, &cli, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn wrap_paragraph(
    lbm: &mut LineBreakMeasurer<CellTextMeasurer>,
    cli: &Cli,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let limit = lbm.paragraph_limit();
    while lbm.position() < limit {
        let segment = match lbm.next_layout_with(cli.width, limit, cli.require_next_word)? {
            Some(segment) => segment,
            None => {
                // The next word is wider than the line: give it a line of its own.
                let word_end = lbm
                    .classifier()
                    .clone()
                    .following(lbm.position())
                    .unwrap_or(limit);
                match lbm.next_layout_with(f32::INFINITY, word_end, false)? {
                    Some(segment) => segment,
                    None => break,
                }
            }
        };
        writeln!(out, "{}", segment.text.trim_end())?;
    }
    Ok(())
}
