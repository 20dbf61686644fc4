use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use quintic::{
    combination_count, run_search, Discovery, EventSink, IndexStrategy, Progress, QuinticError,
    SearchConfig, Width,
};

/// Search `[2, limit)` for quintuples with a^5 + b^5 + c^5 + d^5 = e^5.
#[derive(Parser)]
struct Args {
    /// Exclusive upper bound on tested bases
    #[arg(long, default_value_t = 150)]
    limit: u32,
    /// Scalar width; auto picks 64-bit while the powers still fit
    #[arg(long, value_enum, default_value_t = WidthArg::Auto)]
    width: WidthArg,
    /// Exact-lookup strategy behind the bit filter
    #[arg(long, value_enum, default_value_t = StrategyArg::Hash)]
    index: StrategyArg,
    /// log2 of the rejection bitmap size in bits
    #[arg(long, default_value_t = 24)]
    filter_bits: u8,
    /// Emit progress every 2^SHIFT iterations
    #[arg(long, default_value_t = 26)]
    progress_shift: u8,
    /// Drop solutions in which two or more addends coincide
    #[arg(long)]
    distinct_only: bool,
    /// Print discoveries and the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum WidthArg {
    Auto,
    U64,
    U128,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Hash,
    Scan,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), QuinticError> {
    let args = Args::parse();
    let config = SearchConfig {
        limit: args.limit,
        width: match args.width {
            WidthArg::Auto => Width::Auto,
            WidthArg::U64 => Width::U64,
            WidthArg::U128 => Width::U128,
        },
        strategy: match args.index {
            StrategyArg::Hash => IndexStrategy::Hash,
            StrategyArg::Scan => IndexStrategy::Scan,
        },
        filter_bits: args.filter_bits,
        progress_shift: args.progress_shift,
        distinct_only: args.distinct_only,
        stop: None,
    };

    if args.json {
        let mut sink = JsonSink;
        let summary = run_search(&config, &mut sink)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
    } else {
        let mut sink = ConsoleSink::new(args.limit);
        let summary = run_search(&config, &mut sink)?;
        sink.finish();
        println!(
            "Done in {} | iterations: {} | speed: {} itr/ms | filter ratio: {}{}",
            fmt_secs(summary.elapsed),
            summary.iterations,
            summary.per_ms,
            summary.iterations / summary.filter_hits.max(1),
            if summary.interrupted {
                " | interrupted"
            } else {
                ""
            },
        );
        println!(
            "{} result(s) in [2, {})",
            summary.discoveries.len(),
            summary.limit
        );
    }
    Ok(())
}

fn fmt_secs(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

/// Renders progress on a terminal bar; discoveries print above it.
struct ConsoleSink {
    bar: ProgressBar,
}

impl ConsoleSink {
    fn new(limit: u32) -> Self {
        let bar = ProgressBar::new(combination_count(limit));
        bar.set_style(
            ProgressStyle::with_template(
                "{elapsed_precise} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .expect("progress template"),
        );
        ConsoleSink { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl EventSink for ConsoleSink {
    fn on_table_ready(&mut self, limit: u32, elapsed: Duration) {
        self.bar.println(format!(
            "Table of powers 0..{limit}^5 ready in {}. Starting search...",
            fmt_secs(elapsed)
        ));
    }

    fn on_progress(&mut self, progress: &Progress) {
        let [a, b, c, d] = progress.counters;
        self.bar.set_position(progress.iterations);
        self.bar.set_message(format!(
            "{a}^5 {b}^5 {c}^5 {d}^5 | {} itr/ms | hh {}",
            progress.per_ms, progress.filter_ratio
        ));
    }

    fn on_discovery(&mut self, found: &Discovery) {
        let Discovery { a, b, c, d, e, .. } = *found;
        self.bar.println(format!(
            "Found: {a}^5 + {b}^5 + {c}^5 + {d}^5 = {e}^5  (itr {}, {})",
            found.iterations,
            fmt_secs(found.elapsed)
        ));
    }

    fn on_duplicate(&mut self, found: &Discovery) {
        self.bar.println(format!(
            "Duplicate of an earlier result: {}^5 (itr {})",
            found.e, found.iterations
        ));
    }
}

/// Emits one JSON line per discovery; progress stays off stdout.
struct JsonSink;

impl EventSink for JsonSink {
    fn on_discovery(&mut self, found: &Discovery) {
        println!(
            "{}",
            serde_json::to_string(found).expect("discovery serializes")
        );
    }
}
