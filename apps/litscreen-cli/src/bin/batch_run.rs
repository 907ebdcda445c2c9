use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use litscreen_batch::io::{load_hypotheses, save_results};
use litscreen_batch::pipeline::run_batch;
use litscreen_batch::screening::score_hypothesis;

struct Args {
    input: PathBuf,
    output: PathBuf,
    max_concurrent: usize,
    quiet: bool,
}

fn parse_args() -> Option<Args> {
    let argv: Vec<String> = env::args().collect();
    let mut input = None;
    let mut output = None;
    let mut max_concurrent = 3usize;
    let mut quiet = false;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                input = argv.get(i).map(PathBuf::from);
            }
            "--output" | "-o" => {
                i += 1;
                output = argv.get(i).map(PathBuf::from);
            }
            "--max-concurrent" | "-c" => {
                i += 1;
                max_concurrent = argv.get(i)?.parse().ok()?;
            }
            "--quiet" | "-q" => quiet = true,
            _ => return None,
        }
        i += 1;
    }

    Some(Args {
        input: input?,
        output: output?,
        max_concurrent,
        quiet,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(args) = parse_args() else {
        let program = env::args()
            .next()
            .unwrap_or_else(|| "litscreen-batch".to_string());
        eprintln!(
            "Usage: {} --input <hypotheses.json|csv> --output <results.json|csv> [--max-concurrent N] [--quiet]",
            program
        );
        eprintln!("Example: {} -i hypotheses.csv -o ranked.json -c 3", program);
        std::process::exit(1);
    };

    println!("Loading hypotheses from {}...", args.input.display());
    let hypotheses = load_hypotheses(&args.input)?;
    println!("Loaded {} hypotheses", hypotheses.len());

    if !args.quiet {
        println!("\nProcessing {} hypotheses...", hypotheses.len());
        println!("Max concurrent: {}\n", args.max_concurrent);
    }

    let bar = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(hypotheses.len() as u64)
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hypotheses")
            .unwrap()
            .progress_chars("#>-"),
    );
    let bar = Arc::new(bar);

    let run = {
        let bar = Arc::clone(&bar);
        run_batch(hypotheses, args.max_concurrent, move |hypothesis| {
            let bar = Arc::clone(&bar);
            async move {
                let result = score_hypothesis(hypothesis);
                bar.inc(1);
                Ok(result)
            }
        })
        .await?
    };
    bar.finish_and_clear();

    save_results(&run, &args.output)?;
    println!("\nResults saved to {}", args.output.display());

    println!("\n{}", "=".repeat(50));
    println!("BATCH PROCESSING SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Total hypotheses: {}", run.total_items);
    if run.failed_items > 0 {
        println!("Failed: {}", run.failed_items);
    }
    println!("Processing time: {:.1}s", run.elapsed_seconds);
    println!("\nTop 3 by consensus score:");
    for result in run.results.iter().take(3) {
        println!("  {}. {} ({:.2})", result.rank, result.label, result.score);
    }
    println!("\n{}", run.summary);

    Ok(())
}
