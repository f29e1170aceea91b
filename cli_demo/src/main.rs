extern crate serde_derive;
extern crate gesture_lookup;

use anyhow::{bail, Context};
use clap::Parser;
use serde_derive::{Serialize, Deserialize};
use std::time::{Instant};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use gesture_lookup::{Point, Recognizer, RecognizerConfig, Stroke};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Stores a vocabulary of sample strokes, then times recognition of test strokes
#[derive(Parser, Debug)]
#[command(name = "cli_demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-lines file of named sample strokes to store
    #[arg(long, default_value = "data/vocabulary.jsonl")]
    vocabulary: PathBuf,

    /// JSON-lines file of named strokes to recognize
    #[arg(long, default_value = "data/inputs.jsonl")]
    inputs: PathBuf,

    /// Recognizer config as JSON; defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluation cycles over all inputs
    #[arg(long, default_value = "1000")]
    iters: usize,

    /// Print each stored fingerprint as a grid
    #[arg(long)]
    show: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize, Deserialize)]
struct Sample {
    name: String,
    points: Vec<Vec<f32>>,
}

fn read_samples(fname: &Path) -> anyhow::Result<Vec<Sample>> {
    let mut res: Vec<Sample> = Vec::new();
    let file = File::open(fname).with_context(|| format!("Failed to open {}.", fname.display()))?;
    for (ix, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let sample: Sample = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed sample", fname.display(), ix + 1))?;
        res.push(sample);
    }
    Ok(res)
}

fn get_stroke(sample: &Sample) -> anyhow::Result<Stroke> {
    let mut points: Vec<Point> = Vec::with_capacity(sample.points.len());
    for pt in &sample.points {
        if pt.len() < 2 {
            bail!("Sample '{}' has a point without two coordinates.", sample.name);
        }
        points.push(Point {
            x: pt[0],
            y: pt[1],
        });
    }
    Ok(Stroke {
        points: points,
    })
}

fn load_config(path: &Option<PathBuf>) -> anyhow::Result<RecognizerConfig> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}.", path.display()))?;
            let config: RecognizerConfig = serde_json::from_reader(file)
                .with_context(|| format!("Failed to parse {}.", path.display()))?;
            Ok(config)
        }
        None => Ok(RecognizerConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(&cli.config)?;
    let mut recognizer = Recognizer::new(config)?;

    info!("Loading vocabulary.");
    for sample in read_samples(&cli.vocabulary)? {
        let stroke = get_stroke(&sample)?;
        let fingerprint = recognizer.store_gesture(&sample.name, &stroke)?;
        if cli.show {
            println!("{}:\n{}", sample.name, fingerprint);
        }
    }

    let inputs = read_samples(&cli.inputs)?;
    let mut strokes: Vec<(String, Stroke)> = Vec::with_capacity(inputs.len());
    for input in &inputs {
        strokes.push((input.name.clone(), get_stroke(input)?));
    }
    info!("Loaded {} inputs; starting {} cycles of evaluation.", strokes.len(), cli.iters);

    let start = Instant::now();
    let mut guessed = 0;
    let mut missed = 0;
    for _ in 0..cli.iters {
        for (name, stroke) in &strokes {
            match recognizer.find_gesture(stroke) {
                Ok(res) => {
                    if res.name.as_ref() == Some(name) {
                        guessed += 1;
                    } else {
                        debug!(expected = name.as_str(), got = res.name_or_none(), "wrong guess");
                    }
                }
                Err(err) => {
                    warn!(name = name.as_str(), "{}", err);
                    missed += 1;
                }
            }
        }
    }
    let duration = start.elapsed();
    println!("Finished in {:?}. Correct guesses: {}. Rejected inputs: {}.", duration, guessed, missed);
    Ok(())
}
