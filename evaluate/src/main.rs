use std::collections::HashMap;
use std::fs::File;
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use verdetto::{ConfusionMatrix, Polarity};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of Verdetto.")]
struct Args {
    /// The gold-standard labels, one `<id> <class:0|1>` line per document
    gold: PathBuf,

    /// The system-output labels to evaluate, in the same format
    system: PathBuf,

    /// The file to write the evaluation report to
    output: PathBuf,
}

fn load_labels(path: &Path) -> Result<Vec<(String, Polarity)>, Box<dyn std::error::Error>> {
    eprintln!("Loading {path:?} ...");
    let f = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let f = BufReader::new(f);
    let mut labels = vec![];
    for line in f.lines() {
        let line = line.map_err(|e| format!("{}: {e}", path.display()))?;
        let (id, class) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("{}: malformed line: {line}", path.display()))?;
        let polarity =
            Polarity::from_digit(class.trim()).map_err(|e| format!("{}: {e}", path.display()))?;
        labels.push((id.to_string(), polarity));
    }
    Ok(labels)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let gold = load_labels(&args.gold)?;
    let system: HashMap<_, _> = load_labels(&args.system)?.into_iter().collect();
    if system.len() != gold.len() {
        return Err(format!(
            "{}: ids do not match the gold standard",
            args.system.display()
        )
        .into());
    }

    let out = File::create(&args.output).map_err(|e| format!("{}: {e}", args.output.display()))?;
    let mut wtr = BufWriter::new(out);
    let mut matrix = ConfusionMatrix::new();
    for (id, gold_label) in &gold {
        let system_label = system
            .get(id)
            .ok_or_else(|| format!("{}: missing id: {id}", args.system.display()))?;
        matrix.record(*gold_label, *system_label);
        writeln!(wtr, "{id} {gold_label} {system_label}")
            .map_err(|e| format!("{}: {e}", args.output.display()))?;
    }
    writeln!(wtr, "Accuracy: {:.4}", matrix.accuracy())?;
    writeln!(wtr, "Precision: {:.4}", matrix.precision())?;
    writeln!(wtr, "Recall: {:.4}", matrix.recall())?;
    wtr.flush()?;

    Ok(())
}
