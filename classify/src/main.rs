use std::fs::File;
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use verdetto::{Classifier, Document, Model, Preprocessor};

#[derive(Parser, Debug)]
#[command(about = "A program to classify documents with a trained decision list.")]
struct Args {
    /// The decision list to use when classifying documents
    model: PathBuf,

    /// A test corpus, one `<id> __ <text>` line per document
    test: PathBuf,

    /// The file to write predicted labels to
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let f = File::open(&args.model).map_err(|e| format!("{}: {e}", args.model.display()))?;
    let mut f = BufReader::new(f);
    let model = Model::read(&mut f).map_err(|e| format!("{}: {e}", args.model.display()))?;
    let classifier = Classifier::new(model)?;
    let preprocessor = Preprocessor::default();

    eprintln!("Start classification");
    let start = Instant::now();
    let f = File::open(&args.test).map_err(|e| format!("{}: {e}", args.test.display()))?;
    let f = BufReader::new(f);
    let out = File::create(&args.output).map_err(|e| format!("{}: {e}", args.output.display()))?;
    let mut wtr = BufWriter::new(out);
    let mut n_documents = 0;
    for line in f.lines() {
        let line = line.map_err(|e| format!("{}: {e}", args.test.display()))?;
        let doc = Document::from_test_line(&line, &preprocessor)
            .map_err(|e| format!("{}: {e}", args.test.display()))?;
        let polarity = classifier.classify(&doc);
        writeln!(wtr, "{} {}", doc.id(), polarity)
            .map_err(|e| format!("{}: {e}", args.output.display()))?;
        n_documents += 1;
    }
    wtr.flush()?;
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [documents/sec]",
        n_documents as f64 / duration.as_secs_f64()
    );

    Ok(())
}
