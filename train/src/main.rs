use std::fs::File;
use std::io::{prelude::*, stderr, BufReader, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use verdetto::{CountingMode, Document, Preprocessor, Trainer};

#[derive(Parser, Debug)]
#[command(about = "A program to train decision lists of Verdetto.")]
struct Args {
    /// A labeled training corpus, one `<id> <class:0|1> <text>` line per document
    train: PathBuf,

    /// The file to write the trained decision list to
    model: PathBuf,

    /// The counting policy: {frequency, presence, hybrid}
    #[arg(long, default_value = "frequency")]
    counting: CountingMode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let preprocessor = Preprocessor::default();
    let mut trainer = Trainer::new(args.counting);

    eprintln!("Loading {:?} ...", args.train);
    let f = File::open(&args.train).map_err(|e| format!("{}: {e}", args.train.display()))?;
    let f = BufReader::new(f);
    let mut n_documents = 0;
    for (i, line) in f.lines().enumerate() {
        if i % 10000 == 0 {
            eprint!("# of documents: {i}\r");
            stderr().flush()?;
        }
        let line = line.map_err(|e| format!("{}: {e}", args.train.display()))?;
        let (doc, polarity) = Document::from_labeled_line(&line, &preprocessor)
            .map_err(|e| format!("{}: {e}", args.train.display()))?;
        trainer.add_example(&doc, polarity);
        n_documents += 1;
    }
    eprintln!("# of documents: {n_documents}");
    eprintln!("# of features: {}", trainer.n_features());

    eprintln!("Start training...");
    let model = trainer.train();
    eprintln!("# of decisions: {}", model.decisions().len());

    let f = File::create(&args.model).map_err(|e| format!("{}: {e}", args.model.display()))?;
    let mut wtr = BufWriter::new(f);
    model
        .write(&mut wtr)
        .map_err(|e| format!("{}: {e}", args.model.display()))?;
    wtr.flush()?;

    Ok(())
}
