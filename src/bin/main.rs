//! `sk-jaro`: rank the lines of stdin by Jaro similarity to a query.

#[macro_use]
extern crate log;

use std::io::{self, BufRead, BufWriter, Write};

use clap::Parser;
use color_eyre::eyre::Result;

use bitjaro::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "sk-jaro", version)]
/// Rank lines read from stdin by Jaro similarity to a query
///
/// Prints `score<TAB>line` for every line scoring at least the cutoff, best first.
struct Args {
    /// Query every line is compared against
    query: String,

    #[command(flatten)]
    options: JaroOptions,

    /// Print at most this many lines
    #[arg(short, long)]
    limit: Option<usize>,
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // downstream pipe closed, e.g. `sk-jaro foo | head`
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|err| err.kind() == io::ErrorKind::BrokenPipe)
            {
                std::process::exit(0)
            }
            eprintln!("{err:?}");
            std::process::exit(2)
        }
    }
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let args = Args::parse();

    // clap accepts "NaN" as a float, the builder does not
    let options = JaroOptionsBuilder::default()
        .score_cutoff(args.options.score_cutoff)
        .case(args.options.case)
        .build()?;
    let matcher = JaroMatcher::new(options);

    let mut matches = Vec::new();
    let mut total = 0;
    for line in io::stdin().lock().lines() {
        let line = line?;
        total += 1;
        if let Some(score) = matcher.similarity(&line, &args.query) {
            matches.push((score, line));
        }
    }
    debug!("{} of {} lines matched {:?}", matches.len(), total, args.query);

    // stable: equal scores keep their input order
    matches.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut stdout = BufWriter::new(io::stdout().lock());
    for (score, line) in matches.iter().take(args.limit.unwrap_or(usize::MAX)) {
        writeln!(stdout, "{score:.4}\t{line}")?;
    }
    stdout.flush()?;

    Ok(if matches.is_empty() { 1 } else { 0 })
}
