//! Hand History Converter
//!
//! Reads an Everleaf transcript, rebuilds every hand with exact pot and
//! side-pot accounting, and writes each one out as PokerStars text or JSON.
//!
//! Options: --input, --output, --format, --quiet, --verbose

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use colored::Colorize;
use handhistory::convert::*;
use handhistory::render::*;
use rayon::prelude::*;
use std::io::Read;
use std::io::Write;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Stars,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Convert Everleaf hand histories", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "-", help = "transcript to read, - for stdin")]
    input: String,
    #[arg(short, long, default_value = "-", help = "where to write, - for stdout")]
    output: String,
    #[arg(short, long, value_enum, default_value_t = Format::Stars)]
    format: Format,
    #[arg(short, long, conflicts_with = "verbose", help = "errors only")]
    quiet: bool,
    #[arg(short, long, help = "trace every callback")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match (args.quiet, args.verbose) {
        (true, _) => log::LevelFilter::Error,
        (_, true) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Info,
    };
    handhistory::log(level)?;
    let renderer: Box<dyn Render> = match args.format {
        Format::Stars => Box::new(Stars),
        Format::Json => Box::new(Json),
    };
    let bytes = read(&args.input)?;
    let text = Converter::<Everleaf>::decode(&bytes);
    let converter = Converter::new(Everleaf);
    let hands = Converter::<Everleaf>::split(&text);
    log::info!(
        "converting {} {} hands from {}",
        hands.len(),
        converter.reader().site(),
        args.input
    );
    let results = hands
        .par_iter()
        .map(|hand| converter.convert(hand))
        .collect::<Vec<_>>();
    let rendered = results
        .par_iter()
        .filter_map(|result| result.as_ref().ok())
        .filter_map(|hand| match renderer.render(hand) {
            Ok(text) => Some(text.trim_end().to_string()),
            Err(e) => {
                log::error!("hand {} not rendered: {}", hand.info().id, e);
                None
            }
        })
        .collect::<Vec<_>>();
    write(&args.output, &rendered.join("\n\n"))?;
    let tally = results.iter().collect::<Tally>();
    if !args.quiet {
        eprintln!(
            "{} {} {} {}",
            format!("{} hands:", tally.total()).bold(),
            format!("{} clean", tally.clean).green(),
            format!("{} partial", tally.partial).yellow(),
            format!("{} failed", tally.failed).red(),
        );
    }
    Ok(())
}

fn read(path: &str) -> anyhow::Result<Vec<u8>> {
    match path {
        "-" => {
            let ref mut bytes = Vec::new();
            std::io::stdin().read_to_end(bytes).context("read stdin")?;
            Ok(std::mem::take(bytes))
        }
        path => std::fs::read(path).with_context(|| format!("read {}", path)),
    }
}

fn write(path: &str, text: &str) -> anyhow::Result<()> {
    match path {
        "-" => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).context("write stdout")
        }
        path => std::fs::write(path, format!("{}\n", text)).with_context(|| format!("write {}", path)),
    }
}
