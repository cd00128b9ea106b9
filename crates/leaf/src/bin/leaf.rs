// ABOUTME: CLI binary for leaf.
// ABOUTME: Runs CSS selector queries over HTML files or stdin and normalizes text.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use leaf::{parse_bytes, text, NodeProxy, Normalizer, Options};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "leaf")]
#[command(about = "Query HTML with CSS selectors and clean up extracted text")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the elements matching a CSS selector
    Select(SelectArgs),
    /// Normalize text from the argument or stdin
    Normalize(NormalizeArgs),
    /// Print the number formed by the digits of TEXT
    Digits {
        text: String,
    },
}

#[derive(clap::Args, Debug)]
struct SelectArgs {
    /// CSS selector
    selector: String,

    /// HTML file to read (default: stdin)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Print only the match at this index
    #[arg(short = 'i', long = "index")]
    index: Option<usize>,

    /// Print this attribute's value instead of markup
    #[arg(short = 'a', long = "attr")]
    attr: Option<String>,

    /// What to print for each match
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = OutputMode::Html)]
    mode: OutputMode,

    /// Output matches as a JSON array
    #[arg(long = "json")]
    json_output: bool,

    /// Input and output encoding label, or "auto" to detect
    #[arg(short = 'e', long = "encoding", default_value = "auto")]
    encoding: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct NormalizeArgs {
    /// Strip diacritical marks
    #[arg(long)]
    accents: bool,

    /// Strip decorative symbols and exotic whitespace
    #[arg(long)]
    symbols: bool,

    /// Collapse runs of spaces
    #[arg(long)]
    spaces: bool,

    /// Collapse runs of newlines
    #[arg(long)]
    linebreaks: bool,

    /// Text to normalize (default: stdin)
    text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Html,
    Inner,
    Text,
}

#[derive(Debug, Serialize)]
struct MatchOutput {
    tag: Option<String>,
    attributes: BTreeMap<String, String>,
    content: String,
}

fn render_match(node: &NodeProxy<'_>, mode: OutputMode) -> String {
    match mode {
        OutputMode::Html => node.html(),
        OutputMode::Inner => node.inner_html(),
        OutputMode::Text => node.to_text(),
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => fs::read(path).with_context(|| format!("error reading file {:?}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("error reading stdin")?;
            Ok(buf)
        }
    }
}

fn run_select(args: &SelectArgs) -> Result<String> {
    let bytes = read_input(args.file.as_ref())?;
    let opts = Options::builder().encoding(args.encoding.as_str()).build();
    let doc = parse_bytes(&bytes, &opts).context("error parsing HTML")?;
    let root = doc.root();

    let matches: Vec<NodeProxy<'_>> = match args.index {
        Some(index) => root.get(&args.selector, index)?.into_iter().collect(),
        None => root.select(&args.selector)?,
    };

    if args.json_output {
        let out: Vec<MatchOutput> = matches
            .iter()
            .map(|m| MatchOutput {
                tag: m.tag(),
                attributes: m.attributes(),
                content: match &args.attr {
                    Some(name) => m.attr(name).unwrap_or_default(),
                    None => render_match(m, args.mode),
                },
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let lines: Vec<String> = match &args.attr {
        Some(name) => matches.iter().filter_map(|m| m.attr(name)).collect(),
        None => matches.iter().map(|m| render_match(m, args.mode)).collect(),
    };
    Ok(lines.join("\n"))
}

fn run_normalize(args: &NormalizeArgs) -> Result<String> {
    let input = match &args.text {
        Some(t) => t.clone(),
        None => {
            let bytes = read_input(None)?;
            String::from_utf8(bytes).context("stdin is not valid UTF-8")?
        }
    };
    let normalizer = Normalizer::new()
        .strip_symbols(args.symbols)
        .strip_accents(args.accents)
        .collapse_spaces(args.spaces)
        .collapse_linebreaks(args.linebreaks);
    Ok(normalizer.apply(&input))
}

fn run(args: &Args) -> Result<(String, Option<PathBuf>)> {
    match &args.command {
        Command::Select(select) => Ok((run_select(select)?, select.output.clone())),
        Command::Normalize(normalize) => Ok((run_normalize(normalize)?, None)),
        Command::Digits { text: input } => Ok((text::extract_digits(input).to_string(), None)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (output, path) = match run(&args) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(output_path) = path {
        if let Err(e) = fs::write(&output_path, &output) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output);
    }

    ExitCode::SUCCESS
}
