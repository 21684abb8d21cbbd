use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use narrator::{
    config::ReaderConfig,
    dedent_selection,
    errors::syntax::{format_syntax_error, SyntaxError},
    narrator::narrate,
    parse_source, render_report,
};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "narrator")]
#[command(about = "Explains Python source code as spoken English", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to explain; standard input when omitted
    file: Option<PathBuf>,

    /// Explain a single line (1-based), without its line number
    #[arg(long, conflicts_with = "lines", value_parser = parse_line)]
    line: Option<usize>,

    /// Explain an inclusive range of lines, written as START:END
    #[arg(long, value_parser = parse_range)]
    lines: Option<(usize, usize)>,

    /// Leave line numbers out of syntax-error sentences
    #[arg(long)]
    no_line: bool,

    /// JSON reader configuration
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print a caret diagram of syntax errors to stderr
    #[arg(long)]
    diagnostic: bool,

    /// Log to stderr; repeat for more detail
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_line(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(String::from("lines are numbered from 1")),
        Ok(line) => Ok(line),
        Err(_) => Err(format!("bad line `{}`", value)),
    }
}

fn parse_range(value: &str) -> Result<(usize, usize), String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got `{}`", value))?;
    let start: usize = start.trim().parse().map_err(|_| format!("bad start line `{}`", start))?;
    let end: usize = end.trim().parse().map_err(|_| format!("bad end line `{}`", end))?;

    if start == 0 || end < start {
        return Err(format!("`{}` is not a range of lines", value));
    }

    Ok((start, end))
}

fn read_source(file: Option<&PathBuf>) -> Result<(String, String)> {
    match file {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((contents, name))
        }
        None => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("failed to read standard input")?;
            Ok((contents, String::from("<stdin>")))
        }
    }
}

fn select_lines(source: &str, start: usize, end: usize) -> Result<String> {
    let lines: Vec<&str> = source.lines().collect();

    if start > lines.len() {
        bail!("line {} is past the end of the input ({} lines)", start, lines.len());
    }

    Ok(lines[start - 1..end.min(lines.len())].join("\n"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let start = Instant::now();

    let mut config = match &cli.config {
        Some(path) => ReaderConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ReaderConfig::default(),
    };
    if cli.no_line {
        config.include_line = false;
    }

    let (source, file_name) = read_source(cli.file.as_ref())?;

    // A single line is spoken without its number, a range with it.
    let text = if let Some(line) = cli.line {
        config.include_line = false;
        select_lines(&source, line, line)?.trim().to_string()
    } else if let Some((first, last)) = cli.lines {
        let selection = select_lines(&source, first, last)?;
        if config.dedent {
            dedent_selection(&selection)
        } else {
            selection
        }
    } else if config.dedent {
        dedent_selection(&source)
    } else {
        source
    };

    info!(file = %file_name, bytes = text.len(), "explaining");

    let narration = match parse_source(&text, &file_name) {
        Ok(module) => narrate(&module),
        Err(error) => {
            if cli.diagnostic {
                eprint!("{}", render_report(&error, &text));
            }
            format_syntax_error(&SyntaxError::from(&error), config.include_line)
        }
    };

    debug!("explained in {:?}", start.elapsed());
    println!("{}", narration);

    Ok(())
}
