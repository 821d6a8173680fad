//! StoryDoc CLI - render and inspect StoryDoc manuscripts
//!
//! Usage:
//!   sdcli [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   render    Print the styled document (default)
//!   blocks    List the block events the classifier found
//!   stats     Show document statistics

use std::fs;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use storydoc_core::span::Span;
use storydoc_core::{
    classify, render, BlockEvent, BlockKind, Emphasis, Fragment, RichText, StyleKind, StyleSheet,
    TextStyle,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Render and inspect StoryDoc manuscripts
#[derive(Parser, Debug)]
#[command(name = "sdcli", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Manuscript to render when no command is given
    file: Option<PathBuf>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the styled document (default)
    Render { file: PathBuf },
    /// List the block events the classifier found
    Blocks { file: PathBuf },
    /// Show document statistics
    Stats { file: PathBuf },
}

#[derive(Args, Debug, Clone)]
struct Options {
    /// JSON style sheet with title, author, chapter, section and normal entries
    #[arg(long, global = true, value_name = "FILE")]
    styles: Option<PathBuf>,

    /// Print the effective style sheet as JSON and exit
    #[arg(long, global = true)]
    dump_styles: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Render without ANSI bold/italic escapes
    #[arg(long, global = true)]
    plain: bool,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.options.debug);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.options;
    let styles = load_styles(options.styles.as_deref())?;

    if options.dump_styles {
        println!("{}", serde_json::to_string_pretty(&styles)?);
        return Ok(());
    }

    let (command, file) = match cli.command {
        Some(Command::Render { file }) => (CommandKind::Render, file),
        Some(Command::Blocks { file }) => (CommandKind::Blocks, file),
        Some(Command::Stats { file }) => (CommandKind::Stats, file),
        None => (
            CommandKind::Render,
            cli.file.ok_or_else(|| anyhow!("no input file specified"))?,
        ),
    };

    let input = read_document(&file)?;
    info!(file = %file.display(), bytes = input.len(), "loaded document");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match command {
        CommandKind::Render => cmd_render(&mut out, &input, &styles, &options)?,
        CommandKind::Blocks => cmd_blocks(&mut out, &input, &options)?,
        CommandKind::Stats => cmd_stats(&mut out, &input, &styles, &options)?,
    }

    out.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum CommandKind {
    Render,
    Blocks,
    Stats,
}

// =============================================================================
// Loading
// =============================================================================

/// Read a manuscript as UTF-8, dropping a leading byte order mark.
fn read_document(path: &Path) -> Result<String> {
    let context = || format!("failed to read '{}'", path.display());
    let bytes = fs::read(path).with_context(context)?;
    let text = String::from_utf8(bytes).with_context(context)?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// The style sheet from `path`, or the built-in one.
fn load_styles(path: Option<&Path>) -> Result<StyleSheet> {
    let Some(path) = path else {
        return Ok(default_styles());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read style sheet '{}'", path.display()))?;
    let styles: StyleSheet = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse style sheet '{}'", path.display()))?;
    styles
        .validate()
        .with_context(|| format!("invalid style sheet '{}'", path.display()))?;

    debug!(path = %path.display(), "loaded style sheet");
    Ok(styles)
}

fn default_styles() -> StyleSheet {
    let style = |size: f32| TextStyle {
        size,
        traits: Default::default(),
    };

    StyleSheet {
        title: style(28.0).bold(),
        author: style(18.0).italic(),
        chapter: style(22.0).bold(),
        section: style(18.0).bold(),
        normal: style(17.0),
    }
}

// =============================================================================
// Render Command
// =============================================================================

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

fn cmd_render(
    out: &mut impl Write,
    input: &str,
    styles: &StyleSheet,
    options: &Options,
) -> Result<()> {
    let text = render(input, styles);

    if options.json {
        let fragments: Vec<_> = text.fragments.iter().map(convert_fragment).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&fragments)?)?;
        return Ok(());
    }

    let ansi = !options.plain && io::stdout().is_terminal();
    write_text(out, &text, ansi)?;
    Ok(())
}

/// Write the document, marking bold and italic runs with ANSI escapes when
/// `ansi` is set.
fn write_text(out: &mut impl Write, text: &RichText, ansi: bool) -> io::Result<()> {
    for fragment in text {
        match fragment {
            Fragment::Run(run) if ansi => {
                let traits = run.style.traits;
                if traits.bold {
                    out.write_all(BOLD.as_bytes())?;
                }
                if traits.italic {
                    out.write_all(ITALIC.as_bytes())?;
                }
                out.write_all(run.text.as_bytes())?;
                if traits.bold || traits.italic {
                    out.write_all(RESET.as_bytes())?;
                }
            }
            Fragment::Run(run) => out.write_all(run.text.as_bytes())?,
            Fragment::LineBreak => out.write_all(b"\n")?,
        }
    }
    Ok(())
}

// =============================================================================
// Blocks Command
// =============================================================================

fn cmd_blocks(out: &mut impl Write, input: &str, options: &Options) -> Result<()> {
    let events = classify(input);

    if options.json {
        let blocks: Vec<_> = events.iter().map(convert_block).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&blocks)?)?;
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, describe_block(event))?;
    }
    Ok(())
}

fn describe_block(event: &BlockEvent) -> String {
    let span = format!("@{}..{}", event.span.start, event.span.end);
    match event.kind {
        BlockKind::Separator | BlockKind::Blank => format!("{:?} {}", event.kind, span),
        kind => {
            let preview: String = event.text.chars().take(60).collect();
            let ellipsis = if event.text.chars().count() > 60 {
                "..."
            } else {
                ""
            };
            format!("{:?} {:?}{} {}", kind, preview, ellipsis, span)
        }
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(
    out: &mut impl Write,
    input: &str,
    styles: &StyleSheet,
    options: &Options,
) -> Result<()> {
    let events = classify(input);
    let text = render(input, styles);
    let stats = DocumentStats::collect(&events, &text, input);

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(out, "Document Statistics")?;
    writeln!(out, "-------------------")?;
    writeln!(out, "Blocks:")?;
    writeln!(out, "  Total:          {}", stats.blocks)?;
    writeln!(out, "  Titles:         {}", stats.titles)?;
    writeln!(out, "  Authors:        {}", stats.authors)?;
    writeln!(out, "  Years:          {}", stats.years)?;
    writeln!(out, "  Chapters:       {}", stats.chapters)?;
    writeln!(out, "  Sections:       {}", stats.sections)?;
    writeln!(out, "  Separators:     {}", stats.separators)?;
    writeln!(out, "  Paragraphs:     {}", stats.paragraphs)?;
    writeln!(out, "  Blank lines:    {}", stats.blanks)?;
    writeln!(out)?;
    writeln!(out, "Runs:")?;
    writeln!(out, "  Plain:          {}", stats.plain_runs)?;
    writeln!(out, "  Bold:           {}", stats.bold_runs)?;
    writeln!(out, "  Italic:         {}", stats.italic_runs)?;
    writeln!(out, "  Line breaks:    {}", stats.line_breaks)?;
    writeln!(out)?;
    writeln!(out, "Size:")?;
    writeln!(out, "  Characters:     {}", stats.chars)?;
    writeln!(out, "  Words:          {}", stats.words)?;
    writeln!(out, "  Lines:          {}", stats.lines)?;

    Ok(())
}

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
struct DocumentStats {
    blocks: usize,
    titles: usize,
    authors: usize,
    years: usize,
    chapters: usize,
    sections: usize,
    separators: usize,
    paragraphs: usize,
    blanks: usize,
    plain_runs: usize,
    bold_runs: usize,
    italic_runs: usize,
    line_breaks: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn collect(events: &[BlockEvent], text: &RichText, input: &str) -> Self {
        let mut stats = Self {
            blocks: events.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            ..Self::default()
        };

        for event in events {
            match event.kind {
                BlockKind::Title => stats.titles += 1,
                BlockKind::Author => stats.authors += 1,
                BlockKind::Year => stats.years += 1,
                BlockKind::Chapter => stats.chapters += 1,
                BlockKind::Section => stats.sections += 1,
                BlockKind::Separator => stats.separators += 1,
                BlockKind::Paragraph => stats.paragraphs += 1,
                BlockKind::Blank => stats.blanks += 1,
            }
        }

        for fragment in text {
            match fragment {
                Fragment::Run(run) => match run.emphasis {
                    Emphasis::Plain => stats.plain_runs += 1,
                    Emphasis::Bold => stats.bold_runs += 1,
                    Emphasis::Italic => stats.italic_runs += 1,
                },
                Fragment::LineBreak => stats.line_breaks += 1,
            }
        }

        stats
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonFragment<'a> {
    Run {
        text: &'a str,
        role: StyleKind,
        emphasis: Emphasis,
        size: f32,
        bold: bool,
        italic: bool,
    },
    Break,
}

#[derive(Serialize, Debug)]
struct JsonBlock<'a> {
    kind: BlockKind,
    text: &'a str,
    span: Span,
}

fn convert_fragment<'a>(fragment: &'a Fragment) -> JsonFragment<'a> {
    match fragment {
        Fragment::Run(run) => JsonFragment::Run {
            text: &run.text,
            role: run.role,
            emphasis: run.emphasis,
            size: run.style.size,
            bold: run.style.traits.bold,
            italic: run.style.traits.italic,
        },
        Fragment::LineBreak => JsonFragment::Break,
    }
}

fn convert_block<'a>(event: &'a BlockEvent) -> JsonBlock<'a> {
    JsonBlock {
        kind: event.kind,
        text: &event.text,
        span: event.span,
    }
}
