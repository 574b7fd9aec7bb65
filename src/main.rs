//! Tabulator - load spreadsheet or tab-separated exports, clean them up and
//! copy the result out.

mod clipboard;
mod command;
mod logging;
mod profile;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tabulator_core::Document;
use tracing::info;

use clipboard::{ClipboardProvider, StdoutClipboard};
use command::Command;

#[derive(Parser, Debug)]
#[command(name = "tabulator", version, about)]
struct Cli {
    /// File to load (.xlsx, .xls, .xlsm, .xlsb, .ods or tab-separated text)
    file: Option<PathBuf>,

    /// Command to run, in order (repeatable): filter, merge, undo, clear,
    /// clear-selection RANGES, delete-selection RANGES, insert-blank RANGES,
    /// copy RANGES, load PATH
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<Command>,

    /// TOML profile naming the filter and merge columns
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Export the final table here as tab-separated text instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not print the final table
    #[arg(long)]
    no_render: bool,

    /// Put copied text on the system clipboard instead of stdout
    #[cfg(feature = "clipboard")]
    #[arg(long)]
    clipboard: bool,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    #[cfg(feature = "clipboard")]
    fn clipboard_provider(&self) -> Box<dyn ClipboardProvider> {
        if self.clipboard {
            Box::new(clipboard::SystemClipboard)
        } else {
            Box::new(StdoutClipboard)
        }
    }

    #[cfg(not(feature = "clipboard"))]
    fn clipboard_provider(&self) -> Box<dyn ClipboardProvider> {
        Box::new(StdoutClipboard)
    }
}

/// True when `path` names the file the document was loaded from.
fn is_loaded_file(doc: &Document, path: &Path) -> bool {
    let Some(loaded) = &doc.file_path else {
        return false;
    };
    match (loaded.canonicalize(), path.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write the table (the "render" step of command mode).
///
/// `--output` exports a copy; the loaded file is never written back.
fn render(doc: &Document, cli: &Cli) -> Result<()> {
    let text = doc.table().map(|t| t.to_tsv()).unwrap_or_default();
    if let Some(path) = &cli.output {
        if is_loaded_file(doc, path) {
            bail!("Refusing to overwrite the loaded file {}", path.display());
        }
        let mut content = text;
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote table");
    } else if !cli.no_render && !text.is_empty() {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

/// Run every command; returns false when any of them failed.
fn run(cli: &Cli) -> Result<bool> {
    let profile = profile::resolve(cli.profile.as_deref())?;
    let mut doc = Document::with_profile(profile);
    let mut clipboard = cli.clipboard_provider();
    let mut ok = true;

    let initial = cli.file.iter().map(|p| Command::Load(p.clone()));
    for command in initial.chain(cli.commands.iter().cloned()) {
        match command::execute(&mut doc, &command, clipboard.as_mut()) {
            Ok(status) => info!("{}", status),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ok = false;
            }
        }
    }

    render(&doc, cli)?;
    Ok(ok)
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}
