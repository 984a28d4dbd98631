//! PDF Toolbox CLI tool
//!
//! A command-line front end for merging PDFs and splitting pages out of a PDF.

use clap::{Parser, Subcommand};
use env_logger::Env;
use glob::glob;
use std::mem;
use std::path::{Path, PathBuf};
use std::process;

use pdf_toolbox::pdf::extract_metadata;
use pdf_toolbox::workspace::{Dialogs, Notifier, Outcome, Severity, Workspace, DEFAULT_SPLIT_NAME};
#[cfg(feature = "pdfium")]
use anyhow::Context;
#[cfg(feature = "pdfium")]
use pdf_toolbox::{pdf::PdfiumRenderer, ThumbnailOptions};

/// PDF Toolbox - Merge PDFs and split out pages
#[derive(Parser)]
#[command(name = "pdf-toolbox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Merge PDFs in the given order
    pdf-toolbox merge -o book.pdf cover.pdf \"chapter-*.pdf\" appendix.pdf

    # Keep pages 1-3, 5 and 7-9 of a document
    pdf-toolbox split report.pdf --pages 1-3,5,7-9 --name summary -d out/

    # Show page count and title
    pdf-toolbox info report.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge multiple PDF files into one
    Merge {
        /// Input PDF files (in order). Supports glob patterns like "*.pdf"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Write selected pages of a PDF to a new file
    Split {
        /// PDF file to take pages from
        input: PathBuf,

        /// Page range expression, 1-based (e.g. "1-3,5,7-9")
        #[arg(short, long)]
        pages: String,

        /// Directory for the new file
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,

        /// Name of the new file, without extension
        #[arg(short, long, default_value = DEFAULT_SPLIT_NAME)]
        name: String,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },

    /// Render page thumbnails and show the selection grid
    #[cfg(feature = "pdfium")]
    Thumbnails {
        /// PDF file to preview
        input: PathBuf,

        /// Directory to write page PNGs into
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Render scale relative to the page size
        #[arg(long, default_value_t = 0.2)]
        scale: f32,

        /// Thumbnails per row
        #[arg(long, default_value_t = 4)]
        columns: usize,

        /// Pages to mark as selected (e.g. "1-3,5")
        #[arg(long)]
        select: Option<String>,
    },
}

/// Dialog answers taken from the command line
#[derive(Default)]
struct ArgDialogs {
    files: Vec<PathBuf>,
    file: Option<PathBuf>,
    directory: Option<PathBuf>,
    save_path: Option<PathBuf>,
}

impl Dialogs for ArgDialogs {
    fn open_files(&mut self) -> Vec<PathBuf> {
        mem::take(&mut self.files)
    }

    fn open_file(&mut self) -> Option<PathBuf> {
        self.file.take()
    }

    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.directory.take()
    }

    fn save_path(&mut self, _default_name: &str) -> Option<PathBuf> {
        self.save_path.take()
    }
}

/// Prints notifications to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        let message = message.replace('\n', " ");
        match severity {
            Severity::Info => eprintln!("{}", message),
            Severity::Warning => eprintln!("Warning: {}", message),
            Severity::Error => eprintln!("Error: {}", message),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge { inputs, output, open } => {
            cmd_merge(inputs, output, open)
        }
        Commands::Split { input, pages, output_dir, name, open } => {
            cmd_split(input, pages, output_dir, name, open)
        }
        Commands::Info { input } => {
            cmd_info(input)
        }
        #[cfg(feature = "pdfium")]
        Commands::Thumbnails { input, output_dir, scale, columns, select } => {
            cmd_thumbnails(input, output_dir, scale, columns, select)
        }
    };

    match result {
        Ok(true) => {}
        // already reported through the notifier
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Expand glob patterns in input paths
///
/// Argument order is kept; matches of a single pattern are sorted.
fn expand_globs(patterns: Vec<String>) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matches = Vec::new();
            for entry in glob(&pattern)? {
                match entry {
                    Ok(path) => matches.push(path),
                    Err(e) => log::warn!("glob error for {}: {}", pattern, e),
                }
            }
            if matches.is_empty() {
                anyhow::bail!("No files matched pattern: {}", pattern);
            }
            matches.sort();
            paths.extend(matches);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Turn a workspace outcome into whether the command succeeded.
///
/// Rejections and failures were already reported by the notifier.
fn finish(outcome: Outcome, open: bool) -> anyhow::Result<bool> {
    match outcome {
        Outcome::Completed(path) => {
            if open {
                open_file(&path)?;
            }
            Ok(true)
        }
        Outcome::Cancelled => Ok(true),
        Outcome::Rejected(_) | Outcome::Failed(_) => Ok(false),
    }
}

/// Merge multiple PDFs into one
fn cmd_merge(inputs: Vec<String>, output: PathBuf, open: bool) -> anyhow::Result<bool> {
    let inputs = expand_globs(inputs)?;

    eprintln!("Merging {} PDF files...", inputs.len());

    let dialogs = ArgDialogs {
        files: inputs,
        save_path: Some(output),
        ..ArgDialogs::default()
    };
    let mut workspace = Workspace::new(dialogs, ConsoleNotifier);
    workspace.add_merge_files();

    finish(workspace.merge(), open)
}

/// Extract selected pages into a new PDF
fn cmd_split(
    input: PathBuf,
    pages: String,
    output_dir: PathBuf,
    name: String,
    open: bool,
) -> anyhow::Result<bool> {
    let dialogs = ArgDialogs {
        directory: Some(output_dir),
        ..ArgDialogs::default()
    };
    let mut workspace = Workspace::new(dialogs, ConsoleNotifier);
    workspace.open_split_source(input, None);
    workspace.set_split_name(&name);
    // checked against the source by split(); no preview is loaded here
    workspace.set_page_range_text(&pages)?;

    eprintln!("Extracting pages {}...", pages.trim());

    finish(workspace.split(), open)
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<bool> {
    let metadata = extract_metadata(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(true)
}

/// Render thumbnails and print the selection grid
#[cfg(feature = "pdfium")]
fn cmd_thumbnails(
    input: PathBuf,
    output_dir: PathBuf,
    scale: f32,
    columns: usize,
    select: Option<String>,
) -> anyhow::Result<bool> {
    let dialogs = ArgDialogs {
        file: Some(input),
        ..ArgDialogs::default()
    };
    let options = ThumbnailOptions { scale, columns };
    let mut workspace = Workspace::with_thumbnail_options(dialogs, ConsoleNotifier, options);

    if !workspace.select_split_file(&PdfiumRenderer::new()).is_completed() {
        return Ok(false);
    }
    if let Some(select) = select {
        workspace
            .set_page_range_text(&select)
            .with_context(|| format!("Cannot select pages \"{}\"", select))?;
    }

    let preview = workspace.preview();
    let written = preview.save_thumbnails(&output_dir)?;

    for row in preview.thumbnails().chunks(preview.options().columns.max(1)) {
        let cells: Vec<String> = row
            .iter()
            .map(|thumbnail| {
                let mark = if preview.is_selected(thumbnail.index) { "x" } else { " " };
                format!("[{}] {:>4}", mark, thumbnail.index + 1)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
    println!("Selection: {}", preview.range_text());

    eprintln!("{}", workspace.status());
    eprintln!("Wrote {} thumbnails to {}", written.len(), output_dir.display());

    Ok(true)
}
