//! Merge and split flows, independent of any widget toolkit
//!
//! [`Workspace`] holds the state a front end displays (merge list, split
//! source, thumbnail preview, range text, status line) and runs the two
//! user-facing flows. File dialogs and modal notifications are collaborators
//! behind the [`Dialogs`] and [`Notifier`] traits.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::merge_list::{Direction, MergeList};
use crate::pdf::{count_pages, merge_pdfs, split_pdf, MergeOptions, PageRenderer, SplitOptions};
use crate::preview::{Preview, ThumbnailOptions};
use crate::range::{pages_within, parse_page_spans};

pub const DEFAULT_MERGE_NAME: &str = "merged";
pub const DEFAULT_SPLIT_NAME: &str = "split";
const READY_STATUS: &str = "Ready - choose an operation";

/// File chooser collaborator. Every method returns an empty result when the
/// user cancels.
pub trait Dialogs {
    /// Pick any number of input PDFs
    fn open_files(&mut self) -> Vec<PathBuf>;
    /// Pick a single input PDF
    fn open_file(&mut self) -> Option<PathBuf>;
    /// Pick an output directory
    fn choose_directory(&mut self) -> Option<PathBuf>;
    /// Pick an output file, pre-filled with `default_name`
    fn save_path(&mut self, default_name: &str) -> Option<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Blocking notification collaborator (message boxes in a GUI)
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// How a flow ended
#[derive(Debug)]
pub enum Outcome {
    /// Finished; carries the file that was written or opened
    Completed(PathBuf),
    /// The user dismissed a dialog
    Cancelled,
    /// Input failed validation; nothing was attempted
    Rejected(Error),
    /// The operation ran and failed
    Failed(Error),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

pub struct Workspace<D, N> {
    dialogs: D,
    notifier: N,
    merge_list: MergeList,
    merge_name: String,
    split_source: Option<PathBuf>,
    split_name: String,
    preview: Preview,
    range_text: String,
    status: String,
}

impl<D: Dialogs, N: Notifier> Workspace<D, N> {
    pub fn new(dialogs: D, notifier: N) -> Self {
        Self::with_thumbnail_options(dialogs, notifier, ThumbnailOptions::default())
    }

    pub fn with_thumbnail_options(dialogs: D, notifier: N, options: ThumbnailOptions) -> Self {
        Self {
            dialogs,
            notifier,
            merge_list: MergeList::new(),
            merge_name: DEFAULT_MERGE_NAME.to_string(),
            split_source: None,
            split_name: DEFAULT_SPLIT_NAME.to_string(),
            preview: Preview::new(options),
            range_text: String::new(),
            status: READY_STATUS.to_string(),
        }
    }

    // ----- merge -----

    /// Ask for input files and append them to the merge list
    pub fn add_merge_files(&mut self) -> usize {
        let files = self.dialogs.open_files();
        if files.is_empty() {
            return 0;
        }
        let added = self.merge_list.add_files(files);
        self.set_status(format!("Added {} PDF file(s)", added));
        added
    }

    pub fn remove_merge_files(&mut self, rows: &[usize]) -> usize {
        let removed = self.merge_list.remove_selected(rows);
        if removed > 0 {
            self.set_status(format!("Removed {} file(s)", removed));
        }
        removed
    }

    pub fn move_merge_file(&mut self, row: usize, direction: Direction) -> Option<usize> {
        self.merge_list.move_item(row, direction)
    }

    pub fn merge_list(&self) -> &MergeList {
        &self.merge_list
    }

    pub fn merge_list_mut(&mut self) -> &mut MergeList {
        &mut self.merge_list
    }

    pub fn set_merge_name(&mut self, name: &str) {
        self.merge_name = name.to_string();
    }

    /// Merge every listed file into one PDF chosen through the save dialog.
    pub fn merge(&mut self) -> Outcome {
        if self.merge_list.is_empty() {
            return self.reject(Error::NoFilesSelected);
        }
        let name = match checked_name(&self.merge_name) {
            Ok(name) => name,
            Err(e) => return self.reject(e),
        };

        let Some(output_path) = self.dialogs.save_path(&name) else {
            return Outcome::Cancelled;
        };
        let output_path = with_pdf_extension(output_path);

        let options = MergeOptions {
            input_paths: self.merge_list.paths().to_vec(),
            output_path: output_path.clone(),
        };

        match merge_pdfs(&options) {
            Ok(_) => {
                self.set_status(format!("Merge complete: {}", file_name(&output_path)));
                self.notifier.notify(
                    Severity::Info,
                    &format!("PDFs merged successfully!\nSaved to: {}", output_path.display()),
                );
                Outcome::Completed(output_path)
            }
            Err(e) if e.is_validation() => self.reject(e),
            Err(e) => self.fail("Merge", e),
        }
    }

    // ----- split -----

    /// Ask for the document to split and load its thumbnails
    pub fn select_split_file(&mut self, renderer: &dyn PageRenderer) -> Outcome {
        match self.dialogs.open_file() {
            Some(path) => self.open_split_source(path, Some(renderer)),
            None => Outcome::Cancelled,
        }
    }

    /// Make `path` the split source. Any previous selection and thumbnails
    /// are discarded; thumbnails are rendered when a renderer is given.
    pub fn open_split_source(&mut self, path: PathBuf, renderer: Option<&dyn PageRenderer>) -> Outcome {
        self.preview.clear();
        self.range_text.clear();
        self.set_status(format!("Selected split source: {}", file_name(&path)));
        self.split_source = Some(path.clone());

        let Some(renderer) = renderer else {
            return Outcome::Completed(path);
        };

        self.set_status("Loading preview...".to_string());
        match self.preview.load(&path, renderer) {
            Ok(pages) => {
                self.set_status(format!("Loaded preview: {} pages", pages));
                Outcome::Completed(path)
            }
            Err(e) => {
                self.set_status(format!("Failed to load preview: {}", e));
                self.notifier
                    .notify(Severity::Error, &format!("Could not load PDF preview:\n{}", e));
                Outcome::Failed(e)
            }
        }
    }

    pub fn split_source(&self) -> Option<&Path> {
        self.split_source.as_deref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// A thumbnail was clicked
    pub fn toggle_page(&mut self, index: usize) -> &str {
        self.range_text = self.preview.click(index);
        &self.range_text
    }

    /// The range field was edited. The text is kept as typed; the thumbnail
    /// selection follows it whenever it parses and fits the loaded preview.
    ///
    /// Returns the reason the selection was left unchanged. Without a loaded
    /// preview nothing is checked until [`Workspace::split`].
    pub fn set_page_range_text(&mut self, text: &str) -> Result<()> {
        self.range_text = text.to_string();
        if self.preview.page_count() > 0 {
            self.preview.set_range_text(text)?;
        }
        Ok(())
    }

    pub fn page_range_text(&self) -> &str {
        &self.range_text
    }

    pub fn set_split_name(&mut self, name: &str) {
        self.split_name = name.to_string();
    }

    /// Write the selected pages to `<chosen dir>/<split name>.pdf`.
    ///
    /// The selection is validated against the source before the directory
    /// dialog is shown.
    pub fn split(&mut self) -> Outcome {
        let Some(source_path) = self.split_source.clone() else {
            return self.reject(Error::NoSourceSelected);
        };
        let name = match checked_name(&self.split_name) {
            Ok(name) => name,
            Err(e) => return self.reject(e),
        };
        if self.range_text.trim().is_empty() {
            return self.reject(Error::NoPagesSelected);
        }
        let spans = match parse_page_spans(&self.range_text) {
            Ok(spans) => spans,
            Err(e) => return self.reject(e),
        };

        let total = match self.source_page_count(&source_path) {
            Ok(total) => total,
            Err(e) => return self.fail("Split", e),
        };
        let pages = match pages_within(&spans, total as u32) {
            Ok(pages) => pages,
            Err(e) => return self.reject(e),
        };

        let Some(output_dir) = self.dialogs.choose_directory() else {
            return Outcome::Cancelled;
        };
        let output_path = output_dir.join(format!("{}.pdf", name));

        let options = SplitOptions {
            source_path,
            pages,
            output_path: output_path.clone(),
        };

        match split_pdf(&options) {
            Ok(_) => {
                self.set_status(format!("Split complete: {}", file_name(&output_path)));
                self.notifier.notify(
                    Severity::Info,
                    &format!("PDF split successfully!\nSaved to: {}", output_path.display()),
                );
                Outcome::Completed(output_path)
            }
            Err(e) if e.is_validation() => self.reject(e),
            Err(e) => self.fail("Split", e),
        }
    }

    fn source_page_count(&self, source: &Path) -> Result<usize> {
        match self.preview.source() {
            Some(previewed) if previewed == source => Ok(self.preview.page_count()),
            _ => count_pages(source),
        }
    }

    // ----- shared -----

    /// Latest status line
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn set_status(&mut self, status: String) {
        log::debug!("status: {}", status);
        self.status = status;
    }

    fn reject(&mut self, error: Error) -> Outcome {
        log::warn!("{}", error);
        self.notifier.notify(Severity::Warning, &error.to_string());
        Outcome::Rejected(error)
    }

    fn fail(&mut self, operation: &str, error: Error) -> Outcome {
        log::error!("{} failed: {}", operation, error);
        self.set_status(format!("{} failed: {}", operation, error));
        self.notifier.notify(
            Severity::Error,
            &format!("{} failed:\n{}", operation, error),
        );
        Outcome::Failed(error)
    }
}

/// Trimmed output name without a trailing `.pdf`
fn checked_name(name: &str) -> Result<String> {
    let name = name.trim();
    let stem = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") => &name[..cut],
        _ => name,
    };
    if stem.trim().is_empty() {
        return Err(Error::EmptyFileName);
    }
    Ok(stem.to_string())
}

fn with_pdf_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("pdf");
    }
    path
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_name() {
        assert_eq!(checked_name("  report ").unwrap(), "report");
        assert_eq!(checked_name("report.PDF").unwrap(), "report");
        assert!(matches!(checked_name("   "), Err(Error::EmptyFileName)));
        assert!(matches!(checked_name(".pdf"), Err(Error::EmptyFileName)));
    }

    #[test]
    fn test_with_pdf_extension() {
        assert_eq!(with_pdf_extension(PathBuf::from("out")), PathBuf::from("out.pdf"));
        assert_eq!(with_pdf_extension(PathBuf::from("out.pdf")), PathBuf::from("out.pdf"));
    }
}
