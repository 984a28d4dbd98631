//! Ordered list of PDFs queued for merging

use std::path::{Path, PathBuf};

/// Direction for [`MergeList::move_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Input files in merge order. Duplicates are kept on purpose: merging the
/// same file twice is a valid request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeList {
    paths: Vec<PathBuf>,
}

impl MergeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files to the end of the list, keeping their order.
    pub fn add_files<I, P>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.paths.len();
        self.paths.extend(files.into_iter().map(Into::into));
        self.paths.len() - before
    }

    /// Remove the rows at `indices`. Rows may come in any order; unknown rows
    /// are ignored. Returns how many entries were removed.
    pub fn remove_selected(&mut self, indices: &[usize]) -> usize {
        let mut rows: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.paths.len())
            .collect();
        rows.sort_unstable();
        rows.dedup();

        // Back to front so earlier removals don't shift later rows
        for &row in rows.iter().rev() {
            self.paths.remove(row);
        }
        rows.len()
    }

    /// Swap the entry at `index` with its neighbour.
    ///
    /// Returns the entry's new index, or `None` if it is already at the edge
    /// or `index` is out of range.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.paths.len() {
            return None;
        }
        let target = match direction {
            Direction::Up => index.checked_sub(1)?,
            Direction::Down if index + 1 < self.paths.len() => index + 1,
            Direction::Down => return None,
        };
        self.paths.swap(index, target);
        Some(target)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> MergeList {
        let mut list = MergeList::new();
        list.add_files(names.iter().copied());
        list
    }

    fn names(list: &MergeList) -> Vec<String> {
        list.paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect()
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut merge_list = list(&["a.pdf", "b.pdf"]);
        assert_eq!(merge_list.add_files(["a.pdf"]), 1);
        assert_eq!(names(&merge_list), vec!["a.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_remove_selected_any_order() {
        let mut merge_list = list(&["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
        assert_eq!(merge_list.remove_selected(&[3, 0, 3, 9]), 2);
        assert_eq!(names(&merge_list), vec!["b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_move_item() {
        let mut merge_list = list(&["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(merge_list.move_item(2, Direction::Up), Some(1));
        assert_eq!(names(&merge_list), vec!["a.pdf", "c.pdf", "b.pdf"]);

        assert_eq!(merge_list.move_item(0, Direction::Down), Some(1));
        assert_eq!(names(&merge_list), vec!["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_move_item_at_edges_is_noop() {
        let mut merge_list = list(&["a.pdf", "b.pdf"]);
        assert_eq!(merge_list.move_item(0, Direction::Up), None);
        assert_eq!(merge_list.move_item(1, Direction::Down), None);
        assert_eq!(merge_list.move_item(5, Direction::Up), None);
        assert_eq!(names(&merge_list), vec!["a.pdf", "b.pdf"]);
    }
}
