//! Selected-page state shared by the thumbnail grid and the range text field

use std::collections::BTreeSet;

use crate::range::format_page_range;

/// Set of selected pages, stored as zero-based indices.
///
/// This is the only copy of the selection. The range text shown to the user
/// is always derived from it with [`PageSelection::range_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    indices: BTreeSet<usize>,
}

impl PageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from 1-based page numbers. Page `0` is ignored.
    pub fn from_page_numbers<I: IntoIterator<Item = u32>>(pages: I) -> Self {
        let indices = pages
            .into_iter()
            .filter(|&page| page > 0)
            .map(|page| page as usize - 1)
            .collect();
        Self { indices }
    }

    /// Flip membership of `index`. Returns true if the page is now selected.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.indices.remove(&index)
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Zero-based indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Compact 1-based range string, e.g. `"1-3,5"`
    pub fn range_text(&self) -> String {
        format_page_range(&self.indices)
    }

    /// 1-based page numbers, as expected by the split operation
    pub fn page_numbers(&self) -> BTreeSet<u32> {
        self.indices.iter().map(|&index| index as u32 + 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_updates_range_text() {
        let mut selection = PageSelection::new();
        assert!(selection.toggle(0));
        assert!(selection.toggle(2));
        assert!(selection.toggle(1));
        assert_eq!(selection.range_text(), "1-3");

        assert!(!selection.toggle(1));
        assert_eq!(selection.range_text(), "1,3");
        assert!(!selection.contains(1));
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let mut selection = PageSelection::new();
        selection.insert(4);
        selection.insert(0);
        assert_eq!(selection.page_numbers().into_iter().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_from_page_numbers_skips_zero() {
        let selection = PageSelection::from_page_numbers([0, 1, 3]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(selection.range_text(), "1,3");
    }

    #[test]
    fn test_clear() {
        let mut selection = PageSelection::from_page_numbers([1, 2]);
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.range_text(), "");
    }
}
