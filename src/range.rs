//! Page range expressions
//!
//! A range expression is a comma-separated list of 1-based page numbers and
//! inclusive `start-end` ranges, e.g. `"1-3,5,7-9"`. Parsing fails closed: a
//! single bad token rejects the whole expression.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Parse a range expression into a set of 1-based page numbers.
///
/// A blank expression yields an empty set; callers decide whether that is an
/// error. Page numbers are not checked against any document here, so use
/// [`parse_page_range_within`] for user input aimed at a known document.
///
/// ```
/// use pdf_toolbox::range::parse_page_range;
///
/// let pages = parse_page_range("1-3,5,7-9").unwrap();
/// assert_eq!(pages.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 5, 7, 8, 9]);
/// ```
pub fn parse_page_range(text: &str) -> Result<BTreeSet<u32>> {
    Ok(parse_page_spans(text)?.into_iter().flatten().collect())
}

/// Parse a range expression and check it against a document of `total`
/// pages before any page set is built.
///
/// ```
/// use pdf_toolbox::range::parse_page_range_within;
///
/// assert!(parse_page_range_within("2-4", 5).is_ok());
/// assert!(parse_page_range_within("1-4000000000", 5).is_err());
/// ```
pub fn parse_page_range_within(text: &str, total: u32) -> Result<BTreeSet<u32>> {
    let spans = parse_page_spans(text)?;
    pages_within(&spans, total)
}

/// Parse a range expression into its inclusive spans, in the order written.
///
/// Single pages become one-page spans. Nothing is expanded, so the cost does
/// not depend on the numbers typed.
pub fn parse_page_spans(text: &str) -> Result<Vec<RangeInclusive<u32>>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let invalid = || Error::InvalidPageRange(text.to_string());

    text.split(',')
        .map(|token| match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(start).ok_or_else(invalid)?;
                let end = parse_page_number(end).ok_or_else(invalid)?;
                if start > end {
                    return Err(invalid());
                }
                Ok(start..=end)
            }
            None => {
                let page = parse_page_number(token).ok_or_else(invalid)?;
                Ok(page..=page)
            }
        })
        .collect()
}

/// Expand `spans` into a page set once every span fits in `1..=total`.
///
/// Page 0 is reported before any page past the end.
pub fn pages_within(spans: &[RangeInclusive<u32>], total: u32) -> Result<BTreeSet<u32>> {
    if spans.iter().any(|span| *span.start() == 0) {
        return Err(Error::PageOutOfRange { page: 0, total });
    }
    if let Some(page) = spans.iter().map(|span| *span.end()).filter(|&end| end > total).max() {
        return Err(Error::PageOutOfRange { page, total });
    }
    Ok(spans.iter().cloned().flatten().collect())
}

fn parse_page_number(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

/// Render a set of zero-based page indices as a compact 1-based range string.
///
/// Consecutive pages collapse into `start-end`; an empty set gives `""`.
pub fn format_page_range(indices: &BTreeSet<usize>) -> String {
    // BTreeSet iterates in ascending order, which the run detection relies on
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &index in indices {
        let page = index + 1;
        match runs.last_mut() {
            Some((_, end)) if page == *end + 1 => *end = page,
            _ => runs.push((page, page)),
        }
    }

    runs.iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
