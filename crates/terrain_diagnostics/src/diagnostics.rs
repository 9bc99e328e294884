//! Ordered, append-only collection of diagnostics for one command invocation.

use std::collections::{HashMap, HashSet};

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use serde::Serialize;

/// Warnings sharing a summary are consolidated when at least this many share it.
///
/// A value of 1 means every repeated warning summary collapses into its first
/// occurrence.
pub const CONSOLIDATE_MIN_DUPLICATES: usize = 1;

/// An ordered sequence of [`Diagnostic`]s.
///
/// Each command run creates one of these, threads it through argument parsing
/// and state loading by appending, then sorts and consolidates it exactly once
/// right before rendering. All combinators take `self` by value and hand back
/// the resulting collection, so a partial collection from a sub-step can be
/// merged into the run's collection without touching entries already there.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection with `diag` added at the end.
    pub fn append(mut self, diag: Diagnostic) -> Self {
        self.items.push(diag);
        self
    }

    /// Returns the collection with every entry of `other` added at the end, in
    /// their original order.
    pub fn extend(mut self, other: Diagnostics) -> Self {
        self.items.extend(other.items);
        self
    }

    /// Returns `true` if any entry has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity().is_error())
    }

    /// Returns `true` if the collection is non-empty and holds only warnings.
    pub fn only_warnings(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|d| d.severity() == Severity::Warning)
    }

    /// Number of error-severity entries.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity entries.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the entries in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Reorders by severity, warnings first and errors last.
    ///
    /// The sort is stable: entries of equal severity keep their insertion
    /// order.
    pub fn sorted(mut self) -> Self {
        self.items.sort_by_key(|d| d.severity());
        self
    }

    /// Collapses warnings that share a summary.
    ///
    /// A summary shared by at least `min_duplicates` warnings forms a group,
    /// and the whole group folds into its first occurrence, which keeps its
    /// position and records how many similar warnings it absorbed. Errors, and
    /// warnings whose summary falls short of the threshold, pass through
    /// unchanged. A threshold of 0 is treated as 1.
    pub fn consolidate_warnings(self, min_duplicates: usize) -> Self {
        let threshold = min_duplicates.max(1);
        let mut group_sizes: HashMap<&str, usize> = HashMap::new();
        for diag in self.items.iter().filter(|d| d.severity() == Severity::Warning) {
            *group_sizes.entry(diag.summary()).or_insert(0) += 1;
        }
        let grouped: HashSet<String> = group_sizes
            .into_iter()
            .filter(|&(_, size)| size >= threshold)
            .map(|(summary, _)| summary.to_string())
            .collect();

        // summary -> index of the representative in `kept`
        let mut representatives: HashMap<String, usize> = HashMap::new();
        let mut kept: Vec<(Diagnostic, usize)> = Vec::with_capacity(self.items.len());

        for diag in self.items {
            if diag.severity() != Severity::Warning || !grouped.contains(diag.summary()) {
                kept.push((diag, 0));
                continue;
            }
            match representatives.get(diag.summary()) {
                Some(&idx) => kept[idx].1 += diag.occurrences(),
                None => {
                    representatives.insert(diag.summary().to_string(), kept.len());
                    kept.push((diag, 0));
                }
            }
        }

        kept.into_iter()
            .map(|(diag, absorbed)| {
                if absorbed == 0 {
                    diag
                } else {
                    diag.representing(absorbed)
                }
            })
            .collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diag: Diagnostic) -> Self {
        Self { items: vec![diag] }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
