// 🔭 Model - the store plus a live, filtered view over it
//
// The view is recomputed on every read from (store, current filter), so it can
// never go stale after a mutation or a filter change.

use tracing::debug;

use crate::entities::Tuition;
use crate::error::Result;
use crate::store::UniqueTuitionList;

// ============================================================================
// FILTER
// ============================================================================

/// Predicate deciding which tuitions the view shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TuitionFilter {
    /// Accept every tuition
    #[default]
    ShowAll,

    /// Student name contains any of the keywords as a whole word (case-insensitive)
    NameContainsKeywords(Vec<String>),
}

impl TuitionFilter {
    pub fn name_contains<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TuitionFilter::NameContainsKeywords(keywords.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, tuition: &Tuition) -> bool {
        match self {
            TuitionFilter::ShowAll => true,
            TuitionFilter::NameContainsKeywords(keywords) => keywords
                .iter()
                .any(|k| contains_word_ignore_case(tuition.student().name().as_str(), k)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TuitionFilter::ShowAll => "All students".to_string(),
            TuitionFilter::NameContainsKeywords(keywords) => {
                format!("Name contains: {}", keywords.join(", "))
            }
        }
    }
}

/// Whole-word, case-insensitive match. A blank keyword never matches.
fn contains_word_ignore_case(sentence: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() || word.contains(char::is_whitespace) {
        return false;
    }
    let word = word.to_lowercase();
    sentence
        .split_whitespace()
        .any(|w| w.to_lowercase() == word)
}

// ============================================================================
// FILTERED VIEW
// ============================================================================

/// Non-owning projection of the store through a filter
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    store: &'a UniqueTuitionList,
    filter: &'a TuitionFilter,
}

impl<'a> FilteredView<'a> {
    pub fn new(store: &'a UniqueTuitionList, filter: &'a TuitionFilter) -> Self {
        FilteredView { store, filter }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Tuition> + 'a {
        let filter = self.filter;
        self.store.iter().filter(move |t| filter.matches(t))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Zero-based position within the view
    pub fn get(&self, index: usize) -> Option<&'a Tuition> {
        self.iter().nth(index)
    }

    pub fn to_vec(&self) -> Vec<&'a Tuition> {
        self.iter().collect()
    }

    pub fn filter(&self) -> &'a TuitionFilter {
        self.filter
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// Owns the store and the current filter of its single view
#[derive(Debug, Clone, Default)]
pub struct Model {
    tuitions: UniqueTuitionList,
    filter: TuitionFilter,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model over an initial list; rejects lists holding duplicates
    pub fn with_tuitions(tuitions: Vec<Tuition>) -> Result<Self> {
        let mut model = Model::new();
        model.set_tuitions(tuitions)?;
        Ok(model)
    }

    /// The unfiltered store, in order
    pub fn tuitions(&self) -> &UniqueTuitionList {
        &self.tuitions
    }

    pub fn has_tuition(&self, tuition: &Tuition) -> bool {
        self.tuitions.contains(tuition)
    }

    pub fn add_tuition(&mut self, tuition: Tuition) -> Result<()> {
        self.tuitions.add(tuition)
    }

    pub fn set_tuition(&mut self, target: &Tuition, edited: Tuition) -> Result<()> {
        self.tuitions.set_tuition(target, edited)
    }

    pub fn delete_tuition(&mut self, target: &Tuition) -> Result<Tuition> {
        self.tuitions.remove(target)
    }

    /// Full snapshot replacement, e.g. after loading from disk
    pub fn set_tuitions(&mut self, tuitions: Vec<Tuition>) -> Result<()> {
        self.tuitions.replace_all(tuitions)
    }

    pub fn filtered_view(&self) -> FilteredView<'_> {
        FilteredView::new(&self.tuitions, &self.filter)
    }

    pub fn filter(&self) -> &TuitionFilter {
        &self.filter
    }

    pub fn update_filter(&mut self, filter: TuitionFilter) {
        debug!(filter = %filter.describe(), "view filter updated");
        self.filter = filter;
    }

    pub fn show_all(&mut self) {
        self.update_filter(TuitionFilter::ShowAll);
    }
}

// ============================================================================
// TESTS
// ============================================================================
