// 🗃️ Unique Tuition List - the record store
//
// Ordered, duplicate-free collection of Tuition records. Every mutation goes
// through here and is all-or-nothing:
// - add / set_tuition / replace_all check identity (is_same_tuition)
// - set_tuition / remove locate their target by full equality (==)
//
// Single writer: callers run one operation to completion before the next.
// Share across threads only behind explicit synchronization.

use tracing::debug;

use crate::entities::Tuition;
use crate::error::{Result, TuitionError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTuitionList {
    items: Vec<Tuition>,
}

impl UniqueTuitionList {
    /// Create new empty list
    pub fn new() -> Self {
        UniqueTuitionList { items: Vec::new() }
    }

    /// True if some stored record is the same tuition (same student name)
    pub fn contains(&self, to_check: &Tuition) -> bool {
        self.items.iter().any(|t| t.is_same_tuition(to_check))
    }

    /// Append at the end. Fails if the same tuition is already stored.
    pub fn add(&mut self, to_add: Tuition) -> Result<()> {
        if self.contains(&to_add) {
            return Err(TuitionError::DuplicateTuition);
        }
        debug!(student = %to_add.student().name(), "tuition added");
        self.items.push(to_add);
        Ok(())
    }

    /// Replace `target` with `edited`, keeping its position.
    ///
    /// `target` is located by full equality. `edited` may keep the target's
    /// identity; it may not take over another stored record's identity.
    pub fn set_tuition(&mut self, target: &Tuition, edited: Tuition) -> Result<()> {
        let index = self
            .position_of(target)
            .ok_or(TuitionError::TuitionNotFound)?;

        if !target.is_same_tuition(&edited) && self.contains(&edited) {
            return Err(TuitionError::DuplicateTuition);
        }

        debug!(
            index,
            from = %target.student().name(),
            to = %edited.student().name(),
            "tuition replaced"
        );
        self.items[index] = edited;
        Ok(())
    }

    /// Remove the record equal to `to_remove` in every field
    pub fn remove(&mut self, to_remove: &Tuition) -> Result<Tuition> {
        let index = self
            .position_of(to_remove)
            .ok_or(TuitionError::TuitionNotFound)?;
        let removed = self.items.remove(index);
        debug!(index, student = %removed.student().name(), "tuition removed");
        Ok(removed)
    }

    /// Swap in a whole new list. Rejected unchanged if any two candidates are the same tuition.
    pub fn replace_all(&mut self, replacement: Vec<Tuition>) -> Result<()> {
        if !tuitions_are_unique(&replacement) {
            return Err(TuitionError::DuplicateTuition);
        }
        debug!(count = replacement.len(), "tuition list replaced");
        self.items = replacement;
        Ok(())
    }

    /// Read-only view of the records, in order
    pub fn as_slice(&self) -> &[Tuition] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tuition> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position_of(&self, target: &Tuition) -> Option<usize> {
        self.items.iter().position(|t| t == target)
    }
}

impl<'a> IntoIterator for &'a UniqueTuitionList {
    type Item = &'a Tuition;
    type IntoIter = std::slice::Iter<'a, Tuition>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pairwise identity scan; lists are small (tens to low hundreds)
fn tuitions_are_unique(tuitions: &[Tuition]) -> bool {
    for i in 0..tuitions.len() {
        for j in (i + 1)..tuitions.len() {
            if tuitions[i].is_same_tuition(&tuitions[j]) {
                return false;
            }
        }
    }
    true
}

// ============================================================================
// TESTS
// ============================================================================
