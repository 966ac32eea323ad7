//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record: subject plus ordered bullet points.
//!
//! # Invariants
//! - `id` is stable, assigned exactly once by the store, and never reused.
//! - `bullet_points` order is caller-significant and preserved exactly.

use serde::{Deserialize, Serialize};

/// Stable identifier for every note.
///
/// Ids are allocated from a monotonically increasing store counter, so they
/// are unique for the whole store lifetime, including across deletions.
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = u64;

/// Canonical record managed by the store.
///
/// The core enforces no content constraints: the subject may be empty, and
/// bullet points may be empty, duplicated, or an empty list. Both fields are
/// replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used for lookups, updates and deletion.
    pub id: NoteId,
    /// Free-text subject line.
    pub subject: String,
    /// Ordered free-text bullet points; duplicates permitted.
    pub bullet_points: Vec<String>,
}

impl Note {
    /// Creates a note with a caller-provided stable id.
    ///
    /// Used by the store when allocating a fresh id and by archive reload
    /// paths where identity already exists externally.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this note's lifetime.
    pub fn with_id(id: NoteId, subject: impl Into<String>, bullet_points: Vec<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            bullet_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn with_id_preserves_bullet_order_and_duplicates() {
        let note = Note::with_id(
            7,
            "subject",
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
        );
        assert_eq!(note.id, 7);
        assert_eq!(note.bullet_points, vec!["a", "b", "a"]);
    }

    #[test]
    fn note_serializes_with_stable_field_names() {
        let note = Note::with_id(0, "Groceries", vec!["Milk".to_string()]);
        let json = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(json["id"], 0);
        assert_eq!(json["subject"], "Groceries");
        assert_eq!(json["bullet_points"][0], "Milk");
    }
}
