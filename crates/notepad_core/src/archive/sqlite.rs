//! SQLite-backed note archive implementation.
//!
//! # Responsibility
//! - Persist notes, bullet rows and the id counter after each mutation.
//! - Rebuild a full store snapshot at startup.
//!
//! # Invariants
//! - Bullet rows are replaced wholesale with their note in one transaction;
//!   a partially written bullet list is never committed.
//! - `store_meta.next_id` never decreases.

use super::{ArchiveError, ArchiveResult, ArchiveSnapshot, NoteArchive};
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const NEXT_ID_KEY: &str = "next_id";

/// SQLite-backed archive owning its connection.
pub struct SqliteNoteArchive {
    conn: Connection,
}

impl SqliteNoteArchive {
    /// Wraps a bootstrapped connection (see `open_archive`).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn write_note_tx(tx: &Transaction<'_>, note: &Note) -> ArchiveResult<()> {
        tx.execute(
            "INSERT INTO notes (id, subject) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET subject = excluded.subject;",
            params![to_db_id(note.id)?, note.subject.as_str()],
        )?;
        tx.execute(
            "DELETE FROM bullet_points WHERE note_id = ?1;",
            params![to_db_id(note.id)?],
        )?;
        for (position, text) in note.bullet_points.iter().enumerate() {
            tx.execute(
                "INSERT INTO bullet_points (note_id, position, text) VALUES (?1, ?2, ?3);",
                params![to_db_id(note.id)?, position as i64, text.as_str()],
            )?;
        }
        Ok(())
    }

    fn write_next_id_tx(tx: &Transaction<'_>, next_id: NoteId) -> ArchiveResult<()> {
        tx.execute(
            "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![NEXT_ID_KEY, to_db_id(next_id)?],
        )?;
        Ok(())
    }
}

impl NoteArchive for SqliteNoteArchive {
    fn load(&mut self) -> ArchiveResult<ArchiveSnapshot> {
        let mut notes = Vec::new();
        {
            let mut stmt = self
                .conn
                .prepare("SELECT id, subject FROM notes ORDER BY id ASC;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let id = from_db_id(row.get::<_, i64>("id")?)?;
                let subject: String = row.get("subject")?;
                notes.push(Note::with_id(id, subject, Vec::new()));
            }
        }

        let mut bullet_stmt = self.conn.prepare(
            "SELECT text FROM bullet_points WHERE note_id = ?1 ORDER BY position ASC;",
        )?;
        for note in &mut notes {
            let mut rows = bullet_stmt.query(params![to_db_id(note.id)?])?;
            while let Some(row) = rows.next()? {
                note.bullet_points.push(row.get("text")?);
            }
        }

        let stored_next_id = self
            .conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1;",
                params![NEXT_ID_KEY],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        let next_id = match stored_next_id {
            Some(value) => from_db_id(value)?,
            None => 0,
        };

        // A counter behind the highest live id would reissue that id.
        if let Some(max_id) = notes.last().map(|note| note.id) {
            if next_id <= max_id {
                return Err(ArchiveError::InvalidData(format!(
                    "next_id {next_id} is not beyond highest live note id {max_id}"
                )));
            }
        }

        Ok(ArchiveSnapshot { notes, next_id })
    }

    fn record_created(&mut self, note: &Note, next_id: NoteId) -> ArchiveResult<()> {
        let tx = self.conn.transaction()?;
        Self::write_note_tx(&tx, note)?;
        Self::write_next_id_tx(&tx, next_id)?;
        tx.commit()?;
        Ok(())
    }

    fn record_updated(&mut self, note: &Note) -> ArchiveResult<()> {
        let tx = self.conn.transaction()?;
        Self::write_note_tx(&tx, note)?;
        tx.commit()?;
        Ok(())
    }

    fn record_deleted(&mut self, id: NoteId) -> ArchiveResult<()> {
        // bullet_points rows follow via ON DELETE CASCADE.
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1;", params![to_db_id(id)?])?;
        Ok(())
    }
}

// SQLite integers are signed; ids beyond i64::MAX are unreachable in
// practice but must not wrap silently.
fn to_db_id(id: NoteId) -> ArchiveResult<i64> {
    i64::try_from(id)
        .map_err(|_| ArchiveError::InvalidData(format!("note id {id} exceeds archive range")))
}

fn from_db_id(value: i64) -> ArchiveResult<NoteId> {
    NoteId::try_from(value)
        .map_err(|_| ArchiveError::InvalidData(format!("negative id value `{value}` in archive")))
}

#[cfg(test)]
mod tests {
    use super::SqliteNoteArchive;
    use crate::archive::{open_archive_in_memory, ArchiveError, NoteArchive};
    use crate::model::note::Note;

    #[test]
    fn empty_archive_loads_zeroed_snapshot() {
        let conn = open_archive_in_memory().expect("open in-memory archive");
        let mut archive = SqliteNoteArchive::new(conn);
        let snapshot = archive.load().expect("load empty archive");
        assert!(snapshot.notes.is_empty());
        assert_eq!(snapshot.next_id, 0);
    }

    #[test]
    fn recorded_mutations_round_trip_through_load() {
        let conn = open_archive_in_memory().expect("open in-memory archive");
        let mut archive = SqliteNoteArchive::new(conn);

        let first = Note::with_id(0, "Groceries", vec!["Milk".into(), "Eggs".into()]);
        let second = Note::with_id(1, "Todo", Vec::new());
        archive.record_created(&first, 1).expect("record first");
        archive.record_created(&second, 2).expect("record second");

        let replaced = Note::with_id(0, "Groceries v2", vec!["Milk".into()]);
        archive.record_updated(&replaced).expect("record update");
        archive.record_deleted(1).expect("record delete");

        let snapshot = archive.load().expect("load snapshot");
        assert_eq!(snapshot.next_id, 2);
        assert_eq!(snapshot.notes, vec![replaced]);
    }

    #[test]
    fn load_rejects_counter_behind_highest_live_id() {
        let conn = open_archive_in_memory().expect("open in-memory archive");
        conn.execute_batch(
            "INSERT INTO notes (id, subject) VALUES (5, 'stray');
             INSERT INTO store_meta (key, value) VALUES ('next_id', 3);",
        )
        .expect("seed inconsistent rows");

        let mut archive = SqliteNoteArchive::new(conn);
        let err = archive.load().expect_err("inconsistent counter must fail");
        assert!(matches!(err, ArchiveError::InvalidData(_)));
    }
}
