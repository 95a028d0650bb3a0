//! In-memory [`NoteStore`] for tests, mirroring the Postgres semantics:
//! monotonic ids, store-assigned timestamps, insertion-order listing.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::NoteStore;
use crate::models::Note;

pub struct MemoryStore {
    notes: Mutex<BTreeMap<i64, Note>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(
        &self,
        title: String,
        content: String,
    ) -> Result<Note, tokio_postgres::Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let note = Note {
            id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };

        self.notes.lock().unwrap().insert(id, note.clone());

        Ok(note)
    }

    async fn list_notes(&self, skip: i64, limit: i64) -> Result<Vec<Note>, tokio_postgres::Error> {
        let skip = usize::try_from(skip).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self
            .notes
            .lock()
            .unwrap()
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, tokio_postgres::Error> {
        Ok(self.notes.lock().unwrap().get(&id).cloned())
    }

    async fn update_note(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Option<Note>, tokio_postgres::Error> {
        let mut notes = self.notes.lock().unwrap();

        Ok(notes.get_mut(&id).map(|note| {
            if let Some(title) = title {
                note.title = title;
            }
            if let Some(content) = content {
                note.content = content;
            }
            note.updated_at = Utc::now();
            note.clone()
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        Ok(self.notes.lock().unwrap().remove(&id).is_some())
    }
}
