use crate::{
    dto::{CreateNoteRequest, ListNotesParams, NoteResponse, UpdateNoteRequest},
    models::Note,
    repository::NoteStore,
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, tokio_postgres::Error> {
        self.store
            .create_note(request.title, request.content)
            .await
            .map(note_response)
    }

    pub async fn get_notes(
        &self,
        params: ListNotesParams,
    ) -> Result<Vec<NoteResponse>, tokio_postgres::Error> {
        // Out-of-domain paging values are clamped, never an error.
        let skip = params.skip.max(0);
        let limit = params.limit.max(0);

        self.store
            .list_notes(skip, limit)
            .await
            .map(|notes| notes.into_iter().map(note_response).collect())
    }

    pub async fn get_one_note(
        &self,
        id: i64,
    ) -> Result<Option<NoteResponse>, tokio_postgres::Error> {
        self.store
            .get_one_note(id)
            .await
            .map(|note| note.map(note_response))
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, tokio_postgres::Error> {
        self.store
            .update_note(id, request.title, request.content)
            .await
            .map(|note| note.map(note_response))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        self.store.delete_note(id).await
    }
}

fn note_response(note: Note) -> NoteResponse {
    NoteResponse {
        id: note.id,
        title: note.title,
        content: note.content,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}
