mod embedded;

#[cfg(test)]
pub mod memory;

use embedded::migrations;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};

use crate::models::Note;

/// Storage seam for notes. The production implementation is [`Repository`]
/// over Postgres; tests substitute an in-memory store.
///
/// Absence of a note is a sentinel (`None` / `false`), never an error.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(
        &self,
        title: String,
        content: String,
    ) -> Result<Note, tokio_postgres::Error>;

    /// Notes in insertion order, `limit`-sized window starting at `skip`.
    /// Callers pass non-negative values; a window past the end is empty.
    async fn list_notes(&self, skip: i64, limit: i64) -> Result<Vec<Note>, tokio_postgres::Error>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, tokio_postgres::Error>;

    /// Applies only the supplied fields and refreshes `updated_at`.
    async fn update_note(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Option<Note>, tokio_postgres::Error>;

    /// Returns whether a note existed and was removed.
    async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error>;
}

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn create_note(
        &self,
        title: String,
        content: String,
    ) -> Result<Note, tokio_postgres::Error> {
        let row = self.client.query_one(
            "INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING id, title, content, created_at, updated_at",
            &[&title, &content],
        ).await?;

        Ok(Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn list_notes(&self, skip: i64, limit: i64) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes ORDER BY id LIMIT $1 OFFSET $2",
                &[&limit, &skip],
            )
            .await?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(Note {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok(vec)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.map(|row| Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    async fn update_note(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Option<Note>, tokio_postgres::Error> {
        // COALESCE keeps the stored value for absent fields; one statement,
        // no read-modify-write window.
        let row = self.client.query_opt(
            "UPDATE notes SET title = COALESCE($1, title), content = COALESCE($2, content), updated_at = now() WHERE id = $3 RETURNING id, title, content, created_at, updated_at",
            &[&title, &content, &id],
        ).await?;

        Ok(row.map(|row| Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
