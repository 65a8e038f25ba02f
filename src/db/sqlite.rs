// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return; the lock is never held across .await points. This single mutex
// is also the serialization boundary for concurrent interaction writes
// from different users.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Interaction, InteractionCounts};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_interaction(
        &self,
        user_id: &str,
        article_ref: &str,
        clicked: bool,
        article_text: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_interaction(&conn, user_id, article_ref, clicked, article_text)
    }

    async fn interactions_for_user(&self, user_id: &str) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().await;
        super::queries::interactions_for_user(&conn, user_id)
    }

    async fn all_interactions(&self) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().await;
        super::queries::all_interactions(&conn)
    }

    async fn interaction_counts(&self) -> Result<InteractionCounts> {
        let conn = self.conn.lock().await;
        super::queries::interaction_counts(&conn)
    }

    async fn get_model_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_model_state(&conn, key)
    }

    async fn set_model_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_model_state(&conn, key, value)
    }
}
