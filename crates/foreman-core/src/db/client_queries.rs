//! Client CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{id_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::Client,
};

const INSERT_CLIENT_SQL: &str =
    "INSERT INTO clients (name, email, phone, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_CLIENT_SQL: &str =
    "SELECT id, name, email, phone, created_at, updated_at FROM clients WHERE id = ?1";
const SELECT_CLIENTS_SQL: &str =
    "SELECT id, name, email, phone, created_at, updated_at FROM clients ORDER BY name COLLATE NOCASE";
const COUNT_CLIENT_PROJECTS_SQL: &str = "SELECT COUNT(*) FROM projects WHERE client_id = ?1";
const DELETE_CLIENT_SQL: &str = "DELETE FROM clients WHERE id = ?1";

impl super::Database {
    fn build_client_from_row(row: &rusqlite::Row) -> rusqlite::Result<Client> {
        Ok(Client {
            id: id_column(row, 0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
            updated_at: timestamp_column(row, 5)?,
        })
    }

    /// Creates a new client.
    pub fn create_client(
        &mut self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(INSERT_CLIENT_SQL, params![name, email, phone, &now_str, &now_str])
            .db_context("Failed to insert client")?;

        Ok(Client {
            id: self.connection.last_insert_rowid() as u64,
            name: name.into(),
            email: email.map(String::from),
            phone: phone.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a client by its ID.
    pub fn get_client(&self, id: u64) -> Result<Option<Client>> {
        self.connection
            .query_row(SELECT_CLIENT_SQL, params![id as i64], Self::build_client_from_row)
            .optional()
            .db_context("Failed to query client")
    }

    /// Lists all clients ordered by name.
    pub fn list_clients(&self) -> Result<Vec<Client>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CLIENTS_SQL)
            .db_context("Failed to prepare query")?;

        let clients = stmt
            .query_map([], Self::build_client_from_row)
            .db_context("Failed to query clients")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch clients")?;

        Ok(clients)
    }

    /// Deletes a client that no longer owns any project and returns it.
    pub fn delete_client(&mut self, id: u64) -> Result<Client> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let client = tx
            .query_row(SELECT_CLIENT_SQL, params![id as i64], Self::build_client_from_row)
            .optional()
            .db_context("Failed to query client")?
            .ok_or(TrackerError::ClientNotFound { id })?;

        let projects: i64 = tx
            .query_row(COUNT_CLIENT_PROJECTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to count client projects")?;
        if projects > 0 {
            return Err(TrackerError::invalid_input("id").with_reason(format!(
                "Client {id} still owns {projects} project(s); delete or reassign them first"
            )));
        }

        tx.execute(DELETE_CLIENT_SQL, params![id as i64])
            .db_context("Failed to delete client")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(client)
    }

    /// Fails with `ClientNotFound` unless the client exists.
    pub(crate) fn ensure_client_exists(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?1)",
                params![id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check client existence")?;

        if exists {
            Ok(())
        } else {
            Err(TrackerError::ClientNotFound { id })
        }
    }
}
