//! Client operations for the Tracker.

use super::Tracker;
use crate::{
    display::Clients,
    error::Result,
    models::Client,
    params::{require_text, CreateClient, Id},
};

impl Tracker {
    /// Creates a new client.
    pub async fn create_client(&self, params: &CreateClient) -> Result<Client> {
        require_text("name", &params.name)?;

        let CreateClient { name, email, phone } = params.clone();
        self.with_database(move |db| db.create_client(&name, email.as_deref(), phone.as_deref()))
            .await
    }

    /// Lists all clients ordered by name.
    pub async fn list_clients(&self) -> Result<Clients> {
        self.with_database(|db| db.list_clients())
            .await
            .map(Clients)
    }

    /// Retrieves a client by ID.
    pub async fn get_client(&self, params: &Id) -> Result<Option<Client>> {
        let id = params.id;
        self.with_database(move |db| db.get_client(id)).await
    }

    /// Deletes a client that no longer owns projects.
    pub async fn delete_client(&self, params: &Id) -> Result<Client> {
        let id = params.id;
        self.with_database(move |db| db.delete_client(id)).await
    }
}
