use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use foreman_core::{
    display::{CreateResult, DeleteResult},
    params::CreateClient,
};

use super::{Cli, DeleteArgs, IdArgs};

/// Register a new client
#[derive(Args)]
pub struct CreateClientArgs {
    /// Name of the client
    pub name: String,
    #[arg(short, long, help = "Contact email address")]
    pub email: Option<String>,
    #[arg(short, long, help = "Contact phone number")]
    pub phone: Option<String>,
}

impl From<CreateClientArgs> for CreateClient {
    fn from(val: CreateClientArgs) -> Self {
        CreateClient {
            name: val.name,
            email: val.email,
            phone: val.phone,
        }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Register a new client
    #[command(alias = "c")]
    Create(CreateClientArgs),
    /// List all clients
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a client
    #[command(alias = "s")]
    Show(IdArgs),
    /// Delete a client without projects
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

impl Cli {
    pub async fn handle_client_command(&self, command: ClientCommands) -> Result<()> {
        match command {
            ClientCommands::Create(args) => {
                let client = self
                    .tracker
                    .create_client(&args.into())
                    .await
                    .context("Failed to create client")?;
                self.renderer.render(&CreateResult::new(client).to_string())
            }
            ClientCommands::List => {
                let clients = self
                    .tracker
                    .list_clients()
                    .await
                    .context("Failed to list clients")?;
                self.renderer.render(&format!("# Clients\n\n{clients}"))
            }
            ClientCommands::Show(args) => {
                let id = args.id;
                let client = self
                    .tracker
                    .get_client(&args.into())
                    .await
                    .context("Failed to get client")?
                    .with_context(|| format!("Client with ID {id} not found"))?;
                self.renderer.render(&client.to_string())
            }
            ClientCommands::Delete(args) => {
                let params = args.confirmed("client")?;
                let client = self
                    .tracker
                    .delete_client(&params)
                    .await
                    .context("Failed to delete client")?;
                self.renderer.render(&DeleteResult::new(client).to_string())
            }
        }
    }
}
