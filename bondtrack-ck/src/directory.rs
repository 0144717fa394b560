//! Client directory
//!
//! In-memory directory of bonded clients, seeded at service start from an
//! optional `clients.toml` in the data folder or from the built-in demo
//! seed. The check-in flow only reads it (reference photo lookup); intake
//! screens elsewhere in the product write through `insert`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use bondtrack_common::models::{CaseStatus, Client};
use bondtrack_common::{Error, Result};

/// Seed file structure (`clients.toml`)
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "client")]
    clients: Vec<SeedClient>,
}

/// Client entry in the seed file
#[derive(Debug, Deserialize)]
struct SeedClient {
    /// Stable ID; generated when omitted
    id: Option<Uuid>,
    name: String,
    reference_photo_url: String,
    phone: Option<String>,
    #[serde(default)]
    case_status: CaseStatus,
}

impl SeedClient {
    fn into_client(self) -> Client {
        Client {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            reference_photo_url: self.reference_photo_url,
            phone: self.phone,
            case_status: self.case_status,
        }
    }
}

/// In-memory client store
#[derive(Debug, Default)]
pub struct ClientDirectory {
    clients: RwLock<HashMap<Uuid, Client>>,
}

impl ClientDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with the given clients
    pub fn with_clients(clients: Vec<Client>) -> Self {
        let map = clients.into_iter().map(|c| (c.id, c)).collect();
        Self {
            clients: RwLock::new(map),
        }
    }

    /// Load seed clients from a TOML file
    pub fn load_seed_file(path: &Path) -> Result<Vec<Client>> {
        let content = std::fs::read_to_string(path)?;
        let seed: SeedFile = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("bad seed file {}: {}", path.display(), e)))?;
        Ok(seed.clients.into_iter().map(SeedClient::into_client).collect())
    }

    /// Built-in demo seed used when no seed file is present
    pub fn demo_seed() -> Vec<Client> {
        vec![
            Client::new("Marcus Webb", "/photos/marcus-webb.jpg"),
            Client::new("Dana Ortiz", "/photos/dana-ortiz.jpg"),
            Client {
                case_status: CaseStatus::Fta,
                ..Client::new("Ray Calloway", "/photos/ray-calloway.jpg")
            },
        ]
    }

    /// Add or replace a client
    pub async fn insert(&self, client: Client) {
        self.clients.write().await.insert(client.id, client);
    }

    /// Look up a client by ID
    pub async fn get(&self, id: Uuid) -> Option<Client> {
        self.clients.read().await.get(&id).cloned()
    }

    /// All clients, sorted by name
    pub async fn list(&self) -> Vec<Client> {
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        clients
    }

    /// Number of clients in the directory
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Whether the directory is empty
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}
