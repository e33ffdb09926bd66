//! In-memory catalog gateway for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::gateway::{CatalogGateway, LoginCredentials, LoginToken, RemoteError, RemoteResult};
use crate::models::{Item, ItemDraft, ItemId, Rating};

#[derive(Debug, Default)]
struct FakeState {
    items: Vec<Item>,
    offline: bool,
    calls: Vec<String>,
}

/// Serves a fixed item list and records every call it receives.
///
/// Like the public catalog it accepts writes without reflecting them on read.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGateway {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                items,
                ..FakeState::default()
            })),
        }
    }

    pub fn offline() -> Self {
        let gateway = Self::default();
        gateway.set_offline(true);
        gateway
    }

    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake gateway lock")
    }

    fn record(&self, call: String) -> RemoteResult<()> {
        let mut state = self.state();
        state.calls.push(call);
        if state.offline {
            Err(RemoteError::Status {
                status: 503,
                body: "offline".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub fn item(id: i64, title: &str) -> Item {
    Item {
        id: ItemId::new(id),
        title: title.to_string(),
        price: 19.99,
        description: format!("{title} description"),
        category: "electronics".to_string(),
        image: format!("https://example.com/{id}.jpg"),
        rating: Some(Rating {
            rate: 4.0,
            count: 100,
        }),
    }
}

pub fn draft(title: &str) -> ItemDraft {
    ItemDraft {
        title: title.to_string(),
        price: 42.5,
        description: format!("{title} description"),
        category: "jewelery".to_string(),
        image: "https://example.com/new.jpg".to_string(),
    }
}

impl CatalogGateway for FakeGateway {
    async fn list_items(&self) -> RemoteResult<Vec<Item>> {
        self.record("GET /products".to_string())?;
        Ok(self.state().items.clone())
    }

    async fn get_item(&self, id: ItemId) -> RemoteResult<Item> {
        self.record(format!("GET /products/{id}"))?;
        self.state()
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(RemoteError::EmptyBody(200))
    }

    async fn create_item(&self, draft: &ItemDraft) -> RemoteResult<()> {
        self.record(format!("POST /products {}", draft.title))
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> RemoteResult<()> {
        self.record(format!("PUT /products/{id} {}", draft.title))
    }

    async fn delete_item(&self, id: ItemId) -> RemoteResult<()> {
        self.record(format!("DELETE /products/{id}"))
    }

    async fn login(&self, credentials: &LoginCredentials) -> RemoteResult<LoginToken> {
        self.record(format!("POST /auth/login {}", credentials.username))?;
        Ok(LoginToken {
            token: format!("token-for-{}", credentials.username),
        })
    }
}
