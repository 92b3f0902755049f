use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{cart::Cart, errors::DomainError},
    infrastructure::CartRepository,
};

#[derive(Default)]
pub struct InMemoryCartRepository {
    carts_by_id: RwLock<HashMap<Uuid, Cart>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn create(&self) -> Result<Cart, DomainError> {
        let cart = Cart::empty(Uuid::new_v4());
        self.carts_by_id
            .write()
            .await
            .insert(cart.id, cart.clone());
        Ok(cart)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        Ok(self.carts_by_id.read().await.get(&id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut stored = cart.clone();
        stored.updated_at = Utc::now();
        self.carts_by_id.write().await.insert(stored.id, stored);
        Ok(())
    }
}
