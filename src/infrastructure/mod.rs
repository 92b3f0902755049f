use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    cart::Cart,
    errors::DomainError,
    product::{NewProduct, Product, ProductFilter, ProductListQuery},
};

pub mod in_memory_cart_repository;
pub mod in_memory_product_repository;
pub mod notifications;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product and assigns its id. Fails with `Duplicate` when
    /// the code or title is already taken (exact match).
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, DomainError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<Product>, DomainError>;
    /// Returns whether a product was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    /// One page of matches, in stored order unless a price sort is requested.
    async fn search(&self, query: &ProductListQuery) -> Result<Vec<Product>, DomainError>;
    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError>;
    async fn distinct_categories(&self) -> Result<Vec<String>, DomainError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Creates an empty cart and assigns its id.
    async fn create(&self) -> Result<Cart, DomainError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError>;
    /// Full overwrite of the stored cart, line items included.
    async fn save(&self, cart: &Cart) -> Result<(), DomainError>;
}
