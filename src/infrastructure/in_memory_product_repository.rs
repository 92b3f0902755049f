use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        errors::DomainError,
        product::{NewProduct, PriceSort, Product, ProductFilter, ProductListQuery},
    },
    infrastructure::ProductRepository,
};

#[derive(Debug, Clone)]
struct StoredProduct {
    // Monotonic insertion sequence; stands in for a document store's natural
    // order so unsorted pagination stays deterministic.
    seq: u64,
    product: Product,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products_by_id: RwLock<HashMap<Uuid, StoredProduct>>,
    product_id_by_code: RwLock<HashMap<String, Uuid>>,
    product_id_by_title: RwLock<HashMap<String, Uuid>>,
    next_seq: AtomicU64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, filter: &ProductFilter) -> Vec<StoredProduct> {
        self.products_by_id
            .read()
            .await
            .values()
            .filter(|stored| filter.matches(&stored.product))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        // Lock order is products, code, title everywhere that takes more
        // than one write guard.
        let mut products_by_id = self.products_by_id.write().await;
        let mut product_id_by_code = self.product_id_by_code.write().await;
        let mut product_id_by_title = self.product_id_by_title.write().await;

        if product_id_by_code.contains_key(&product.code) {
            return Err(DomainError::duplicate(
                "a product with the same code already exists",
            ));
        }
        if product_id_by_title.contains_key(&product.title) {
            return Err(DomainError::duplicate(
                "a product with the same title already exists",
            ));
        }

        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            title: product.title,
            description: product.description,
            code: product.code,
            price: product.price,
            status: product.status,
            stock: product.stock,
            category: product.category,
            thumbnails: product.thumbnails,
            created_at: now,
            updated_at: now,
        };

        product_id_by_code.insert(created.code.clone(), created.id);
        product_id_by_title.insert(created.title.clone(), created.id);
        products_by_id.insert(
            created.id,
            StoredProduct {
                seq: self.next_seq.fetch_add(1, AtomicOrdering::Relaxed),
                product: created.clone(),
            },
        );

        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products_by_id
            .read()
            .await
            .get(&id)
            .map(|stored| stored.product.clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, DomainError> {
        let Some(id) = self.product_id_by_code.read().await.get(code).copied() else {
            return Ok(None);
        };
        self.get_by_id(id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Product>, DomainError> {
        let Some(id) = self.product_id_by_title.read().await.get(title).copied() else {
            return Ok(None);
        };
        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut products_by_id = self.products_by_id.write().await;
        let Some(removed) = products_by_id.remove(&id) else {
            return Ok(false);
        };

        self.product_id_by_code
            .write()
            .await
            .remove(&removed.product.code);
        self.product_id_by_title
            .write()
            .await
            .remove(&removed.product.title);
        Ok(true)
    }

    async fn search(&self, query: &ProductListQuery) -> Result<Vec<Product>, DomainError> {
        let mut items = self.matching(&query.filter).await;

        match query.sort {
            None => items.sort_by_key(|stored| stored.seq),
            Some(sort) => items.sort_by(|left, right| {
                let ordering = left
                    .product
                    .price
                    .partial_cmp(&right.product.price)
                    .unwrap_or(Ordering::Equal);
                let ordering = match sort {
                    PriceSort::Asc => ordering,
                    PriceSort::Desc => ordering.reverse(),
                };
                ordering.then_with(|| left.seq.cmp(&right.seq))
            }),
        }

        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(items
            .into_iter()
            .skip(query.offset())
            .take(limit)
            .map(|stored| stored.product)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let matching = self.matching(filter).await;
        Ok(u64::try_from(matching.len()).unwrap_or(u64::MAX))
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, DomainError> {
        let categories = self
            .products_by_id
            .read()
            .await
            .values()
            .map(|stored| stored.product.category.clone())
            .collect::<BTreeSet<_>>();
        Ok(categories.into_iter().collect())
    }
}
