use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::{
    application::dto::{
        CreateProductRequest, ProductListQueryRequest, ProductListResponse, ProductResponse,
    },
    domain::{errors::DomainError, events::StoreNotification, product::PaginatedProducts},
    infrastructure::{ProductRepository, notifications::NotificationSink},
};

#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            products,
            notifications,
        }
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, DomainError> {
        let new_product = request.into_new_product()?;

        // Uniqueness is checked here for a precise error, and again by the
        // repository insert, which is what actually holds the invariant.
        if self
            .products
            .find_by_code(&new_product.code)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate(
                "a product with the same code already exists",
            ));
        }
        if self
            .products
            .find_by_title(&new_product.title)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate(
                "a product with the same title already exists",
            ));
        }

        let created = self.products.create(new_product).await?;
        self.notify(StoreNotification::NewProduct {
            product: created.clone(),
        })
        .await;

        Ok(ProductResponse::from(created))
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, DomainError> {
        let Some(product) = self.products.get_by_id(id).await? else {
            return Err(DomainError::not_found("product not found"));
        };
        Ok(ProductResponse::from(product))
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.products.delete(id).await? {
            return Err(DomainError::not_found("product not found"));
        }

        self.notify(StoreNotification::ProductDeleted { product_id: id })
            .await;
        Ok(())
    }

    pub async fn list_products(
        &self,
        request: ProductListQueryRequest,
    ) -> Result<ProductListResponse, DomainError> {
        request.validate()?;

        let query = request.to_domain();
        let items = self.products.search(&query).await?;
        let total = self.products.count(&query.filter).await?;

        let paged = PaginatedProducts::assemble(items, total, query.page, query.limit);
        Ok(ProductListResponse::from_page(paged, &request))
    }

    pub async fn categories(&self) -> Result<Vec<String>, DomainError> {
        self.products.distinct_categories().await
    }

    async fn notify(&self, notification: StoreNotification) {
        if let Err(err) = self.notifications.emit(&notification).await {
            warn!(event = notification.name(), error = %err, "failed to emit notification");
        }
    }
}
