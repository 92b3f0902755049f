use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::{
    application::dto::{
        CartResponse, CartUpdateRequest, MaterializedCartResponse, MaterializedLineResponse,
        ProductResponse, SetQuantityRequest, positive_quantity,
    },
    domain::{
        cart::{Cart, CartLine},
        errors::DomainError,
        events::StoreNotification,
    },
    infrastructure::{CartRepository, ProductRepository, notifications::NotificationSink},
};

/// Cart operations cross-checked against the product catalog. Mutations are
/// read-modify-write over the whole cart: load, mutate in memory, save. Two
/// concurrent mutations of one cart can lose an update; serializing per cart
/// id (or a version compare-and-swap in `CartRepository::save`) would close
/// that window.
#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            carts,
            products,
            notifications,
        }
    }

    pub async fn create_cart(&self) -> Result<CartResponse, DomainError> {
        let cart = self.carts.create().await?;
        self.notify(StoreNotification::NewCart { cart: cart.clone() })
            .await;
        Ok(CartResponse::from(cart))
    }

    /// Read with every line's product dereferenced. A line whose product was
    /// deleted after it entered the cart comes back with `detail: None`
    /// instead of failing the whole read.
    pub async fn get_cart(&self, cart_id: Uuid) -> Result<MaterializedCartResponse, DomainError> {
        let cart = self.load_cart(cart_id).await?;

        let mut products = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            let detail = self
                .products
                .get_by_id(line.product_id)
                .await?
                .map(ProductResponse::from);
            products.push(MaterializedLineResponse {
                product: line.product_id,
                quantity: line.quantity,
                detail,
            });
        }

        Ok(MaterializedCartResponse {
            id: cart.id,
            products,
        })
    }

    /// Single-unit add: merges into an existing line (+1) or appends a line
    /// with quantity 1. The product must exist in the catalog.
    pub async fn add_unit(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<CartResponse, DomainError> {
        let mut cart = self.load_cart(cart_id).await?;

        if self.products.get_by_id(product_id).await?.is_none() {
            return Err(DomainError::not_found("product not found"));
        }

        cart.add_unit(product_id);
        self.carts.save(&cart).await?;

        // The payload reports the unit delta, not the resulting line
        // quantity; see DESIGN.md.
        self.notify(StoreNotification::ProductAdded {
            cart_id,
            product_id,
            quantity: 1,
        })
        .await;

        Ok(CartResponse::from(cart))
    }

    /// Idempotent: removing a product that is not in the cart returns the
    /// cart unchanged.
    pub async fn remove_line(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<CartResponse, DomainError> {
        let mut cart = self.load_cart(cart_id).await?;
        cart.remove_line(product_id);
        self.carts.save(&cart).await?;
        Ok(CartResponse::from(cart))
    }

    pub async fn set_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        request: SetQuantityRequest,
    ) -> Result<CartResponse, DomainError> {
        let quantity = request.quantity()?;
        let mut cart = self.load_cart(cart_id).await?;

        if !cart.set_quantity(product_id, quantity) {
            return Err(DomainError::not_found("product not found in cart"));
        }

        self.carts.save(&cart).await?;
        Ok(CartResponse::from(cart))
    }

    /// Bulk replace, all-or-nothing: every incoming line is validated (in
    /// order: well-formed id, product exists, positive quantity, no repeated
    /// id) before anything is written; on any failure the stored cart is
    /// untouched.
    pub async fn replace_all(
        &self,
        cart_id: Uuid,
        request: CartUpdateRequest,
    ) -> Result<CartResponse, DomainError> {
        let mut cart = self.load_cart(cart_id).await?;

        let Some(incoming) = request.products else {
            return Err(DomainError::validation("products must be an array"));
        };

        let mut seen = HashSet::with_capacity(incoming.len());
        let mut lines = Vec::with_capacity(incoming.len());
        for item in incoming {
            let raw = item.product.unwrap_or_default();
            let product_id = Uuid::parse_str(&raw)
                .map_err(|_| DomainError::validation(format!("invalid product id: {raw}")))?;

            if self.products.get_by_id(product_id).await?.is_none() {
                return Err(DomainError::not_found(format!(
                    "product not found: {product_id}"
                )));
            }

            let Some(raw_quantity) = item.quantity else {
                return Err(DomainError::validation(format!(
                    "invalid quantity for product: {product_id}"
                )));
            };
            let quantity = positive_quantity(
                raw_quantity,
                &format!("invalid quantity for product: {product_id}"),
            )?;

            if !seen.insert(product_id) {
                return Err(DomainError::duplicate(format!(
                    "duplicate product: {product_id}"
                )));
            }

            lines.push(CartLine {
                product_id,
                quantity,
            });
        }

        cart.replace_items(lines);
        self.carts.save(&cart).await?;
        Ok(CartResponse::from(cart))
    }

    pub async fn clear_cart(&self, cart_id: Uuid) -> Result<CartResponse, DomainError> {
        let mut cart = self.load_cart(cart_id).await?;
        cart.clear();
        self.carts.save(&cart).await?;
        Ok(CartResponse::from(cart))
    }

    async fn load_cart(&self, cart_id: Uuid) -> Result<Cart, DomainError> {
        let Some(cart) = self.carts.get_by_id(cart_id).await? else {
            return Err(DomainError::not_found("cart not found"));
        };
        Ok(cart)
    }

    async fn notify(&self, notification: StoreNotification) {
        if let Err(err) = self.notifications.emit(&notification).await {
            warn!(event = notification.name(), error = %err, "failed to emit notification");
        }
    }
}
