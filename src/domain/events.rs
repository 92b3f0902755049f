use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{cart::Cart, product::Product};

/// Store mutations pushed to subscribers. Delivery is best-effort: the
/// originating operation never fails, retries, or blocks on these.
#[derive(Debug, Clone)]
pub enum StoreNotification {
    NewCart { cart: Cart },
    NewProduct { product: Product },
    ProductAdded { cart_id: Uuid, product_id: Uuid, quantity: u32 },
    ProductDeleted { product_id: Uuid },
}

impl StoreNotification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewCart { .. } => "newCart",
            Self::NewProduct { .. } => "newProduct",
            Self::ProductAdded { .. } => "productAdded",
            Self::ProductDeleted { .. } => "productDeleted",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            Self::NewCart { cart } => json!(cart),
            Self::NewProduct { product } => json!(product),
            Self::ProductAdded {
                cart_id,
                product_id,
                quantity,
            } => json!({
                "cartId": cart_id,
                "product": { "id": product_id, "quantity": quantity },
            }),
            Self::ProductDeleted { product_id } => json!(product_id),
        }
    }
}
