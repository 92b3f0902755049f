use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (product reference, quantity) pair. The product is referenced by id
/// only and is always dereferenced live against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "product")]
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Insertion-ordered line items. Invariant: at most one line per product id;
/// a repeated contribution merges into the existing line instead of
/// appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    // Serialized under the wire name "products", matching the REST payloads.
    #[serde(rename = "products")]
    pub items: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn line(&self, product_id: Uuid) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    /// Add a single unit of `product_id`: increments the existing line by
    /// exactly 1, or appends a fresh line with quantity 1. Returns the
    /// resulting line quantity.
    pub fn add_unit(&mut self, product_id: Uuid) -> u32 {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity += 1;
            return line.quantity;
        }

        self.items.push(CartLine {
            product_id,
            quantity: 1,
        });
        1
    }

    /// Removes the line for `product_id` if present. Removing an absent
    /// product is not an error; returns whether a line was removed.
    pub fn remove_line(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        self.items.len() != before
    }

    /// Overwrites the quantity of an existing line. Returns false when no
    /// line exists for `product_id`.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) -> bool {
        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        else {
            return false;
        };
        line.quantity = quantity;
        true
    }

    /// Wholesale substitution of the line sequence. Callers validate the
    /// incoming lines (existence, positive quantity, no duplicate ids)
    /// before committing; nothing from the old sequence survives.
    pub fn replace_items(&mut self, items: Vec<CartLine>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
