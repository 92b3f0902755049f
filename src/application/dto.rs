use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    cart::Cart,
    errors::DomainError,
    product::{
        NewProduct, PaginatedProducts, PriceSort, Product, ProductFilter, ProductListQuery,
        StockFilter,
    },
};

const MIN_TITLE_LEN: usize = 10;
const MIN_DESCRIPTION_LEN: usize = 10;
const MAX_LIMIT: u32 = 100;

/// Stock filter value meaning "in stock".
pub const STOCK_AVAILABLE: &str = "disponible";
/// Stock filter value meaning "exhausted".
pub const STOCK_SOLD_OUT: &str = "agotado";

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    // Presence is validated by hand so a missing field reports which one,
    // instead of surfacing as a deserialization rejection.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> Result<NewProduct, DomainError> {
        let title = required_field(self.title, "title")?;
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(DomainError::validation(
                "title must be at least 10 characters",
            ));
        }

        let description = required_field(self.description, "description")?;
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(DomainError::validation(
                "description must be at least 10 characters",
            ));
        }

        let code = required_field(self.code, "code")?;

        let Some(price) = self.price else {
            return Err(DomainError::validation("price is required"));
        };
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::validation(
                "price must be a number greater than 0",
            ));
        }

        let Some(stock) = self.stock else {
            return Err(DomainError::validation("stock is required"));
        };
        let stock = u32::try_from(stock)
            .map_err(|_| DomainError::validation("stock must be a non-negative integer"))?;

        let category = required_field(self.category, "category")?;

        Ok(NewProduct {
            title,
            description,
            code,
            price,
            status: self.status,
            stock,
            category: category.to_lowercase(),
            thumbnails: self.thumbnails,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: u32,
    pub category: String,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            code: value.code,
            price: value.price,
            status: value.status,
            stock: value.stock,
            category: value.category,
            thumbnails: value.thumbnails,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductListQueryRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<String>,
}

impl ProductListQueryRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page == 0 {
            return Err(DomainError::validation("page must be greater than 0"));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(DomainError::validation("limit must be between 1 and 100"));
        }
        Ok(())
    }

    pub fn to_domain(&self) -> ProductListQuery {
        // Empty-string parameters behave like absent ones.
        let sort = match non_empty(self.sort.as_deref()) {
            None => None,
            Some("asc") => Some(PriceSort::Asc),
            Some(_) => Some(PriceSort::Desc),
        };
        let stock = match non_empty(self.stock.as_deref()) {
            Some(STOCK_AVAILABLE) => Some(StockFilter::Available),
            Some(STOCK_SOLD_OUT) => Some(StockFilter::SoldOut),
            _ => None,
        };

        ProductListQuery {
            page: self.page,
            limit: self.limit,
            filter: ProductFilter {
                category: non_empty(self.category.as_deref()).map(str::to_lowercase),
                title_contains: non_empty(self.query.as_deref()).map(str::to_lowercase),
                stock,
            },
            sort,
        }
    }

    /// Navigation link reproducing the received parameters verbatim (absent
    /// ones as empty strings, in a fixed order) with only the page changed.
    pub fn link_for(&self, page: u32) -> String {
        format!(
            "/api/products?limit={}&page={}&sort={}&query={}&category={}&stock={}",
            self.limit,
            page,
            self.sort.as_deref().unwrap_or(""),
            self.query.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
            self.stock.as_deref().unwrap_or(""),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub status: &'static str,
    pub payload: Vec<ProductResponse>,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl ProductListResponse {
    pub fn from_page(paged: PaginatedProducts, request: &ProductListQueryRequest) -> Self {
        let prev_page = paged.prev_page();
        let next_page = paged.next_page();

        Self {
            status: "success",
            total_pages: paged.total_pages,
            prev_page,
            next_page,
            page: paged.page,
            has_prev_page: paged.has_prev_page(),
            has_next_page: paged.has_next_page(),
            prev_link: prev_page.map(|page| request.link_for(page)),
            next_link: next_page.map(|page| request.link_for(page)),
            payload: paged.items.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: Uuid,
    pub products: Vec<CartLineResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(value: Cart) -> Self {
        Self {
            id: value.id,
            products: value
                .items
                .into_iter()
                .map(|line| CartLineResponse {
                    product: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// A cart line with its product dereferenced; `detail` is `None` when the
/// referenced product no longer exists in the catalog.
#[derive(Debug, Serialize)]
pub struct MaterializedLineResponse {
    pub product: Uuid,
    pub quantity: u32,
    pub detail: Option<ProductResponse>,
}

#[derive(Debug, Serialize)]
pub struct MaterializedCartResponse {
    pub id: Uuid,
    pub products: Vec<MaterializedLineResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CartLineUpdateRequest {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CartUpdateRequest {
    #[serde(default)]
    pub products: Option<Vec<CartLineUpdateRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl SetQuantityRequest {
    pub fn quantity(&self) -> Result<u32, DomainError> {
        let Some(quantity) = self.quantity else {
            return Err(DomainError::validation("quantity is required"));
        };
        positive_quantity(quantity, "quantity must be a positive integer")
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub(crate) fn positive_quantity(raw: i64, message: &str) -> Result<u32, DomainError> {
    if raw <= 0 {
        return Err(DomainError::validation(message));
    }
    u32::try_from(raw).map_err(|_| DomainError::validation(message))
}

fn required_field(value: Option<String>, name: &str) -> Result<String, DomainError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DomainError::validation(format!("{name} is required"))),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

const fn default_status() -> bool {
    true
}

const fn default_limit() -> u32 {
    10
}

const fn default_page() -> u32 {
    1
}
