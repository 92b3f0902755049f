use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
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

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: u32,
    // Normalized to lowercase before it reaches the repository, so
    // lowercase-normalized filtering always matches stored values.
    pub category: String,
    pub thumbnails: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFilter {
    Available,
    SoldOut,
}

impl StockFilter {
    pub fn matches(self, stock: u32) -> bool {
        match self {
            Self::Available => stock > 0,
            Self::SoldOut => stock == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact match against the stored (lowercase) category.
    pub category: Option<String>,
    /// Case-insensitive substring match against the title; held lowercase.
    pub title_contains: Option<String>,
    pub stock: Option<StockFilter>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }
        if let Some(needle) = &self.title_contains
            && !product.title.to_lowercase().contains(needle)
        {
            return false;
        }
        if let Some(stock) = self.stock
            && !stock.matches(product.stock)
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub page: u32,
    pub limit: u32,
    pub filter: ProductFilter,
    pub sort: Option<PriceSort>,
}

impl ProductListQuery {
    pub fn offset(&self) -> usize {
        usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX)
            * usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedProducts {
    pub items: Vec<Product>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginatedProducts {
    pub fn assemble(items: Vec<Product>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit.max(1))) as u32
        };

        Self {
            items,
            page,
            limit,
            total,
            total_pages,
        }
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev_page().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, category: &str, price: f64, stock: u32) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "a test product description".to_string(),
            code: format!("code-{title}"),
            price,
            status: true,
            stock,
            category: category.to_string(),
            thumbnails: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(filter.matches(&product("Mechanical keyboard", "peripherals", 50.0, 3)));
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let filter = ProductFilter {
            title_contains: Some("keyboard".to_string()),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Mechanical KEYBOARD pro", "peripherals", 50.0, 3)));
        assert!(!filter.matches(&product("Ergonomic mouse pad", "peripherals", 10.0, 3)));
    }

    #[test]
    fn stock_filter_splits_available_and_sold_out() {
        let available = ProductFilter {
            stock: Some(StockFilter::Available),
            ..ProductFilter::default()
        };
        let sold_out = ProductFilter {
            stock: Some(StockFilter::SoldOut),
            ..ProductFilter::default()
        };

        let in_stock = product("Mechanical keyboard", "peripherals", 50.0, 5);
        let exhausted = product("Ergonomic mouse pad", "peripherals", 10.0, 0);

        assert!(available.matches(&in_stock));
        assert!(!available.matches(&exhausted));
        assert!(sold_out.matches(&exhausted));
        assert!(!sold_out.matches(&in_stock));
    }

    #[test]
    fn page_math_for_25_items_limit_10() {
        let first = PaginatedProducts::assemble(Vec::new(), 25, 1, 10);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_prev_page());
        assert!(first.has_next_page());
        assert_eq!(first.prev_page(), None);
        assert_eq!(first.next_page(), Some(2));

        let last = PaginatedProducts::assemble(Vec::new(), 25, 3, 10);
        assert!(last.has_prev_page());
        assert!(!last.has_next_page());
        assert_eq!(last.prev_page(), Some(2));
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn page_math_for_empty_result_set() {
        let page = PaginatedProducts::assemble(Vec::new(), 0, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_beyond_last_has_no_next() {
        let page = PaginatedProducts::assemble(Vec::new(), 25, 7, 10);
        assert!(page.has_prev_page());
        assert!(!page.has_next_page());
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn offset_is_zero_based_from_one_indexed_pages() {
        let query = ProductListQuery {
            page: 3,
            limit: 10,
            filter: ProductFilter::default(),
            sort: None,
        };
        assert_eq!(query.offset(), 20);
    }
}
