use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Default page number when the query parameter is absent or unusable
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when the query parameter is absent or unusable
pub const DEFAULT_LIMIT: u64 = 8;

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    #[serde(default)]
    pub description: String,
    /// Price (non-negative)
    pub price: f64,
    /// Product category
    pub category: String,
    /// Brand name
    pub brand: Option<String>,
    /// Current stock quantity
    #[serde(default)]
    pub stock: i32,
    /// The admin user who created this product
    pub owner: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// The owner is never taken from the request body: it is stamped from
/// the authenticated principal by the service layer.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
}

/// DTO for updating an existing product
///
/// A partial patch; validation is re-run on the supplied fields and the
/// update is applied as a full-document replace (last write wins).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

/// Query filters for listing products
///
/// Numeric parameters are parsed leniently: absent, non-numeric, zero
/// or negative page/limit values fall back to the defaults, so the
/// computed skip is never negative. Price bounds that fail to parse
/// impose no constraint.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring match against the product name
    pub keyword: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring match against the brand
    pub brand: Option<String>,
    /// Inclusive lower price bound
    #[serde(default, deserialize_with = "lenient_number")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_price: Option<f64>,
    /// Page number (1-based, default 1)
    #[serde(default, deserialize_with = "lenient_positive")]
    pub page: Option<u64>,
    /// Page size (default 8)
    #[serde(default, deserialize_with = "lenient_positive")]
    pub limit: Option<u64>,
}

impl ProductFilter {
    /// Effective page number (>= 1)
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Effective page size (>= 1)
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Number of documents to skip: (page - 1) * limit
    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Accept a numeric query parameter as a string, dropping values that
/// do not parse.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Accept a positive integer query parameter as a string, dropping
/// values that do not parse or are not positive.
fn lenient_positive<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64))
}

/// One page of products plus pre-pagination counts
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub success: bool,
    /// Total matching products before pagination
    pub total_products: u64,
    /// Number of products in this page (<= limit)
    pub count: usize,
    /// The page that was returned (1-based)
    pub current_page: u64,
    /// ceil(totalProducts / limit)
    pub total_pages: u64,
    pub products: Vec<Product>,
}

impl ProductPage {
    pub fn new(total_products: u64, page: u64, limit: u64, products: Vec<Product>) -> Self {
        Self {
            success: true,
            total_products,
            count: products.len(),
            current_page: page,
            total_pages: total_products.div_ceil(limit),
            products,
        }
    }
}

/// Response wrapping a single product
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SingleProductResponse {
    pub success: bool,
    pub product: Product,
}

/// Simple confirmation response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl Product {
    /// Create a new product from the CreateProduct DTO, stamping the
    /// owning user.
    pub fn new(input: CreateProduct, owner: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            brand: input.brand,
            stock: input.stock,
            owner,
            created_at: Utc::now(),
        }
    }

    /// Apply updates from the UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(brand) = update.brand {
            self.brand = Some(brand);
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateProduct {
        CreateProduct {
            name: "Laptop".to_string(),
            description: "A laptop".to_string(),
            price: 999.99,
            category: "electronics".to_string(),
            brand: Some("Acme".to_string()),
            stock: 3,
        }
    }

    #[test]
    fn test_new_product_stamps_owner() {
        let owner = Uuid::now_v7();
        let product = Product::new(create_input(), owner);
        assert_eq!(product.owner, owner);
        assert_eq!(product.name, "Laptop");
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let input = CreateProduct {
            price: -1.0,
            ..create_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_stock_fails_validation() {
        let input = CreateProduct {
            stock: -5,
            ..create_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_apply_update_merges_patch() {
        let mut product = Product::new(create_input(), Uuid::now_v7());
        product.apply_update(UpdateProduct {
            price: Some(799.0),
            stock: Some(10),
            ..Default::default()
        });

        assert_eq!(product.price, 799.0);
        assert_eq!(product.stock, 10);
        assert_eq!(product.name, "Laptop"); // untouched
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ProductFilter::default();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 8);
        assert_eq!(filter.skip(), 0);
    }

    #[test]
    fn test_filter_skip_math() {
        let filter = ProductFilter {
            page: Some(3),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(filter.skip(), 10);
    }

    #[test]
    fn test_lenient_parse_non_numeric_falls_back() {
        let filter: ProductFilter = serde_json::from_value(serde_json::json!({
            "page": "abc",
            "limit": "many",
        }))
        .unwrap();
        assert_eq!(filter.page(), DEFAULT_PAGE);
        assert_eq!(filter.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_lenient_parse_zero_and_negative_fall_back() {
        let filter: ProductFilter = serde_json::from_value(serde_json::json!({
            "page": "-2",
            "limit": "0",
        }))
        .unwrap();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 8);
        assert_eq!(filter.skip(), 0); // never negative
    }

    #[test]
    fn test_lenient_parse_valid_values() {
        let filter: ProductFilter = serde_json::from_value(serde_json::json!({
            "page": "2",
            "limit": "20",
            "minPrice": "10.5",
            "maxPrice": "nope",
        }))
        .unwrap();
        assert_eq!(filter.page(), 2);
        assert_eq!(filter.limit(), 20);
        assert_eq!(filter.min_price, Some(10.5));
        assert_eq!(filter.max_price, None); // unusable bound imposes no constraint
    }

    #[test]
    fn test_product_page_math() {
        let page = ProductPage::new(17, 1, 8, vec![]);
        assert_eq!(page.total_pages, 3); // ceil(17 / 8)
        assert_eq!(page.count, 0);
        assert!(page.success);
    }

    #[test]
    fn test_product_page_empty_total() {
        let page = ProductPage::new(0, 1, 8, vec![]);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new(create_input(), Uuid::now_v7());
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("_id").is_some());
    }
}
