use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (MongoDB for
/// production, in-memory for development/testing).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products matching a filter, paginated
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Count products matching a filter (pre-pagination)
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Update an existing product (patch + full-document replace)
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Applies the same filter semantics as the MongoDB implementation:
/// case-insensitive substring match for keyword/brand, exact category
/// match, inclusive price bounds, newest-first ordering, skip/limit
/// pagination.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn matches(filter: &ProductFilter, product: &Product) -> bool {
        if let Some(ref keyword) = filter.keyword {
            if !product
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }

        if let Some(ref category) = filter.category {
            if &product.category != category {
                return false;
            }
        }

        if let Some(ref brand) = filter.brand {
            match product.brand {
                Some(ref b) if b.to_lowercase().contains(&brand.to_lowercase()) => {}
                _ => return false,
            }
        }

        if let Some(min) = filter.min_price {
            if product.price < min {
                return false;
            }
        }

        if let Some(max) = filter.max_price {
            if product.price > max {
                return false;
            }
        }

        true
    }

    async fn matching(&self, filter: &ProductFilter) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| Self::matches(filter, p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let matching = self.matching(&filter).await;
        Ok(matching
            .into_iter()
            .skip(filter.skip() as usize)
            .take(filter.limit() as usize)
            .collect())
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        Ok(self.matching(&filter).await.len() as u64)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let mut products = self.products.write().await;
        products
            .remove(&id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(name: &str, category: &str, brand: Option<&str>, price: f64) -> Product {
        Product::new(
            CreateProduct {
                name: name.to_string(),
                description: String::new(),
                price,
                category: category.to_string(),
                brand: brand.map(|b| b.to_string()),
                stock: 1,
            },
            Uuid::now_v7(),
        )
    }

    #[tokio::test]
    async fn test_empty_filter_matches_all() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("A", "books", None, 5.0)).await.unwrap();
        repo.create(product("B", "games", Some("Acme"), 10.0))
            .await
            .unwrap();

        let all = repo.list(ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(repo.count(ProductFilter::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_keyword_is_case_insensitive_substring() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("Gaming Laptop", "electronics", None, 100.0))
            .await
            .unwrap();
        repo.create(product("Desk", "furniture", None, 50.0))
            .await
            .unwrap();

        let filter = ProductFilter {
            keyword: Some("LAPTOP".to_string()),
            ..Default::default()
        };
        let found = repo.list(filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Gaming Laptop");
    }

    #[tokio::test]
    async fn test_price_bounds_are_inclusive() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("A", "c", None, 10.0)).await.unwrap();
        repo.create(product("B", "c", None, 20.0)).await.unwrap();
        repo.create(product("C", "c", None, 30.0)).await.unwrap();

        let filter = ProductFilter {
            min_price: Some(10.0),
            max_price: Some(20.0),
            ..Default::default()
        };
        let found = repo.list(filter).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.price >= 10.0 && p.price <= 20.0));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_gone() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(product("A", "c", None, 1.0)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        let second_delete = repo.delete(created.id).await;
        assert!(matches!(second_delete, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(Uuid::now_v7(), UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
