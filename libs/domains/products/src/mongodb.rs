//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the listing queries
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Category + recency for filtered listing
            IndexModel::builder()
                .keys(doc! { "category": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
            // Brand filter
            IndexModel::builder()
                .keys(doc! { "brand": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_brand".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter
    ///
    /// Absent parameters contribute nothing, so the empty filter
    /// matches every product.
    fn build_filter(filter: &ProductFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        // Keyword: case-insensitive substring match on the name
        if let Some(ref keyword) = filter.keyword {
            doc.insert("name", doc! { "$regex": keyword, "$options": "i" });
        }

        // Exact category match
        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        // Brand: case-insensitive substring match
        if let Some(ref brand) = filter.brand {
            doc.insert("brand", doc! { "$regex": brand, "$options": "i" });
        }

        // Price range, inclusive on both ends
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("price", price_filter);
        }

        doc
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit() as i64)
            .skip(filter.skip())
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = ProductFilter::default();
        let doc = MongoProductRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_keyword() {
        let filter = ProductFilter {
            keyword: Some("laptop".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        let name = doc.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "laptop");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_with_category_exact() {
        let filter = ProductFilter {
            category: Some("electronics".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc.get_str("category").unwrap(), "electronics");
    }

    #[test]
    fn test_build_filter_with_brand_regex() {
        let filter = ProductFilter {
            brand: Some("acme".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        let brand = doc.get_document("brand").unwrap();
        assert_eq!(brand.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_with_full_price_range() {
        let filter = ProductFilter {
            min_price: Some(10.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        let price = doc.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 50.0);
    }

    #[test]
    fn test_build_filter_with_only_min_price() {
        let filter = ProductFilter {
            min_price: Some(10.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        let price = doc.get_document("price").unwrap();
        assert!(price.get("$gte").is_some());
        assert!(price.get("$lte").is_none());
    }

    #[test]
    fn test_build_filter_pagination_does_not_leak_into_filter() {
        let filter = ProductFilter {
            page: Some(3),
            limit: Some(20),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_combined() {
        let filter = ProductFilter {
            keyword: Some("phone".to_string()),
            category: Some("electronics".to_string()),
            brand: Some("acme".to_string()),
            min_price: Some(100.0),
            max_price: Some(900.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert!(doc.contains_key("name"));
        assert!(doc.contains_key("category"));
        assert!(doc.contains_key("brand"));
        assert!(doc.contains_key("price"));
    }
}
