//! Catalog API - food and category reads
//!
//! All catalog endpoints are unauthenticated. Each read has an abortable
//! variant so a navigation away discards the in-flight response instead of
//! applying it to state nobody is looking at anymore.

use shared::models::{Category, CategoryFoods, Food};
use tokio_util::sync::CancellationToken;

use crate::{ClientResult, HttpClient};

/// Typed wrapper over the catalog endpoints
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: HttpClient,
}

impl CatalogApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /food` - full food list
    pub async fn list_foods(&self) -> ClientResult<Vec<Food>> {
        self.http.get("food").await
    }

    /// Abortable variant of [`list_foods`](Self::list_foods)
    pub async fn list_foods_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<Food>> {
        self.http.get_with_cancel("food", cancel).await
    }

    /// `GET /category` - category list with food counts
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("category").await
    }

    /// Abortable variant of [`list_categories`](Self::list_categories)
    pub async fn list_categories_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<Category>> {
        self.http.get_with_cancel("category", cancel).await
    }

    /// `GET /category/:id/foods-tree` - one category with its foods
    pub async fn category_foods(&self, category_id: &str) -> ClientResult<CategoryFoods> {
        self.http
            .get(&format!("category/{}/foods-tree", category_id))
            .await
    }

    /// Abortable variant of [`category_foods`](Self::category_foods)
    pub async fn category_foods_with_cancel(
        &self,
        category_id: &str,
        cancel: &CancellationToken,
    ) -> ClientResult<CategoryFoods> {
        self.http
            .get_with_cancel(&format!("category/{}/foods-tree", category_id), cancel)
            .await
    }
}
