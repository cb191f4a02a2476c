//! Category Commands
//!
//! Category repository over the REST API.

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, MutationError};
use crate::models::{Category, CategoryId, NewCategory};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ReorderArgs<'a> {
    ids: &'a [CategoryId],
}

#[derive(Serialize)]
struct MoveArgs<'a> {
    #[serde(rename = "parentId")]
    parent_id: Option<&'a CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<u32>,
}

// ========================
// Category Commands
// ========================

impl ApiClient {
    /// Full pre-nested category forest
    pub async fn get_category_tree(&self) -> Result<Vec<Category>, MutationError> {
        self.send_json(self.request(Method::GET, "categories/tree")).await
    }

    pub async fn reorder_categories(&self, ids: &[CategoryId]) -> Result<(), MutationError> {
        let builder = self.request(Method::PUT, "categories/reorder").json(&ReorderArgs { ids });
        self.send(builder).await.map(|_| ())
    }

    pub async fn move_category(
        &self,
        id: &CategoryId,
        parent_id: Option<&CategoryId>,
        order: Option<u32>,
    ) -> Result<(), MutationError> {
        let builder = self
            .request(Method::PATCH, &format!("categories/{}/move", id))
            .json(&MoveArgs { parent_id, order });
        self.send(builder).await.map(|_| ())
    }

    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), MutationError> {
        self.send(self.request(Method::DELETE, &format!("categories/{}", id))).await.map(|_| ())
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, MutationError> {
        self.send_json(self.request(Method::POST, "categories").json(category)).await
    }
}
