//! Resource Controllers
//!
//! One controller per collection, all reconciling their local [`ViewList`]
//! the same way:
//!
//! - `list` replaces the view wholesale
//! - `create` appends the entity the server returned
//! - `update` replaces the entry with the same id by the server's entity
//! - `delete` removes the entry once the server confirms
//!
//! Nothing is applied optimistically. A failed call leaves the view exactly
//! as it was.

use reqwest::Method;

use super::models::{CarouselImage, NavbarLink, Review, SocialLink, StoreLink};
use super::{FieldSet, Intent, Resource, ResourceId};
use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Local mirror of one collection as of the last successful call
#[derive(Debug, Clone)]
pub struct ViewList<R> {
    items: Vec<R>,
}

impl<R> Default for ViewList<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Resource> ViewList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn replace_all(&mut self, items: Vec<R>) {
        self.items = items;
    }

    fn append(&mut self, item: R) {
        self.items.push(item);
    }

    /// Swap in `item` where its id already appears; returns whether it did
    fn replace(&mut self, item: R) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &ResourceId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() < before
    }
}

/// CRUD against one REST collection
#[derive(Debug, Clone)]
pub struct ResourceController<R> {
    client: ApiClient,
    view: ViewList<R>,
}

pub type ImageController = ResourceController<CarouselImage>;
pub type StoreLinkController = ResourceController<StoreLink>;
pub type SocialLinkController = ResourceController<SocialLink>;
pub type NavbarController = ResourceController<NavbarLink>;
pub type ReviewController = ResourceController<Review>;

impl<R: Resource> ResourceController<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            view: ViewList::new(),
        }
    }

    pub fn view(&self) -> &ViewList<R> {
        &self.view
    }

    pub fn items(&self) -> &[R] {
        self.view.items()
    }

    /// Fetch the collection and replace the view with it
    pub async fn list(&mut self) -> ApiResult<&[R]> {
        let items: Vec<R> = self.client.get(R::PATH).await.map_err(|e| {
            tracing::error!(resource = R::LABEL, "Failed to load: {}", e);
            e
        })?;
        tracing::debug!(resource = R::LABEL, count = items.len(), "Loaded");

        self.view.replace_all(items);
        Ok(self.view.items())
    }

    /// Validate, create, and append the server's entity
    pub async fn create(&mut self, fields: R::Fields) -> ApiResult<R> {
        fields.validate(Intent::Create).map_err(ApiError::Validation)?;

        let payload = fields.into_payload(Intent::Create)?;
        let created: R = self.client.send(Method::POST, R::PATH, payload).await?;
        tracing::info!(resource = R::LABEL, id = %created.id(), "Created");

        self.view.append(created.clone());
        Ok(created)
    }

    /// Validate, update, and swap in the server's entity
    pub async fn update(&mut self, id: &ResourceId, fields: R::Fields) -> ApiResult<R> {
        fields.validate(Intent::Update).map_err(ApiError::Validation)?;

        let payload = fields.into_payload(Intent::Update)?;
        let updated: R = self
            .client
            .send(Method::PUT, &item_path::<R>(id), payload)
            .await?;
        tracing::info!(resource = R::LABEL, id = %updated.id(), "Updated");

        if updated.id() != id {
            tracing::warn!(
                resource = R::LABEL,
                requested = %id,
                returned = %updated.id(),
                "Server returned a different id for update"
            );
        }
        if !self.view.replace(updated.clone()) {
            tracing::debug!(resource = R::LABEL, id = %id, "Updated entity not in view");
        }
        Ok(updated)
    }

    /// Delete, then drop the entry from the view
    pub async fn delete(&mut self, id: &ResourceId) -> ApiResult<()> {
        self.client.delete(&item_path::<R>(id)).await?;
        tracing::info!(resource = R::LABEL, id = %id, "Deleted");

        self.view.remove(id);
        Ok(())
    }
}

fn item_path<R: Resource>(id: &ResourceId) -> String {
    format!("{}/{}", R::PATH, urlencoding::encode(id.as_str()))
}
