//! Site Content Resources
//!
//! The five collections the console manages, each a REST resource under a
//! fixed path:
//!
//! - **models**: typed records as the server returns them
//! - **fields**: client-side field sets sent on create/update
//! - **controller**: list/create/update/delete plus the local view list
//!
//! All five share one reconciliation strategy, see [`ResourceController`].

pub mod controller;
pub mod fields;
pub mod models;
mod upload;

pub use controller::{
    ImageController, NavbarController, ResourceController, ReviewController,
    SocialLinkController, StoreLinkController, ViewList,
};
pub use fields::{
    ImageFields, Intent, NavbarFields, ReviewFields, SocialLinkFields, StoreLinkFields,
};
pub use models::{
    CarouselImage, NavbarLabel, NavbarLink, NavbarPlatform, Review, SocialLink, SocialPlatform,
    StoreLink, StorePlatform,
};
pub use upload::Upload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::Payload;
use crate::error::ApiResult;
use crate::validation::ValidationErrors;

/// Server-assigned identifier (`_id` on the wire). Never generated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A collection exposed by the API at `PATH` and `PATH/:id`
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base
    const PATH: &'static str;

    /// Human name used in logs and messages
    const LABEL: &'static str;

    /// What the console sends on create and update
    type Fields: FieldSet;

    fn id(&self) -> &ResourceId;
}

/// Field set for one resource's writes
pub trait FieldSet: Send {
    /// Check fields before dispatch. Creates must be complete; updates may
    /// carry any subset.
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors>;

    /// Encode as the body the API expects
    fn into_payload(self, intent: Intent) -> ApiResult<Payload>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_is_transparent() {
        let id: ResourceId = serde_json::from_str("\"65a1f0c2\"").unwrap();
        assert_eq!(id, ResourceId::from("65a1f0c2"));
        assert_eq!(id.to_string(), "65a1f0c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65a1f0c2\"");
    }
}
