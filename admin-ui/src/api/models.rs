//! Wire records for the landing page collections.

use serde::{Deserialize, Serialize};

/// A server-side collection
pub trait Entity: Clone + PartialEq + serde::de::DeserializeOwned + 'static {
    /// Collection path under the API base
    const PATH: &'static str;
    /// Singular name for messages
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// Link collections edited with a type/label picker and a URL
pub trait LinkEntity: Entity {
    /// Body field holding the picker value
    const FIELD: &'static str;
    /// Picker values and their display names
    const OPTIONS: &'static [(&'static str, &'static str)];

    fn kind(&self) -> &str;
    fn url(&self) -> &str;
}

pub const STORE_TYPES: &[(&str, &str)] = &[("google", "Google Play"), ("apple", "App Store")];

pub const SOCIAL_TYPES: &[(&str, &str)] = &[
    ("instagram", "Instagram"),
    ("facebook", "Facebook"),
    ("youtube", "YouTube"),
    ("discord", "Discord"),
];

pub const NAVBAR_LABELS: &[(&str, &str)] = &[
    ("IOS DOWNLOAD", "iOS Download"),
    ("ANDROID DOWNLOAD", "Android Download"),
];

/// Display name for a picker value; unknown values show as sent
pub fn display_name(options: &[(&str, &str)], value: &str) -> String {
    options
        .iter()
        .find(|(wire, _)| wire.eq_ignore_ascii_case(value))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoreLink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SocialLink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavbarLink {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub url: String,
}

impl NavbarLink {
    /// `android` when the label mentions it, otherwise `ios`
    pub fn platform(&self) -> &'static str {
        if self.label.to_lowercase().contains("android") {
            "android"
        } else {
            "ios"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Five-character star bar for a 1..=5 rating
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Content counts on the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub images: usize,
    pub stores: usize,
    /// Social links plus navbar buttons
    pub links: usize,
    pub reviews: usize,
}

impl Entity for CarouselImage {
    const PATH: &'static str = "/bgcarousel";
    const LABEL: &'static str = "Image";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for StoreLink {
    const PATH: &'static str = "/store-links";
    const LABEL: &'static str = "Store link";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for SocialLink {
    const PATH: &'static str = "/social-links";
    const LABEL: &'static str = "Social link";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for NavbarLink {
    const PATH: &'static str = "/navbar";
    const LABEL: &'static str = "Navbar button";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Review {
    const PATH: &'static str = "/reviews";
    const LABEL: &'static str = "Review";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LinkEntity for StoreLink {
    const FIELD: &'static str = "type";
    const OPTIONS: &'static [(&'static str, &'static str)] = STORE_TYPES;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl LinkEntity for SocialLink {
    const FIELD: &'static str = "type";
    const OPTIONS: &'static [(&'static str, &'static str)] = SOCIAL_TYPES;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl LinkEntity for NavbarLink {
    const FIELD: &'static str = "label";
    const OPTIONS: &'static [(&'static str, &'static str)] = NAVBAR_LABELS;

    fn kind(&self) -> &str {
        &self.label
    }

    fn url(&self) -> &str {
        &self.url
    }
}
