//! Resource records as returned by the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ImageFields, NavbarFields, Resource, ResourceId, ReviewFields, SocialLinkFields, StoreLinkFields};

/// Closed set of wire strings plus a catch-all that keeps whatever the
/// server sent, so an unexpected value degrades to a generic label instead of
/// failing the whole list.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(value) => value,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }

            /// Case-insensitive match against the known wire strings
            pub fn parse(value: &str) -> Self {
                $(if value.trim().eq_ignore_ascii_case($wire) {
                    return $name::$variant;
                })+
                $name::Other(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// App store a store link points to
    StorePlatform {
        Google => "google",
        Apple => "apple",
    }
}

wire_enum! {
    /// Social network a social link points to
    SocialPlatform {
        Instagram => "instagram",
        Facebook => "facebook",
        Youtube => "youtube",
        Discord => "discord",
    }
}

wire_enum! {
    /// Caption of a navbar download button
    NavbarLabel {
        IosDownload => "IOS DOWNLOAD",
        AndroidDownload => "ANDROID DOWNLOAD",
    }
}

impl StorePlatform {
    pub fn display_name(&self) -> &str {
        match self {
            StorePlatform::Google => "Google Play",
            StorePlatform::Apple => "App Store",
            StorePlatform::Other(_) => "Store",
        }
    }
}

impl SocialPlatform {
    pub fn display_name(&self) -> &str {
        match self {
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Youtube => "YouTube",
            SocialPlatform::Discord => "Discord",
            SocialPlatform::Other(_) => "Social",
        }
    }
}

/// Platform a navbar button targets, derived from its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarPlatform {
    Ios,
    Android,
}

impl NavbarLabel {
    pub fn platform(&self) -> NavbarPlatform {
        if self.as_str().to_ascii_lowercase().contains("android") {
            NavbarPlatform::Android
        } else {
            NavbarPlatform::Ios
        }
    }
}

/// Background carousel image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// App store download link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLink {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub platform: StorePlatform,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Social profile link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub platform: SocialPlatform,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Download button in the site navbar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarLink {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub label: NavbarLabel,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NavbarLink {
    pub fn platform(&self) -> NavbarPlatform {
        self.label.platform()
    }
}

/// Player review shown on the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub name: String,
    pub game: String,
    pub comment: String,
    pub rating: u8,
    /// `dd/mm/yyyy`
    pub date: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for CarouselImage {
    const PATH: &'static str = "/bgcarousel";
    const LABEL: &'static str = "carousel image";
    type Fields = ImageFields;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Resource for StoreLink {
    const PATH: &'static str = "/store-links";
    const LABEL: &'static str = "store link";
    type Fields = StoreLinkFields;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Resource for SocialLink {
    const PATH: &'static str = "/social-links";
    const LABEL: &'static str = "social link";
    type Fields = SocialLinkFields;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Resource for NavbarLink {
    const PATH: &'static str = "/navbar";
    const LABEL: &'static str = "navbar button";
    type Fields = NavbarFields;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Resource for Review {
    const PATH: &'static str = "/reviews";
    const LABEL: &'static str = "review";
    type Fields = ReviewFields;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_store_link_from_wire() {
        let link: StoreLink = serde_json::from_value(json!({
            "_id": "s1",
            "type": "google",
            "url": "https://play.google.com/store/apps/details?id=game",
            "createdAt": "2024-03-01T12:00:00.000Z",
            "updatedAt": "2024-03-02T12:00:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(link.id, ResourceId::from("s1"));
        assert_eq!(link.platform, StorePlatform::Google);
        assert!(link.created_at.unwrap() < link.updated_at.unwrap());
    }

    #[test]
    fn test_unknown_platform_is_preserved() {
        let link: SocialLink = serde_json::from_value(json!({
            "_id": "x1",
            "type": "tiktok",
            "url": "https://tiktok.com/@game"
        }))
        .unwrap();

        assert_eq!(link.platform, SocialPlatform::Other("tiktok".to_string()));
        assert!(!link.platform.is_known());
        assert_eq!(link.platform.display_name(), "Social");
        assert_eq!(serde_json::to_value(&link).unwrap()["type"], "tiktok");
    }

    #[test]
    fn test_platform_parse_is_case_insensitive() {
        assert_eq!(StorePlatform::parse("Apple"), StorePlatform::Apple);
        assert_eq!(SocialPlatform::parse(" YouTube "), SocialPlatform::Youtube);
        assert_eq!(NavbarLabel::parse("android download"), NavbarLabel::AndroidDownload);
    }

    #[test]
    fn test_navbar_platform_follows_label() {
        assert_eq!(NavbarLabel::AndroidDownload.platform(), NavbarPlatform::Android);
        assert_eq!(NavbarLabel::IosDownload.platform(), NavbarPlatform::Ios);
        assert_eq!(
            NavbarLabel::Other("Get it on Android".into()).platform(),
            NavbarPlatform::Android
        );
        assert_eq!(NavbarLabel::Other("DOWNLOAD".into()).platform(), NavbarPlatform::Ios);
    }

    #[test]
    fn test_review_without_timestamps_or_avatar() {
        let review: Review = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Jo",
            "game": "Skyfall",
            "comment": "Great",
            "rating": 5,
            "date": "01/02/2024"
        }))
        .unwrap();

        assert!(review.avatar.is_none());
        assert!(review.created_at.is_none());
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let result: Result<Review, _> = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Jo",
            "rating": "five"
        }));
        assert!(result.is_err());
    }
}
