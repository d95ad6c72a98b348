//! Field sets sent on create and update
//!
//! Every field is optional so an update can carry a subset (for example a
//! review with only `rating`). [`FieldSet::validate`] decides what a create
//! must contain.

use chrono::NaiveDate;
use reqwest::multipart::Form;
use serde_json::{Map, Value};

use super::models::{NavbarLabel, SocialPlatform, StorePlatform};
use super::{FieldSet, Upload};
use crate::client::Payload;
use crate::error::ApiResult;
use crate::validation::{check_rating, check_required, check_url, ValidationErrors};

/// Wire format of review dates
pub const REVIEW_DATE_FORMAT: &str = "%d/%m/%Y";

/// Whether a field set is for a new entity or a change to an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
}

fn require_something(errors: &mut ValidationErrors, intent: Intent, any: bool) {
    if intent == Intent::Update && !any {
        errors.add("fields", "Nothing to update");
    }
}

fn check_optional_url(errors: &mut ValidationErrors, intent: Intent, url: Option<&str>) {
    match url {
        Some(url) => check_url(errors, "url", url),
        None if intent == Intent::Create => errors.add("url", "Url is required"),
        None => {}
    }
}

fn json_payload(fields: Map<String, Value>) -> Payload {
    Payload::Json(Value::Object(fields))
}

/// Background carousel image
#[derive(Debug, Clone, Default)]
pub struct ImageFields {
    pub image: Option<Upload>,
    pub image_url: Option<String>,
}

impl ImageFields {
    pub fn upload(image: Upload) -> Self {
        Self {
            image: Some(image),
            image_url: None,
        }
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl FieldSet for ImageFields {
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let any = self.image.is_some() || self.image_url.is_some();

        if intent == Intent::Create && !any {
            errors.add("image", "Choose an image to upload");
        }
        require_something(&mut errors, intent, any);
        if let Some(image) = &self.image {
            if image.is_empty() {
                errors.add("image", "Image file is empty");
            }
        }
        if let Some(url) = &self.image_url {
            check_url(&mut errors, "imageUrl", url);
        }
        errors.into_result()
    }

    fn into_payload(self, _intent: Intent) -> ApiResult<Payload> {
        let mut form = Form::new();
        if let Some(url) = self.image_url {
            form = form.text("imageUrl", url);
        }
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        Ok(Payload::Multipart(form))
    }
}

/// App store link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreLinkFields {
    pub platform: Option<StorePlatform>,
    pub url: Option<String>,
}

impl StoreLinkFields {
    pub fn new(platform: StorePlatform, url: impl Into<String>) -> Self {
        Self {
            platform: Some(platform),
            url: Some(url.into()),
        }
    }

    pub fn platform(mut self, platform: StorePlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl FieldSet for StoreLinkFields {
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_something(&mut errors, intent, self.platform.is_some() || self.url.is_some());

        match &self.platform {
            Some(platform) if !platform.is_known() => {
                errors.add("type", "Choose google or apple")
            }
            None if intent == Intent::Create => errors.add("type", "Store type is required"),
            _ => {}
        }
        check_optional_url(&mut errors, intent, self.url.as_deref());
        errors.into_result()
    }

    fn into_payload(self, _intent: Intent) -> ApiResult<Payload> {
        let mut fields = Map::new();
        if let Some(platform) = self.platform {
            fields.insert("type".into(), Value::String(platform.into()));
        }
        if let Some(url) = self.url {
            fields.insert("url".into(), Value::String(url.trim().to_string()));
        }
        Ok(json_payload(fields))
    }
}

/// Social profile link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinkFields {
    pub platform: Option<SocialPlatform>,
    pub url: Option<String>,
}

impl SocialLinkFields {
    pub fn new(platform: SocialPlatform, url: impl Into<String>) -> Self {
        Self {
            platform: Some(platform),
            url: Some(url.into()),
        }
    }

    pub fn platform(mut self, platform: SocialPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl FieldSet for SocialLinkFields {
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_something(&mut errors, intent, self.platform.is_some() || self.url.is_some());

        match &self.platform {
            Some(platform) if !platform.is_known() => errors.add(
                "type",
                "Choose instagram, facebook, youtube or discord",
            ),
            None if intent == Intent::Create => errors.add("type", "Platform is required"),
            _ => {}
        }
        check_optional_url(&mut errors, intent, self.url.as_deref());
        errors.into_result()
    }

    fn into_payload(self, _intent: Intent) -> ApiResult<Payload> {
        let mut fields = Map::new();
        if let Some(platform) = self.platform {
            fields.insert("type".into(), Value::String(platform.into()));
        }
        if let Some(url) = self.url {
            fields.insert("url".into(), Value::String(url.trim().to_string()));
        }
        Ok(json_payload(fields))
    }
}

/// Navbar download button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarFields {
    pub label: Option<NavbarLabel>,
    pub url: Option<String>,
}

impl NavbarFields {
    pub fn new(label: NavbarLabel, url: impl Into<String>) -> Self {
        Self {
            label: Some(label),
            url: Some(url.into()),
        }
    }

    pub fn label(mut self, label: NavbarLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl FieldSet for NavbarFields {
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_something(&mut errors, intent, self.label.is_some() || self.url.is_some());

        match &self.label {
            Some(label) if !label.is_known() => {
                errors.add("label", "Choose IOS DOWNLOAD or ANDROID DOWNLOAD")
            }
            None if intent == Intent::Create => errors.add("label", "Label is required"),
            _ => {}
        }
        check_optional_url(&mut errors, intent, self.url.as_deref());
        errors.into_result()
    }

    fn into_payload(self, _intent: Intent) -> ApiResult<Payload> {
        let mut fields = Map::new();
        if let Some(label) = self.label {
            fields.insert("label".into(), Value::String(label.into()));
        }
        if let Some(url) = self.url {
            fields.insert("url".into(), Value::String(url.trim().to_string()));
        }
        Ok(json_payload(fields))
    }
}

/// Player review. Sent as a multipart form with an optional avatar file.
#[derive(Debug, Clone, Default)]
pub struct ReviewFields {
    pub name: Option<String>,
    pub game: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<u8>,
    /// `dd/mm/yyyy`; a create without one is dated today
    pub date: Option<String>,
    pub avatar: Option<Upload>,
}

impl ReviewFields {
    pub fn new(
        name: impl Into<String>,
        game: impl Into<String>,
        comment: impl Into<String>,
        rating: u8,
    ) -> Self {
        Self {
            name: Some(name.into()),
            game: Some(game.into()),
            comment: Some(comment.into()),
            rating: Some(rating),
            date: None,
            avatar: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn game(mut self, game: impl Into<String>) -> Self {
        self.game = Some(game.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn avatar(mut self, avatar: Upload) -> Self {
        self.avatar = Some(avatar);
        self
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.game.is_none()
            && self.comment.is_none()
            && self.rating.is_none()
            && self.date.is_none()
            && self.avatar.is_none()
    }
}

/// Today in the review date format
pub fn today() -> String {
    chrono::Local::now().format(REVIEW_DATE_FORMAT).to_string()
}

impl FieldSet for ReviewFields {
    fn validate(&self, intent: Intent) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_something(&mut errors, intent, !self.is_empty());

        let text_fields = [
            ("name", &self.name),
            ("game", &self.game),
            ("comment", &self.comment),
        ];
        for (field, value) in text_fields {
            match value {
                Some(value) => check_required(&mut errors, field, value),
                None if intent == Intent::Create => check_required(&mut errors, field, ""),
                None => {}
            }
        }

        match self.rating {
            Some(rating) => check_rating(&mut errors, rating),
            None if intent == Intent::Create => errors.add("rating", "Rating is required"),
            None => {}
        }

        if let Some(date) = &self.date {
            if NaiveDate::parse_from_str(date.trim(), REVIEW_DATE_FORMAT).is_err() {
                errors.add("date", "Date must be dd/mm/yyyy");
            }
        }

        errors.into_result()
    }

    fn into_payload(self, intent: Intent) -> ApiResult<Payload> {
        let date = match (self.date, intent) {
            (Some(date), _) => Some(date.trim().to_string()),
            (None, Intent::Create) => Some(today()),
            (None, Intent::Update) => None,
        };

        let mut form = Form::new();
        let text = [
            ("name", self.name.map(|v| v.trim().to_string())),
            ("game", self.game.map(|v| v.trim().to_string())),
            ("comment", self.comment.map(|v| v.trim().to_string())),
            ("rating", self.rating.map(|r| r.to_string())),
            ("date", date),
        ];
        for (name, value) in text {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }
        if let Some(avatar) = self.avatar {
            form = form.part("avatar", avatar.into_part()?);
        }
        Ok(Payload::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_of(payload: Payload) -> Value {
        match payload {
            Payload::Json(value) => value,
            Payload::Multipart(_) => panic!("expected a JSON body"),
        }
    }

    #[test]
    fn test_store_link_create_requires_both_fields() {
        let errors = StoreLinkFields::default()
            .validate(Intent::Create)
            .unwrap_err();
        assert!(errors.get("type").is_some());
        assert!(errors.get("url").is_some());

        assert!(StoreLinkFields::new(StorePlatform::Apple, "https://apps.apple.com/app/id1")
            .validate(Intent::Create)
            .is_ok());
    }

    #[test]
    fn test_partial_update_allowed_but_not_empty() {
        assert!(StoreLinkFields::default()
            .url("https://play.google.com/x")
            .validate(Intent::Update)
            .is_ok());

        let errors = StoreLinkFields::default()
            .validate(Intent::Update)
            .unwrap_err();
        assert_eq!(errors.get("fields"), Some("Nothing to update"));
    }

    #[test]
    fn test_unknown_platform_rejected_on_write() {
        let fields = SocialLinkFields::new(
            SocialPlatform::Other("myspace".into()),
            "https://myspace.com/game",
        );
        assert!(fields.validate(Intent::Create).unwrap_err().get("type").is_some());
    }

    #[test]
    fn test_url_shape_checked() {
        let errors = NavbarFields::new(NavbarLabel::IosDownload, "apps.apple.com")
            .validate(Intent::Create)
            .unwrap_err();
        assert!(errors.get("url").is_some());
    }

    #[test]
    fn test_json_payload_uses_wire_names() {
        let body = json_of(
            SocialLinkFields::new(SocialPlatform::Discord, " https://discord.gg/game ")
                .into_payload(Intent::Create)
                .unwrap(),
        );
        assert_eq!(body["type"], "discord");
        assert_eq!(body["url"], "https://discord.gg/game");

        let body = json_of(
            NavbarFields::default()
                .url("https://play.google.com/x")
                .into_payload(Intent::Update)
                .unwrap(),
        );
        assert!(body.get("label").is_none());
    }

    #[test]
    fn test_review_create_rules() {
        let errors = ReviewFields::default()
            .rating(9)
            .validate(Intent::Create)
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("game"), Some("Game is required"));
        assert_eq!(errors.get("comment"), Some("Comment is required"));
        assert_eq!(errors.get("rating"), Some("Rating must be between 1 and 5"));

        assert!(ReviewFields::new("Jo", "Skyfall", "Great", 5)
            .date("14/02/2024")
            .validate(Intent::Create)
            .is_ok());
    }

    #[test]
    fn test_review_rating_only_update() {
        assert!(ReviewFields::default()
            .rating(4)
            .validate(Intent::Update)
            .is_ok());
        assert!(ReviewFields::default()
            .comment("  ")
            .validate(Intent::Update)
            .is_err());
    }

    #[test]
    fn test_review_date_format() {
        let errors = ReviewFields::new("Jo", "Skyfall", "Great", 5)
            .date("2024-02-14")
            .validate(Intent::Create)
            .unwrap_err();
        assert_eq!(errors.get("date"), Some("Date must be dd/mm/yyyy"));
        assert!(NaiveDate::parse_from_str(&today(), REVIEW_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_image_create_needs_a_source() {
        assert!(ImageFields::default().validate(Intent::Create).is_err());
        assert!(ImageFields::upload(Upload::new("hero.png", vec![1, 2, 3]))
            .validate(Intent::Create)
            .is_ok());
        assert!(ImageFields::upload(Upload::new("hero.png", Vec::new()))
            .validate(Intent::Create)
            .is_err());
    }
}
