//! API Access
//!
//! Typed calls against the landing page backend. Transport lives in
//! [`client`]; wire records in [`models`].

pub mod client;
pub mod models;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

pub use client::{get_api_base, has_token, ApiError};
pub use models::{DashboardStats, Entity, LinkEntity, Profile};

use models::{CarouselImage, NavbarLink, Review, SocialLink, StoreLink};

#[derive(Debug, Default, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// `PATH/:id` with the id percent-encoded
pub fn item_path<E: Entity>(id: &str) -> String {
    format!("{}/{}", E::PATH, String::from(js_sys::encode_uri_component(id)))
}

// ============ Auth ============

/// Sign in and store the token
pub async fn login(email: &str, password: &str) -> Result<(), ApiError> {
    #[derive(Serialize)]
    struct LoginRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    #[derive(Deserialize)]
    struct TokenResponse {
        token: String,
    }

    let response: TokenResponse =
        client::post_json("/auth/login", &LoginRequest { email, password }).await?;
    client::save_token(&response.token);
    Ok(())
}

pub fn logout() {
    client::clear_token();
}

pub async fn register(name: &str, email: &str, phone: &str, password: &str) -> Result<String, ApiError> {
    #[derive(Serialize)]
    struct RegisterRequest<'a> {
        name: &'a str,
        email: &'a str,
        phone: &'a str,
        password: &'a str,
    }

    let response: MessageResponse = client::post_json(
        "/auth/register",
        &RegisterRequest {
            name,
            email,
            phone,
            password,
        },
    )
    .await?;
    Ok(response.message)
}

pub async fn reset_password(token: &str, password: &str) -> Result<String, ApiError> {
    #[derive(Serialize)]
    struct ResetRequest<'a> {
        password: &'a str,
    }

    let path = format!(
        "/auth/reset-password/{}",
        String::from(js_sys::encode_uri_component(token))
    );
    let response: MessageResponse = client::post_json(&path, &ResetRequest { password }).await?;
    Ok(response.message)
}

pub async fn fetch_profile() -> Result<Profile, ApiError> {
    client::get("/profile").await
}

pub async fn change_password(current: &str, new: &str) -> Result<String, ApiError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ChangeRequest<'a> {
        current_password: &'a str,
        new_password: &'a str,
    }

    let response: MessageResponse = client::put_json(
        "/change-password",
        &ChangeRequest {
            current_password: current,
            new_password: new,
        },
    )
    .await?;
    Ok(response.message)
}

// ============ Collections ============

pub async fn list<E: Entity>() -> Result<Vec<E>, ApiError> {
    client::get(E::PATH).await
}

pub async fn create_json<E: Entity, B: Serialize>(body: &B) -> Result<E, ApiError> {
    client::post_json(E::PATH, body).await
}

pub async fn update_json<E: Entity, B: Serialize>(id: &str, body: &B) -> Result<E, ApiError> {
    client::put_json(&item_path::<E>(id), body).await
}

pub async fn create_form<E: Entity>(form: web_sys::FormData) -> Result<E, ApiError> {
    client::post_form(E::PATH, form).await
}

pub async fn update_form<E: Entity>(id: &str, form: web_sys::FormData) -> Result<E, ApiError> {
    client::put_form(&item_path::<E>(id), form).await
}

pub async fn remove<E: Entity>(id: &str) -> Result<(), ApiError> {
    client::delete(&item_path::<E>(id)).await
}

async fn count<E: Entity>() -> Result<usize, ApiError> {
    let items: Vec<IgnoredAny> = client::get(E::PATH).await?;
    Ok(items.len())
}

/// All five collection counts, fetched in parallel. Each request finishes
/// even if another fails.
pub async fn fetch_stats() -> Result<DashboardStats, ApiError> {
    let (images, stores, social, navbar, reviews) = futures::future::join5(
        count::<CarouselImage>(),
        count::<StoreLink>(),
        count::<SocialLink>(),
        count::<NavbarLink>(),
        count::<Review>(),
    )
    .await;

    Ok(DashboardStats {
        images: images?,
        stores: stores?,
        links: social? + navbar?,
        reviews: reviews?,
    })
}
