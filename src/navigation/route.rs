//! Route table
//!
//! Every destination the console can show, with its path and whether it sits
//! behind the route guard.

use std::fmt;

/// A navigation destination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    ResetPassword { token: String },
    Dashboard,
    BackgroundCarousel,
    StoreLinks,
    SocialLinks,
    NavbarButtons,
    Reviews,
    Profile,
}

impl Route {
    /// Sidebar entries, in display order
    pub const SIDEBAR: [Route; 6] = [
        Route::Dashboard,
        Route::BackgroundCarousel,
        Route::StoreLinks,
        Route::SocialLinks,
        Route::NavbarButtons,
        Route::Reviews,
    ];

    /// Resolve a location path to a route.
    ///
    /// Query strings and fragments are ignored. Paths that match nothing fall
    /// through to the dashboard, which is then subject to the guard like any
    /// other protected destination.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        match path {
            "" => Route::Dashboard,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/forgot-password" => Route::ForgotPassword,
            "/bgcarousel" => Route::BackgroundCarousel,
            "/storelinks" => Route::StoreLinks,
            "/sociallinks" => Route::SocialLinks,
            "/navbarbuttons" => Route::NavbarButtons,
            "/reviews" => Route::Reviews,
            "/profile" => Route::Profile,
            other => match other.strip_prefix("/reset-password/") {
                Some(token) if !token.is_empty() && !token.contains('/') => Route::ResetPassword {
                    token: urlencoding::decode(token)
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| token.to_string()),
                },
                _ => Route::Dashboard,
            },
        }
    }

    /// Location path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { token } => {
                format!("/reset-password/{}", urlencoding::encode(token))
            }
            Route::Dashboard => "/".to_string(),
            Route::BackgroundCarousel => "/bgcarousel".to_string(),
            Route::StoreLinks => "/storelinks".to_string(),
            Route::SocialLinks => "/sociallinks".to_string(),
            Route::NavbarButtons => "/navbarbuttons".to_string(),
            Route::Reviews => "/reviews".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Whether rendering requires a session
    pub fn is_protected(&self) -> bool {
        !self.is_auth_page()
    }

    /// Auth pages render without the sidebar and top bar
    pub fn is_auth_page(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::Register | Route::ForgotPassword | Route::ResetPassword { .. }
        )
    }

    /// Human-readable label used by the sidebar and page headers
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::ForgotPassword => "Forgot Password",
            Route::ResetPassword { .. } => "Reset Password",
            Route::Dashboard => "Dashboard",
            Route::BackgroundCarousel => "Background Carousel",
            Route::StoreLinks => "Store Links",
            Route::SocialLinks => "Social Links",
            Route::NavbarButtons => "Navbar Buttons",
            Route::Reviews => "Reviews",
            Route::Profile => "Profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/reviews/"), Route::Reviews);
        assert_eq!(Route::parse("/storelinks?page=2"), Route::StoreLinks);
        assert_eq!(Route::parse("/navbarbuttons#top"), Route::NavbarButtons);
    }

    #[test]
    fn test_parse_reset_password_token() {
        assert_eq!(
            Route::parse("/reset-password/abc%20def"),
            Route::ResetPassword {
                token: "abc def".to_string()
            }
        );
        assert_eq!(Route::parse("/reset-password"), Route::Dashboard);
    }

    #[test]
    fn test_unknown_path_falls_back_to_dashboard() {
        assert_eq!(Route::parse("/does-not-exist"), Route::Dashboard);
        assert_eq!(Route::parse("/reviews/r1/edit"), Route::Dashboard);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in Route::SIDEBAR.iter().chain(&[
            Route::Login,
            Route::Register,
            Route::ForgotPassword,
            Route::Profile,
            Route::ResetPassword {
                token: "t/k n".to_string(),
            },
        ]) {
            assert_eq!(&Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_protection() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::Reviews.is_protected());
        assert!(Route::Profile.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::ResetPassword {
            token: "x".to_string()
        }
        .is_protected());
    }
}
