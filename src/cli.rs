//! Command-line interface definition
//!
//! Every command that reaches the API names the console route it stands
//! for; the shell runs it through the route guard first.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::navigation::Route;
use crate::resources::{NavbarLabel, SocialPlatform, StorePlatform};

#[derive(Debug, Parser)]
#[command(name = "site-admin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage landing page content: carousel, links, navbar buttons and reviews")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ~/.config/site-admin/config.toml or ./site-admin.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SITE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an administrator account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// 10 digit phone number
        #[arg(long)]
        phone: String,
        #[arg(long, env = "SITE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Set a new password using the token from a reset email
    ResetPassword {
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Show the signed-in user's profile
    Profile,

    /// Change the signed-in user's password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// Show content counts
    Dashboard {
        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,
    },

    /// Show or toggle the light/dark preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Background carousel images
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// App store links
    StoreLinks {
        #[command(subcommand)]
        action: StoreLinkAction,
    },

    /// Social profile links
    SocialLinks {
        #[command(subcommand)]
        action: SocialLinkAction,
    },

    /// Navbar download buttons
    Navbar {
        #[command(subcommand)]
        action: NavbarAction,
    },

    /// Player reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
}

impl Command {
    /// Console route this command acts on. Local commands have none and
    /// skip the guard.
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } => Some(Route::Login),
            Command::Register { .. } => Some(Route::Register),
            Command::ResetPassword { token, .. } => Some(Route::ResetPassword {
                token: token.clone(),
            }),
            Command::Profile | Command::ChangePassword { .. } => Some(Route::Profile),
            Command::Dashboard { .. } => Some(Route::Dashboard),
            Command::Images { .. } => Some(Route::BackgroundCarousel),
            Command::StoreLinks { .. } => Some(Route::StoreLinks),
            Command::SocialLinks { .. } => Some(Route::SocialLinks),
            Command::Navbar { .. } => Some(Route::NavbarButtons),
            Command::Reviews { .. } => Some(Route::Reviews),
            Command::Logout | Command::Status | Command::Theme { .. } | Command::Config { .. } => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeAction {
    /// Print the current preference
    Show,
    /// Switch between light and dark
    Toggle,
}

#[derive(Debug, Subcommand)]
pub enum ImageAction {
    List,
    /// Upload an image file
    Add { file: PathBuf },
    /// Replace an image's file or URL
    Update {
        id: String,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
    },
    Delete { id: String },
}

/// Choice enum for a link collection's `type`/`label` plus its
/// list/add/update/delete subcommands
macro_rules! link_actions {
    ($action:ident, $choice:ident => $value:ty { $($variant:ident => $target:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
        pub enum $choice {
            $($variant,)+
        }

        impl From<$choice> for $value {
            fn from(choice: $choice) -> Self {
                match choice {
                    $($choice::$variant => $target,)+
                }
            }
        }

        #[derive(Debug, Subcommand)]
        pub enum $action {
            List,
            Add {
                #[arg(long = "type", value_enum)]
                kind: $choice,
                #[arg(long)]
                url: String,
            },
            Update {
                id: String,
                #[arg(long = "type", value_enum)]
                kind: Option<$choice>,
                #[arg(long)]
                url: Option<String>,
            },
            Delete {
                id: String,
            },
        }
    };
}

link_actions!(StoreLinkAction, StoreChoice => StorePlatform {
    Google => StorePlatform::Google,
    Apple => StorePlatform::Apple,
});

link_actions!(SocialLinkAction, SocialChoice => SocialPlatform {
    Instagram => SocialPlatform::Instagram,
    Facebook => SocialPlatform::Facebook,
    Youtube => SocialPlatform::Youtube,
    Discord => SocialPlatform::Discord,
});

link_actions!(NavbarAction, NavbarChoice => NavbarLabel {
    Ios => NavbarLabel::IosDownload,
    Android => NavbarLabel::AndroidDownload,
});

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub game: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
    /// 1 to 5 stars
    #[arg(long)]
    pub rating: Option<u8>,
    /// dd/mm/yyyy (default on add: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Avatar image file
    #[arg(long)]
    pub avatar: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ReviewAction {
    List,
    Add(ReviewArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: ReviewArgs,
    },
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("site-admin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_login_parses() {
        let cli = parse(&["login", "--email", "a@b.com", "--password", "secret1"]);
        assert!(matches!(cli.command, Command::Login { ref email, .. } if email == "a@b.com"));
        assert_eq!(cli.command.route(), Some(Route::Login));
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_resource_commands_map_to_protected_routes() {
        let cli = parse(&["reviews", "update", "r1", "--rating", "4", "-f", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.command.route(), Some(Route::Reviews));
        match cli.command {
            Command::Reviews {
                action: ReviewAction::Update { id, fields },
            } => {
                assert_eq!(id, "r1");
                assert_eq!(fields.rating, Some(4));
                assert!(fields.name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = parse(&["store-links", "add", "--type", "google", "--url", "https://x.test"]);
        assert_eq!(cli.command.route(), Some(Route::StoreLinks));
        assert!(cli.command.route().unwrap().is_protected());
    }

    #[test]
    fn test_navbar_choice_maps_to_label() {
        let cli = parse(&["navbar", "add", "--type", "android", "--url", "https://x.test"]);
        match cli.command {
            Command::Navbar {
                action: NavbarAction::Add { kind, .. },
            } => assert_eq!(NavbarLabel::from(kind), NavbarLabel::AndroidDownload),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_local_commands_skip_guard() {
        assert_eq!(parse(&["status"]).command.route(), None);
        assert_eq!(parse(&["theme", "toggle"]).command.route(), None);
        assert_eq!(parse(&["logout"]).command.route(), None);
    }

    #[test]
    fn test_unknown_store_type_rejected() {
        assert!(Cli::try_parse_from([
            "site-admin",
            "store-links",
            "add",
            "--type",
            "steam",
            "--url",
            "https://x.test"
        ])
        .is_err());
    }
}
