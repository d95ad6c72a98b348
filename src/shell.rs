//! Command shell
//!
//! Wires storage, session, client and guard together and runs one parsed
//! command, writing human or JSON output.

use anyhow::{bail, Context};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{AuthService, Registration};
use crate::cli::{
    Command, ImageAction, NavbarAction, OutputFormat, ReviewAction, ReviewArgs, SocialLinkAction,
    StoreLinkAction, ThemeAction,
};
use crate::client::ApiClient;
use crate::config::{generate_default_config, Config};
use crate::dashboard::{Dashboard, DashboardStats};
use crate::error::ApiResult;
use crate::navigation::{Access, Navigator, RouteGuard};
use crate::resources::{
    CarouselImage, ImageFields, NavbarFields, NavbarLink, Resource, ResourceController,
    ResourceId, Review, ReviewFields, SocialLink, SocialLinkFields, StoreLink, StoreLinkFields,
    Upload,
};
use crate::session::{CredentialStore, Session};
use crate::storage::{FileStorage, KeyValueStorage};
use crate::theme::ThemeStore;

/// Widest a table cell gets before it is cut
const MAX_CELL: usize = 48;

/// What to do with one collection
enum ResourceOp<F> {
    List,
    Add(F),
    Update(ResourceId, F),
    Delete(ResourceId),
}

/// Runs commands against one configured backend and local store
pub struct Shell {
    config: Config,
    format: OutputFormat,
    client: ApiClient,
    guard: RouteGuard,
    theme: ThemeStore,
}

impl Shell {
    /// Open the file-backed store named by the configuration
    pub fn open(config: Config, format: OutputFormat) -> anyhow::Result<Self> {
        let path = config.storage.storage_file();
        let storage = FileStorage::open(&path)
            .with_context(|| format!("Failed to open local storage at {:?}", path))?;
        Self::with_storage(config, format, Arc::new(storage))
    }

    pub fn with_storage(
        config: Config,
        format: OutputFormat,
        storage: Arc<dyn KeyValueStorage>,
    ) -> anyhow::Result<Self> {
        let store = CredentialStore::new(Arc::clone(&storage));
        let session = Session::new(store.clone(), Navigator::default());
        let client = ApiClient::new(&config.api, session)?;

        Ok(Self {
            config,
            format,
            client,
            guard: RouteGuard::new(store),
            theme: ThemeStore::new(storage),
        })
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Guard, then run `command`
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> anyhow::Result<()> {
        if let Some(route) = command.route() {
            match self.guard.check(&route) {
                Access::Granted(route) => self.session().navigator().navigate(route),
                Access::Redirect(target) => {
                    self.session().navigator().navigate(target);
                    bail!("Not signed in. Run `site-admin login` first.");
                }
            }
        }

        let auth = AuthService::new(self.client.clone());

        match command {
            Command::Login { email, password } => {
                auth.login(&email, &password).await?;
                writeln!(out, "Signed in as {}", email.trim())?;
            }

            Command::Register {
                name,
                email,
                phone,
                password,
            } => {
                let message = auth
                    .register(&Registration {
                        name,
                        email,
                        phone,
                        password,
                    })
                    .await?;
                writeln!(out, "{}", message)?;
            }

            Command::ResetPassword {
                token,
                password,
                confirm,
            } => {
                let message = auth.reset_password(&token, &password, &confirm).await?;
                writeln!(out, "{}", message)?;
            }

            Command::Logout => {
                auth.logout()?;
                writeln!(out, "Signed out")?;
            }

            Command::Status => self.status(out)?,

            Command::Profile => {
                let profile = auth.profile().await?;
                match self.format {
                    OutputFormat::Json => writeln!(
                        out,
                        "{}",
                        serde_json::json!({
                            "id": profile.id,
                            "name": profile.name,
                            "email": profile.email,
                            "phone": profile.phone,
                            "createdAt": profile.created_at,
                        })
                    )?,
                    OutputFormat::Table => {
                        let dash = || "-".to_string();
                        writeln!(out, "Name:  {}", profile.name.unwrap_or_else(dash))?;
                        writeln!(out, "Email: {}", profile.email.unwrap_or_else(dash))?;
                        writeln!(out, "Phone: {}", profile.phone.unwrap_or_else(dash))?;
                    }
                }
            }

            Command::ChangePassword {
                current,
                new,
                confirm,
            } => {
                let message = auth.change_password(&current, &new, &confirm).await?;
                writeln!(out, "{}", message)?;
            }

            Command::Dashboard { watch } => self.dashboard(watch, out).await?,

            Command::Theme { action } => {
                let theme = match action.unwrap_or(ThemeAction::Show) {
                    ThemeAction::Show => self.theme.current(),
                    ThemeAction::Toggle => self.theme.toggle()?,
                };
                writeln!(out, "{}", theme)?;
            }

            Command::Config { output } => write_config(output, out)?,

            Command::Images { action } => {
                let op = match action {
                    ImageAction::List => ResourceOp::List,
                    ImageAction::Add { file } => {
                        ResourceOp::Add(ImageFields::upload(Upload::from_path(file).await?))
                    }
                    ImageAction::Update { id, file, url } => {
                        let mut fields = ImageFields::default();
                        if let Some(file) = file {
                            fields.image = Some(Upload::from_path(file).await?);
                        }
                        fields.image_url = url;
                        ResourceOp::Update(ResourceId::new(id), fields)
                    }
                    ImageAction::Delete { id } => ResourceOp::Delete(ResourceId::new(id)),
                };
                self.resource::<CarouselImage, _>(op, out).await?;
            }

            Command::StoreLinks { action } => {
                let op = match action {
                    StoreLinkAction::List => ResourceOp::List,
                    StoreLinkAction::Add { kind, url } => {
                        ResourceOp::Add(StoreLinkFields::new(kind.into(), url))
                    }
                    StoreLinkAction::Update { id, kind, url } => ResourceOp::Update(
                        ResourceId::new(id),
                        StoreLinkFields {
                            platform: kind.map(Into::into),
                            url,
                        },
                    ),
                    StoreLinkAction::Delete { id } => ResourceOp::Delete(ResourceId::new(id)),
                };
                self.resource::<StoreLink, _>(op, out).await?;
            }

            Command::SocialLinks { action } => {
                let op = match action {
                    SocialLinkAction::List => ResourceOp::List,
                    SocialLinkAction::Add { kind, url } => {
                        ResourceOp::Add(SocialLinkFields::new(kind.into(), url))
                    }
                    SocialLinkAction::Update { id, kind, url } => ResourceOp::Update(
                        ResourceId::new(id),
                        SocialLinkFields {
                            platform: kind.map(Into::into),
                            url,
                        },
                    ),
                    SocialLinkAction::Delete { id } => ResourceOp::Delete(ResourceId::new(id)),
                };
                self.resource::<SocialLink, _>(op, out).await?;
            }

            Command::Navbar { action } => {
                let op = match action {
                    NavbarAction::List => ResourceOp::List,
                    NavbarAction::Add { kind, url } => {
                        ResourceOp::Add(NavbarFields::new(kind.into(), url))
                    }
                    NavbarAction::Update { id, kind, url } => ResourceOp::Update(
                        ResourceId::new(id),
                        NavbarFields {
                            label: kind.map(Into::into),
                            url,
                        },
                    ),
                    NavbarAction::Delete { id } => ResourceOp::Delete(ResourceId::new(id)),
                };
                self.resource::<NavbarLink, _>(op, out).await?;
            }

            Command::Reviews { action } => {
                let op = match action {
                    ReviewAction::List => ResourceOp::List,
                    ReviewAction::Add(args) => ResourceOp::Add(review_fields(args).await?),
                    ReviewAction::Update { id, fields } => {
                        ResourceOp::Update(ResourceId::new(id), review_fields(fields).await?)
                    }
                    ReviewAction::Delete { id } => ResourceOp::Delete(ResourceId::new(id)),
                };
                self.resource::<Review, _>(op, out).await?;
            }
        }

        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let signed_in = self.session().store().is_present();
        match self.format {
            OutputFormat::Json => writeln!(
                out,
                "{}",
                serde_json::json!({
                    "signedIn": signed_in,
                    "apiUrl": self.client.base_url(),
                    "theme": self.theme.current().as_str(),
                })
            )?,
            OutputFormat::Table => {
                writeln!(out, "Site Admin v{}", env!("CARGO_PKG_VERSION"))?;
                writeln!(
                    out,
                    "Session: {}",
                    if signed_in { "signed in" } else { "not signed in" }
                )?;
                writeln!(out, "API:     {}", self.client.base_url())?;
                writeln!(out, "Theme:   {}", self.theme.current())?;
            }
        }
        Ok(())
    }

    async fn dashboard<W: Write>(&self, watch: bool, out: &mut W) -> anyhow::Result<()> {
        let dashboard = Dashboard::new(self.client.clone());

        if !watch {
            let stats = dashboard.refresh().await?;
            return self.print_stats(&stats, out);
        }

        let mut updates = dashboard.subscribe();
        let mut auth = self.session().subscribe();
        let task = dashboard.start_refresh(self.config.dashboard.refresh_interval());

        let ended = loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break false;
                    }
                    let stats = *updates.borrow_and_update();
                    self.print_stats(&stats, out)?;
                }
                _ = auth.changed() => {
                    if !self.session().is_authenticated() {
                        break true;
                    }
                }
                _ = tokio::signal::ctrl_c() => break false,
            }
        };

        task.stop().await;
        if ended {
            bail!("Session ended. Run `site-admin login` to sign in again.");
        }
        Ok(())
    }

    fn print_stats<W: Write>(&self, stats: &DashboardStats, out: &mut W) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(stats)?)?,
            OutputFormat::Table => write_table(
                out,
                &["Images", "Stores", "Links", "Reviews"],
                vec![vec![
                    stats.images.to_string(),
                    stats.stores.to_string(),
                    stats.links.to_string(),
                    stats.reviews.to_string(),
                ]],
            )?,
        }
        Ok(())
    }

    async fn resource<R, W>(&self, op: ResourceOp<R::Fields>, out: &mut W) -> anyhow::Result<()>
    where
        R: Resource + TableRow,
        W: Write,
    {
        let mut controller = ResourceController::<R>::new(self.client.clone());

        match op {
            ResourceOp::List => {
                controller.list().await?;
                self.print_items(controller.items(), out)?;
            }
            ResourceOp::Add(fields) => {
                let created = controller.create(fields).await?;
                if self.format == OutputFormat::Table {
                    writeln!(out, "Created {} {}", R::LABEL, created.id())?;
                }
                self.print_items(std::slice::from_ref(&created), out)?;
            }
            ResourceOp::Update(id, fields) => {
                let updated = controller.update(&id, fields).await?;
                if self.format == OutputFormat::Table {
                    writeln!(out, "Updated {} {}", R::LABEL, updated.id())?;
                }
                self.print_items(std::slice::from_ref(&updated), out)?;
            }
            ResourceOp::Delete(id) => {
                controller.delete(&id).await?;
                match self.format {
                    OutputFormat::Json => {
                        writeln!(out, "{}", serde_json::json!({ "deleted": id }))?
                    }
                    OutputFormat::Table => writeln!(out, "Deleted {} {}", R::LABEL, id)?,
                }
            }
        }
        Ok(())
    }

    fn print_items<R: TableRow, W: Write>(&self, items: &[R], out: &mut W) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(items)?)?,
            OutputFormat::Table if items.is_empty() => writeln!(out, "No entries yet.")?,
            OutputFormat::Table => {
                write_table(out, R::HEADERS, items.iter().map(TableRow::cells).collect())?
            }
        }
        Ok(())
    }
}

async fn review_fields(args: ReviewArgs) -> ApiResult<ReviewFields> {
    let avatar = match args.avatar {
        Some(path) => Some(Upload::from_path(path).await?),
        None => None,
    };
    Ok(ReviewFields {
        name: args.name,
        game: args.game,
        comment: args.comment,
        rating: args.rating,
        date: args.date,
        avatar,
    })
}

fn write_config<W: Write>(output: Option<PathBuf>, out: &mut W) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            writeln!(out, "Wrote default config to {:?}", path)?;
        }
        None => write!(out, "{}", content)?,
    }
    Ok(())
}

/// Row rendering for table output
trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn timestamp(value: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl TableRow for CarouselImage {
    const HEADERS: &'static [&'static str] = &["ID", "Image URL", "Updated"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.image_url.clone(),
            timestamp(&self.updated_at),
        ]
    }
}

impl TableRow for StoreLink {
    const HEADERS: &'static [&'static str] = &["ID", "Store", "URL"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.platform.display_name().to_string(),
            self.url.clone(),
        ]
    }
}

impl TableRow for SocialLink {
    const HEADERS: &'static [&'static str] = &["ID", "Platform", "URL"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.platform.display_name().to_string(),
            self.url.clone(),
        ]
    }
}

impl TableRow for NavbarLink {
    const HEADERS: &'static [&'static str] = &["ID", "Label", "Platform", "URL"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.label.to_string(),
            format!("{:?}", self.platform()),
            self.url.clone(),
        ]
    }
}

impl TableRow for Review {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Game", "Rating", "Date", "Comment"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.game.clone(),
            format!("{}/5", self.rating),
            self.date.clone(),
            self.comment.clone(),
        ]
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL {
        cell.to_string()
    } else {
        let cut: String = cell.chars().take(MAX_CELL - 3).collect();
        format!("{}...", cut)
    }
}

fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.iter().map(|c| truncate(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(headers.to_vec()))?;
    writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)))?;
    for row in &rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::navigation::Route;
    use crate::storage::MemoryStorage;
    use crate::testing::FakeBackend;
    use clap::Parser;
    use serde_json::{json, Value};

    fn shell(backend: &FakeBackend, format: OutputFormat) -> (Shell, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let config = Config {
            api: backend.config(),
            ..Config::default()
        };
        let shell = Shell::with_storage(config, format, storage.clone()).unwrap();
        (shell, storage)
    }

    async fn run(shell: &Shell, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("site-admin").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        shell.run(cli.command, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_write_table_aligns_and_truncates() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            &["ID", "URL"],
            vec![
                vec!["a".into(), "https://x.test".into()],
                vec!["bbbb".into(), "x".repeat(60)],
            ],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID    URL");
        assert!(lines[2].starts_with("a     https://x.test"));
        assert!(lines[3].ends_with("..."));
        assert_eq!(lines[3].chars().count(), 6 + MAX_CELL);
    }

    #[tokio::test]
    async fn test_protected_command_requires_login() {
        let backend = FakeBackend::start().await;
        let (shell, _) = shell(&backend, OutputFormat::Table);

        let err = run(&shell, &["reviews", "list"]).await.unwrap_err();
        assert!(err.to_string().contains("Not signed in"));
        assert_eq!(shell.session().navigator().current(), Route::Login);
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_then_manage_reviews() {
        let backend = FakeBackend::start().await;
        let (shell, _) = shell(&backend, OutputFormat::Json);

        let output = run(&shell, &["login", "-e", "a@b.com", "-p", "secret1"])
            .await
            .unwrap();
        assert_eq!(output.trim(), "Signed in as a@b.com");

        let output = run(
            &shell,
            &["reviews", "add", "--name", "Jo", "--game", "Skyfall", "--comment", "Fun", "--rating", "5"],
        )
        .await
        .unwrap();
        let created: Value = serde_json::from_str(&output).unwrap();
        let id = created[0]["_id"].as_str().unwrap().to_string();

        run(&shell, &["reviews", "update", &id, "--rating", "4"])
            .await
            .unwrap();
        let listed: Value = serde_json::from_str(&run(&shell, &["reviews", "list"]).await.unwrap())
            .unwrap();
        assert_eq!(listed[0]["rating"], 4);

        let output = run(&shell, &["reviews", "delete", &id]).await.unwrap();
        assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), json!({ "deleted": id }));

        for request in backend.requests_to("/reviews") {
            assert_eq!(request.authorization.as_deref(), Some("Bearer tok123"));
        }
    }

    #[tokio::test]
    async fn test_table_listing() {
        let backend = FakeBackend::start().await;
        backend.seed(
            "navbar",
            json!({"_id": "n1", "label": "ANDROID DOWNLOAD", "url": "https://play.google.com/x"}),
        );
        let (shell, _) = shell(&backend, OutputFormat::Table);
        run(&shell, &["login", "-e", "a@b.com", "-p", "secret1"])
            .await
            .unwrap();

        let output = run(&shell, &["navbar", "list"]).await.unwrap();
        assert!(output.starts_with("ID"));
        assert!(output.contains("ANDROID DOWNLOAD  Android"));

        let output = run(&shell, &["store-links", "list"]).await.unwrap();
        assert_eq!(output.trim(), "No entries yet.");
    }

    #[tokio::test]
    async fn test_dashboard_once() {
        let backend = FakeBackend::start().await;
        backend.seed("social-links", json!({"type": "discord", "url": "https://discord.gg/x"}));
        backend.seed("navbar", json!({"label": "IOS DOWNLOAD", "url": "https://apps.apple.com"}));
        let (shell, _) = shell(&backend, OutputFormat::Json);
        run(&shell, &["login", "-e", "a@b.com", "-p", "secret1"])
            .await
            .unwrap();

        let output = run(&shell, &["dashboard"]).await.unwrap();
        let stats: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(stats["links"], 2);
        assert_eq!(stats["images"], 0);
    }

    #[tokio::test]
    async fn test_expired_session_surfaces_and_clears() {
        let backend = FakeBackend::start().await;
        let (shell, storage) = shell(&backend, OutputFormat::Table);
        run(&shell, &["login", "-e", "a@b.com", "-p", "secret1"])
            .await
            .unwrap();
        backend.revoke_tokens();

        let err = run(&shell, &["profile"]).await.unwrap_err();
        let api = err.downcast_ref::<crate::error::ApiError>().unwrap();
        assert!(api.is_unauthorized());
        assert!(storage.get(crate::session::TOKEN_KEY).unwrap().is_none());
        assert_eq!(shell.session().navigator().current(), Route::Login);
    }

    #[tokio::test]
    async fn test_local_commands() {
        let backend = FakeBackend::start().await;
        let (shell, _) = shell(&backend, OutputFormat::Table);

        assert_eq!(run(&shell, &["theme"]).await.unwrap().trim(), "light");
        assert_eq!(run(&shell, &["theme", "toggle"]).await.unwrap().trim(), "dark");

        let status = run(&shell, &["status"]).await.unwrap();
        assert!(status.contains("not signed in"));
        assert!(status.contains("Theme:   dark"));

        let config = run(&shell, &["config"]).await.unwrap();
        assert!(config.contains("[dashboard]"));
        assert!(backend.requests().is_empty());
    }
}
