use crate::application::auth_service::{AuthService, AuthState};
use crate::application::cart_service::CartService;
use crate::application::catalog_service::{Catalog, CatalogService};
use crate::application::detail_service::{DetailService, DetailView};
use crate::application::filter;
use crate::data::auth_client::HttpAuthApi;
use crate::data::cart_client::HttpCartStore;
use crate::data::http::build_client;
use crate::data::recipe_client::HttpRecipeApi;
use crate::data::session_store::FileSessionStore;
use crate::domain::notice::Notice;
use crate::domain::repository::{AuthApi, CartStore, RecipeApi, SessionStore};
use crate::domain::route::Route;
use crate::domain::session::Credentials;
use crate::infrastructure::config::AppConfig;
use crate::presentation::output::{
    output_detail, output_navigation, output_notice, output_profile, output_recipes, output_tags,
};
use crate::presentation::{Cli, Commands, OutputFormat, shell};
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument};

/// Services shared by every command.
pub struct AppState<R: RecipeApi, A: AuthApi, C: CartStore, S: SessionStore> {
    pub catalog: CatalogService<R>,
    pub detail: DetailService<R>,
    pub cart: CartService<C>,
    pub auth: AuthService<A, S>,
}

pub type HttpAppState = AppState<HttpRecipeApi, HttpAuthApi, HttpCartStore, FileSessionStore>;

impl<R: RecipeApi, A: AuthApi, C: CartStore, S: SessionStore> AppState<R, A, C, S> {
    pub fn new(recipes: Arc<R>, auth: Arc<A>, carts: Arc<C>, sessions: Arc<S>) -> Self {
        Self {
            catalog: CatalogService::new(recipes.clone()),
            detail: DetailService::new(recipes),
            cart: CartService::new(carts),
            auth: AuthService::new(auth, sessions),
        }
    }
}

impl HttpAppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.request_timeout)?;
        info!(
            recipe_api = %config.recipe_api_url,
            auth_api = %config.auth_api_url,
            cart_api = %config.cart_api_url,
            session_dir = %config.session_dir.display(),
            "Configured remote services"
        );
        Ok(Self::new(
            Arc::new(HttpRecipeApi::new(client.clone(), config.recipe_api_url.clone())),
            Arc::new(HttpAuthApi::new(client.clone(), config.auth_api_url.clone())),
            Arc::new(HttpCartStore::new(client, config.cart_api_url.clone())),
            Arc::new(FileSessionStore::new(config.session_dir.clone())),
        ))
    }
}

/// Runs one command. `Ok(false)` means a failure was already reported to the
/// user and the process should exit non-zero.
pub async fn run<R, A, C, S>(cli: Cli, state: &AppState<R, A, C, S>) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let format = OutputFormat::from_cli(&cli);
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password().await?,
            };
            login(state, Credentials::new(username, password), &mut out, &format).await
        }
        Commands::Logout => logout(state, &mut out, &format).await,
        Commands::Whoami => whoami(state, &mut out, &format).await,
        Commands::Recipes { search, tags } => list_recipes(state, &search, &tags, &mut out, &format).await,
        Commands::Tags => list_tags(state, &mut out, &format).await,
        Commands::Show { id } => show(state, id, &mut out, &format).await,
        Commands::Rate { id, rating } => rate(state, id, rating, &mut out, &format).await,
        Commands::Open { path } => open(state, &path, &mut out, &format).await,
        Commands::Browse => {
            let input = BufReader::new(tokio::io::stdin());
            shell::run_shell(state, input, &mut out, &format).await?;
            Ok(true)
        }
    }
}

async fn prompt_password() -> Result<String> {
    eprint!("Password (input is echoed): ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[instrument(skip_all, fields(username = %credentials.username))]
pub async fn login<R, A, C, S>(
    state: &AppState<R, A, C, S>,
    credentials: Credentials,
    out: &mut impl Write,
    format: &OutputFormat,
) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let outcome = state.auth.login(AuthState::Idle, credentials).await;

    match &outcome.state {
        AuthState::Authenticated(session) => {
            output_notice(out, format, &Notice::success(format!("Welcome, {}", session.display_name())))?;
        }
        AuthState::Failed(message) => {
            output_notice(out, format, &Notice::error(message.clone()))?;
        }
        AuthState::Idle | AuthState::Submitting => {}
    }
    if let Some(route) = outcome.navigate_to {
        output_navigation(out, format, route)?;
    }
    Ok(outcome.state.session().is_some())
}

pub async fn logout<R, A, C, S>(state: &AppState<R, A, C, S>, out: &mut impl Write, format: &OutputFormat) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let outcome = state.auth.logout().await?;
    output_notice(out, format, &Notice::success("Logged out"))?;
    if let Some(route) = outcome.navigate_to {
        output_navigation(out, format, route)?;
    }
    Ok(true)
}

pub async fn whoami<R, A, C, S>(state: &AppState<R, A, C, S>, out: &mut impl Write, format: &OutputFormat) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let session = state.auth.current_session().await?;
    output_profile(out, format, session.as_ref().map(|s| &s.profile))?;
    Ok(true)
}

pub async fn list_recipes<R, A, C, S>(
    state: &AppState<R, A, C, S>,
    search: &str,
    tags: &[String],
    out: &mut impl Write,
    format: &OutputFormat,
) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let catalog = state.catalog.load(Catalog::default()).await;
    let visible = filter::visible(&catalog.recipes, search, tags);
    output_recipes(out, format, &visible)?;
    Ok(true)
}

pub async fn list_tags<R, A, C, S>(state: &AppState<R, A, C, S>, out: &mut impl Write, format: &OutputFormat) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let catalog = state.catalog.load(Catalog::default()).await;
    output_tags(out, format, &catalog.tags, &[])?;
    Ok(true)
}

pub async fn show<R, A, C, S>(state: &AppState<R, A, C, S>, id: u64, out: &mut impl Write, format: &OutputFormat) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    let view = state.detail.load(id).await;
    output_detail(out, format, &view)?;
    Ok(view.is_loaded())
}

pub async fn rate<R, A, C, S>(
    state: &AppState<R, A, C, S>,
    id: u64,
    rating: u8,
    out: &mut impl Write,
    format: &OutputFormat,
) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    // Reject out-of-range values before any request goes out.
    DetailView::loading(id).select(rating)?;

    let view = state.detail.load(id).await.select(rating)?;
    match state.detail.submit_rating(&view).await {
        Ok(updated) => {
            let shown = updated.rating().map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
            output_notice(out, format, &Notice::success(format!("Rating: {}", shown)))?;
            Ok(true)
        }
        Err(_) => {
            let shown = view.rating().map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
            output_notice(out, format, &Notice::error(format!("Rating was not submitted (still {})", shown)))?;
            Ok(false)
        }
    }
}

pub async fn open<R, A, C, S>(
    state: &AppState<R, A, C, S>,
    path: &str,
    out: &mut impl Write,
    format: &OutputFormat,
) -> Result<bool>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    match path.parse::<Route>()? {
        Route::Catalog => list_recipes(state, "", &[], out, format).await,
        Route::Detail(id) => show(state, id, out, format).await,
        Route::Login => whoami(state, out, format).await,
    }
}
