//! Interactive catalog session.
//!
//! The shell owns the state that lives for one browsing session: the fetched
//! catalog, the current filter and the cart. Each command replaces one of
//! those snapshots and prints the result.

use crate::application::catalog_service::Catalog;
use crate::application::filter::FilterState;
use crate::domain::cart::Cart;
use crate::domain::error::DomainError;
use crate::domain::notice::Notice;
use crate::domain::repository::{AuthApi, CartStore, RecipeApi, SessionStore};
use crate::presentation::OutputFormat;
use crate::presentation::handlers::AppState;
use crate::presentation::output::{
    output_cart, output_detail, output_navigation, output_notice, output_recipes, output_tags,
};
use anyhow::Result;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  list                 show recipes matching the current filter
  search [text]        set the name search (empty clears it)
  tag <name>           select or deselect a tag
  clear-tags           deselect every tag
  tags                 show the tag vocabulary
  show <id>            show one recipe
  add <id>             add a recipe to the cart
  remove <id>          remove a recipe from the cart
  cart                 show the cart
  save                 save every cart item
  logout               forget the stored account
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Tag(String),
    ClearTags,
    Tags,
    Show(u64),
    Add(u64),
    Remove(u64),
    Cart,
    Save,
    Logout,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |what: &str| {
            rest.parse::<u64>()
                .map_err(|_| DomainError::Validation(format!("{} needs a recipe id", what)))
        };

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "search" => Ok(ShellCommand::Search(rest.to_string())),
            "tag" if !rest.is_empty() => Ok(ShellCommand::Tag(rest.to_string())),
            "tag" => Err(DomainError::Validation("tag needs a name".to_string())),
            "clear-tags" => Ok(ShellCommand::ClearTags),
            "tags" => Ok(ShellCommand::Tags),
            "show" => id("show").map(ShellCommand::Show),
            "add" => id("add").map(ShellCommand::Add),
            "remove" | "rm" => id("remove").map(ShellCommand::Remove),
            "cart" => Ok(ShellCommand::Cart),
            "save" => Ok(ShellCommand::Save),
            "logout" => Ok(ShellCommand::Logout),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(DomainError::Validation(format!("unknown command '{}'", other))),
        }
    }
}

/// State held for the lifetime of one browsing session.
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    pub catalog: Catalog,
    pub filter: FilterState,
    pub cart: Cart,
}

pub enum Flow {
    Continue,
    Quit,
}

impl BrowseSession {
    pub async fn apply<R, A, C, S>(
        &mut self,
        state: &AppState<R, A, C, S>,
        command: ShellCommand,
        out: &mut impl Write,
        format: &OutputFormat,
    ) -> Result<Flow>
    where
        R: RecipeApi,
        A: AuthApi,
        C: CartStore,
        S: SessionStore,
    {
        debug!(command = ?command, "Applying shell command");
        match command {
            ShellCommand::List => {
                output_recipes(out, format, &self.filter.visible(&self.catalog.recipes))?;
            }
            ShellCommand::Search(text) => {
                self.filter = self.filter.with_search(text);
                output_recipes(out, format, &self.filter.visible(&self.catalog.recipes))?;
            }
            ShellCommand::Tag(tag) => {
                if !self.catalog.tags.contains(&tag) {
                    warn!(tag = %tag, "Selected tag is not in the vocabulary");
                }
                self.filter = self.filter.toggle_tag(&tag);
                output_recipes(out, format, &self.filter.visible(&self.catalog.recipes))?;
            }
            ShellCommand::ClearTags => {
                self.filter = self.filter.clear_tags();
                output_recipes(out, format, &self.filter.visible(&self.catalog.recipes))?;
            }
            ShellCommand::Tags => {
                output_tags(out, format, &self.catalog.tags, self.filter.selected_tags())?;
            }
            ShellCommand::Show(id) => {
                let view = state.detail.load(id).await;
                output_detail(out, format, &view)?;
            }
            ShellCommand::Add(id) => match self.catalog.find(id) {
                Some(recipe) => match self.cart.add(recipe) {
                    Ok(cart) => {
                        self.cart = cart;
                        output_cart(out, format, &self.cart)?;
                    }
                    Err(e) => output_notice(out, format, &Notice::warning(e.to_string()))?,
                },
                None => {
                    output_notice(out, format, &Notice::warning(format!("Recipe {} is not in the catalog", id)))?
                }
            },
            ShellCommand::Remove(id) => {
                self.cart = self.cart.remove(id);
                output_cart(out, format, &self.cart)?;
            }
            ShellCommand::Cart => output_cart(out, format, &self.cart)?,
            ShellCommand::Save => {
                let report = state.cart.save(&self.cart).await;
                self.cart = report.cart;
                output_notice(out, format, &report.notice)?;
            }
            ShellCommand::Logout => {
                let outcome = state.auth.logout().await?;
                if let Some(route) = outcome.navigate_to {
                    output_navigation(out, format, route)?;
                }
                return Ok(Flow::Quit);
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Loads the catalog, then reads commands line by line until `quit`, `logout`
/// or end of input.
pub async fn run_shell<R, A, C, S>(
    state: &AppState<R, A, C, S>,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
    format: &OutputFormat,
) -> Result<BrowseSession>
where
    R: RecipeApi,
    A: AuthApi,
    C: CartStore,
    S: SessionStore,
{
    match state.auth.current_session().await? {
        Some(account) => writeln!(out, "Welcome, {}", account.display_name())?,
        None => writeln!(out, "Not logged in")?,
    }

    let mut session = BrowseSession::default();

    session.catalog = state.catalog.load(session.catalog.clone()).await;
    output_recipes(out, format, &session.filter.visible(&session.catalog.recipes))?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                output_notice(out, format, &Notice::warning(e.to_string()))?;
                continue;
            }
        };
        if let Flow::Quit = session.apply(state, command, out, format).await? {
            break;
        }
        out.flush()?;
    }

    Ok(session)
}
