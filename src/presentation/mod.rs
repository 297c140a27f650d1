pub mod handlers;
pub mod output;
pub mod shell;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "recipe_catalog")]
#[command(about = "Browse, filter, rate and collect recipes from the recipe API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Log in and store the account record")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(
            long,
            help = "Password (prompted on stdin if not provided; the prompt echoes input)"
        )]
        password: Option<String>,
    },

    #[command(about = "Remove the stored account record")]
    Logout,

    #[command(about = "Show the stored account profile")]
    Whoami,

    #[command(about = "List recipes, optionally filtered")]
    Recipes {
        #[arg(long, default_value = "", help = "Case-insensitive name search")]
        search: String,
        #[arg(long = "tag", help = "Keep recipes with any of these tags (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "List the tag vocabulary")]
    Tags,

    #[command(about = "Show one recipe")]
    Show {
        #[arg(help = "Recipe id")]
        id: u64,
    },

    #[command(about = "Rate a recipe from 1 to 5")]
    Rate {
        #[arg(help = "Recipe id")]
        id: u64,
        #[arg(help = "Rating (1-5)")]
        rating: u8,
    },

    #[command(about = "Open a route such as /recipes or /recipes/3")]
    Open {
        #[arg(help = "Route path")]
        path: String,
    },

    #[command(about = "Interactive catalog with search, tags and a cart")]
    Browse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
