use crate::application::detail_service::DetailView;
use crate::domain::cart::Cart;
use crate::domain::notice::{Notice, NoticeLevel};
use crate::domain::recipe::Recipe;
use crate::domain::route::Route;
use crate::presentation::OutputFormat;
use serde_json::{Value, json};
use std::io::Write;

/// Prints a user-facing notice.
pub fn output_notice(out: &mut impl Write, format: &OutputFormat, notice: &Notice) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "success": notice.is_success(),
                "level": notice.level,
                "message": notice.message,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        OutputFormat::Text => {
            let marker = match notice.level {
                NoticeLevel::Success => "✓",
                NoticeLevel::Warning => "!",
                NoticeLevel::Error => "Error:",
            };
            writeln!(out, "{} {}", marker, notice.message)?;
        }
    }
    Ok(())
}

pub fn output_navigation(out: &mut impl Write, format: &OutputFormat, route: Route) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "navigate_to": route.to_string() }))?)?;
        }
        OutputFormat::Text => writeln!(out, "→ {}", route)?,
    }
    Ok(())
}

pub fn output_recipes(out: &mut impl Write, format: &OutputFormat, recipes: &[&Recipe]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "recipes": recipes }))?)?;
        }
        OutputFormat::Text => {
            if recipes.is_empty() {
                writeln!(out, "Empty")?;
                return Ok(());
            }
            for recipe in recipes {
                writeln!(out, "{}", recipe_row(recipe))?;
            }
        }
    }
    Ok(())
}

pub fn recipe_row(recipe: &Recipe) -> String {
    let tags = if recipe.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", recipe.tags.join(", "))
    };
    format!("{:>4}  {:>4.1}  {}{}", recipe.id, recipe.rating, recipe.name, tags)
}

/// Tags in two columns, selected ones marked with `*`.
pub fn output_tags(
    out: &mut impl Write,
    format: &OutputFormat,
    tags: &[String],
    selected: &[String],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "tags": tags, "selected": selected }))?)?;
        }
        OutputFormat::Text => {
            if tags.is_empty() {
                writeln!(out, "Empty")?;
                return Ok(());
            }
            let label = |tag: &String| {
                let mark = if selected.contains(tag) { "*" } else { " " };
                format!("{}{}", mark, tag)
            };
            let half = tags.len().div_ceil(2);
            let (left, right) = tags.split_at(half);
            for (i, tag) in left.iter().enumerate() {
                match right.get(i) {
                    Some(other) => writeln!(out, "{:<24}{}", label(tag), label(other))?,
                    None => writeln!(out, "{}", label(tag))?,
                }
            }
        }
    }
    Ok(())
}

pub fn output_cart(out: &mut impl Write, format: &OutputFormat, cart: &Cart) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "cart": cart.items() }))?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:>4}  {:>6}  Name", "ID", "Rating")?;
            if cart.is_empty() {
                writeln!(out, "Empty")?;
            }
            for item in cart.items() {
                writeln!(out, "{:>4}  {:>6.1}  {}", item.id(), item.recipe.rating, item.recipe.name)?;
            }
        }
    }
    Ok(())
}

pub fn output_detail(out: &mut impl Write, format: &OutputFormat, view: &DetailView) -> anyhow::Result<()> {
    let Some(recipe) = &view.recipe else {
        match format {
            OutputFormat::Json => writeln!(out, "{}", json!({ "recipe": Value::Null, "loading": true }))?,
            OutputFormat::Text => writeln!(out, "Loading recipe {}...", view.recipe_id)?,
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "recipe": recipe }))?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", recipe.name)?;
            writeln!(out, "Rating: {}", recipe.rating)?;
            if !recipe.image.is_empty() {
                writeln!(out, "Image: {}", recipe.image)?;
            }
            writeln!(out)?;
            writeln!(out, "Ingredients:")?;
            for ingredient in &recipe.ingredients {
                writeln!(out, "  - {}", ingredient)?;
            }
            writeln!(out)?;
            writeln!(out, "Instructions:")?;
            for (i, step) in recipe.instructions.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, step)?;
            }
        }
    }
    Ok(())
}

pub fn output_profile(out: &mut impl Write, format: &OutputFormat, profile: Option<&Value>) -> anyhow::Result<()> {
    match (format, profile) {
        (OutputFormat::Json, profile) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "account": profile }))?)?;
        }
        (OutputFormat::Text, Some(profile)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(profile)?)?;
        }
        (OutputFormat::Text, None) => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(render: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_notice_markers() {
        let out = text(|w| output_notice(w, &OutputFormat::Text, &Notice::warning("careful")));
        assert_eq!(out, "! careful\n");

        let out = text(|w| output_notice(w, &OutputFormat::Json, &Notice::success("done")));
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["level"], "success");
    }

    #[test]
    fn test_empty_lists_print_empty() {
        let out = text(|w| output_recipes(w, &OutputFormat::Text, &[]));
        assert_eq!(out, "Empty\n");

        let out = text(|w| output_cart(w, &OutputFormat::Text, &Cart::new()));
        assert!(out.ends_with("Empty\n"));
    }

    #[test]
    fn test_tags_split_into_two_columns_with_selection_marks() {
        let tags: Vec<String> = ["Asian", "Dessert", "Italian"].iter().map(|s| s.to_string()).collect();
        let selected = vec!["Italian".to_string()];

        let out = text(|w| output_tags(w, &OutputFormat::Text, &tags, &selected));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" Asian"));
        assert!(lines[0].ends_with("*Italian"));
        assert_eq!(lines[1], " Dessert");
    }

    #[test]
    fn test_detail_lists_numbered_instructions() {
        let mut recipe = Recipe::new(1, "Pancakes").with_rating(4.2);
        recipe.ingredients = vec!["Flour".to_string(), "Milk".to_string()];
        recipe.instructions = vec!["Mix".to_string(), "Fry".to_string()];
        let view = DetailView {
            recipe_id: 1,
            recipe: Some(recipe),
            server_rating: None,
            selection: None,
        };

        let out = text(|w| output_detail(w, &OutputFormat::Text, &view));

        assert!(out.contains("Rating: 4.2"));
        assert!(out.contains("  - Milk"));
        assert!(out.contains("  2. Fry"));
    }

    #[test]
    fn test_recipe_row_includes_tags() {
        let row = recipe_row(&Recipe::new(12, "Pad Thai").with_rating(4.5).with_tags(["Thai"]));
        assert_eq!(row, "  12   4.5  Pad Thai  [Thai]");
    }
}
