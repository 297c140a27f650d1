use crate::domain::recipe::Recipe;

/// Recipes whose name contains `search` (case-insensitive) and, when any tags
/// are selected, that carry at least one of them. Input order is kept.
pub fn visible<'a>(recipes: &'a [Recipe], search: &str, selected_tags: &[String]) -> Vec<&'a Recipe> {
    let needle = search.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&needle))
        .filter(|recipe| selected_tags.is_empty() || recipe.has_any_tag(selected_tags))
        .collect()
}

/// Search text plus the selected tags, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    selected_tags: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag)
    }

    pub fn with_search(&self, search: impl Into<String>) -> FilterState {
        FilterState {
            search: search.into(),
            selected_tags: self.selected_tags.clone(),
        }
    }

    pub fn toggle_tag(&self, tag: &str) -> FilterState {
        let selected_tags = if self.is_selected(tag) {
            self.selected_tags.iter().filter(|t| *t != tag).cloned().collect()
        } else {
            let mut tags = self.selected_tags.clone();
            tags.push(tag.to_string());
            tags
        };
        FilterState {
            search: self.search.clone(),
            selected_tags,
        }
    }

    pub fn clear_tags(&self) -> FilterState {
        FilterState {
            search: self.search.clone(),
            selected_tags: Vec::new(),
        }
    }

    pub fn visible<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        visible(recipes, &self.search, &self.selected_tags)
    }
}
