use crate::domain::error::DomainError;
use crate::domain::recipe::Recipe;
use serde::{Deserialize, Serialize};

/// Recipe snapshot taken when it was added to the cart. Serialized as the
/// full recipe object, which is what the cart store expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItem {
    pub recipe: Recipe,
}

impl CartItem {
    pub fn id(&self) -> u64 {
        self.recipe.id
    }
}

impl From<&Recipe> for CartItem {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe: recipe.clone(),
        }
    }
}

/// Ordered selection of recipes pending a bulk save.
///
/// Transitions return a new cart and leave `self` untouched. At most one item
/// per recipe id is ever held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, recipe: &Recipe) -> Result<Cart, DomainError> {
        if self.contains(recipe.id) {
            return Err(DomainError::DuplicateCartItem(recipe.id));
        }
        let mut items = self.items.clone();
        items.push(CartItem::from(recipe));
        Ok(Cart { items })
    }

    pub fn remove(&self, id: u64) -> Cart {
        Cart {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
