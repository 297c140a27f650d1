use crate::domain::cart::Cart;
use crate::domain::notice::{Notice, SAVE_FAILURE, SAVE_SUCCESS};
use crate::domain::repository::CartStore;
use futures::FutureExt;
use futures::future::join_all;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Outcome of a bulk save: the cart to continue with, which ids made it,
/// and the single notice shown to the user.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub cart: Cart,
    pub saved: Vec<u64>,
    pub failed: Vec<u64>,
    pub notice: Notice,
}

impl SaveReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failed.len()
    }
}

pub struct CartService<C: CartStore> {
    store: Arc<C>,
}

impl<C: CartStore> CartService<C> {
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Posts every item concurrently and waits for all of them.
    ///
    /// A rejected item is logged and listed in `failed`; the save as a whole
    /// still succeeds and the cart is cleared. Only an attempt that aborts
    /// (panics) fails the bulk save, in which case the cart is kept.
    #[instrument(skip(self, cart), fields(items = cart.len()))]
    pub async fn save(&self, cart: &Cart) -> SaveReport {
        info!("Saving cart");

        let attempts = cart.items().iter().map(|item| {
            let store = self.store.clone();
            async move {
                let result = AssertUnwindSafe(store.create_item(item)).catch_unwind().await;
                (item.id(), result)
            }
        });

        let mut saved = Vec::new();
        let mut failed = Vec::new();
        let mut aborted = false;
        for (id, result) in join_all(attempts).await {
            match result {
                Ok(Ok(())) => saved.push(id),
                Ok(Err(e)) => {
                    error!(recipe_id = id, error = %e, "Error saving recipe");
                    failed.push(id);
                }
                Err(_) => {
                    error!(recipe_id = id, "Saving recipe aborted");
                    failed.push(id);
                    aborted = true;
                }
            }
        }

        if aborted {
            error!(saved = saved.len(), failed = failed.len(), "Cart save failed");
            return SaveReport {
                cart: cart.clone(),
                saved,
                failed,
                notice: Notice::error(SAVE_FAILURE),
            };
        }

        if failed.is_empty() {
            info!(saved = saved.len(), "Cart saved");
        } else {
            warn!(saved = saved.len(), failed = failed.len(), "Cart saved, some items were rejected");
        }
        SaveReport {
            cart: Cart::new(),
            saved,
            failed,
            notice: Notice::success(SAVE_SUCCESS),
        }
    }
}
