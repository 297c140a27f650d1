use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("This recipe is already in the cart!")]
    DuplicateCartItem(u64),
    #[error("Invalid rating {0}: choose a value from 1 to 5")]
    InvalidRating(u8),
    #[error("No rating selected")]
    NoRatingSelected,
    #[error("Remote error ({status}): {context}")]
    Remote { status: u16, context: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
