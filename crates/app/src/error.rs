use thiserror::Error;

use openpos_auth::AuthzError;
use openpos_core::DomainError;
use openpos_exchange::ExchangeError;
use openpos_store::StoreError;

/// Application-level error uniting the layers below.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error("no user is signed in")]
    NoActiveUser,

    #[error("no shop is selected")]
    NoActiveShop,

    #[error("insufficient stock for {name}: wanted {wanted}, on hand {on_hand}")]
    InsufficientStock {
        name: String,
        wanted: i64,
        on_hand: i64,
    },
}

impl From<ExchangeError> for AppError {
    fn from(value: ExchangeError) -> Self {
        match value {
            ExchangeError::Domain(e) => AppError::Domain(e),
            ExchangeError::Store(e) => AppError::Store(e),
        }
    }
}
