//! Cross-shop stock movement: the transfer ledger.

pub mod ledger;
pub mod transfer;

pub use ledger::{ExchangeError, record_exchange};
pub use transfer::{TransferKind, TransferLine, TransferRecord, TransferStatus};
