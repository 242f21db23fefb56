//! Recording exchanges and moving stock.

use chrono::{DateTime, Utc};
use thiserror::Error;

use openpos_core::{DomainError, UserId};
use openpos_shops::Shop;
use openpos_store::{Collection, LocalStore, StorageBackend, StoreError};

use crate::transfer::{TransferKind, TransferLine, TransferRecord};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Record an exchange between `current_shop` and `target_shop`.
///
/// Requests only create a `pending` ledger record. Sends additionally
/// deduct each line's quantity from `current_shop`, clamped at zero, and
/// persist the updated shop. The destination shop's stock is deliberately
/// left untouched; see the transfer types for the ledger's status
/// semantics. Oversell checks are the caller's precondition, not enforced
/// here.
pub fn record_exchange<B: StorageBackend>(
    store: &mut LocalStore<B>,
    current_shop: &mut Shop,
    target_shop: &Shop,
    lines: Vec<TransferLine>,
    kind: TransferKind,
    requested_by: UserId,
    now: DateTime<Utc>,
) -> Result<TransferRecord, ExchangeError> {
    if lines.is_empty() {
        return Err(DomainError::validation("transfer needs at least one product").into());
    }
    for line in &lines {
        if line.quantity <= 0 {
            return Err(DomainError::validation("transfer quantity must be positive").into());
        }
    }

    let record = match kind {
        TransferKind::Request => TransferRecord::request(
            (current_shop.id, &current_shop.name),
            (target_shop.id, &target_shop.name),
            lines,
            requested_by,
            now,
        ),
        TransferKind::Send => {
            let record = TransferRecord::send(
                (current_shop.id, &current_shop.name),
                (target_shop.id, &target_shop.name),
                lines,
                requested_by,
                now,
            );
            for line in &record.products {
                let removed = current_shop.deduct(line.product_id, line.quantity)?;
                if removed < line.quantity {
                    tracing::warn!(
                        product = %line.product_id,
                        wanted = line.quantity,
                        removed,
                        "send exceeded on-hand stock, clamped at zero"
                    );
                }
            }
            let _ = store.update_item(Collection::Shops, current_shop.clone())?;
            record
        }
    };

    store.add_item(Collection::Transfers, record.clone())?;
    tracing::info!(
        transfer = %record.id,
        kind = ?record.kind,
        from = %record.from_shop_name,
        to = %record.to_shop_name,
        "recorded exchange"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferStatus;
    use openpos_core::ProductId;
    use openpos_store::MemoryBackend;

    fn setup() -> (LocalStore<MemoryBackend>, Shop, Shop, ProductId) {
        let mut store = LocalStore::new(MemoryBackend::new());
        let mut source = Shop::new("Source", "", Utc::now()).unwrap();
        let target = Shop::new("Target", "", Utc::now()).unwrap();
        let product = ProductId::new();
        source.set_stock(product, 10).unwrap();
        store.add_item(Collection::Shops, source.clone()).unwrap();
        store.add_item(Collection::Shops, target.clone()).unwrap();
        (store, source, target, product)
    }

    fn lines(product: ProductId, quantity: i64) -> Vec<TransferLine> {
        vec![TransferLine {
            product_id: product,
            name: "Widget".to_string(),
            quantity,
        }]
    }

    #[test]
    fn send_deducts_source_stock_and_completes() {
        let (mut store, mut source, target, product) = setup();
        let record = record_exchange(
            &mut store,
            &mut source,
            &target,
            lines(product, 4),
            TransferKind::Send,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(source.on_hand(product), 6);
        assert_eq!(record.status, TransferStatus::Completed);
        assert!(record.completed_at.is_some());

        // The persisted shop reflects the deduction.
        let shops: Vec<Shop> = store.get_collection(Collection::Shops).unwrap();
        let stored = shops.iter().find(|s| s.id == source.id).unwrap();
        assert_eq!(stored.on_hand(product), 6);
    }

    #[test]
    fn request_moves_no_stock_and_stays_pending() {
        let (mut store, mut source, target, product) = setup();
        let record = record_exchange(
            &mut store,
            &mut source,
            &target,
            lines(product, 4),
            TransferKind::Request,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(source.on_hand(product), 10);
        assert_eq!(record.status, TransferStatus::Pending);
        assert_eq!(record.completed_at, None);
        assert_eq!(target.on_hand(product), 0);
    }

    #[test]
    fn send_clamps_rather_than_going_negative() {
        let (mut store, mut source, target, product) = setup();
        record_exchange(
            &mut store,
            &mut source,
            &target,
            lines(product, 25),
            TransferKind::Send,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(source.on_hand(product), 0);
    }

    #[test]
    fn destination_stock_is_never_incremented() {
        let (mut store, mut source, target, product) = setup();
        record_exchange(
            &mut store,
            &mut source,
            &target,
            lines(product, 4),
            TransferKind::Send,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();

        let shops: Vec<Shop> = store.get_collection(Collection::Shops).unwrap();
        let stored_target = shops.iter().find(|s| s.id == target.id).unwrap();
        assert_eq!(stored_target.on_hand(product), 0);
    }

    #[test]
    fn empty_and_nonpositive_lines_are_rejected_before_any_write() {
        let (mut store, mut source, target, product) = setup();

        let err = record_exchange(
            &mut store,
            &mut source,
            &target,
            Vec::new(),
            TransferKind::Send,
            UserId::new(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, ExchangeError::Domain(_)));

        let err = record_exchange(
            &mut store,
            &mut source,
            &target,
            lines(product, 0),
            TransferKind::Send,
            UserId::new(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, ExchangeError::Domain(_)));

        assert_eq!(source.on_hand(product), 10);
        let transfers: Vec<TransferRecord> = store.get_collection(Collection::Transfers).unwrap();
        assert!(transfers.is_empty());
    }
}
