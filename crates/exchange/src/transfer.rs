use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{Entity, ProductId, ShopId, TransferId, UserId};

/// One product line within a transfer.
///
/// Carries the product name as of creation so the ledger stays readable
/// even after a product is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
}

/// What kind of movement the record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Ask another shop to send stock here. Moves nothing.
    Request,
    /// Dispatch stock from here to another shop.
    Send,
}

/// Status of a transfer record.
///
/// Set once at creation and never transitioned: requests stay `Pending`
/// (no approval workflow exists) and sends are born `Completed`.
/// `Rejected` is representable for forward compatibility but nothing in
/// the system sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Completed,
    Rejected,
}

/// A recorded stock movement (or request for one) between two shops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: TransferId,
    pub from_shop: ShopId,
    pub to_shop: ShopId,
    pub from_shop_name: String,
    pub to_shop_name: String,
    pub products: Vec<TransferLine>,
    pub kind: TransferKind,
    pub status: TransferStatus,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub requested_by: UserId,
}

impl TransferRecord {
    /// A request for the target shop to send stock to the requesting shop.
    pub fn request(
        requesting_shop: (ShopId, &str),
        target_shop: (ShopId, &str),
        products: Vec<TransferLine>,
        requested_by: UserId,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            from_shop: target_shop.0,
            to_shop: requesting_shop.0,
            from_shop_name: target_shop.1.to_string(),
            to_shop_name: requesting_shop.1.to_string(),
            products,
            kind: TransferKind::Request,
            status: TransferStatus::Pending,
            requested_at,
            completed_at: None,
            requested_by,
        }
    }

    /// A dispatch of stock from the sending shop to the target shop.
    pub fn send(
        sending_shop: (ShopId, &str),
        target_shop: (ShopId, &str),
        products: Vec<TransferLine>,
        requested_by: UserId,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            from_shop: sending_shop.0,
            to_shop: target_shop.0,
            from_shop_name: sending_shop.1.to_string(),
            to_shop_name: target_shop.1.to_string(),
            products,
            kind: TransferKind::Send,
            status: TransferStatus::Completed,
            requested_at,
            completed_at: Some(requested_at),
            requested_by,
        }
    }
}

impl Entity for TransferRecord {
    type Id = TransferId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64) -> TransferLine {
        TransferLine {
            product_id: ProductId::new(),
            name: "Widget".to_string(),
            quantity,
        }
    }

    #[test]
    fn requests_are_born_pending_with_no_completion_time() {
        let record = TransferRecord::request(
            (ShopId::new(), "Here"),
            (ShopId::new(), "There"),
            vec![line(4)],
            UserId::new(),
            Utc::now(),
        );
        assert_eq!(record.kind, TransferKind::Request);
        assert_eq!(record.status, TransferStatus::Pending);
        assert_eq!(record.completed_at, None);
        // The asked shop is the sender-to-be.
        assert_eq!(record.from_shop_name, "There");
        assert_eq!(record.to_shop_name, "Here");
    }

    #[test]
    fn sends_are_born_completed() {
        let now = Utc::now();
        let record = TransferRecord::send(
            (ShopId::new(), "Here"),
            (ShopId::new(), "There"),
            vec![line(4)],
            UserId::new(),
            now,
        );
        assert_eq!(record.kind, TransferKind::Send);
        assert_eq!(record.status, TransferStatus::Completed);
        assert_eq!(record.completed_at, Some(now));
        assert_eq!(record.from_shop_name, "Here");
    }
}
