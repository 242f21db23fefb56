//! Black-box flows through the public `Pos` service API.

use anyhow::Result;
use chrono::Utc;

use openpos_app::{AppError, Pos};
use openpos_auth::Role;
use openpos_catalog::ProductCategory;
use openpos_core::UserId;
use openpos_exchange::{TransferKind, TransferLine, TransferStatus};
use openpos_store::{FileBackend, MemoryBackend, StorageBackend};

fn open_register() -> Result<Pos<MemoryBackend>> {
    Ok(Pos::open(MemoryBackend::new())?)
}

fn id_of<B: StorageBackend>(pos: &Pos<B>, role: Role) -> UserId {
    pos.roster()
        .unwrap()
        .into_iter()
        .find(|u| u.role == role)
        .map(|u| u.id)
        .expect("seed roster covers every role")
}

fn sign_in_as<B: StorageBackend>(pos: &mut Pos<B>, role: Role) {
    let id = id_of(pos, role);
    pos.sign_in(id).unwrap();
}

#[test]
fn seeded_register_signs_in_and_browses() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);

    let products = pos.products()?;
    assert!(!products.is_empty());
    for product in &products {
        assert!(pos.stock_on_hand(product.id)? > 0);
    }
    Ok(())
}

#[test]
fn cashier_is_denied_inventory_and_reports() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Cashier);

    let err = pos
        .add_product("X-1", "Contraband", ProductCategory::Other, 100)
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let today = Utc::now().date_naive();
    assert!(matches!(
        pos.daily_report(today).unwrap_err(),
        AppError::Forbidden(_)
    ));

    assert!(!pos.can_open("/inventory")?);
    assert!(pos.can_open("/pos")?);
    Ok(())
}

#[test]
fn operations_without_a_signed_in_user_are_rejected() -> Result<()> {
    let pos = open_register()?;
    assert!(matches!(pos.products().unwrap_err(), AppError::NoActiveUser));
    Ok(())
}

#[test]
fn checkout_deducts_stock_records_sale_and_clears_cart() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Cashier);

    let product = pos.products()?.into_iter().next().unwrap();
    let before = pos.stock_on_hand(product.id)?;

    pos.add_to_cart(product.id, 3)?;
    let sale = pos.checkout(None, 0, product.price * 3)?;

    assert_eq!(sale.total, product.price * 3);
    assert_eq!(pos.stock_on_hand(product.id)?, before - 3);
    assert!(pos.cart()?.is_empty());

    let sales = pos.sales()?;
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, sale.id);
    Ok(())
}

#[test]
fn oversold_checkout_mutates_nothing() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);

    let product = pos.products()?.into_iter().next().unwrap();
    let on_hand = pos.stock_on_hand(product.id)?;

    pos.add_to_cart(product.id, on_hand + 1)?;
    let err = pos
        .checkout(None, 0, product.price * (on_hand as u64 + 1))
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));

    assert_eq!(pos.stock_on_hand(product.id)?, on_hand);
    assert!(pos.sales()?.is_empty());
    assert!(!pos.cart()?.is_empty());
    Ok(())
}

#[test]
fn exchange_send_moves_stock_out_and_request_does_not() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Manager);

    let branch = {
        // Managers cannot create shops; borrow the admin for setup.
        sign_in_as(&mut pos, Role::Admin);
        let branch = pos.add_shop("Harbor Branch", "3 Quay Rd")?;
        sign_in_as(&mut pos, Role::Manager);
        branch
    };

    let product = pos.products()?.into_iter().next().unwrap();
    let before = pos.stock_on_hand(product.id)?;
    let line = |q: i64| {
        vec![TransferLine {
            product_id: product.id,
            name: product.name.clone(),
            quantity: q,
        }]
    };

    let sent = pos.exchange(branch.id, line(4), TransferKind::Send)?;
    assert_eq!(sent.status, TransferStatus::Completed);
    assert!(sent.completed_at.is_some());
    assert_eq!(pos.stock_on_hand(product.id)?, before - 4);

    let requested = pos.exchange(branch.id, line(2), TransferKind::Request)?;
    assert_eq!(requested.status, TransferStatus::Pending);
    assert_eq!(requested.completed_at, None);
    assert_eq!(pos.stock_on_hand(product.id)?, before - 4);

    let transfers = pos.transfers()?;
    assert_eq!(transfers.len(), 2);
    Ok(())
}

#[test]
fn exchange_send_beyond_stock_is_rejected_before_any_write() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);
    let branch = pos.add_shop("Harbor Branch", "3 Quay Rd")?;

    let product = pos.products()?.into_iter().next().unwrap();
    let before = pos.stock_on_hand(product.id)?;

    let err = pos
        .exchange(
            branch.id,
            vec![TransferLine {
                product_id: product.id,
                name: product.name.clone(),
                quantity: before + 1,
            }],
            TransferKind::Send,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(pos.stock_on_hand(product.id)?, before);
    assert!(pos.transfers()?.is_empty());
    Ok(())
}

#[test]
fn reports_fold_recorded_sales() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);

    let product = pos.products()?.into_iter().next().unwrap();
    pos.add_to_cart(product.id, 2)?;
    pos.checkout(None, 0, product.price * 2)?;

    let today = Utc::now().date_naive();
    let daily = pos.daily_report(today)?;
    assert_eq!(daily.sale_count, 1);
    assert_eq!(daily.net, product.price * 2);

    let top = pos.top_products_report(5)?;
    assert_eq!(top[0].product_id, product.id);
    assert_eq!(top[0].quantity, 2);
    Ok(())
}

#[test]
fn data_survives_reopening_and_seeding_runs_once() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let first_product_count;
    {
        let mut pos = Pos::open(FileBackend::open(dir.path())?)?;
        sign_in_as(&mut pos, Role::Admin);
        first_product_count = pos.products()?.len();
        pos.add_product("NEW-1", "Reopened Widget", ProductCategory::Other, 500)?;
    }

    let mut pos = Pos::open(FileBackend::open(dir.path())?)?;
    sign_in_as(&mut pos, Role::Admin);
    let products = pos.products()?;
    // One added product, and no duplicated seed rows.
    assert_eq!(products.len(), first_product_count + 1);
    assert!(products.iter().any(|p| p.sku == "NEW-1"));
    Ok(())
}

#[test]
fn switching_shops_is_gated_and_scopes_stock() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);
    let branch = pos.add_shop("Harbor Branch", "3 Quay Rd")?;
    let product = pos.products()?.into_iter().next().unwrap();
    assert!(pos.stock_on_hand(product.id)? > 0);

    pos.switch_shop(branch.id)?;
    // The branch holds nothing yet.
    assert_eq!(pos.stock_on_hand(product.id)?, 0);

    sign_in_as(&mut pos, Role::Cashier);
    let err = pos.switch_shop(branch.id).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    Ok(())
}

#[test]
fn inventory_editing_adjusts_the_active_shop_only() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Manager);

    let product = pos.products()?.into_iter().next().unwrap();
    pos.set_stock(product.id, 7)?;
    assert_eq!(pos.stock_on_hand(product.id)?, 7);

    pos.receive_stock(product.id, 5)?;
    assert_eq!(pos.stock_on_hand(product.id)?, 12);

    assert!(matches!(
        pos.set_stock(product.id, -1).unwrap_err(),
        AppError::Domain(_)
    ));
    assert_eq!(pos.stock_on_hand(product.id)?, 12);
    Ok(())
}

#[test]
fn customer_and_supplier_crud_round_trips() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Admin);

    let customer = pos.add_customer("Jordan Li")?;
    assert!(pos.customers()?.iter().any(|c| c.id == customer.id));
    assert!(pos.delete_customer(customer.id)?);
    assert!(!pos.delete_customer(customer.id)?);

    let supplier = pos.add_supplier("Quay Imports")?;
    assert!(pos.suppliers()?.iter().any(|s| s.id == supplier.id));
    assert!(pos.delete_supplier(supplier.id)?);

    // Cashiers may register customers but not remove them.
    sign_in_as(&mut pos, Role::Cashier);
    let walk_in = pos.add_customer("Walk-in")?;
    assert!(matches!(
        pos.delete_customer(walk_in.id).unwrap_err(),
        AppError::Forbidden(_)
    ));
    Ok(())
}

#[test]
fn staff_management_is_admin_territory() -> Result<()> {
    let mut pos = open_register()?;
    sign_in_as(&mut pos, Role::Manager);
    assert!(matches!(
        pos.add_user("New Hire", Role::Cashier).unwrap_err(),
        AppError::Forbidden(_)
    ));

    sign_in_as(&mut pos, Role::Admin);
    let hire = pos.add_user("New Hire", Role::Cashier)?;
    assert!(pos.users()?.iter().any(|u| u.id == hire.id));
    assert!(pos.delete_user(hire.id)?);
    Ok(())
}
