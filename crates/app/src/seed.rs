//! First-run seed data: a default shop, a staff roster covering every
//! role, and a small starter catalog with its suppliers.

use chrono::Utc;

use openpos_auth::{Role, User};
use openpos_catalog::{Product, ProductCategory};
use openpos_parties::{ContactInfo, Supplier};
use openpos_shops::Shop;
use openpos_store::{Collection, LocalStore, StorageBackend, StoreError};

/// Populate the initial collections.
///
/// Run through [`LocalStore::seed_once`]; a seeded backing space is never
/// reseeded.
pub fn default_seed<B: StorageBackend>(store: &mut LocalStore<B>) -> Result<(), StoreError> {
    let now = Utc::now();

    let fresh_farms = Supplier::new("Fresh Farms Co.", now)
        .expect("static seed supplier is valid")
        .with_contact(ContactInfo {
            email: Some("orders@freshfarms.example".to_string()),
            phone: Some("+1-555-0101".to_string()),
            address: None,
        });
    let nova = Supplier::new("Nova Electronics", now)
        .expect("static seed supplier is valid")
        .with_contact(ContactInfo {
            email: Some("sales@nova.example".to_string()),
            phone: None,
            address: None,
        });

    let catalog = [
        ("GR-001", "Whole Milk 1L", ProductCategory::Grocery, 149_u64, 90_u64, fresh_farms.id, 40_i64),
        ("GR-002", "Sourdough Loaf", ProductCategory::Grocery, 399, 210, fresh_farms.id, 25),
        ("BV-001", "Cold Brew 330ml", ProductCategory::Beverages, 329, 140, fresh_farms.id, 60),
        ("EL-001", "USB-C Cable 1m", ProductCategory::Electronics, 999, 310, nova.id, 30),
        ("EL-002", "Wireless Mouse", ProductCategory::Electronics, 2499, 1100, nova.id, 15),
        ("HH-001", "Dish Soap 500ml", ProductCategory::Household, 279, 120, fresh_farms.id, 50),
    ];

    let mut products = Vec::new();
    let mut shop = Shop::new("Main Street", "12 Main St", now).expect("static seed shop is valid");
    for (sku, name, category, price, cost, supplier_id, on_hand) in catalog {
        let product = Product::new(sku, name, category, price, now)
            .expect("static seed product is valid")
            .with_cost(cost)
            .with_supplier(supplier_id);
        shop.set_stock(product.id, on_hand)
            .expect("static seed stock is non-negative");
        products.push(product);
    }

    let users = [
        ("Avery Stone", Role::Admin),
        ("Morgan Hale", Role::Master),
        ("Riley Chen", Role::Manager),
        ("Sam Ortiz", Role::Cashier),
    ]
    .map(|(name, role)| {
        User::new(name, role, Some(shop.id), now).expect("static seed user is valid")
    });

    store.save_collection(Collection::Suppliers, &[fresh_farms, nova])?;
    store.save_collection(Collection::Products, &products)?;
    store.save_collection(Collection::Shops, &[shop])?;
    store.save_collection(Collection::Users, &users)?;
    Ok(())
}
