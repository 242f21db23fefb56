//! The permission-gated application service.

use chrono::{NaiveDate, Utc};

use openpos_auth::{
    PermissionAction, PermissionModule, PermissionsProvider, Role, StaticTables, User, can_access_route,
    require,
};
use openpos_catalog::{Product, ProductCategory};
use openpos_core::{
    CustomerId, DomainError, ProductId, ShopId, SupplierId, UserId,
};
use openpos_exchange::{TransferKind, TransferLine, TransferRecord, record_exchange};
use openpos_parties::{Customer, Supplier};
use openpos_sales::{
    Cart, CartLine, DailySummary, ProductSales, RangeSummary, Sale, daily_summary, summary_between,
    top_products,
};
use openpos_shops::Shop;
use openpos_store::{Collection, LocalStore, StorageBackend};

use crate::error::AppError;
use crate::seed::default_seed;
use crate::session::Session;

/// The application service: one register, one session.
///
/// Owns the store and the permission tables by injection. Every mutating
/// operation checks the signed-in user's grants first and touches nothing
/// on denial.
#[derive(Debug)]
pub struct Pos<B: StorageBackend, P: PermissionsProvider = StaticTables> {
    store: LocalStore<B>,
    policy: P,
    session: Session,
}

impl<B: StorageBackend> Pos<B, StaticTables> {
    /// Open a register over `backend` with the built-in permission tables.
    ///
    /// Seeds the starter collections on the first run against this backing
    /// space; reopening is a no-op.
    pub fn open(backend: B) -> Result<Self, AppError> {
        Self::open_with(backend, StaticTables)
    }
}

impl<B: StorageBackend, P: PermissionsProvider> Pos<B, P> {
    /// Open a register with injected permission tables.
    pub fn open_with(backend: B, policy: P) -> Result<Self, AppError> {
        openpos_observability::init();
        let mut store = LocalStore::new(backend);
        store.seed_once(default_seed)?;
        Ok(Self {
            store,
            policy,
            session: Session::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── session ──────────────────────────────────────────────────────────

    /// Active users selectable on the switch-user screen.
    ///
    /// Ungated: this backs the sign-in surface, which exists before any
    /// user is signed in.
    pub fn roster(&self) -> Result<Vec<User>, AppError> {
        let users: Vec<User> = self.store.get_collection(Collection::Users)?;
        Ok(users.into_iter().filter(User::is_active).collect())
    }

    /// Sign in as `user_id`. No credentials; this is a demo affordance.
    ///
    /// The active shop becomes the user's home shop, or the first shop on
    /// file when they have none.
    pub fn sign_in(&mut self, user_id: UserId) -> Result<User, AppError> {
        let user = self
            .store
            .find_item::<User>(Collection::Users, &user_id)?
            .ok_or(DomainError::NotFound)?;
        if !user.is_active() {
            return Err(DomainError::validation("user is suspended").into());
        }
        let fallback_shop = self
            .store
            .get_collection::<Shop>(Collection::Shops)?
            .first()
            .map(|shop| shop.id);
        self.session.sign_in(user.clone(), fallback_shop);
        Ok(user)
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
    }

    fn current_user(&self) -> Result<&User, AppError> {
        self.session.user().ok_or(AppError::NoActiveUser)
    }

    fn active_shop(&self) -> Result<Shop, AppError> {
        let shop_id = self.session.shop_id().ok_or(AppError::NoActiveShop)?;
        self.store
            .find_item::<Shop>(Collection::Shops, &shop_id)?
            .ok_or(AppError::NoActiveShop)
    }

    fn guard(&self, module: PermissionModule, action: PermissionAction) -> Result<(), AppError> {
        let user = self.current_user()?;
        require(&self.policy, user, module, action)?;
        Ok(())
    }

    /// Switch the active shop.
    pub fn switch_shop(&mut self, shop_id: ShopId) -> Result<(), AppError> {
        self.guard(PermissionModule::Shops, PermissionAction::View)?;
        let shop = self
            .store
            .find_item::<Shop>(Collection::Shops, &shop_id)?
            .ok_or(DomainError::NotFound)?;
        self.session.set_shop(shop.id);
        Ok(())
    }

    /// Can the signed-in user open the route at `path`?
    pub fn can_open(&self, path: &str) -> Result<bool, AppError> {
        Ok(can_access_route(&self.policy, self.current_user()?, path))
    }

    // ── catalog ──────────────────────────────────────────────────────────

    /// Browse the catalog (register duty, so cashiers may).
    pub fn products(&self) -> Result<Vec<Product>, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Products)?)
    }

    pub fn add_product(
        &mut self,
        sku: &str,
        name: &str,
        category: ProductCategory,
        price: u64,
    ) -> Result<Product, AppError> {
        self.guard(PermissionModule::Inventory, PermissionAction::Create)?;
        let product = Product::new(sku, name, category, price, Utc::now())?;
        self.store.add_item(Collection::Products, product.clone())?;
        Ok(product)
    }

    pub fn update_product(&mut self, product: Product) -> Result<Option<Product>, AppError> {
        self.guard(PermissionModule::Inventory, PermissionAction::Edit)?;
        Ok(self.store.update_item(Collection::Products, product)?)
    }

    pub fn delete_product(&mut self, id: ProductId) -> Result<bool, AppError> {
        self.guard(PermissionModule::Inventory, PermissionAction::Delete)?;
        Ok(self.store.delete_item::<Product>(Collection::Products, &id)?)
    }

    /// Set the active shop's absolute stock for a product.
    pub fn set_stock(&mut self, product_id: ProductId, quantity: i64) -> Result<(), AppError> {
        self.guard(PermissionModule::Inventory, PermissionAction::Edit)?;
        let mut shop = self.active_shop()?;
        shop.set_stock(product_id, quantity)?;
        let _ = self.store.update_item(Collection::Shops, shop)?;
        Ok(())
    }

    /// Add received units to the active shop's stock.
    pub fn receive_stock(&mut self, product_id: ProductId, quantity: i64) -> Result<(), AppError> {
        self.guard(PermissionModule::Inventory, PermissionAction::Edit)?;
        let mut shop = self.active_shop()?;
        shop.receive(product_id, quantity)?;
        let _ = self.store.update_item(Collection::Shops, shop)?;
        Ok(())
    }

    /// On-hand stock in the active shop.
    pub fn stock_on_hand(&self, product_id: ProductId) -> Result<i64, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::View)?;
        Ok(self.active_shop()?.on_hand(product_id))
    }

    // ── parties ──────────────────────────────────────────────────────────

    pub fn customers(&self) -> Result<Vec<Customer>, AppError> {
        self.guard(PermissionModule::Customers, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Customers)?)
    }

    pub fn add_customer(&mut self, name: &str) -> Result<Customer, AppError> {
        self.guard(PermissionModule::Customers, PermissionAction::Create)?;
        let customer = Customer::new(name, Utc::now())?;
        self.store.add_item(Collection::Customers, customer.clone())?;
        Ok(customer)
    }

    pub fn update_customer(&mut self, customer: Customer) -> Result<Option<Customer>, AppError> {
        self.guard(PermissionModule::Customers, PermissionAction::Edit)?;
        Ok(self.store.update_item(Collection::Customers, customer)?)
    }

    pub fn delete_customer(&mut self, id: CustomerId) -> Result<bool, AppError> {
        self.guard(PermissionModule::Customers, PermissionAction::Delete)?;
        Ok(self.store.delete_item::<Customer>(Collection::Customers, &id)?)
    }

    pub fn suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.guard(PermissionModule::Suppliers, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Suppliers)?)
    }

    pub fn add_supplier(&mut self, name: &str) -> Result<Supplier, AppError> {
        self.guard(PermissionModule::Suppliers, PermissionAction::Create)?;
        let supplier = Supplier::new(name, Utc::now())?;
        self.store.add_item(Collection::Suppliers, supplier.clone())?;
        Ok(supplier)
    }

    pub fn delete_supplier(&mut self, id: SupplierId) -> Result<bool, AppError> {
        self.guard(PermissionModule::Suppliers, PermissionAction::Delete)?;
        Ok(self.store.delete_item::<Supplier>(Collection::Suppliers, &id)?)
    }

    // ── staff ────────────────────────────────────────────────────────────

    pub fn users(&self) -> Result<Vec<User>, AppError> {
        self.guard(PermissionModule::Users, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Users)?)
    }

    pub fn add_user(&mut self, name: &str, role: Role) -> Result<User, AppError> {
        self.guard(PermissionModule::Users, PermissionAction::Create)?;
        let user = User::new(name, role, self.session.shop_id(), Utc::now())?;
        self.store.add_item(Collection::Users, user.clone())?;
        Ok(user)
    }

    pub fn delete_user(&mut self, id: UserId) -> Result<bool, AppError> {
        self.guard(PermissionModule::Users, PermissionAction::Delete)?;
        Ok(self.store.delete_item::<User>(Collection::Users, &id)?)
    }

    // ── shops ────────────────────────────────────────────────────────────

    pub fn shops(&self) -> Result<Vec<Shop>, AppError> {
        self.guard(PermissionModule::Shops, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Shops)?)
    }

    pub fn add_shop(&mut self, name: &str, location: &str) -> Result<Shop, AppError> {
        self.guard(PermissionModule::Shops, PermissionAction::Create)?;
        let shop = Shop::new(name, location, Utc::now())?;
        self.store.add_item(Collection::Shops, shop.clone())?;
        Ok(shop)
    }

    // ── cart ─────────────────────────────────────────────────────────────

    /// The persisted working cart.
    pub fn cart(&self) -> Result<Cart, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::View)?;
        let lines: Vec<CartLine> = self.store.get_collection(Collection::Cart)?;
        Ok(Cart::from_lines(lines))
    }

    fn save_cart(&mut self, cart: &Cart) -> Result<(), AppError> {
        self.store.save_collection(Collection::Cart, cart.lines())?;
        Ok(())
    }

    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: i64) -> Result<Cart, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::Process)?;
        let product = self
            .store
            .find_item::<Product>(Collection::Products, &product_id)?
            .ok_or(DomainError::NotFound)?;
        let mut cart = self.cart()?;
        cart.add(&product, quantity)?;
        self.save_cart(&cart)?;
        Ok(cart)
    }

    pub fn set_cart_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::Process)?;
        let mut cart = self.cart()?;
        cart.set_quantity(product_id, quantity)?;
        self.save_cart(&cart)?;
        Ok(cart)
    }

    pub fn clear_cart(&mut self) -> Result<(), AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::Process)?;
        self.store.clear_collection(Collection::Cart)?;
        Ok(())
    }

    /// Settle the cart: record a sale, deduct shop stock, clear the cart.
    ///
    /// Stock for every line is verified up front; on any shortfall nothing
    /// is mutated.
    pub fn checkout(
        &mut self,
        customer_id: Option<CustomerId>,
        discount: u64,
        tendered: u64,
    ) -> Result<Sale, AppError> {
        self.guard(PermissionModule::Pos, PermissionAction::Process)?;
        let cart = self.cart()?;
        let mut shop = self.active_shop()?;
        let cashier = self.current_user()?.id;

        for line in cart.lines() {
            let on_hand = shop.on_hand(line.product_id);
            if on_hand < line.quantity {
                return Err(AppError::InsufficientStock {
                    name: line.name.clone(),
                    wanted: line.quantity,
                    on_hand,
                });
            }
        }

        let sale = Sale::checkout(
            shop.id,
            cashier,
            customer_id,
            &cart,
            discount,
            tendered,
            Utc::now(),
        )?;

        for line in cart.lines() {
            let _ = shop.deduct(line.product_id, line.quantity)?;
        }
        let _ = self.store.update_item(Collection::Shops, shop)?;
        self.store.add_item(Collection::Sales, sale.clone())?;
        self.store.clear_collection(Collection::Cart)?;
        tracing::info!(sale = %sale.id, total = sale.total, "checkout complete");
        Ok(sale)
    }

    pub fn sales(&self) -> Result<Vec<Sale>, AppError> {
        self.guard(PermissionModule::Sales, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Sales)?)
    }

    // ── exchange ─────────────────────────────────────────────────────────

    /// Request stock from, or send stock to, another shop.
    ///
    /// Sends verify the active shop holds every requested quantity before
    /// the ledger runs; this is the oversell precondition, kept out of the
    /// ledger itself.
    pub fn exchange(
        &mut self,
        target_shop_id: ShopId,
        lines: Vec<TransferLine>,
        kind: TransferKind,
    ) -> Result<TransferRecord, AppError> {
        self.guard(PermissionModule::Exchange, PermissionAction::Transfer)?;
        let mut current = self.active_shop()?;
        let target = self
            .store
            .find_item::<Shop>(Collection::Shops, &target_shop_id)?
            .ok_or(DomainError::NotFound)?;
        if target.id == current.id {
            return Err(DomainError::validation("cannot exchange with the active shop").into());
        }

        if kind == TransferKind::Send {
            for line in &lines {
                if !current.has_stock(line.product_id, line.quantity) {
                    return Err(AppError::InsufficientStock {
                        name: line.name.clone(),
                        wanted: line.quantity,
                        on_hand: current.on_hand(line.product_id),
                    });
                }
            }
        }

        let requested_by = self.current_user()?.id;
        let record = record_exchange(
            &mut self.store,
            &mut current,
            &target,
            lines,
            kind,
            requested_by,
            Utc::now(),
        )?;
        Ok(record)
    }

    pub fn transfers(&self) -> Result<Vec<TransferRecord>, AppError> {
        self.guard(PermissionModule::Exchange, PermissionAction::View)?;
        Ok(self.store.get_collection(Collection::Transfers)?)
    }

    // ── reports ──────────────────────────────────────────────────────────

    pub fn daily_report(&self, date: NaiveDate) -> Result<DailySummary, AppError> {
        self.guard(PermissionModule::Reports, PermissionAction::View)?;
        let sales: Vec<Sale> = self.store.get_collection(Collection::Sales)?;
        Ok(daily_summary(&sales, date))
    }

    pub fn range_report(&self, from: NaiveDate, to: NaiveDate) -> Result<RangeSummary, AppError> {
        self.guard(PermissionModule::Reports, PermissionAction::View)?;
        let sales: Vec<Sale> = self.store.get_collection(Collection::Sales)?;
        Ok(summary_between(&sales, from, to))
    }

    pub fn top_products_report(&self, limit: usize) -> Result<Vec<ProductSales>, AppError> {
        self.guard(PermissionModule::Reports, PermissionAction::View)?;
        let sales: Vec<Sale> = self.store.get_collection(Collection::Sales)?;
        Ok(top_products(&sales, limit))
    }
}
