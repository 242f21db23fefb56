//! The register session: who is signed in, which shop is active.

use openpos_auth::User;
use openpos_core::ShopId;

/// Mutable session state for one register.
///
/// Switching users is a demo affordance (no credentials); the active shop
/// defaults to the user's home shop when they sign in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    shop_id: Option<ShopId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn shop_id(&self) -> Option<ShopId> {
        self.shop_id
    }

    pub fn sign_in(&mut self, user: User, shop_id: Option<ShopId>) {
        self.shop_id = user.shop_id.or(shop_id).or(self.shop_id);
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn set_shop(&mut self, shop_id: ShopId) {
        self.shop_id = Some(shop_id);
    }
}
