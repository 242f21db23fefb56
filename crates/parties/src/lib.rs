//! Customer and supplier records.

pub mod contact;
pub mod customer;
pub mod supplier;

pub use contact::ContactInfo;
pub use customer::Customer;
pub use supplier::Supplier;
