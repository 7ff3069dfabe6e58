pub mod customer;
pub mod manager;
