pub mod common;
pub mod customer;
pub mod customer_action;
