pub mod account;
pub mod cart;
pub mod product;
pub mod retailer;
