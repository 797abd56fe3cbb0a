pub mod batch;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod currency;
pub mod order;
pub mod pricing;
pub mod product;
pub mod refdata;
pub mod session;
pub mod trace;
