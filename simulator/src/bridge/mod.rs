pub mod publisher;
pub mod store;
