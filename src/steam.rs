pub mod client;
pub mod image;
pub mod service;

pub use service::*;
