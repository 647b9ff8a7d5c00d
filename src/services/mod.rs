pub mod blob_service;
pub mod gallery_service;

pub use gallery_service::*;
