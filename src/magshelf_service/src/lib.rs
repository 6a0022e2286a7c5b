pub mod helpers;
pub mod magazine_service;
pub mod tracing;

pub use magazine_service::MagazineService;
