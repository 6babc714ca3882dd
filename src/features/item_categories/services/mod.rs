mod item_category_service;

pub use item_category_service::*;
