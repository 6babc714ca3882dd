mod item_category_dto;

pub use item_category_dto::*;
