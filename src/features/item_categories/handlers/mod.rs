mod item_category_handler;

pub use item_category_handler::*;
