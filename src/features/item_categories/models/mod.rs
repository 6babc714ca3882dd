mod item_category;

pub use item_category::*;
