mod item_handler;

pub use item_handler::*;
