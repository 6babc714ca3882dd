//! Items, each filed under exactly one item category.
//!
//! Reads resolve `item_category_name` from the owning category on every
//! request; the name is never stored on the item.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/app/item/` | List items ordered by id |
//! | POST | `/app/item/` | Create an item |
//! | GET | `/app/item/{id}/` | Get an item |
//! | PUT | `/app/item/{id}/` | Replace an item |
//! | PATCH | `/app/item/{id}/` | Partially update an item |
//! | DELETE | `/app/item/{id}/` | Delete an item |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ItemService;
