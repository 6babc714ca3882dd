//! Item categories: the parent side of the catalog.
//!
//! Deleting a category removes every item filed under it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/app/itemcategory/` | List categories ordered by id |
//! | POST | `/app/itemcategory/` | Create a category |
//! | GET | `/app/itemcategory/{id}/` | Get a category |
//! | PUT | `/app/itemcategory/{id}/` | Replace a category |
//! | PATCH | `/app/itemcategory/{id}/` | Partially update a category |
//! | DELETE | `/app/itemcategory/{id}/` | Delete a category and its items |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ItemCategoryService;
