use sqlx::FromRow;

/// Item row joined with the name of its category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ItemWithCategory {
    pub id: i64,
    pub item_name: String,
    pub item_category_id: i64,
    pub item_category_name: String,
}
