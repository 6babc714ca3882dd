use sqlx::FromRow;

/// Database model for item category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ItemCategory {
    pub id: i64,
    pub item_category_name: String,
}
