/// A shortened URL record from the `url` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub alias: String,
    pub url: String,
}
