use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Town {
    pub id: i64,
    pub region: String,
    pub town: String,
}
