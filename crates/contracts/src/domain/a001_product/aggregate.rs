use crate::domain::common::Identified;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Товар / услуга
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: String,
    pub price: f64,
    #[serde(default)]
    pub is_active: bool,
}

impl Identified for Product {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
