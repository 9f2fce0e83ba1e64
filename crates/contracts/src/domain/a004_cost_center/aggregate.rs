use crate::domain::common::Identified;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Центр затрат
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Identified for CostCenter {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
