use crate::domain::common::Identified;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Характер счёта плана счетов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    Debit,
    Credit,
}

impl AccountNature {
    pub fn label(&self) -> &'static str {
        match self {
            AccountNature::Debit => "Дебетовый",
            AccountNature::Credit => "Кредитовый",
        }
    }
}

/// Счёт плана счетов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub nature: AccountNature,
    pub level: u8,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Identified for Account {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
