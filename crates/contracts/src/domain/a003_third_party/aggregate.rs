use crate::domain::common::Identified;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Вид контрагента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdPartyKind {
    Customer,
    Supplier,
    Employee,
    Other,
}

impl ThirdPartyKind {
    pub fn label(&self) -> &'static str {
        match self {
            ThirdPartyKind::Customer => "Покупатель",
            ThirdPartyKind::Supplier => "Поставщик",
            ThirdPartyKind::Employee => "Сотрудник",
            ThirdPartyKind::Other => "Прочее",
        }
    }
}

/// Контрагент (третье лицо)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdParty {
    pub id: Uuid,
    pub document_number: String,
    pub name: String,
    pub kind: ThirdPartyKind,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Identified for ThirdParty {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
