use crate::domain::common::Identified;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Статус проводки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryStatus {
    Draft,
    Posted,
    Cancelled,
}

impl JournalEntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JournalEntryStatus::Draft => "Черновик",
            JournalEntryStatus::Posted => "Проведён",
            JournalEntryStatus::Cancelled => "Отменён",
        }
    }
}

/// Бухгалтерская проводка (заголовок)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub number: String,
    pub date: NaiveDate,
    pub description: String,
    pub total_debit: f64,
    pub total_credit: f64,
    pub status: JournalEntryStatus,
}

impl JournalEntry {
    pub fn is_balanced(&self) -> bool {
        (self.total_debit - self.total_credit).abs() < 0.005
    }
}

impl Identified for JournalEntry {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
