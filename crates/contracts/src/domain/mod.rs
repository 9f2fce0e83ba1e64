pub mod a001_product;
pub mod a002_account;
pub mod a003_third_party;
pub mod a004_cost_center;
pub mod a005_journal_entry;
pub mod common;
