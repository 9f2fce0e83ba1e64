//! Удаление записей с предварительной проверкой
//!
//! Проверка возможности удаления и само удаление выполняются внешним
//! сервисом; здесь порядок шагов и подтверждение массового удаления.

pub mod modal;
pub mod service;
pub mod workflow;

pub use modal::DeleteModal;
pub use service::DeletionService;
pub use workflow::{DeletionError, DeletionPhase, DeletionWorkflow};
