//! Выгрузка списков в файл
//!
//! Сама выгрузка выполняется внешним сервисом; здесь определение набора
//! ID, имя файла и сохранение результата в браузере.

pub mod download;
pub mod modal;
pub mod service;
pub mod workflow;

pub use modal::ExportModal;
pub use service::ExportService;
pub use workflow::{export_file_name, run_export, ExportError, ExportOptions, ExportedFile};
