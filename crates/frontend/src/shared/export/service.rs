use crate::shared::api::ApiError;
use async_trait::async_trait;
use contracts::shared::export::ExportFormat;
use contracts::shared::list::FilterMap;

#[async_trait(?Send)]
pub trait ExportService: Send + Sync {
    /// Все ID, подходящие под фильтры (без учёта пагинации)
    async fn list_ids(&self, filters: &FilterMap) -> Result<Vec<String>, ApiError>;

    /// Двоичное содержимое файла выгрузки
    async fn export(&self, ids: &[String], format: ExportFormat) -> Result<Vec<u8>, ApiError>;
}
