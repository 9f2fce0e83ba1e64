use super::service::ExportService;
use crate::shared::api::ApiError;
use chrono::{DateTime, TimeZone};
use contracts::shared::export::{ExportFormat, ExportScope};
use contracts::shared::list::FilterMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub scope: ExportScope,
    /// Учитывать текущие фильтры при выгрузке всего списка
    pub apply_filters: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            scope: ExportScope::All,
            apply_filters: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("Не удалось получить список записей: {0}")]
    ResolveIds(ApiError),

    #[error("Нет записей для выгрузки")]
    NothingToExport,

    #[error("Ошибка выгрузки: {0}")]
    Export(ApiError),

    #[error("Сервер вернул пустой файл")]
    EmptyPayload,

    #[error("Не удалось сохранить файл: {0}")]
    Download(String),
}

/// Готовый к сохранению файл
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub record_count: usize,
}

/// Имя файла: `{сущность}_{кол-во}_{ггггммдд_ччммсс}.{расширение}`
pub fn export_file_name<Tz: TimeZone>(
    entity: &str,
    count: usize,
    at: &DateTime<Tz>,
    format: ExportFormat,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let entity: String = entity
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "{}_{}_{}.{}",
        entity,
        count,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Выгрузка: определяет набор ID по области и запрашивает файл
///
/// Для `All` полный список ID запрашивается у сервиса (за пределами
/// текущей страницы), для `Selected` берутся ровно переданные ID.
pub async fn run_export<S, Tz>(
    service: &S,
    entity: &str,
    options: ExportOptions,
    filters: &FilterMap,
    selected_ids: &[String],
    now: DateTime<Tz>,
) -> Result<ExportedFile, ExportError>
where
    S: ExportService + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let ids = match options.scope {
        ExportScope::Selected => selected_ids.to_vec(),
        ExportScope::All => {
            let no_filters = FilterMap::new();
            let filters = if options.apply_filters { filters } else { &no_filters };
            service.list_ids(filters).await.map_err(|e| {
                log::error!(target: "export", "[{}] failed to resolve ids: {}", entity, e);
                ExportError::ResolveIds(e)
            })?
        }
    };

    if ids.is_empty() {
        log::warn!(target: "export", "[{}] nothing to export", entity);
        return Err(ExportError::NothingToExport);
    }

    log::info!(
        target: "export",
        "[{}] exporting {} records as {}",
        entity,
        ids.len(),
        options.format
    );
    let bytes = service.export(&ids, options.format).await.map_err(|e| {
        log::error!(target: "export", "[{}] export failed: {}", entity, e);
        ExportError::Export(e)
    })?;
    if bytes.is_empty() {
        return Err(ExportError::EmptyPayload);
    }

    Ok(ExportedFile {
        file_name: export_file_name(entity, ids.len(), &now, options.format),
        mime_type: options.format.mime_type(),
        bytes,
        record_count: ids.len(),
    })
}
