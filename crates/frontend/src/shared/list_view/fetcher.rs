use crate::shared::api::ApiError;
use async_trait::async_trait;
use contracts::shared::list::{ListPage, ListQuery};

/// Источник данных списка
///
/// Реализуется поверх транспорта (REST и т.п.), контроллер о нём не знает.
/// Futures не `Send`: в браузере всё выполняется в одном потоке.
#[async_trait(?Send)]
pub trait ListFetcher<T>: Send + Sync {
    async fn fetch(&self, query: ListQuery) -> Result<ListPage<T>, ApiError>;
}
