use crate::shared::api::ApiError;
use async_trait::async_trait;
use contracts::shared::deletion::DeletionCheck;

#[async_trait(?Send)]
pub trait DeletionService<T>: Send + Sync {
    /// Делит переданные элементы на удаляемые и неудаляемые
    async fn check_deletable(&self, items: &[T]) -> Result<DeletionCheck<T>, ApiError>;

    /// Удаляет элементы; за атомарность отвечает сервис
    async fn delete_items(&self, items: &[T]) -> Result<(), ApiError>;
}
