use super::service::DeletionService;
use crate::shared::api::ApiError;
use contracts::domain::common::Identified;
use contracts::shared::deletion::{DeletionCheck, PartitionError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeletionError {
    #[error("Не удалось определить, какие записи можно удалить: {0}")]
    EligibilityCheck(ApiError),

    #[error("Не удалось определить, какие записи можно удалить: {0}")]
    InvalidPartition(PartitionError),

    #[error("Ошибка удаления: {0}")]
    Delete(ApiError),

    #[error("Нет записей, доступных для удаления")]
    NothingToDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionPhase {
    #[default]
    Idle,
    Checking,
    Ready,
    Deleting,
    Deleted,
}

/// Состояние окна удаления
///
/// Шаги: `open` → `apply_check` → (`set_confirmation`) → `begin_delete`
/// → `apply_delete`. `close`/повторный `open` сбрасывают всё.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionWorkflow<T> {
    candidates: Vec<T>,
    phase: DeletionPhase,
    check: Option<DeletionCheck<T>>,
    confirmation: String,
    confirm_phrase: String,
    error: Option<String>,
}

impl<T: Identified + Clone> DeletionWorkflow<T> {
    pub fn new(confirm_phrase: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            phase: DeletionPhase::Idle,
            check: None,
            confirmation: String::new(),
            confirm_phrase: confirm_phrase.into(),
            error: None,
        }
    }

    pub fn open(&mut self, candidates: Vec<T>) {
        self.reset();
        self.candidates = candidates;
        self.phase = DeletionPhase::Checking;
    }

    pub fn close(&mut self) {
        self.reset();
        self.candidates.clear();
    }

    fn reset(&mut self) {
        self.phase = DeletionPhase::Idle;
        self.check = None;
        self.confirmation.clear();
        self.error = None;
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn phase(&self) -> DeletionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DeletionPhase::Idle
    }

    pub fn check(&self) -> Option<&DeletionCheck<T>> {
        self.check.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> &str {
        &self.confirmation
    }

    pub fn confirm_phrase(&self) -> &str {
        &self.confirm_phrase
    }

    pub fn deletable(&self) -> &[T] {
        self.check.as_ref().map(|c| c.can_delete.as_slice()).unwrap_or(&[])
    }

    pub fn non_deletable(&self) -> &[T] {
        self.check
            .as_ref()
            .map(|c| c.cannot_delete.as_slice())
            .unwrap_or(&[])
    }

    /// Проверка прошла, но удалять нечего
    pub fn nothing_deletable(&self) -> bool {
        self.phase == DeletionPhase::Ready && self.deletable().is_empty()
    }

    /// Массовое удаление требует ввода фразы подтверждения
    pub fn requires_confirmation(&self) -> bool {
        self.deletable().len() > 1
    }

    pub fn set_confirmation(&mut self, text: impl Into<String>) {
        self.confirmation = text.into();
    }

    pub fn can_submit(&self) -> bool {
        self.phase == DeletionPhase::Ready
            && !self.deletable().is_empty()
            && (!self.requires_confirmation() || self.confirmation == self.confirm_phrase)
    }

    /// Результат проверки. Ошибка блокирует удаление полностью
    /// и возвращается вызывающему текстом сообщения.
    pub fn apply_check(
        &mut self,
        result: Result<DeletionCheck<T>, DeletionError>,
    ) -> Option<String> {
        if self.phase != DeletionPhase::Checking {
            return None;
        }
        self.phase = DeletionPhase::Ready;
        match result {
            Ok(check) => {
                self.check = Some(check);
                self.error = None;
                None
            }
            Err(e) => {
                self.check = None;
                self.error = Some(e.to_string());
                self.error.clone()
            }
        }
    }

    /// Переход к удалению; возвращает только удаляемые элементы
    pub fn begin_delete(&mut self) -> Option<Vec<T>> {
        if !self.can_submit() {
            return None;
        }
        self.phase = DeletionPhase::Deleting;
        self.error = None;
        Some(self.deletable().to_vec())
    }

    /// При успехе возвращает удалённые элементы; при ошибке состояние
    /// возвращается к готовности, чтобы можно было повторить
    pub fn apply_delete(&mut self, result: Result<(), DeletionError>) -> Option<Vec<T>> {
        if self.phase != DeletionPhase::Deleting {
            return None;
        }
        match result {
            Ok(()) => {
                self.phase = DeletionPhase::Deleted;
                Some(self.deletable().to_vec())
            }
            Err(e) => {
                self.phase = DeletionPhase::Ready;
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// Шаг 1: проверка возможности удаления
///
/// Результат должен точно покрывать входной набор, иначе считается ошибкой.
pub async fn check_eligibility<T, S>(
    service: &S,
    scope: &str,
    items: &[T],
) -> Result<DeletionCheck<T>, DeletionError>
where
    T: Identified,
    S: DeletionService<T> + ?Sized,
{
    let check = service.check_deletable(items).await.map_err(|e| {
        log::error!(target: "deletion", "[{}] eligibility check failed: {}", scope, e);
        DeletionError::EligibilityCheck(e)
    })?;
    check.validate_partition(items).map_err(|e| {
        log::error!(target: "deletion", "[{}] invalid eligibility result: {}", scope, e);
        DeletionError::InvalidPartition(e)
    })?;

    if !check.cannot_delete.is_empty() {
        log::warn!(
            target: "deletion",
            "[{}] {} of {} items cannot be deleted",
            scope,
            check.cannot_delete.len(),
            items.len()
        );
    }
    Ok(check)
}

/// Шаг 3: удаление. Передаются только удаляемые элементы.
pub async fn delete_eligible<T, S>(
    service: &S,
    scope: &str,
    items: &[T],
) -> Result<(), DeletionError>
where
    T: Identified,
    S: DeletionService<T> + ?Sized,
{
    if items.is_empty() {
        return Err(DeletionError::NothingToDelete);
    }
    service.delete_items(items).await.map_err(|e| {
        log::error!(target: "deletion", "[{}] delete failed: {}", scope, e);
        DeletionError::Delete(e)
    })?;
    log::info!(target: "deletion", "[{}] deleted {} items", scope, items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    const PHRASE: &str = "УДАЛИТЬ";

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String);

    impl Identified for Row {
        fn id(&self) -> String {
            self.0.clone()
        }
    }

    fn rows(ids: &[&str]) -> Vec<Row> {
        ids.iter().map(|id| Row(id.to_string())).collect()
    }

    /// Удалять можно всё, кроме ID из `blocked`
    #[derive(Default)]
    struct MockDeletion {
        blocked: Vec<String>,
        fail_check: bool,
        fail_delete: bool,
        drop_from_result: bool,
        repeat_in_result: bool,
        deleted: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait(?Send)]
    impl DeletionService<Row> for MockDeletion {
        async fn check_deletable(&self, items: &[Row]) -> Result<DeletionCheck<Row>, ApiError> {
            if self.fail_check {
                return Err(ApiError::Network("offline".to_string()));
            }
            let (cannot_delete, mut can_delete): (Vec<Row>, Vec<Row>) = items
                .iter()
                .cloned()
                .partition(|r| self.blocked.contains(&r.0));
            if self.drop_from_result {
                can_delete.pop();
            }
            if self.repeat_in_result {
                if let Some(first) = can_delete.first().cloned() {
                    can_delete.push(first);
                }
            }
            let reasons = cannot_delete
                .iter()
                .map(|r| (r.0.clone(), "Есть проводки".to_string()))
                .collect::<BTreeMap<_, _>>();
            Ok(DeletionCheck {
                can_delete,
                cannot_delete,
                reasons,
            })
        }

        async fn delete_items(&self, items: &[Row]) -> Result<(), ApiError> {
            self.deleted
                .lock()
                .unwrap()
                .push(items.iter().map(|r| r.0.clone()).collect());
            if self.fail_delete {
                Err(ApiError::status(409, "conflict"))
            } else {
                Ok(())
            }
        }
    }

    async fn open_and_check(service: &MockDeletion, ids: &[&str]) -> DeletionWorkflow<Row> {
        let mut wf = DeletionWorkflow::new(PHRASE);
        wf.open(rows(ids));
        let result = check_eligibility(service, "test", wf.candidates()).await;
        wf.apply_check(result);
        wf
    }

    #[tokio::test]
    async fn test_partition_covers_input() {
        let service = MockDeletion {
            blocked: vec!["b".to_string()],
            ..Default::default()
        };
        let input = rows(&["a", "b", "c"]);
        let check = check_eligibility(&service, "test", &input).await.unwrap();
        let mut ids: Vec<String> = check
            .can_delete
            .iter()
            .chain(check.cannot_delete.iter())
            .map(|r| r.0.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(check.reason_for("b"), Some("Есть проводки"));
    }

    #[tokio::test]
    async fn test_incomplete_partition_fails_closed() {
        let service = MockDeletion {
            drop_from_result: true,
            ..Default::default()
        };
        let wf = open_and_check(&service, &["a", "b"]).await;
        assert!(wf.error().is_some());
        assert!(!wf.can_submit());
        assert!(wf.deletable().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_id_in_result_fails_closed() {
        let service = MockDeletion {
            repeat_in_result: true,
            ..Default::default()
        };
        let mut wf = open_and_check(&service, &["a"]).await;
        assert!(wf.error().is_some());
        assert!(wf.deletable().is_empty());
        assert!(!wf.requires_confirmation());
        assert_eq!(wf.begin_delete(), None);
        assert!(service.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_error_is_reported_to_caller() {
        let service = MockDeletion {
            fail_check: true,
            ..Default::default()
        };
        let mut wf = DeletionWorkflow::new(PHRASE);
        wf.open(rows(&["a"]));
        let result = check_eligibility(&service, "test", wf.candidates()).await;
        let reported = wf.apply_check(result);
        assert_eq!(reported.as_deref(), wf.error());
        assert!(reported.is_some());

        // Повторно применённый результат игнорируется
        assert_eq!(wf.apply_check(Err(DeletionError::NothingToDelete)), None);
    }

    #[tokio::test]
    async fn test_check_failure_blocks_deletion() {
        let service = MockDeletion {
            fail_check: true,
            ..Default::default()
        };
        let mut wf = open_and_check(&service, &["a"]).await;
        assert!(wf
            .error()
            .unwrap_or_default()
            .starts_with("Не удалось определить"));
        assert!(!wf.can_submit());
        assert_eq!(wf.begin_delete(), None);
        assert!(service.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_exact_phrase() {
        let service = MockDeletion::default();
        let mut wf = open_and_check(&service, &["a", "b"]).await;
        assert!(wf.requires_confirmation());
        assert!(!wf.can_submit());

        wf.set_confirmation("удалить");
        assert!(!wf.can_submit());
        wf.set_confirmation(format!("{} ", PHRASE));
        assert!(!wf.can_submit());
        wf.set_confirmation(PHRASE);
        assert!(wf.can_submit());
    }

    #[tokio::test]
    async fn test_single_delete_skips_confirmation() {
        let service = MockDeletion {
            blocked: vec!["b".to_string()],
            ..Default::default()
        };
        let mut wf = open_and_check(&service, &["a", "b"]).await;
        assert_eq!(wf.deletable().len(), 1);
        assert!(!wf.requires_confirmation());
        assert!(wf.can_submit());

        let eligible = wf.begin_delete().unwrap();
        let result = delete_eligible(&service, "test", &eligible).await;
        let deleted = wf.apply_delete(result).unwrap();
        assert_eq!(deleted, rows(&["a"]));
        assert_eq!(wf.phase(), DeletionPhase::Deleted);
        // Неудаляемые элементы в сервис не передаются
        assert_eq!(*service.deleted.lock().unwrap(), vec![vec!["a".to_string()]]);
    }

    #[tokio::test]
    async fn test_nothing_deletable() {
        let service = MockDeletion {
            blocked: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        let mut wf = open_and_check(&service, &["a", "b"]).await;
        assert!(wf.nothing_deletable());
        assert_eq!(wf.non_deletable().len(), 2);
        assert!(!wf.can_submit());
        wf.set_confirmation(PHRASE);
        assert_eq!(wf.begin_delete(), None);
        assert!(service.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_state() {
        let service = MockDeletion {
            fail_delete: true,
            ..Default::default()
        };
        let mut wf = open_and_check(&service, &["a"]).await;
        let eligible = wf.begin_delete().unwrap();
        let result = delete_eligible(&service, "test", &eligible).await;
        assert!(matches!(result, Err(DeletionError::Delete(_))));
        assert_eq!(wf.apply_delete(result), None);
        assert_eq!(wf.phase(), DeletionPhase::Ready);
        assert_eq!(wf.deletable(), rows(&["a"]).as_slice());
        assert!(wf.error().is_some());
        assert!(wf.can_submit());
    }

    #[tokio::test]
    async fn test_reopen_clears_previous_state() {
        let service = MockDeletion::default();
        let mut wf = open_and_check(&service, &["a", "b"]).await;
        wf.set_confirmation(PHRASE);

        wf.close();
        assert!(!wf.is_open());
        wf.open(rows(&["c"]));
        assert_eq!(wf.phase(), DeletionPhase::Checking);
        assert!(wf.check().is_none());
        assert_eq!(wf.confirmation(), "");
        assert_eq!(wf.candidates(), rows(&["c"]).as_slice());
    }
}
