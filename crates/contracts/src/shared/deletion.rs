use crate::domain::common::Identified;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Результат проверки возможности удаления
///
/// `can_delete` и `cannot_delete` делят входной набор на две
/// непересекающиеся части. `reasons`: пояснения по ID неудаляемых.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionCheck<T> {
    pub can_delete: Vec<T>,
    pub cannot_delete: Vec<T>,
    #[serde(default)]
    pub reasons: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("item {0} is both deletable and non-deletable")]
    Overlap(String),

    #[error("item {0} is missing from the eligibility result")]
    Missing(String),

    #[error("item {0} was not part of the request")]
    Unexpected(String),

    #[error("item {0} appears more than once in the eligibility result")]
    Duplicate(String),
}

/// Тело запроса на удаление
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub ids: Vec<String>,
}

impl<T: Identified> DeletionCheck<T> {
    pub fn reason_for(&self, id: &str) -> Option<&str> {
        self.reasons.get(id).map(String::as_str)
    }

    /// Проверяет, что результат точно покрывает входной набор
    ///
    /// Каждый ID входа должен встретиться ровно один раз в одной из частей.
    pub fn validate_partition(&self, input: &[T]) -> Result<(), PartitionError> {
        let requested: HashSet<String> = input.iter().map(Identified::id).collect();
        let deletable: HashSet<String> = self.can_delete.iter().map(Identified::id).collect();
        if deletable.len() != self.can_delete.len() {
            return Err(PartitionError::Duplicate(first_repeated(&self.can_delete)));
        }

        let mut seen = HashSet::new();
        for id in self.cannot_delete.iter().map(Identified::id) {
            if deletable.contains(&id) {
                return Err(PartitionError::Overlap(id));
            }
            if !seen.insert(id.clone()) {
                return Err(PartitionError::Duplicate(id));
            }
        }
        seen.extend(deletable);

        if let Some(id) = seen.iter().find(|id| !requested.contains(*id)) {
            return Err(PartitionError::Unexpected(id.clone()));
        }
        if let Some(id) = requested.iter().find(|id| !seen.contains(*id)) {
            return Err(PartitionError::Missing(id.clone()));
        }
        Ok(())
    }
}

fn first_repeated<T: Identified>(items: &[T]) -> String {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(Identified::id)
        .find(|id| !seen.insert(id.clone()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str);

    impl Identified for Row {
        fn id(&self) -> String {
            self.0.to_string()
        }
    }

    fn check(can: &[&'static str], cannot: &[&'static str]) -> DeletionCheck<Row> {
        DeletionCheck {
            can_delete: can.iter().map(|id| Row(*id)).collect(),
            cannot_delete: cannot.iter().map(|id| Row(*id)).collect(),
            reasons: BTreeMap::new(),
        }
    }

    #[test]
    fn test_exact_partition_is_valid() {
        let input = vec![Row("a"), Row("b"), Row("c")];
        assert_eq!(check(&["a", "c"], &["b"]).validate_partition(&input), Ok(()));
        assert_eq!(check(&[], &["a", "b", "c"]).validate_partition(&input), Ok(()));
    }

    #[test]
    fn test_partition_errors() {
        let input = vec![Row("a"), Row("b")];
        assert_eq!(
            check(&["a", "b"], &["b"]).validate_partition(&input),
            Err(PartitionError::Overlap("b".to_string()))
        );
        assert_eq!(
            check(&["a"], &[]).validate_partition(&input),
            Err(PartitionError::Missing("b".to_string()))
        );
        assert_eq!(
            check(&["a", "b", "z"], &[]).validate_partition(&input),
            Err(PartitionError::Unexpected("z".to_string()))
        );
    }

    #[test]
    fn test_repeated_ids_are_rejected() {
        let input = vec![Row("a")];
        assert_eq!(
            check(&["a", "a"], &[]).validate_partition(&input),
            Err(PartitionError::Duplicate("a".to_string()))
        );

        let input = vec![Row("a"), Row("b")];
        assert_eq!(
            check(&["a"], &["b", "b"]).validate_partition(&input),
            Err(PartitionError::Duplicate("b".to_string()))
        );
    }
}
