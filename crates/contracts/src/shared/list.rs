//! Параметры и ответ постраничной загрузки списков
//!
//! Контракт между списочными формами и внешним API: форма формирует
//! [`ListQuery`], API возвращает [`ListPage`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Значение фильтра
///
/// Диапазон задаётся строками, чтобы одинаково работать для дат и чисел.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Range {
        from: Option<String>,
        to: Option<String>,
    },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn range(from: Option<String>, to: Option<String>) -> Self {
        FilterValue::Range { from, to }
    }

    /// Пустое значение означает "фильтр не задан"
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Bool(_) | FilterValue::Number(_) => false,
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Range { from, to } => {
                from.as_deref().map_or(true, |v| v.trim().is_empty())
                    && to.as_deref().map_or(true, |v| v.trim().is_empty())
            }
        }
    }

    /// Человекочитаемое представление для плашек активных фильтров
    pub fn display(&self) -> String {
        match self {
            FilterValue::Bool(true) => "да".to_string(),
            FilterValue::Bool(false) => "нет".to_string(),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Text(s) => s.clone(),
            FilterValue::Range { from, to } => format!(
                "{} — {}",
                from.as_deref().unwrap_or("…"),
                to.as_deref().unwrap_or("…")
            ),
        }
    }
}

pub type FilterMap = BTreeMap<String, FilterValue>;

/// Раскладывает фильтры в плоские пары ключ/значение для query string.
/// Диапазон превращается в `key_from` / `key_to`.
pub fn flatten_filters(filters: &FilterMap) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for (key, value) in filters {
        if value.is_empty() {
            continue;
        }
        match value {
            FilterValue::Bool(b) => {
                pairs.insert(key.clone(), b.to_string());
            }
            FilterValue::Number(n) => {
                pairs.insert(key.clone(), n.to_string());
            }
            FilterValue::Text(s) => {
                pairs.insert(key.clone(), s.trim().to_string());
            }
            FilterValue::Range { from, to } => {
                if let Some(from) = from.as_deref().filter(|v| !v.trim().is_empty()) {
                    pairs.insert(format!("{key}_from"), from.trim().to_string());
                }
                if let Some(to) = to.as_deref().filter(|v| !v.trim().is_empty()) {
                    pairs.insert(format!("{key}_to"), to.trim().to_string());
                }
            }
        }
    }
    pairs
}

/// Параметры запроса страницы (page начинается с 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: usize,
    pub per_page: usize,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub filters: FilterMap,
}

impl ListQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page,
            sort_by: None,
            sort_order: None,
            filters: FilterMap::new(),
        }
    }

    /// Все параметры запроса одной плоской картой
    pub fn to_query_pairs(&self) -> BTreeMap<String, String> {
        let mut pairs = flatten_filters(&self.filters);
        pairs.insert("page".to_string(), self.page.to_string());
        pairs.insert("per_page".to_string(), self.per_page.to_string());
        if let Some(sort_by) = &self.sort_by {
            pairs.insert("sort_by".to_string(), sort_by.clone());
            let order = self.sort_order.unwrap_or_default();
            pairs.insert("sort_order".to_string(), order.as_str().to_string());
        }
        pairs
    }
}

/// Ответ API на запрос страницы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    #[error("page holds {items} items but per_page is {per_page}")]
    TooManyItems { items: usize, per_page: usize },

    #[error("per_page must be positive")]
    ZeroPageSize,
}

impl<T> ListPage<T> {
    pub fn empty(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            pages: 1,
            per_page,
        }
    }

    /// Проверяет внутреннюю согласованность ответа
    pub fn check_consistency(&self) -> Result<(), PageError> {
        if self.per_page == 0 {
            return Err(PageError::ZeroPageSize);
        }
        if self.items.len() > self.per_page {
            return Err(PageError::TooManyItems {
                items: self.items.len(),
                per_page: self.per_page,
            });
        }
        Ok(())
    }
}

/// Количество страниц; для пустого набора всегда одна страница
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if total == 0 || per_page == 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 50), 1);
        assert_eq!(total_pages(1, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
        assert_eq!(total_pages(10, 0), 1);
    }

    #[test]
    fn test_query_pairs_flatten_filters() {
        let mut query = ListQuery::new(2, 25);
        query.sort_by = Some("code".to_string());
        query.sort_order = Some(SortOrder::Desc);
        query
            .filters
            .insert("status".to_string(), FilterValue::text("active"));
        query.filters.insert(
            "date".to_string(),
            FilterValue::range(Some("2024-01-01".to_string()), None),
        );
        query
            .filters
            .insert("name".to_string(), FilterValue::text("   "));

        let pairs = query.to_query_pairs();
        assert_eq!(pairs.get("page").map(String::as_str), Some("2"));
        assert_eq!(pairs.get("per_page").map(String::as_str), Some("25"));
        assert_eq!(pairs.get("sort_by").map(String::as_str), Some("code"));
        assert_eq!(pairs.get("sort_order").map(String::as_str), Some("desc"));
        assert_eq!(pairs.get("status").map(String::as_str), Some("active"));
        assert_eq!(
            pairs.get("date_from").map(String::as_str),
            Some("2024-01-01")
        );
        assert!(!pairs.contains_key("date_to"));
        assert!(!pairs.contains_key("name"));
    }

    #[test]
    fn test_sort_order_defaults_to_asc_when_missing() {
        let mut query = ListQuery::new(1, 10);
        query.sort_by = Some("code".to_string());
        assert_eq!(
            query.to_query_pairs().get("sort_order").map(String::as_str),
            Some("asc")
        );
    }

    #[test]
    fn test_page_consistency() {
        let page = ListPage {
            items: vec![1, 2, 3],
            total: 3,
            page: 1,
            pages: 1,
            per_page: 2,
        };
        assert_eq!(
            page.check_consistency(),
            Err(PageError::TooManyItems {
                items: 3,
                per_page: 2
            })
        );
        assert!(ListPage::<i32>::empty(10).check_consistency().is_ok());
    }

    #[test]
    fn test_filter_value_json_shape() {
        let v: FilterValue = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(v, FilterValue::text("active"));
        let v: FilterValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FilterValue::Bool(true));
        let v: FilterValue = serde_json::from_str(r#"{"from":"1","to":null}"#).unwrap();
        assert_eq!(v, FilterValue::range(Some("1".to_string()), None));
    }
}
