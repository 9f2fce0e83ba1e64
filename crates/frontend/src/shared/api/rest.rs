//! REST-реализация источников данных списка, удаления и выгрузки
//!
//! Эндпоинты ресурса `{resource}`:
//! - `GET  /api/{resource}?page&per_page&sort_by&sort_order&<фильтры>`
//! - `POST /api/{resource}/check-deletable`
//! - `POST /api/{resource}/delete`
//! - `GET  /api/{resource}/ids?<фильтры>`
//! - `POST /api/{resource}/export`

use super::error::ApiError;
use crate::shared::api_utils::build_url;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_view::fetcher::ListFetcher;
use async_trait::async_trait;
use contracts::domain::common::Identified;
use contracts::shared::deletion::{DeleteRequest, DeletionCheck};
use contracts::shared::export::{ExportFormat, ExportRequest, IdsQuery};
use contracts::shared::list::{FilterMap, ListPage, ListQuery};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;

pub struct RestResource<T> {
    resource: &'static str,
    base: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestResource<T> {
    /// `base`: адрес сервера без пути, например `http://localhost:3000`
    pub fn new(resource: &'static str, base: impl Into<String>) -> Self {
        Self {
            resource,
            base: base.into(),
            _marker: PhantomData,
        }
    }

    fn url(&self, action: Option<&str>, query: &str) -> String {
        let path = match action {
            Some(action) => format!("/api/{}/{}", self.resource, action),
            None => format!("/api/{}", self.resource),
        };
        build_url(&self.base, &path, query)
    }
}

/// Строка запроса из плоских пар ключ-значение
pub fn encode_query(pairs: &BTreeMap<String, String>) -> Result<String, ApiError> {
    Ok(serde_qs::to_string(pairs)?)
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        response_status_text(status)
    } else {
        body
    };
    Err(ApiError::status(status, message))
}

fn response_status_text(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        404 => "Not found".to_string(),
        409 => "Conflict".to_string(),
        500..=599 => "Server error".to_string(),
        _ => format!("HTTP error: {}", status),
    }
}

#[async_trait(?Send)]
impl<T> ListFetcher<T> for RestResource<T>
where
    T: DeserializeOwned + 'static,
{
    async fn fetch(&self, query: ListQuery) -> Result<ListPage<T>, ApiError> {
        let url = self.url(None, &encode_query(&query.to_query_pairs())?);
        log::debug!(target: "api", "GET {}", url);

        let response = ensure_ok(Request::get(&url).send().await?).await?;
        Ok(response.json::<ListPage<T>>().await?)
    }
}

#[async_trait(?Send)]
impl<T> DeletionService<T> for RestResource<T>
where
    T: Identified + Serialize + DeserializeOwned + 'static,
{
    async fn check_deletable(&self, items: &[T]) -> Result<DeletionCheck<T>, ApiError> {
        let url = self.url(Some("check-deletable"), "");
        log::debug!(target: "api", "POST {} ({} items)", url, items.len());

        let request = Request::post(&url)
            .json(&items)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = ensure_ok(request.send().await?).await?;
        Ok(response.json::<DeletionCheck<T>>().await?)
    }

    async fn delete_items(&self, items: &[T]) -> Result<(), ApiError> {
        let url = self.url(Some("delete"), "");
        let body = DeleteRequest {
            ids: items.iter().map(Identified::id).collect(),
        };
        log::debug!(target: "api", "POST {} ({} ids)", url, body.ids.len());

        let request = Request::post(&url)
            .json(&body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        ensure_ok(request.send().await?).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl<T> ExportService for RestResource<T> {
    async fn list_ids(&self, filters: &FilterMap) -> Result<Vec<String>, ApiError> {
        let query = IdsQuery {
            filters: filters.clone(),
        };
        let url = self.url(Some("ids"), &encode_query(&query.to_query_pairs())?);
        log::debug!(target: "api", "GET {}", url);

        let response = ensure_ok(Request::get(&url).send().await?).await?;
        Ok(response.json::<Vec<String>>().await?)
    }

    async fn export(&self, ids: &[String], format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        let url = self.url(Some("export"), "");
        let body = ExportRequest {
            ids: ids.to_vec(),
            format,
        };
        log::debug!(target: "api", "POST {} ({} ids, {})", url, ids.len(), format);

        let request = Request::post(&url)
            .json(&body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = ensure_ok(request.send().await?).await?;
        Ok(response.binary().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list::{FilterValue, SortOrder};

    #[test]
    fn test_resource_urls() {
        let rest: RestResource<()> = RestResource::new("products", "http://localhost:3000");
        assert_eq!(rest.url(None, ""), "http://localhost:3000/api/products");
        assert_eq!(
            rest.url(Some("check-deletable"), ""),
            "http://localhost:3000/api/products/check-deletable"
        );
        assert_eq!(
            rest.url(Some("ids"), "status=active"),
            "http://localhost:3000/api/products/ids?status=active"
        );
    }

    #[test]
    fn test_list_query_encoding() {
        let mut query = ListQuery::new(2, 25);
        query.sort_by = Some("code".to_string());
        query.sort_order = Some(SortOrder::Desc);
        query
            .filters
            .insert("status".to_string(), FilterValue::text("active"));

        let encoded = encode_query(&query.to_query_pairs()).unwrap();
        assert_eq!(
            encoded,
            "page=2&per_page=25&sort_by=code&sort_order=desc&status=active"
        );
    }

    #[test]
    fn test_query_values_are_escaped() {
        let mut pairs = BTreeMap::new();
        pairs.insert("name".to_string(), "a&b".to_string());
        let encoded = encode_query(&pairs).unwrap();
        assert!(!encoded.contains("a&b"));
        assert!(encoded.starts_with("name=a"));
    }
}
