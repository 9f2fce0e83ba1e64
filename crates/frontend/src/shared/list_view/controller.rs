//! Контроллер списочной формы
//!
//! Чистая машина состояний без реактивности и сетевого кода: хранит
//! пагинацию, фильтры, сортировку и выбор, выдаёт снимок запроса и
//! применяет ответы. Реактивная обвязка в `widget.rs`.

use super::filter::{default_filters, FilterDescriptor};
use super::selection::{SelectionMode, SelectionModel};
use crate::shared::api::ApiError;
use contracts::domain::common::Identified;
use contracts::shared::list::{
    total_pages, FilterMap, FilterValue, ListPage, ListQuery, SortOrder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub total: usize,
    /// Номер страницы, начиная с 1
    pub page: usize,
    pub pages: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            total: 0,
            page: 1,
            pages: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.pages.max(1))
    }
}

/// Выданный запрос: номер и снимок параметров
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub id: u64,
    pub query: ListQuery,
}

/// Что произошло с пришедшим ответом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// Ответ на устаревший запрос, отброшен
    Stale,
}

pub struct ListController<T> {
    scope: String,
    items: Vec<T>,
    pagination: PaginationState,
    sort_by: Option<String>,
    sort_order: SortOrder,
    filters: FilterMap,
    selection: SelectionModel,
    loading: bool,
    error: Option<String>,
    is_loaded: bool,
    latest_request: u64,
    refresh_generation: u64,
    data_version: u64,
}

impl<T: Identified + Clone> ListController<T> {
    /// `scope`: имя сущности для логов
    pub fn new(scope: impl Into<String>, page_size: usize, mode: SelectionMode) -> Self {
        Self {
            scope: scope.into(),
            items: Vec::new(),
            pagination: PaginationState::new(page_size),
            sort_by: None,
            sort_order: SortOrder::Asc,
            filters: FilterMap::new(),
            selection: SelectionModel::new(mode),
            loading: false,
            error: None,
            is_loaded: false,
            latest_request: 0,
            refresh_generation: 0,
            data_version: 0,
        }
    }

    pub fn with_filters(mut self, descriptors: &[FilterDescriptor]) -> Self {
        self.filters = default_filters(descriptors);
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(column.into());
        self.sort_order = order;
        self
    }

    // ------------------------------------------------------------------
    // Чтение состояния
    // ------------------------------------------------------------------

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn active_filters_count(&self) -> usize {
        self.filters.len()
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.is_loaded && self.items.is_empty()
    }

    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    pub fn refresh_generation(&self) -> u64 {
        self.refresh_generation
    }

    /// Снимок параметров запроса по текущему состоянию
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.pagination.page,
            per_page: self.pagination.page_size,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_by.as_ref().map(|_| self.sort_order),
            filters: self.filters.clone(),
        }
    }

    /// Ключ, изменение которого должно вызывать перезагрузку
    pub fn fetch_key(&self) -> (ListQuery, u64) {
        (self.query(), self.refresh_generation)
    }

    pub fn selected_items(&self) -> Vec<T> {
        self.selection.selected_items(&self.items)
    }

    // ------------------------------------------------------------------
    // Действия пользователя
    // ------------------------------------------------------------------

    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = self.pagination.clamp_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
        self.pagination.page = 1;
    }

    /// Пустое значение удаляет фильтр
    pub fn set_filter(&mut self, key: &str, value: Option<FilterValue>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.filters.insert(key.to_string(), value);
            }
            None => {
                self.filters.remove(key);
            }
        }
        self.pagination.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
        self.pagination.page = 1;
    }

    pub fn set_sort(&mut self, column: impl Into<String>, order: SortOrder) {
        self.sort_by = Some(column.into());
        self.sort_order = order;
    }

    /// Клик по заголовку: та же колонка меняет направление, новая сортируется по возрастанию
    pub fn toggle_sort(&mut self, column: &str) {
        if self.sort_by.as_deref() == Some(column) {
            self.sort_order = self.sort_order.reversed();
        } else {
            self.sort_by = Some(column.to_string());
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Повторить загрузку с текущими параметрами
    pub fn refetch(&mut self) {
        self.refresh_generation += 1;
    }

    pub fn toggle_selected(&mut self, id: &str, selected: bool) {
        self.selection.toggle(id, selected);
    }

    pub fn select_all(&mut self, selected: bool) {
        self.selection.select_all(selected, &self.items);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Жизненный цикл запроса
    // ------------------------------------------------------------------

    /// Регистрирует новый запрос; все ранее выданные становятся устаревшими
    pub fn begin_request(&mut self) -> FetchTicket {
        self.latest_request += 1;
        self.loading = true;
        let ticket = FetchTicket {
            id: self.latest_request,
            query: self.query(),
        };
        log::info!(
            target: "list_view",
            "[{}] request #{} page={} per_page={} filters={}",
            self.scope,
            ticket.id,
            ticket.query.page,
            ticket.query.per_page,
            ticket.query.filters.len()
        );
        ticket
    }

    /// Применяет ответ. Учитывается только ответ на последний запрос.
    pub fn apply_response(
        &mut self,
        request_id: u64,
        result: Result<ListPage<T>, ApiError>,
    ) -> ApplyOutcome {
        if request_id != self.latest_request {
            log::warn!(
                target: "list_view",
                "[{}] dropping stale response #{} (latest #{})",
                self.scope,
                request_id,
                self.latest_request
            );
            return ApplyOutcome::Stale;
        }
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(e) => return self.fail(e.to_string()),
        };
        if let Err(e) = page.check_consistency() {
            return self.fail(format!("Некорректный ответ сервера: {}", e));
        }

        let pages = page.pages.max(total_pages(page.total, page.per_page)).max(1);
        self.pagination = PaginationState {
            total: page.total,
            page: page.page.clamp(1, pages),
            pages,
            page_size: page.per_page,
        };
        self.items = page.items;
        self.selection.retain_loaded(&self.items);
        self.error = None;
        self.is_loaded = true;
        self.data_version += 1;

        log::info!(
            target: "list_view",
            "[{}] applied #{}: {} items, page {}/{} (total {})",
            self.scope,
            request_id,
            self.items.len(),
            self.pagination.page,
            self.pagination.pages,
            self.pagination.total
        );
        ApplyOutcome::Applied
    }

    /// Ошибка загрузки: старые данные и выбор остаются на месте
    fn fail(&mut self, message: String) -> ApplyOutcome {
        log::error!(target: "list_view", "[{}] fetch failed: {}", self.scope, message);
        self.error = Some(message);
        ApplyOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: &[&str], total: usize, page: usize, per_page: usize) -> ListPage<String> {
        ListPage {
            items: ids.iter().map(|s| s.to_string()).collect(),
            total,
            page,
            pages: total_pages(total, per_page),
            per_page,
        }
    }

    fn controller() -> ListController<String> {
        ListController::new("test", 2, SelectionMode::Multiple)
    }

    fn load(c: &mut ListController<String>, page: ListPage<String>) {
        let ticket = c.begin_request();
        assert_eq!(c.apply_response(ticket.id, Ok(page)), ApplyOutcome::Applied);
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        let p = c.pagination();
        assert_eq!((p.page, p.pages, p.total), (1, 1, 0));
        assert!(!c.is_loaded());
        assert!(!c.is_loading());
        assert_eq!(c.query(), ListQuery::new(1, 2));
    }

    #[test]
    fn test_successful_fetch_keeps_pagination_invariant() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 5, 2, 2));
        let p = c.pagination();
        assert!(c.items().len() <= p.page_size);
        assert!(p.page >= 1 && p.page <= p.pages);
        assert_eq!((p.page, p.pages, p.total), (2, 3, 5));

        // Сервер вернул страницу за пределами диапазона
        let mut beyond = page_of(&[], 3, 7, 2);
        beyond.pages = 2;
        load(&mut c, beyond);
        let p = c.pagination();
        assert_eq!((p.page, p.pages), (2, 2));
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let mut c = controller();
        load(&mut c, ListPage { items: vec![], total: 0, page: 1, pages: 0, per_page: 2 });
        assert_eq!(c.pagination().pages, 1);
        assert_eq!(c.pagination().page, 1);
        assert!(c.is_empty());
    }

    #[test]
    fn test_inconsistent_response_is_an_error() {
        let mut c = controller();
        load(&mut c, page_of(&["a"], 1, 1, 2));
        let ticket = c.begin_request();
        let outcome = c.apply_response(ticket.id, Ok(page_of(&["x", "y", "z"], 3, 1, 2)));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(c.error().is_some());
        assert_eq!(c.items(), &["a".to_string()]);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 10, 1, 2));

        c.set_page(4);
        c.set_filter("status", Some(FilterValue::text("active")));
        assert_eq!(c.pagination().page, 1);

        c.set_page(3);
        c.reset_filters();
        assert_eq!(c.pagination().page, 1);
        assert!(c.filters().is_empty());

        c.set_page(5);
        c.set_page_size(100);
        assert_eq!(c.pagination().page, 1);
        assert_eq!(c.query().per_page, 100);
    }

    #[test]
    fn test_empty_filter_value_removes_key() {
        let mut c = controller();
        c.set_filter("q", Some(FilterValue::text("coffee")));
        assert_eq!(c.active_filters_count(), 1);
        c.set_filter("q", Some(FilterValue::text("  ")));
        assert_eq!(c.active_filters_count(), 0);
        c.set_filter("q", Some(FilterValue::text("tea")));
        c.set_filter("q", None);
        assert!(c.filters().is_empty());
    }

    #[test]
    fn test_set_page_is_clamped() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 6, 1, 2));
        c.set_page(0);
        assert_eq!(c.pagination().page, 1);
        c.set_page(99);
        assert_eq!(c.pagination().page, 3);
        c.set_page(2);
        assert_eq!(c.query().page, 2);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 6, 1, 2));
        c.set_page(3);
        c.set_sort("code", SortOrder::Desc);
        assert_eq!(c.pagination().page, 3);
        let q = c.query();
        assert_eq!(q.sort_by.as_deref(), Some("code"));
        assert_eq!(q.sort_order, Some(SortOrder::Desc));

        c.toggle_sort("code");
        assert_eq!(c.sort_order(), SortOrder::Asc);
        c.toggle_sort("description");
        assert_eq!(c.sort_by(), Some("description"));
        assert_eq!(c.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_fetch_error_keeps_stale_data_and_selection() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 2, 1, 2));
        c.toggle_selected("a", true);

        let ticket = c.begin_request();
        let outcome = c.apply_response(ticket.id, Err(ApiError::Network("offline".to_string())));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(!c.is_loading());
        assert_eq!(c.error(), Some("Network error: offline"));
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.selection().ids(), vec!["a".to_string()]);

        load(&mut c, page_of(&["a", "b"], 2, 1, 2));
        assert_eq!(c.error(), None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut c = controller();
        c.set_filter("status", Some(FilterValue::text("draft")));
        let first = c.begin_request();
        c.set_filter("status", Some(FilterValue::text("posted")));
        let second = c.begin_request();
        assert_eq!(
            second.query.filters.get("status"),
            Some(&FilterValue::text("posted"))
        );

        // Поздний ответ на первый запрос не должен ничего менять
        assert_eq!(
            c.apply_response(second.id, Ok(page_of(&["posted-1"], 1, 1, 2))),
            ApplyOutcome::Applied
        );
        assert_eq!(
            c.apply_response(first.id, Ok(page_of(&["draft-1", "draft-2"], 2, 1, 2))),
            ApplyOutcome::Stale
        );
        assert_eq!(c.items(), &["posted-1".to_string()]);
    }

    #[test]
    fn test_stale_response_arriving_first_keeps_loading() {
        let mut c = controller();
        let first = c.begin_request();
        c.set_filter("q", Some(FilterValue::text("x")));
        let second = c.begin_request();

        assert_eq!(
            c.apply_response(first.id, Err(ApiError::Network("late".to_string()))),
            ApplyOutcome::Stale
        );
        assert!(c.is_loading());
        assert_eq!(c.error(), None);

        c.apply_response(second.id, Ok(page_of(&["x1"], 1, 1, 2)));
        assert!(!c.is_loading());
        assert_eq!(c.items(), &["x1".to_string()]);
    }

    #[test]
    fn test_selection_is_local_to_loaded_page() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 4, 1, 2));
        c.select_all(true);
        assert_eq!(c.selected_items().len(), 2);

        c.set_page(2);
        load(&mut c, page_of(&["c", "d"], 4, 2, 2));
        assert!(c.selection().is_empty());
        assert!(c.selected_items().is_empty());
    }

    #[test]
    fn test_refetch_changes_fetch_key_only() {
        let mut c = controller();
        let (query_before, generation_before) = c.fetch_key();
        c.refetch();
        let (query_after, generation_after) = c.fetch_key();
        assert_eq!(query_before, query_after);
        assert_eq!(generation_after, generation_before + 1);
    }

    #[test]
    fn test_query_mutators_change_fetch_key() {
        let mut c = controller();
        load(&mut c, page_of(&["a", "b"], 6, 1, 2));

        let before = c.fetch_key();
        c.set_page(2);
        let after_page = c.fetch_key();
        assert_ne!(before, after_page);
        assert_eq!(after_page.0.page, 2);

        c.set_sort("code", SortOrder::Desc);
        let after_sort = c.fetch_key();
        assert_ne!(after_page, after_sort);
        assert_eq!(after_sort.0.sort_by.as_deref(), Some("code"));

        c.set_page_size(5);
        let after_size = c.fetch_key();
        assert_ne!(after_sort, after_size);
        assert_eq!((after_size.0.page, after_size.0.per_page), (1, 5));

        // Повтор того же значения ключ не меняет
        c.set_page_size(5);
        assert_eq!(c.fetch_key(), after_size);
    }
}
