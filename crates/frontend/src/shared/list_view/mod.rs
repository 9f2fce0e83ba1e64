//! Универсальная списочная форма
//!
//! - `controller`: состояние списка (страница, фильтры, сортировка, выбор)
//! - `selection`: модель выбора строк
//! - `column`, `filter`: описание колонок и фильтров
//! - `fetcher`: источник данных
//! - `widget`: компонент `ListView<T>`

pub mod column;
pub mod controller;
pub mod fetcher;
pub mod filter;
pub mod selection;
pub mod widget;

use contracts::domain::common::Identified;
use serde::Serialize;

pub use column::Column;
pub use controller::{ApplyOutcome, FetchTicket, ListController, PaginationState};
pub use fetcher::ListFetcher;
pub use filter::{FilterDescriptor, FilterKind, FilterOption};
pub use selection::{SelectionMode, SelectionModel};
pub use widget::ListView;

/// Элемент, который можно показать в списочной форме
pub trait ListItem: Identified + Serialize + Clone + Send + Sync + 'static {
    /// Название записи в сообщениях (по умолчанию ID)
    fn title(&self) -> String {
        self.id()
    }
}
