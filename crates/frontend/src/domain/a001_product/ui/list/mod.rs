use crate::shared::api::RestResource;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_page::CrudListPage;
use crate::shared::list_view::{Column, FilterDescriptor, FilterKind, ListFetcher, ListItem};
use contracts::domain::a001_product::Product;
use contracts::shared::list::{FilterValue, SortOrder};
use leptos::prelude::*;
use std::sync::Arc;

const RESOURCE: &str = "products";

impl ListItem for Product {
    fn title(&self) -> String {
        format!("{} {}", self.code, self.description)
    }
}

fn columns() -> Vec<Column<Product>> {
    vec![
        Column::new("code", "Код").sortable().min_width(100.0),
        Column::new("description", "Наименование").sortable().min_width(250.0),
        Column::new("category", "Категория").sortable(),
        Column::new("unit", "Ед. изм.").min_width(80.0),
        Column::new("price", "Цена")
            .sortable()
            .render(|_, raw| format!("{:.2}", raw.as_f64().unwrap_or_default())),
        Column::new("is_active", "Активен").min_width(80.0),
    ]
}

fn filters() -> Vec<FilterDescriptor> {
    vec![
        FilterDescriptor::text("search", "Поиск"),
        FilterDescriptor::text("category", "Категория"),
        FilterDescriptor::new("price", FilterKind::Range, "Цена"),
        FilterDescriptor::new("is_active", FilterKind::Boolean, "Активен")
            .with_default(FilterValue::Bool(true)),
    ]
}

#[component]
pub fn ProductList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let rest = Arc::new(RestResource::<Product>::new(RESOURCE, api_base(config.api.port)));
    let fetcher: Arc<dyn ListFetcher<Product>> = rest.clone();
    let deletion: Arc<dyn DeletionService<Product>> = rest.clone();
    let export: Arc<dyn ExportService> = rest;

    view! {
        <CrudListPage
            title="Товары"
            entity=RESOURCE
            fetcher=fetcher
            deletion=deletion
            export=export
            columns=columns()
            filters=filters()
            default_sort=("code", SortOrder::Asc)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn product() -> Product {
        Product {
            id: Uuid::nil(),
            code: "P-001".to_string(),
            description: "Цемент М500".to_string(),
            category: None,
            unit: "мешок".to_string(),
            price: 450.5,
            is_active: true,
        }
    }

    #[test]
    fn test_product_cells() {
        let item = product();
        let texts: Vec<String> = columns().iter().map(|c| c.cell_text(&item)).collect();
        assert_eq!(texts, vec!["P-001", "Цемент М500", "", "мешок", "450.50", "Да"]);
        assert_eq!(item.title(), "P-001 Цемент М500");
    }
}
