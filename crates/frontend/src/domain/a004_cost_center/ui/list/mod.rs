use crate::shared::api::RestResource;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_page::CrudListPage;
use crate::shared::list_view::{Column, FilterDescriptor, ListFetcher, ListItem};
use contracts::domain::a004_cost_center::CostCenter;
use leptos::prelude::*;
use std::sync::Arc;

const RESOURCE: &str = "cost-centers";

impl ListItem for CostCenter {
    fn title(&self) -> String {
        format!("{} {}", self.code, self.description)
    }
}

#[component]
pub fn CostCenterList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let rest = Arc::new(RestResource::<CostCenter>::new(RESOURCE, api_base(config.api.port)));
    let fetcher: Arc<dyn ListFetcher<CostCenter>> = rest.clone();
    let deletion: Arc<dyn DeletionService<CostCenter>> = rest.clone();
    let export: Arc<dyn ExportService> = rest;

    let columns = vec![
        Column::new("code", "Код").sortable().min_width(100.0),
        Column::new("description", "Наименование").sortable().min_width(250.0),
        Column::new("is_active", "Активен").min_width(80.0),
    ];

    view! {
        <CrudListPage
            title="Центры затрат"
            entity=RESOURCE
            fetcher=fetcher
            deletion=deletion
            export=export
            columns=columns
            filters=vec![FilterDescriptor::text("search", "Поиск")]
        />
    }
}
