use crate::shared::api::RestResource;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_page::CrudListPage;
use crate::shared::list_view::{
    Column, FilterDescriptor, FilterKind, FilterOption, ListFetcher, ListItem,
};
use contracts::domain::a002_account::{Account, AccountNature};
use contracts::shared::list::SortOrder;
use leptos::prelude::*;
use std::sync::Arc;

const RESOURCE: &str = "accounts";

impl ListItem for Account {
    fn title(&self) -> String {
        format!("{} {}", self.code, self.description)
    }
}

fn columns() -> Vec<Column<Account>> {
    vec![
        Column::new("code", "Счёт").sortable().min_width(100.0),
        Column::new("description", "Наименование").sortable().min_width(250.0),
        Column::new("nature", "Характер").render(|item: &Account, _| item.nature.label().to_string()),
        Column::new("level", "Уровень").sortable().min_width(80.0),
        Column::new("is_active", "Активен").min_width(80.0),
    ]
}

fn filters() -> Vec<FilterDescriptor> {
    vec![
        FilterDescriptor::text("search", "Поиск"),
        FilterDescriptor::select(
            "nature",
            "Характер",
            vec![
                FilterOption::new("debit", AccountNature::Debit.label()),
                FilterOption::new("credit", AccountNature::Credit.label()),
            ],
        ),
        FilterDescriptor::new("level", FilterKind::Number, "Уровень"),
    ]
}

#[component]
pub fn AccountList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let rest = Arc::new(RestResource::<Account>::new(RESOURCE, api_base(config.api.port)));
    let fetcher: Arc<dyn ListFetcher<Account>> = rest.clone();
    let deletion: Arc<dyn DeletionService<Account>> = rest.clone();
    let export: Arc<dyn ExportService> = rest;

    view! {
        <CrudListPage
            title="План счетов"
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
