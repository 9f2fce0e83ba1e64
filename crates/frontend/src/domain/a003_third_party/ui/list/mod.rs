use crate::shared::api::RestResource;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_page::CrudListPage;
use crate::shared::list_view::{Column, FilterDescriptor, FilterKind, FilterOption, ListFetcher, ListItem};
use contracts::domain::a003_third_party::{ThirdParty, ThirdPartyKind};
use contracts::shared::list::SortOrder;
use leptos::prelude::*;
use std::sync::Arc;

const RESOURCE: &str = "third-parties";

impl ListItem for ThirdParty {
    fn title(&self) -> String {
        format!("{} ({})", self.name, self.document_number)
    }
}

fn columns() -> Vec<Column<ThirdParty>> {
    vec![
        Column::new("document_number", "Документ").sortable().min_width(130.0),
        Column::new("name", "Наименование").sortable().min_width(250.0),
        Column::new("kind", "Тип").render(|item: &ThirdParty, _| item.kind.label().to_string()),
        Column::new("email", "Email"),
        Column::new("phone", "Телефон"),
        Column::new("is_active", "Активен").min_width(80.0),
    ]
}

fn filters() -> Vec<FilterDescriptor> {
    vec![
        FilterDescriptor::text("search", "Поиск"),
        FilterDescriptor::select(
            "kind",
            "Тип",
            vec![
                FilterOption::new("customer", ThirdPartyKind::Customer.label()),
                FilterOption::new("supplier", ThirdPartyKind::Supplier.label()),
                FilterOption::new("employee", ThirdPartyKind::Employee.label()),
                FilterOption::new("other", ThirdPartyKind::Other.label()),
            ],
        ),
        FilterDescriptor::new("is_active", FilterKind::Boolean, "Активен"),
    ]
}

#[component]
pub fn ThirdPartyList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let rest = Arc::new(RestResource::<ThirdParty>::new(RESOURCE, api_base(config.api.port)));
    let fetcher: Arc<dyn ListFetcher<ThirdParty>> = rest.clone();
    let deletion: Arc<dyn DeletionService<ThirdParty>> = rest.clone();
    let export: Arc<dyn ExportService> = rest;

    view! {
        <CrudListPage
            title="Контрагенты"
            entity=RESOURCE
            fetcher=fetcher
            deletion=deletion
            export=export
            columns=columns()
            filters=filters()
            default_sort=("name", SortOrder::Asc)
        />
    }
}
