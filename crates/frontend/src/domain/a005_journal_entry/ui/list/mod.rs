use crate::shared::api::RestResource;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::deletion::DeletionService;
use crate::shared::export::ExportService;
use crate::shared::list_page::CrudListPage;
use crate::shared::list_view::{Column, FilterDescriptor, FilterKind, FilterOption, ListFetcher, ListItem};
use contracts::domain::a005_journal_entry::JournalEntry;
use contracts::shared::list::SortOrder;
use leptos::prelude::*;
use std::sync::Arc;

const RESOURCE: &str = "journal-entries";

impl ListItem for JournalEntry {
    fn title(&self) -> String {
        format!("№{} от {}", self.number, self.date.format("%d.%m.%Y"))
    }
}

fn format_amount(raw: &serde_json::Value) -> String {
    format!("{:.2}", raw.as_f64().unwrap_or_default())
}

fn columns() -> Vec<Column<JournalEntry>> {
    vec![
        Column::new("number", "Номер").sortable().min_width(100.0),
        Column::new("date", "Дата")
            .sortable()
            .min_width(110.0)
            .render(|item: &JournalEntry, _| item.date.format("%d.%m.%Y").to_string()),
        Column::new("description", "Описание").min_width(250.0),
        Column::new("total_debit", "Дебет").sortable().render(|_, raw| format_amount(raw)),
        Column::new("total_credit", "Кредит").sortable().render(|_, raw| format_amount(raw)),
        Column::new("status", "Статус").render(|item: &JournalEntry, _| {
            if item.is_balanced() {
                item.status.label().to_string()
            } else {
                format!("{} (не сбалансирован)", item.status.label())
            }
        }),
    ]
}

fn filters() -> Vec<FilterDescriptor> {
    vec![
        FilterDescriptor::text("search", "Поиск"),
        FilterDescriptor::new("date", FilterKind::Range, "Период"),
        FilterDescriptor::select(
            "status",
            "Статус",
            vec![
                FilterOption::new("draft", "Черновик"),
                FilterOption::new("posted", "Проведён"),
                FilterOption::new("cancelled", "Отменён"),
            ],
        ),
    ]
}

#[component]
pub fn JournalEntryList() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let rest = Arc::new(RestResource::<JournalEntry>::new(RESOURCE, api_base(config.api.port)));
    let fetcher: Arc<dyn ListFetcher<JournalEntry>> = rest.clone();
    let deletion: Arc<dyn DeletionService<JournalEntry>> = rest.clone();
    let export: Arc<dyn ExportService> = rest;

    view! {
        <CrudListPage
            title="Журнал проводок"
            entity=RESOURCE
            fetcher=fetcher
            deletion=deletion
            export=export
            columns=columns()
            filters=filters()
            default_sort=("date", SortOrder::Desc)
        />
    }
}
