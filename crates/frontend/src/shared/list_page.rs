//! Типовая страница списка: таблица, панель действий, удаление и выгрузка
//!
//! После успешного удаления список перезагружается целиком,
//! локальных правок данных нет.

use crate::shared::components::action_bar::ActionBar;
use crate::shared::components::page_header::PageHeader;
use crate::shared::config::AppConfig;
use crate::shared::deletion::{DeleteModal, DeletionService};
use crate::shared::export::{ExportModal, ExportService};
use crate::shared::list_view::{
    Column, FilterDescriptor, ListController, ListFetcher, ListItem, ListView, SelectionMode,
};
use contracts::shared::list::SortOrder;
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn CrudListPage<T>(
    #[prop(into)]
    title: String,
    /// Имя сущности: контекст логов и имя файла выгрузки
    entity: &'static str,
    fetcher: Arc<dyn ListFetcher<T>>,
    deletion: Arc<dyn DeletionService<T>>,
    export: Arc<dyn ExportService>,
    columns: Vec<Column<T>>,
    #[prop(optional)]
    filters: Vec<FilterDescriptor>,
    /// Начальная сортировка
    #[prop(optional)]
    default_sort: Option<(&'static str, SortOrder)>,
    #[prop(optional)]
    selection_mode: SelectionMode,
) -> impl IntoView
where
    T: ListItem,
{
    let config = use_context::<AppConfig>().unwrap_or_default();

    let mut initial = ListController::new(entity, config.list.default_page_size, selection_mode)
        .with_filters(&filters);
    if let Some((column, order)) = default_sort {
        initial = initial.with_sort(column, order);
    }
    let controller = RwSignal::new(initial);

    let selected = RwSignal::new(Vec::<T>::new());
    let delete_candidates = RwSignal::new(None::<Vec<T>>);
    let show_export = RwSignal::new(false);

    let delete_error = RwSignal::new(None::<String>);
    let on_delete_error = Callback::new(move |message: String| {
        log::warn!(target: "deletion", "[{}] {}", entity, message);
        delete_error.set(Some(message));
    });

    let on_delete = Callback::new(move |_: ()| {
        let items = selected.get_untracked();
        if items.is_empty() {
            return;
        }
        log::info!(target: "deletion", "[{}] opening delete dialog for {} items", entity, items.len());
        delete_error.set(None);
        delete_candidates.set(Some(items));
    });

    let on_deleted = Callback::new(move |deleted: Vec<T>| {
        log::info!(target: "deletion", "[{}] {} items deleted, reloading", entity, deleted.len());
        delete_candidates.set(None);
        controller.update(|c| {
            c.clear_selection();
            c.refetch();
        });
    });

    let subtitle = Signal::derive(move || {
        controller.with(|c| {
            c.is_loaded()
                .then(|| format!("Всего записей: {}", c.pagination().total))
        })
    });

    let confirm_phrase = config.deletion.confirm_phrase.clone();
    let export_formats = config.export.formats.clone();

    view! {
        <div class="page">
            <PageHeader title=title subtitle=subtitle>
                <ActionBar
                    selected_count=Signal::derive(move || selected.with(Vec::len))
                    on_delete=on_delete
                    on_export=Callback::new(move |_| show_export.set(true))
                    on_clear=Callback::new(move |_| controller.update(|c| c.clear_selection()))
                    on_refresh=Callback::new(move |_| controller.update(|c| c.refetch()))
                    loading=Signal::derive(move || controller.with(|c| c.is_loading()))
                />
            </PageHeader>

            <div class="page__content">
                {move || {
                    delete_error.get().map(|message| view! {
                        <div class="warning-box">{message}</div>
                    })
                }}
                <ListView
                    controller=controller
                    fetcher=fetcher
                    columns=columns
                    filters=filters
                    auto_refresh_secs=config.list.auto_refresh_secs
                    search_min_chars=config.list.search_min_chars
                    on_selection_change=Callback::new(move |items: Vec<T>| selected.set(items))
                    page_size_options=config.list.page_size_options.clone()
                />
            </div>

            {move || {
                delete_candidates.get().map(|items| view! {
                    <DeleteModal
                        items=items
                        service=deletion.clone()
                        scope=entity
                        confirm_phrase=confirm_phrase.clone()
                        on_deleted=on_deleted
                        on_error=on_delete_error
                        on_close=Callback::new(move |_| delete_candidates.set(None))
                    />
                })
            }}

            {move || {
                show_export.get().then(|| view! {
                    <ExportModal
                        service=export.clone()
                        entity=entity
                        filters=Signal::derive(move || controller.with(|c| c.filters().clone()))
                        selected_ids=Signal::derive(move || controller.with(|c| c.selection().ids()))
                        formats=export_formats.clone()
                        on_close=Callback::new(move |_| show_export.set(false))
                    />
                })
            }}
        </div>
    }
}
