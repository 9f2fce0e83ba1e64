//! Реактивная обвязка `ListController` и таблица на thaw
//!
//! Загрузка запускается эффектом при каждом изменении `fetch_key()`
//! контроллера: страница, размер, сортировка, фильтры или `refetch()`.

use super::column::Column;
use super::controller::ListController;
use super::fetcher::ListFetcher;
use super::filter::FilterDescriptor;
use super::selection::SelectionMode;
use super::ListItem;
use crate::shared::components::filter_panel::{FilterField, FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table_checkbox::{
    CheckboxState, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;

#[component]
pub fn ListView<T>(
    controller: RwSignal<ListController<T>>,
    fetcher: Arc<dyn ListFetcher<T>>,
    columns: Vec<Column<T>>,
    /// Описания фильтров; если пусто, панель фильтров не показывается
    #[prop(optional)]
    filters: Vec<FilterDescriptor>,
    /// Период автообновления, 0 выключает
    #[prop(optional)]
    auto_refresh_secs: u32,
    #[prop(optional)]
    search_min_chars: usize,
    /// Вызывается при каждом изменении выбранных строк
    #[prop(optional)]
    on_selection_change: Option<Callback<Vec<T>>>,
    page_size_options: Vec<usize>,
) -> impl IntoView
where
    T: ListItem,
{
    // Загрузка при изменении параметров
    let fetch_key = Memo::new(move |_| controller.with(|c| c.fetch_key()));
    Effect::new(move |_| {
        fetch_key.track();
        let Some(ticket) = controller.try_update(|c| c.begin_request()) else {
            return;
        };
        let fetcher = fetcher.clone();
        spawn_local(async move {
            let result = fetcher.fetch(ticket.query).await;
            controller.try_update(|c| c.apply_response(ticket.id, result));
        });
    });

    if auto_refresh_secs > 0 {
        let active = Arc::new(AtomicBool::new(true));
        let still_mounted = active.clone();
        let interval_ms = auto_refresh_secs.saturating_mul(1000);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(interval_ms).await;
                if !still_mounted.load(Ordering::Relaxed) {
                    break;
                }
                if controller.try_update(|c| c.refetch()).is_none() {
                    break;
                }
            }
        });
        on_cleanup(move || active.store(false, Ordering::Relaxed));
    }

    if let Some(on_selection_change) = on_selection_change {
        let selection_key =
            Memo::new(move |_| controller.with(|c| (c.data_version(), c.selection().ids())));
        Effect::new(move |_| {
            selection_key.track();
            let selected = controller.with_untracked(|c| c.selected_items());
            on_selection_change.run(selected);
        });
    }

    let mode = controller.with_untracked(|c| c.selection().mode());
    let filters_view = (!filters.is_empty()).then(|| filter_panel(controller, filters, search_min_chars));

    let header_state = Signal::derive(move || {
        controller.with(|c| {
            let selected = c
                .items()
                .iter()
                .filter(|item| c.selection().is_selected(&item.id()))
                .count();
            CheckboxState::from_counts(selected, c.items().len())
        })
    });

    let header_cells = columns
        .iter()
        .map(|column| {
            let key = column.key;
            let header = column.header;
            if column.sortable {
                view! {
                    <TableHeaderCell resizable=false min_width=column.min_width>
                        <div
                            class="table__sortable-header"
                            style="cursor: pointer;"
                            on:click=move |_| controller.update(|c| c.toggle_sort(key))
                        >
                            {header}
                            <span class=move || controller.with(|c| get_sort_class(c.sort_by(), key))>
                                {move || controller.with(|c| get_sort_indicator(c.sort_by(), key, c.sort_order()))}
                            </span>
                        </div>
                    </TableHeaderCell>
                }
                .into_any()
            } else {
                view! {
                    <TableHeaderCell resizable=false min_width=column.min_width>
                        {header}
                    </TableHeaderCell>
                }
                .into_any()
            }
        })
        .collect_view();

    let row_columns = columns;

    view! {
        <div class="list-view">
            {filters_view}

            {move || {
                controller.with(|c| c.error().map(str::to_string)).map(|message| view! {
                    <div class="warning-box warning-box--error list-view__error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{message}</span>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| controller.update(|c| c.refetch())
                        >
                            "Повторить"
                        </Button>
                    </div>
                })
            }}

            {move || {
                controller.with(|c| c.is_loading()).then(|| view! {
                    <div class="list-view__loading">"Загрузка..."</div>
                })
            }}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        {match mode {
                            SelectionMode::Multiple => view! {
                                <TableHeaderCheckbox
                                    state=header_state
                                    on_change=Callback::new(move |check_all: bool| {
                                        controller.update(|c| c.select_all(check_all))
                                    })
                                />
                            }
                            .into_any(),
                            SelectionMode::Single => view! {
                                <TableHeaderCell resizable=false class="fixed-checkbox-column">""</TableHeaderCell>
                            }
                            .into_any(),
                            SelectionMode::None => view! { <></> }.into_any(),
                        }}
                        {header_cells}
                    </TableRow>
                </TableHeader>

                <TableBody>
                    <For
                        each=move || {
                            controller.with(|c| {
                                let version = c.data_version();
                                c.items().iter().cloned().map(|item| (version, item)).collect::<Vec<_>>()
                            })
                        }
                        key=|(version, item)| format!("{}:{}", version, item.id())
                        children=move |(_, item)| {
                            let id = item.id();
                            let id_for_toggle = id.clone();
                            let cells = row_columns
                                .iter()
                                .map(|column| {
                                    let text = column.cell_text(&item);
                                    view! {
                                        <TableCell>
                                            <TableCellLayout truncate=true>{text}</TableCellLayout>
                                        </TableCell>
                                    }
                                })
                                .collect_view();

                            view! {
                                <TableRow>
                                    {(mode != SelectionMode::None).then(|| view! {
                                        <TableCellCheckbox
                                            checked=Signal::derive(move || controller.with(|c| c.selection().is_selected(&id)))
                                            on_change=Callback::new(move |checked: bool| {
                                                controller.update(|c| c.toggle_selected(&id_for_toggle, checked))
                                            })
                                        />
                                    })}
                                    {cells}
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            {move || {
                controller.with(|c| c.is_loaded() && c.is_empty() && c.error().is_none()).then(|| view! {
                    <div class="list-view__empty">"Нет данных"</div>
                })
            }}

            <PaginationControls
                current_page=Signal::derive(move || controller.with(|c| c.pagination().page))
                total_pages=Signal::derive(move || controller.with(|c| c.pagination().pages))
                total_count=Signal::derive(move || controller.with(|c| c.pagination().total))
                page_size=Signal::derive(move || controller.with(|c| c.pagination().page_size))
                on_page_change=Callback::new(move |page: usize| controller.update(|c| c.set_page(page)))
                on_page_size_change=Callback::new(move |size: usize| controller.update(|c| c.set_page_size(size)))
                page_size_options=page_size_options
            />
        </div>
    }
}

/// Панель фильтров: активные фильтры тегами и поля ввода
fn filter_panel<T: ListItem>(
    controller: RwSignal<ListController<T>>,
    descriptors: Vec<FilterDescriptor>,
    min_chars: usize,
) -> impl IntoView {
    let is_expanded = RwSignal::new(false);
    let tag_descriptors = descriptors.clone();

    let tags = move || {
        let active = controller.with(|c| c.filters().clone());
        tag_descriptors
            .iter()
            .filter_map(|d| {
                let value = active.get(d.key)?;
                let key = d.key;
                let label = format!("{}: {}", d.label, d.display_value(value));
                Some(view! {
                    <FilterTag
                        label=label
                        on_remove=Callback::new(move |_| controller.update(|c| c.set_filter(key, None)))
                    />
                })
            })
            .collect_view()
    };

    let fields = descriptors
        .into_iter()
        .map(|descriptor| {
            let key = descriptor.key;
            view! {
                <FilterField
                    descriptor=descriptor
                    current=Signal::derive(move || controller.with(|c| c.filters().get(key).cloned()))
                    on_change=Callback::new(move |value| controller.update(|c| c.set_filter(key, value)))
                    min_chars=min_chars
                />
            }
        })
        .collect_view();

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=Signal::derive(move || controller.with(|c| c.active_filters_count()))
            on_reset=Callback::new(move |_| controller.update(|c| c.reset_filters()))
        >
            <div class="filter-panel__tags">{tags}</div>
            <div class="filter-panel__fields">{fields}</div>
        </FilterPanel>
    }
}
