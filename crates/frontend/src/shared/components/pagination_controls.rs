use leptos::prelude::*;

/// PaginationControls component - reusable pagination controls
///
/// Pages are 1-based.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="Первая страница"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Предыдущая страница"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "{} / {} ({})",
                        current_page.get(),
                        total_pages.get().max(1),
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Следующая страница"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=is_last
                title="Последняя страница"
            >
                "»"
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value={size.to_string()} selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
