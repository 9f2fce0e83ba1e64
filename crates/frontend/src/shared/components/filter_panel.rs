use crate::shared::list_view::filter::{
    accepts_text_input, range_bounds, raw_input_value, update_range, FilterDescriptor, FilterKind,
    RangeBound,
};
use contracts::shared::list::FilterValue;
use leptos::prelude::*;

/// FilterPanel component - collapsible filter panel
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Reset all filters
    on_reset: Callback<()>,

    /// Filter content (form fields and tags)
    children: Children,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>"▾"</span>
                    <span class="filter-panel__title">"Фильтры"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__right">
                    <button
                        class="button button--secondary"
                        disabled=move || active_filters_count.get() == 0
                        on:click=move |_| on_reset.run(())
                    >
                        "Сбросить"
                    </button>
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">{children()}</div>
            </div>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                title="Убрать фильтр"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                "×"
            </span>
        </div>
    }
}

/// Поле ввода одного фильтра по его описанию
#[component]
pub fn FilterField(
    descriptor: FilterDescriptor,
    /// Текущее значение фильтра
    #[prop(into)]
    current: Signal<Option<FilterValue>>,
    /// None: фильтр сброшен
    on_change: Callback<Option<FilterValue>>,
    /// Минимальная длина текстового поиска
    #[prop(optional)]
    min_chars: usize,
) -> impl IntoView {
    let label = descriptor.label;
    let raw_value = move || current.with(|v| raw_input_value(v.as_ref()));

    let input = match descriptor.kind {
        FilterKind::Text => {
            let d = descriptor.clone();
            view! {
                <input
                    type="text"
                    class="filter-field__input"
                    placeholder=label
                    prop:value=raw_value
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        if accepts_text_input(&raw, min_chars) {
                            on_change.run(d.parse_input(&raw));
                        }
                    }
                />
            }
            .into_any()
        }
        FilterKind::Date | FilterKind::Number => {
            let d = descriptor.clone();
            let input_type = if d.kind == FilterKind::Date { "date" } else { "number" };
            view! {
                <input
                    type=input_type
                    class="filter-field__input"
                    prop:value=raw_value
                    on:change=move |ev| on_change.run(d.parse_input(&event_target_value(&ev)))
                />
            }
            .into_any()
        }
        FilterKind::Select | FilterKind::Boolean => {
            let d = descriptor.clone();
            let options = if d.kind == FilterKind::Boolean {
                vec![("true".to_string(), "Да".to_string()), ("false".to_string(), "Нет".to_string())]
            } else {
                d.options
                    .iter()
                    .map(|o| (o.value.clone(), o.label.clone()))
                    .collect()
            };
            view! {
                <select
                    class="filter-field__select"
                    prop:value=raw_value
                    on:change=move |ev| on_change.run(d.parse_input(&event_target_value(&ev)))
                >
                    <option value="">"Все"</option>
                    {options
                        .into_iter()
                        .map(|(value, text)| view! { <option value={value}>{text}</option> })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FilterKind::Range => {
            let from_value = move || current.with(|v| range_bounds(v.as_ref()).0);
            let to_value = move || current.with(|v| range_bounds(v.as_ref()).1);
            view! {
                <span class="filter-field__range">
                    <input
                        type="text"
                        class="filter-field__input"
                        placeholder="с"
                        prop:value=from_value
                        on:change=move |ev| {
                            let raw = event_target_value(&ev);
                            let next = current.with_untracked(|v| update_range(v.as_ref(), RangeBound::From, &raw));
                            on_change.run(next);
                        }
                    />
                    <input
                        type="text"
                        class="filter-field__input"
                        placeholder="по"
                        prop:value=to_value
                        on:change=move |ev| {
                            let raw = event_target_value(&ev);
                            let next = current.with_untracked(|v| update_range(v.as_ref(), RangeBound::To, &raw));
                            on_change.run(next);
                        }
                    />
                </span>
            }
            .into_any()
        }
    };

    view! {
        <label class="filter-field">
            <span class="filter-field__label">{label}</span>
            {input}
        </label>
    }
}
