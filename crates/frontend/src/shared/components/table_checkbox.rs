//! Чекбоксы выбора строк таблицы
//!
//! # Примеры
//!
//! ```ignore
//! <TableHeaderCheckbox
//!     state=Signal::derive(move || header_state())
//!     on_change=Callback::new(move |check_all: bool| select_all(check_all))
//! />
//! <TableCellCheckbox
//!     checked=Signal::derive(move || is_selected(&id))
//!     on_change=Callback::new(move |checked| toggle(id.clone(), checked))
//! />
//! ```

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckboxState {
    /// Состояние "выбрать все" по числу выбранных строк страницы
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            CheckboxState::Unchecked
        } else if selected >= total {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }
}

/// Компонент чекбокса в заголовке таблицы
///
/// Показывает три состояния: unchecked, checked, indeterminate.
/// При клике переключает между "выбрать все" и "снять все".
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<CheckboxState>,
    /// Callback при изменении (true = выбрать все, false = снять все)
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate выставляется только через DOM
    Effect::new(move |_| {
        let current = state.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(current, CheckboxState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(state.get(), CheckboxState::Checked)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}

/// Компонент чекбокса в ячейке таблицы
///
/// Клик на чекбокс не вызывает клик на строку (stop_propagation).
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    checked: Signal<bool>,
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableCell>
    }
}
