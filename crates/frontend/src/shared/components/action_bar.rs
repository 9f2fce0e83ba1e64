use leptos::prelude::*;
use thaw::*;

/// Панель массовых действий над выбранными строками
#[component]
pub fn ActionBar(
    /// Количество выбранных строк
    #[prop(into)]
    selected_count: Signal<usize>,
    /// Удалить выбранные
    on_delete: Callback<()>,
    /// Выгрузить (всё или выбранное, решается в окне выгрузки)
    on_export: Callback<()>,
    /// Снять выбор
    on_clear: Callback<()>,
    /// Перезагрузить список
    on_refresh: Callback<()>,
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let nothing_selected = Signal::derive(move || selected_count.get() == 0);

    view! {
        <div class="action-bar">
            <div class="action-bar__left">
                {move || {
                    let count = selected_count.get();
                    (count > 0).then(|| view! {
                        <span class="action-bar__selected">{format!("Выбрано: {}", count)}</span>
                    })
                }}
            </div>
            <div class="action-bar__right">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_refresh.run(())
                    disabled=loading
                >
                    {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_export.run(())
                >
                    "Экспорт"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_clear.run(())
                    disabled=nothing_selected
                >
                    "Снять выбор"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_delete.run(())
                    disabled=nothing_selected
                >
                    "Удалить"
                </Button>
            </div>
        </div>
    }
}
