use leptos::prelude::*;

/// Заголовок страницы списка: название, подпись и кнопки действий справа
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    /// Подпись под заголовком (например, число записей)
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Кнопки действий
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">{title}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page-header__subtitle">{s}</div>
                })}
            </div>
            <div class="page-header__actions">{children()}</div>
        </div>
    }
}
