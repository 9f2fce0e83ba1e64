use super::download::download_bytes;
use super::service::ExportService;
use super::workflow::{run_export, ExportError, ExportOptions};
use crate::shared::modal::Modal;
use contracts::shared::export::{ExportFormat, ExportScope};
use contracts::shared::list::FilterMap;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

/// Окно выгрузки списка в файл
#[component]
pub fn ExportModal(
    service: Arc<dyn ExportService>,
    /// Имя сущности, идёт в имя файла
    #[prop(into)]
    entity: String,
    /// Текущие фильтры списка
    #[prop(into)]
    filters: Signal<FilterMap>,
    /// ID выбранных строк
    #[prop(into)]
    selected_ids: Signal<Vec<String>>,
    /// Доступные форматы
    formats: Vec<ExportFormat>,
    on_close: Callback<()>,
) -> impl IntoView {
    let default_format = ExportOptions::default().format;
    let initial_format = if formats.contains(&default_format) {
        default_format
    } else {
        formats.first().copied().unwrap_or(default_format)
    };
    let initial_scope = if selected_ids.get_untracked().is_empty() {
        ExportScope::All
    } else {
        ExportScope::Selected
    };
    let options = RwSignal::new(ExportOptions {
        format: initial_format,
        scope: initial_scope,
        ..ExportOptions::default()
    });
    let running = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let done = RwSignal::new(None::<String>);

    let has_selection = Signal::derive(move || !selected_ids.with(|ids| ids.is_empty()));
    let has_filters = Signal::derive(move || !filters.with(|f| f.is_empty()));

    let start = move |_| {
        if running.get_untracked() {
            return;
        }
        running.set(true);
        error.set(None);
        done.set(None);

        let service = service.clone();
        let entity = entity.clone();
        let current_options = options.get_untracked();
        let current_filters = filters.get_untracked();
        let ids = selected_ids.get_untracked();
        spawn_local(async move {
            let result = run_export(
                service.as_ref(),
                &entity,
                current_options,
                &current_filters,
                &ids,
                chrono::Local::now(),
            )
            .await
            .and_then(|file| {
                download_bytes(&file.bytes, &file.file_name, file.mime_type)
                    .map_err(ExportError::Download)?;
                Ok(file)
            });

            match result {
                Ok(file) => {
                    log::info!(target: "export", "[{}] saved {}", entity, file.file_name);
                    done.try_set(Some(format!(
                        "Выгружено записей: {} ({})",
                        file.record_count, file.file_name
                    )));
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                }
            }
            running.try_set(false);
        });
    };

    view! {
        <Modal title="Экспорт" on_close=on_close>
            <div class="export-modal">
                <label class="export-modal__field">
                    <span>"Формат"</span>
                    <select
                        class="export-modal__select"
                        prop:value=move || options.with(|o| o.format.extension().to_string())
                        on:change=move |ev| {
                            if let Ok(format) = event_target_value(&ev).parse::<ExportFormat>() {
                                options.update(|o| o.format = format);
                            }
                        }
                    >
                        {formats
                            .into_iter()
                            .map(|format| view! {
                                <option
                                    value={format.extension()}
                                    selected=move || options.with(|o| o.format == format)
                                >
                                    {format.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>

                <div class="export-modal__field">
                    <label>
                        <input
                            type="radio"
                            name="export-scope"
                            prop:checked=move || options.with(|o| o.scope == ExportScope::All)
                            on:change=move |_| options.update(|o| o.scope = ExportScope::All)
                        />
                        "Все записи"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="export-scope"
                            disabled=move || !has_selection.get()
                            prop:checked=move || options.with(|o| o.scope == ExportScope::Selected)
                            on:change=move |_| options.update(|o| o.scope = ExportScope::Selected)
                        />
                        {move || format!("Только выбранные ({})", selected_ids.with(Vec::len))}
                    </label>
                </div>

                {move || {
                    (has_filters.get() && options.with(|o| o.scope == ExportScope::All)).then(|| view! {
                        <label class="export-modal__field">
                            <input
                                type="checkbox"
                                prop:checked=move || options.with(|o| o.apply_filters)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    options.update(|o| o.apply_filters = checked);
                                }
                            />
                            "С учётом текущих фильтров"
                        </label>
                    })
                }}

                {move || error.get().map(|message| view! {
                    <div class="export-modal__error">{message}</div>
                })}
                {move || done.get().map(|message| view! {
                    <div class="export-modal__done">{message}</div>
                })}

                <div class="export-modal__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        "Закрыть"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=start
                        disabled=running
                    >
                        {move || if running.get() { "Выгрузка..." } else { "Выгрузить" }}
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
