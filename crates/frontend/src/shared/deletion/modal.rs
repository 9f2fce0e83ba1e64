use super::service::DeletionService;
use super::workflow::{check_eligibility, delete_eligible, DeletionPhase, DeletionWorkflow};
use crate::shared::list_view::ListItem;
use crate::shared::modal::Modal;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

/// Окно удаления выбранных записей
///
/// При монтировании сразу запускает проверку возможности удаления.
/// Каждое открытие начинается с чистого состояния.
#[component]
pub fn DeleteModal<T>(
    /// Кандидаты на удаление
    items: Vec<T>,
    service: Arc<dyn DeletionService<T>>,
    /// Имя списка для логов
    #[prop(into)]
    scope: String,
    /// Фраза подтверждения массового удаления
    #[prop(into)]
    confirm_phrase: String,
    /// Вызывается с удалёнными записями
    on_deleted: Callback<Vec<T>>,
    /// Вызывается с текстом ошибки проверки или удаления
    #[prop(optional)]
    on_error: Option<Callback<String>>,
    on_close: Callback<()>,
) -> impl IntoView
where
    T: ListItem,
{
    let workflow = RwSignal::new(DeletionWorkflow::<T>::new(confirm_phrase));
    workflow.update(|w| w.open(items));

    {
        let service = service.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let candidates = workflow.with_untracked(|w| w.candidates().to_vec());
            let result = check_eligibility(service.as_ref(), &scope, &candidates).await;
            if let Some(Some(message)) = workflow.try_update(|w| w.apply_check(result)) {
                if let Some(on_error) = on_error {
                    on_error.run(message);
                }
            }
        });
    }

    let submit = move |_| {
        let Some(eligible) = workflow.try_update(|w| w.begin_delete()).flatten() else {
            return;
        };
        let service = service.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let result = delete_eligible(service.as_ref(), &scope, &eligible).await;
            let outcome = workflow.try_update(|w| {
                w.apply_delete(result)
                    .ok_or_else(|| w.error().map(str::to_string))
            });
            match outcome {
                Some(Ok(deleted)) => on_deleted.run(deleted),
                Some(Err(Some(message))) => {
                    if let Some(on_error) = on_error {
                        on_error.run(message);
                    }
                }
                _ => {}
            }
        });
    };

    let phase = move || workflow.with(|w| w.phase());
    let busy = Signal::derive(move || {
        matches!(phase(), DeletionPhase::Checking | DeletionPhase::Deleting)
    });
    let submit_disabled = Signal::derive(move || !workflow.with(|w| w.can_submit()));

    view! {
        <Modal title="Удаление записей" on_close=on_close>
            <div class="delete-modal">
                {move || {
                    (phase() == DeletionPhase::Checking)
                        .then(|| view! { <div class="delete-modal__status">"Проверка возможности удаления..."</div> })
                }}

                {move || {
                    workflow.with(|w| w.error().map(str::to_string)).map(|message| view! {
                        <div class="delete-modal__error">{message}</div>
                    })
                }}

                {move || {
                    workflow.with(|w| {
                        (w.phase() != DeletionPhase::Checking && w.check().is_some()).then(|| {
                            let deletable = w.deletable().len();
                            view! {
                                <div class="delete-modal__summary">
                                    {format!("Будет удалено записей: {}", deletable)}
                                </div>
                            }
                        })
                    })
                }}

                {move || {
                    workflow.with(|w| {
                        let blocked: Vec<(String, String)> = w
                            .non_deletable()
                            .iter()
                            .map(|item| {
                                let reason = w
                                    .check()
                                    .and_then(|c| c.reason_for(&item.id()))
                                    .unwrap_or("Удаление невозможно")
                                    .to_string();
                                (item.title(), reason)
                            })
                            .collect();
                        (!blocked.is_empty()).then(|| view! {
                            <div class="delete-modal__blocked">
                                <div class="delete-modal__blocked-title">"Не могут быть удалены:"</div>
                                <ul>
                                    {blocked
                                        .into_iter()
                                        .map(|(title, reason)| view! {
                                            <li>
                                                <span class="delete-modal__item">{title}</span>
                                                ": "
                                                <span class="delete-modal__reason">{reason}</span>
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        })
                    })
                }}

                {move || {
                    workflow.with(|w| w.nothing_deletable() && w.error().is_none()).then(|| view! {
                        <div class="delete-modal__status">"Нет записей, доступных для удаления"</div>
                    })
                }}

                {move || {
                    workflow.with(|w| {
                        (w.phase() == DeletionPhase::Ready && w.requires_confirmation())
                            .then(|| w.confirm_phrase().to_string())
                    })
                    .map(|phrase| view! {
                        <label class="delete-modal__confirm">
                            <span>{format!("Для подтверждения введите «{}»", phrase)}</span>
                            <input
                                type="text"
                                class="delete-modal__confirm-input"
                                prop:value=move || workflow.with(|w| w.confirmation().to_string())
                                on:input=move |ev| {
                                    let text = event_target_value(&ev);
                                    workflow.update(|w| w.set_confirmation(text));
                                }
                            />
                        </label>
                    })
                }}

                <div class="delete-modal__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || busy.get() || submit_disabled.get())
                    >
                        {move || if phase() == DeletionPhase::Deleting { "Удаление..." } else { "Удалить" }}
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
