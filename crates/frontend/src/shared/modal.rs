use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let overlay_ref = NodeRef::<leptos::html::Div>::new();

    // Фокус на оверлей, чтобы ловить Escape
    Effect::new(move |_| {
        if let Some(overlay) = overlay_ref.get() {
            if let Err(e) = overlay.focus() {
                log::debug!("modal overlay focus failed: {:?}", e);
            }
        }
    });

    let handle_keydown = move |event: ev::KeyboardEvent| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    };

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div
            class="modal-overlay"
            tabindex="-1"
            node_ref=overlay_ref
            on:click=move |_| on_close.run(())
            on:keydown=handle_keydown
        >
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                            "×"
                        </button>
                    </div>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
