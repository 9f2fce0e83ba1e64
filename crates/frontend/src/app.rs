use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_account::ui::list::AccountList;
use crate::domain::a003_third_party::ui::list::ThirdPartyList;
use crate::domain::a004_cost_center::ui::list::CostCenterList;
use crate::domain::a005_journal_entry::ui::list::JournalEntryList;
use crate::shared::config::AppConfig;
use leptos::prelude::*;

/// Разделы приложения; маршрутизации нет, раздел выбирается в меню
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Products,
    Accounts,
    ThirdParties,
    CostCenters,
    JournalEntries,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Products,
        Section::Accounts,
        Section::ThirdParties,
        Section::CostCenters,
        Section::JournalEntries,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Products => "Товары",
            Section::Accounts => "План счетов",
            Section::ThirdParties => "Контрагенты",
            Section::CostCenters => "Центры затрат",
            Section::JournalEntries => "Журнал проводок",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppConfig::load());

    let section = RwSignal::new(Section::Products);

    view! {
        <div class="app">
            <nav class="app__nav">
                {Section::ALL
                    .into_iter()
                    .map(|item| view! {
                        <button
                            class="app__nav-item"
                            class:app__nav-item--active=move || section.get() == item
                            on:click=move |_| section.set(item)
                        >
                            {item.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>
            <main class="app__content">
                {move || match section.get() {
                    Section::Products => view! { <ProductList /> }.into_any(),
                    Section::Accounts => view! { <AccountList /> }.into_any(),
                    Section::ThirdParties => view! { <ThirdPartyList /> }.into_any(),
                    Section::CostCenters => view! { <CostCenterList /> }.into_any(),
                    Section::JournalEntries => view! { <JournalEntryList /> }.into_any(),
                }}
            </main>
        </div>
    }
}
