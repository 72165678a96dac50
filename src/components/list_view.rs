//! List View Component
//!
//! Add button, the row list and a row counter. Owns the list presenter.

use leptos::prelude::*;
use list_model::ItemCollection;

use crate::components::ItemView;
use crate::config::ListConfig;
use crate::context::ListContext;
use crate::presenter::{ListEvent, ListPresenter};
use crate::store::{
    store_append_row, store_remove_row, store_row_count, store_row_keys, store_set_rows, ListState,
    ListStore,
};

#[component]
pub fn ListView() -> impl IntoView {
    let config = use_context::<ListConfig>().unwrap_or_default();

    let store: ListStore = ListStore::new(ListState::default());
    let list = ListPresenter::new(ItemCollection::new());
    store_set_rows(&store, list.row_keys());

    list.subscribe(move |event| match *event {
        ListEvent::RowAppended(key) => store_append_row(&store, key),
        ListEvent::RowDetached(key) => store_remove_row(&store, key),
    });

    let ctx = ListContext::new(list, store);
    provide_context(ctx);

    view! {
        <button id="add" on:click=move |_| ctx.add_item()>{config.add_label}</button>
        <ul class="item-list">
            <For
                each=move || store_row_keys(&store)
                key=|row| *row
                children=move |row| view! { <ItemView row=row /> }
            />
        </ul>
        <p class="item-count">{move || format!("{} items", store_row_count(&store))}</p>
    }
}
