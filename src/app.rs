//! Hello List App
//!
//! Root component.

use leptos::prelude::*;

use crate::components::ListView;
use crate::config::ListConfig;

#[component]
pub fn App() -> impl IntoView {
    provide_context(ListConfig::default());

    view! {
        <main class="hello-list">
            <ListView />
        </main>
    }
}
