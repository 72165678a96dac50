//! Item View Component
//!
//! One list row: both fields plus the swap/delete/highlight controls.

use leptos::prelude::*;
use crate::config::ListConfig;
use crate::context::ListContext;
use crate::presenter::{Gesture, RowKey, RowState};

/// A single item row, driven by its presenter
#[component]
pub fn ItemView(row: RowKey) -> impl IntoView {
    let ctx = use_context::<ListContext>().expect("ListContext should be provided");
    let config = use_context::<ListConfig>().unwrap_or_default();

    let Some(presenter) = ctx.row(row) else {
        log::warn!("[ROW] no presenter for {}", row);
        return ().into_any();
    };

    // Presenter pushes every render into this signal
    let state = RwSignal::new(presenter.state());
    presenter.set_sink(move |s: &RowState| state.set(s.clone()));
    let presenter = StoredValue::new_local(presenter);

    on_cleanup(move || {
        presenter.try_with_value(|p| p.clear_sink());
    });

    let row_class = move || config.row_class(state.with(|s| s.highlighted));

    view! {
        <li class=row_class>
            <span class="string1">{move || state.with(|s| s.fields.part1.clone())} " "</span>
            <span class="string2">{move || state.with(|s| s.fields.part2.clone())}</span>
            " \u{a0} \u{a0} "
            {Gesture::ALL.into_iter().map(|gesture| view! {
                <span
                    class=gesture.class()
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        if let Some(p) = presenter.try_get_value() {
                            p.dispatch(gesture);
                        }
                    }
                >
                    {gesture.label()}
                </span>
            }).collect_view()}
        </li>
    }.into_any()
}
