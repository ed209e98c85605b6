use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <span class="spinner" aria-hidden="true"></span>
    }
}
