use leptos::prelude::*;

#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error" role="alert">
            <p class="error__title">"Could not get a quote"</p>
            <p class="error__message">{message}</p>
            {move || on_retry.map(|retry| view! {
                <button
                    type="button"
                    class="error__retry"
                    on:click=move |_| retry.run(())
                >
                    "Try Again"
                </button>
            })}
        </div>
    }
}
