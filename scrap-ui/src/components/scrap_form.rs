use leptos::prelude::*;
use scrap_app::domain::{PriceQuote, ScrapField, ScrapType};
use scrap_app::form::ScrapForm as FormState;
use server_fn::ServerFnError;

use super::{ErrorDisplay, LoadingSpinner};
use crate::pages::SubmitScrapFn;

fn server_error_message(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}

/// Feeds a server-function result into the state machine. Returns the quote
/// only when the form accepted it as a success.
fn apply_result(
    form: &mut FormState,
    result: Result<PriceQuote, ServerFnError>,
) -> Option<PriceQuote> {
    match result {
        Ok(quote) => match form.complete_success() {
            Ok(()) => Some(quote),
            Err(e) => {
                tracing::warn!("Dropping quote the form did not expect: {}", e);
                None
            }
        },
        Err(err) => {
            let message = server_error_message(err);
            tracing::warn!("Scrap submission failed: {}", message);
            if let Err(e) = form.complete_failure(message) {
                tracing::warn!("Ignoring submission failure: {}", e);
            }
            None
        }
    }
}

fn submit_label(busy: bool) -> &'static str {
    if busy {
        "Calculating..."
    } else {
        "Calculate Price"
    }
}

#[component]
fn FieldMessage(form: RwSignal<FormState>, field: ScrapField) -> impl IntoView {
    move || {
        form.with(|f| f.field_error(field).map(str::to_string))
            .map(|message| view! { <p class="scrap-form__message">{message}</p> })
    }
}

/// Scrap details form. Calls `on_success` with the server's quote and then
/// clears itself; on failure the entered values stay for a retry.
#[component]
pub fn ScrapForm(#[prop(into)] on_success: Callback<PriceQuote>) -> impl IntoView {
    let form = RwSignal::new(FormState::new());
    // Raw text of the quantity box, so partial input like "12." survives re-render.
    let quantity_text = RwSignal::new("0".to_string());
    let submit = ServerAction::<SubmitScrapFn>::new();
    let pending = submit.pending();

    Effect::new(move |_| {
        let Some(result) = submit.value().get() else {
            return;
        };
        if let Some(quote) = form.try_update(|f| apply_result(f, result)).flatten() {
            quantity_text.set("0".to_string());
            on_success.run(quote);
        }
    });

    let submit_draft = move || {
        if pending.get_untracked() {
            return;
        }
        let draft = form
            .try_update(|f| f.begin_submit())
            .and_then(Result::ok)
            .flatten();
        if let Some(submission) = draft {
            submit.dispatch(SubmitScrapFn { submission });
        }
    };

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit_draft();
    };

    let is_busy = move || pending.get() || form.with(|f| f.is_submitting());

    view! {
        <div class="scrap-card">
            <div class="scrap-card__header">
                <h2 class="scrap-card__title">"Get Pricing"</h2>
                <p class="scrap-card__description">
                    "Enter your scrap details to get an instant AI-generated quote."
                </p>
            </div>

            // Posts to the plain HTML handler when the page has not hydrated.
            <form class="scrap-form" action="/quote" method="post" on:submit=on_form_submit novalidate>
                <label class="scrap-form__field">
                    <span class="scrap-form__label">"Seller Name"</span>
                    <input
                        type="text"
                        name="seller_name"
                        class="scrap-form__input"
                        placeholder="e.g. John Doe"
                        prop:value=move || form.with(|f| f.draft().seller_name.clone())
                        on:input=move |ev| form.update(|f| f.set_seller_name(event_target_value(&ev)))
                    />
                    <FieldMessage form=form field=ScrapField::SellerName/>
                </label>

                <div class="scrap-form__row">
                    <label class="scrap-form__field">
                        <span class="scrap-form__label">"Scrap Type"</span>
                        <select
                            name="scrap_type"
                            class="scrap-form__input"
                            prop:value=move || form.with(|f| f.draft().scrap_type.as_str())
                            on:change=move |ev| {
                                if let Ok(scrap_type) = event_target_value(&ev).parse::<ScrapType>() {
                                    form.update(|f| f.set_scrap_type(scrap_type));
                                }
                            }
                        >
                            {ScrapType::ALL
                                .into_iter()
                                .map(|scrap_type| view! {
                                    <option value=scrap_type.as_str()>{scrap_type.label()}</option>
                                })
                                .collect_view()}
                        </select>
                        <FieldMessage form=form field=ScrapField::ScrapType/>
                    </label>

                    <label class="scrap-form__field">
                        <span class="scrap-form__label">"Quantity (kg)"</span>
                        <input
                            type="number"
                            name="quantity"
                            class="scrap-form__input"
                            placeholder="0"
                            min="0"
                            step="any"
                            prop:value=move || quantity_text.get()
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                form.update(|f| f.set_quantity_input(&raw));
                                quantity_text.set(raw);
                            }
                        />
                        <FieldMessage form=form field=ScrapField::Quantity/>
                    </label>
                </div>

                <label class="scrap-form__field">
                    <span class="scrap-form__label">"Location"</span>
                    <input
                        type="text"
                        name="location"
                        class="scrap-form__input"
                        placeholder="e.g. New York, NY"
                        prop:value=move || form.with(|f| f.draft().location.clone())
                        on:input=move |ev| form.update(|f| f.set_location(event_target_value(&ev)))
                    />
                    <FieldMessage form=form field=ScrapField::Location/>
                </label>

                {move || {
                    form.with(|f| f.submit_error().map(str::to_string))
                        .map(|message| view! {
                            <ErrorDisplay message=message on_retry=Callback::new(move |_| submit_draft())/>
                        })
                }}

                <button
                    type="submit"
                    class="scrap-form__button"
                    prop:disabled=is_busy
                >
                    {move || {
                        let busy = is_busy();
                        let label = submit_label(busy);
                        if busy {
                            view! { <LoadingSpinner/> <span>{label}</span> }.into_any()
                        } else {
                            view! { <span>{label}</span> }.into_any()
                        }
                    }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrap_app::domain::ScrapSubmission;
    use scrap_app::form::SubmitState;

    fn submitting_form() -> FormState {
        let mut form = FormState::new();
        form.set_seller_name("John Doe");
        form.set_scrap_type(ScrapType::Metal);
        form.set_quantity(12.5);
        form.set_location("NY");
        assert!(form.begin_submit().unwrap().is_some());
        form
    }

    fn quote() -> PriceQuote {
        PriceQuote::new(
            ScrapType::Metal,
            12.5,
            0.8,
            "USD".to_string(),
            "Steady demand".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_success_returns_quote_and_resets_draft() {
        let mut form = submitting_form();

        let delivered = apply_result(&mut form, Ok(quote()));

        assert_eq!(delivered, Some(quote()));
        assert_eq!(form.draft(), &ScrapSubmission::default());
        assert_eq!(form.state(), SubmitState::Idle);
        assert!(form.submit_error().is_none());
    }

    #[test]
    fn test_failure_keeps_draft_and_shows_message() {
        let mut form = submitting_form();

        let delivered = apply_result(&mut form, Err(ServerFnError::new("Pricing is unavailable")));

        assert_eq!(delivered, None);
        assert_eq!(form.state(), SubmitState::Failed);
        assert_eq!(form.submit_error(), Some("Pricing is unavailable"));
        assert_eq!(form.draft().seller_name, "John Doe");
        assert_eq!(form.draft().quantity, 12.5);
    }

    #[test]
    fn test_result_without_pending_submission_is_dropped() {
        let mut form = FormState::new();
        form.set_seller_name("Jane");

        assert_eq!(apply_result(&mut form, Ok(quote())), None);
        assert_eq!(form.draft().seller_name, "Jane");
        assert_eq!(form.state(), SubmitState::Idle);

        assert_eq!(apply_result(&mut form, Err(ServerFnError::new("late"))), None);
        assert!(form.submit_error().is_none());
    }

    #[test]
    fn test_submit_label_follows_busy_state() {
        assert_eq!(submit_label(true), "Calculating...");
        assert_eq!(submit_label(false), "Calculate Price");
    }
}
