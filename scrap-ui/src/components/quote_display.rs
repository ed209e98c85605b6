use leptos::prelude::*;
use scrap_app::domain::PriceQuote;

#[component]
pub fn QuoteDisplay(quote: PriceQuote) -> impl IntoView {
    let rate = format!("{:.2} {} / kg", quote.price_per_kg, quote.currency);
    let total = quote.formatted_total();
    let summary = (!quote.summary.is_empty()).then(|| quote.summary.clone());

    view! {
        <div class="quote">
            <h2 class="quote__title">"Your Quote"</h2>
            <dl class="quote__details">
                <dt>"Material"</dt>
                <dd>{quote.scrap_type.label()}</dd>
                <dt>"Quantity"</dt>
                <dd>{format!("{} kg", quote.quantity_kg)}</dd>
                <dt>"Rate"</dt>
                <dd>{rate}</dd>
            </dl>
            <p class="quote__total">{total}</p>
            {summary.map(|summary| view! { <p class="quote__summary">{summary}</p> })}
        </div>
    }
}
