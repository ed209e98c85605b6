use leptos::prelude::*;
use scrap_app::domain::{PriceQuote, ScrapSubmission};
use server_fn::ServerFnError;

use crate::components::{QuoteDisplay, ScrapForm};

#[server(SubmitScrapFn, "/api", endpoint = "submit_scrap")]
pub async fn submit_scrap(submission: ScrapSubmission) -> Result<PriceQuote, ServerFnError> {
    use axum::extract::ConnectInfo;
    use scrap_app::AppContext;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    let ctx = use_context::<AppContext>()
        .ok_or_else(|| ServerFnError::new("Pricing service is not configured"))?;

    let client_ip = leptos_axum::extract::<ConnectInfo<SocketAddr>>()
        .await
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if let Err(e) = ctx.rate_limiter.check_rate_limit(client_ip) {
        return Err(ServerFnError::new(e.message()));
    }

    ctx.request_quote
        .execute(submission)
        .await
        .map_err(|e| {
            tracing::error!("Quote for {} failed: {}", client_ip, e);
            ServerFnError::new(e.user_message())
        })
}

#[component]
pub fn HomePage() -> impl IntoView {
    let last_quote = RwSignal::new(None::<PriceQuote>);

    view! {
        <div class="hero">
            <h1 class="hero__title">"Sell Your Scrap"</h1>
            <p class="hero__subtitle">
                "Paper, plastic, metal or e-waste: tell us what you have and get a price in seconds."
            </p>
        </div>

        <div class="home-layout">
            <ScrapForm on_success=move |quote: PriceQuote| last_quote.set(Some(quote))/>

            {move || last_quote.get().map(|quote| view! { <QuoteDisplay quote=quote/> })}
        </div>
    }
}
