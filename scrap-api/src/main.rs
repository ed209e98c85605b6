#![recursion_limit = "256"]

use axum::{
    extract::ConnectInfo,
    response::{Html, IntoResponse},
    routing::post,
    Form, Json, Router,
};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use scrap_app::domain::{PriceQuote, ScrapSubmission, ScrapType};
use scrap_app::form::parse_quantity;
use scrap_app::AppContext;
use scrap_errors::AppError;
use scrap_ui::pages::SubmitScrapFn;
use scrap_ui::App;
use serde::Deserialize;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Field names match the `name` attributes of the form inputs.
#[derive(Deserialize)]
struct QuoteForm {
    seller_name: String,
    scrap_type: String,
    #[serde(default)]
    quantity: String,
    location: String,
}

impl QuoteForm {
    fn into_submission(self) -> Result<ScrapSubmission, String> {
        let scrap_type = self
            .scrap_type
            .parse::<ScrapType>()
            .map_err(|e| e.to_string())?;
        Ok(ScrapSubmission::new(
            self.seller_name,
            scrap_type,
            parse_quantity(&self.quantity),
            self.location,
        ))
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to configure pricing backend: {}", e);
            std::process::exit(1);
        }
    };

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<SubmitScrapFn>();
    tracing::info!("Registered server function: SubmitScrapFn");

    let app = Router::new()
        .route("/quote", post({
            let ctx = app_context.clone();
            move |connect_info: ConnectInfo<SocketAddr>, form: Form<QuoteForm>| {
                let ctx = ctx.clone();
                async move {
                    handle_quote_form(ctx, connect_info.0, form.0).await
                }
            }
        }))
        .route("/quote.json", post({
            let ctx = app_context.clone();
            move |connect_info: ConnectInfo<SocketAddr>, body: Json<ScrapSubmission>| {
                let ctx = ctx.clone();
                async move {
                    handle_quote_json(ctx, connect_info.0, body.0).await
                }
            }
        }))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Pricing model: {}", app_context.request_quote.model());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

async fn handle_quote_form(
    ctx: AppContext,
    peer: SocketAddr,
    form: QuoteForm,
) -> impl IntoResponse {
    if let Err(e) = ctx.rate_limiter.check_rate_limit(peer.ip()) {
        return Html(render_error_page(&e.message()));
    }

    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Rejected quote form from {}: {}", peer, e);
            return Html(render_error_page("Please choose a valid scrap type."));
        }
    };

    match ctx.request_quote.execute(submission).await {
        Ok(quote) => Html(render_result_page(&quote)),
        Err(e) => {
            tracing::warn!("Quote form for {} failed: {}", peer, e);
            Html(render_error_page(e.user_message()))
        }
    }
}

async fn handle_quote_json(
    ctx: AppContext,
    peer: SocketAddr,
    submission: ScrapSubmission,
) -> Result<Json<PriceQuote>, AppError> {
    ctx.rate_limiter
        .check_rate_limit(peer.ip())
        .map_err(|e| AppError::RateLimited(e.message()))?;

    let quote = ctx.request_quote.execute(submission).await.inspect_err(|e| {
        tracing::warn!("JSON quote for {} failed: {}", peer, e);
    })?;
    Ok(Json(quote))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_result_page(quote: &PriceQuote) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Your Quote - Scrap Pricing</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        <div class="quote">
            <h2 class="quote__title">Your Quote</h2>
            <dl class="quote__details">
                <dt>Material</dt><dd>{material}</dd>
                <dt>Quantity</dt><dd>{quantity} kg</dd>
                <dt>Rate</dt><dd>{rate:.2} {currency} / kg</dd>
            </dl>
            <p class="quote__total">{total}</p>
            <p class="quote__summary">{summary}</p>
            <a href="/" class="quote__again">Price Another Load</a>
        </div>
    </main>
</body>
</html>"#,
        CSS = CSS,
        material = escape_html(quote.scrap_type.label()),
        quantity = quote.quantity_kg,
        rate = quote.price_per_kg,
        currency = escape_html(&quote.currency),
        total = escape_html(&quote.formatted_total()),
        summary = escape_html(&quote.summary),
    )
}

fn render_error_page(message: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Error - Scrap Pricing</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        <div class="error">
            <p class="error__title">Could not get a quote</p>
            <p class="error__message">{message}</p>
            <a href="/" class="error__retry">Try Again</a>
        </div>
    </main>
</body>
</html>"#, message = escape_html(message), CSS = CSS)
}

const CSS: &str = r#"
:root {
    --base: #f6faf7;
    --surface: #ffffff;
    --overlay: #e3efe7;
    --muted: #8aa596;
    --subtle: #5f7a6b;
    --text: #1f3a2c;
    --primary: #10975b;
    --primary-dark: #0b6b41;
    --danger: #c2410c;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
}
.container { max-width: 720px; margin: 0 auto; padding: 1.5rem; }
.hero { text-align: center; padding: 3rem 0 2rem; }
.hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--primary-dark); font-weight: 800; margin-bottom: 0.75rem; }
.hero__subtitle { color: var(--subtle); font-size: 1.1rem; max-width: 500px; margin: 0 auto; }
.scrap-card {
    background: var(--surface); border-top: 6px solid var(--primary);
    border-radius: 12px; padding: 1.5rem; box-shadow: 0 10px 30px rgba(6, 78, 59, 0.08);
}
.scrap-card__title { font-size: 1.5rem; margin-bottom: 0.25rem; }
.scrap-card__description { color: var(--subtle); margin-bottom: 1.5rem; }
.scrap-form { display: flex; flex-direction: column; gap: 1.25rem; }
.scrap-form__row { display: grid; grid-template-columns: 1fr; gap: 1.25rem; }
@media (min-width: 640px) { .scrap-form__row { grid-template-columns: 1fr 1fr; } }
.scrap-form__field { display: flex; flex-direction: column; gap: 0.4rem; }
.scrap-form__label { font-weight: 500; color: var(--subtle); }
.scrap-form__input {
    height: 3rem; padding: 0 1rem; border: 2px solid var(--overlay);
    border-radius: 10px; background: var(--base); color: var(--text); font-size: 1rem;
}
.scrap-form__input:focus { outline: none; border-color: var(--primary); background: var(--surface); }
.scrap-form__message { color: var(--danger); font-size: 0.9rem; }
.scrap-form__button {
    display: flex; align-items: center; justify-content: center; gap: 0.5rem;
    height: 3rem; background: var(--primary); color: var(--surface);
    border: none; border-radius: 10px; font-size: 1.1rem; font-weight: 600; cursor: pointer;
}
.scrap-form__button:hover { opacity: 0.9; }
.scrap-form__button:disabled { background: var(--muted); cursor: not-allowed; }
.spinner {
    width: 1.1rem; height: 1.1rem; border: 3px solid rgba(255, 255, 255, 0.4);
    border-top-color: var(--surface); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.quote {
    background: var(--surface); border: 2px solid var(--overlay);
    border-radius: 12px; padding: 1.5rem; margin: 2rem 0;
}
.quote__title { color: var(--primary-dark); font-size: 1.4rem; margin-bottom: 1rem; }
.quote__details { display: grid; grid-template-columns: auto 1fr; gap: 0.4rem 1rem; }
.quote__details dt { color: var(--subtle); }
.quote__total { font-size: 2rem; font-weight: 800; color: var(--primary); margin: 1rem 0 0.5rem; }
.quote__summary { color: var(--subtle); line-height: 1.6; }
.quote__again { display: inline-block; margin-top: 1rem; color: var(--primary-dark); font-weight: 600; }
.error { background: #fff1eb; border: 2px solid var(--danger); border-radius: 8px; padding: 1.25rem; margin: 1rem 0; }
.error__title { color: var(--danger); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #7c2d12; }
.error__retry {
    display: inline-block; margin-top: 1rem; padding: 0.5rem 1rem; background: var(--danger);
    color: var(--surface); border: none; border-radius: 4px; cursor: pointer; text-decoration: none;
}
"#;

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <style>{CSS}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
