//! HTTP Surface
//!
//! Three routes: the submission form, the submit endpoint, and the aggregate
//! report. Handlers talk to storage and chart rendering only through their
//! traits.

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::aggregate::aggregate;
use crate::chart::{ChartRenderer, ChartSeries};
use crate::flash::{flash_redirect_target, verify_flash};
use crate::signs::{canonical_pair, pair_key, Sign};
use crate::store::RecordStore;
use crate::validate::validate;

struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Internal error</h1><p>{}</p>", self.0)),
        )
            .into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub chart: Arc<dyn ChartRenderer>,
    pub secret_key: String,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/analise", get(analise))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[derive(Deserialize)]
struct FlashQuery {
    flash: Option<String>,
    tag: Option<String>,
}

#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub signo1: String,
    #[serde(default)]
    pub signo2: String,
    #[serde(default)]
    pub duracao: String,
}

const PAGE_STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 760px; margin: 40px auto; padding: 0 20px; color: #222; }
    h1 { font-size: 22px; }
    .flash { background: #eef6ee; border: 1px solid #9c9; padding: 10px 14px; border-radius: 4px; }
    label { display: block; margin-top: 12px; font-size: 14px; }
    select, input { margin-top: 4px; padding: 6px; font-size: 14px; }
    button { margin-top: 16px; padding: 8px 18px; font-size: 14px; cursor: pointer; }
    table { border-collapse: collapse; margin-top: 16px; }
    th, td { border: 1px solid #ccc; padding: 6px 12px; text-align: left; font-size: 14px; }
    th { background: #f4f4f4; }
    img { max-width: 100%; margin-top: 16px; border: 1px solid #ddd; }
    nav { margin-bottom: 24px; font-size: 14px; }
"#;

async fn index(State(state): State<AppState>, Query(params): Query<FlashQuery>) -> Html<String> {
    let flash_html = match (&params.flash, &params.tag) {
        (Some(message), Some(tag)) if verify_flash(&state.secret_key, message, tag) => {
            format!(
                r#"<p class="flash">{}</p>"#,
                html_escape::encode_text(message)
            )
        }
        _ => String::new(),
    };

    let options: String = Sign::ALL
        .iter()
        .map(|sign| format!(r#"<option value="{0}">{0}</option>"#, sign.as_str()))
        .collect();

    Html(format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Zodiac Ledger</title>
    <style>{style}</style>
</head>
<body>
    <nav><a href="/analise">View analysis</a></nav>
    <h1>Record a pairing</h1>
    {flash}
    <form method="post" action="/submit">
        <label>First sign
            <select name="signo1">{options}</select>
        </label>
        <label>Second sign
            <select name="signo2">{options}</select>
        </label>
        <label>Duration (days)
            <input type="number" name="duracao" min="1" max="36525" required>
        </label>
        <button type="submit">Save</button>
    </form>
</body>
</html>"####,
        style = PAGE_STYLE,
        flash = flash_html,
        options = options,
    ))
}

async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Redirect {
    let (sign_a, sign_b, duration) = match validate(&form.signo1, &form.signo2, &form.duracao) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!("rejected submission: {err}");
            return Redirect::to(&flash_redirect_target(&state.secret_key, &err.to_string()));
        }
    };

    let (first, second) = canonical_pair(sign_a, sign_b);
    match state.store.insert(first, second, duration).await {
        Ok(id) => {
            tracing::info!(id, pair = %pair_key(first, second), "stored pairing record");
            Redirect::to(&flash_redirect_target(
                &state.secret_key,
                "Data saved successfully.",
            ))
        }
        Err(err) => {
            tracing::error!("insert failed: {err:#}");
            Redirect::to(&flash_redirect_target(
                &state.secret_key,
                &format!("Failed to save record: {err}"),
            ))
        }
    }
}

async fn analise(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let records = state.store.list_all().await?;

    let Some(report) = aggregate(&records) else {
        return Ok(Html(format!(
            r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Zodiac Ledger - Analysis</title>
    <style>{style}</style>
</head>
<body>
    <nav><a href="/">Back to form</a></nav>
    <h1>Analysis</h1>
    <p>No data recorded yet.</p>
</body>
</html>"####,
            style = PAGE_STYLE,
        )));
    };

    let series = ChartSeries {
        labels: report.groups.iter().map(|g| g.key.clone()).collect(),
        values: report.groups.iter().map(|g| g.total_duration).collect(),
    };
    let png = state.chart.render(&series)?;
    let chart_b64 = STANDARD.encode(&png);

    let group_rows: String = report
        .groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                group.key,
                group.total_duration
            )
        })
        .collect();

    Ok(Html(format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Zodiac Ledger - Analysis</title>
    <style>{style}</style>
</head>
<body>
    <nav><a href="/">Back to form</a></nav>
    <h1>Analysis</h1>
    <p>Longest combination: <b>{max_key}</b> ({max_total} days total)</p>
    <p>Shortest combination: <b>{min_key}</b> ({min_total} days total)</p>
    <p>Mean duration across all {count} records: <b>{mean:.2}</b> days</p>
    <img src="data:image/png;base64,{chart}" alt="Total duration per sign combination">
    <table>
        <tr><th>#</th><th>Combination</th><th>Total duration (days)</th></tr>
        {rows}
    </table>
</body>
</html>"####,
        style = PAGE_STYLE,
        max_key = report.max.key,
        max_total = report.max.total_duration,
        min_key = report.min.key,
        min_total = report.min.total_duration,
        count = report.record_count,
        mean = report.mean_duration,
        chart = chart_b64,
        rows = group_rows,
    )))
}
