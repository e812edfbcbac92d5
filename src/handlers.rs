use crate::errors::AppError;
use crate::models::{
    BannerQuery, DeleteForm, DeleteResponse, Entry, Preview, PreviewQuery, ProgressForm,
    ProgressResponse, SaveResponse, Statistics,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::{error, info};

pub async fn index(State(state): State<AppState>, Query(banner): Query<BannerQuery>) -> Html<String> {
    let progress = state.tracker.progress().await;
    Html(render_index(&today_string(), &progress, &banner))
}

pub async fn submit_form(State(state): State<AppState>, Form(form): Form<ProgressForm>) -> Redirect {
    match state.tracker.submit(&form).await {
        Ok(_) => Redirect::to("/?notice=added"),
        Err(err) => Redirect::to(&format!("/?error={}", err.code())),
    }
}

pub async fn delete_form(State(state): State<AppState>, Form(form): Form<DeleteForm>) -> Redirect {
    match state.tracker.delete(&form.date).await {
        Ok(true) => Redirect::to("/?notice=deleted"),
        Ok(false) => Redirect::to("/"),
        Err(err) => Redirect::to(&format!("/?error={}", err.code())),
    }
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    Json(state.tracker.progress().await)
}

pub async fn submit_json(
    State(state): State<AppState>,
    Json(form): Json<ProgressForm>,
) -> Result<Json<Entry>, AppError> {
    let entry = state.tracker.submit(&form).await?;
    Ok(Json(entry))
}

pub async fn delete_json(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.tracker.delete(&date).await?;
    Ok(Json(DeleteResponse { removed }))
}

pub async fn get_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<Preview>, AppError> {
    let preview = state
        .tracker
        .preview(&query.date, &query.total_word_count)
        .await?;
    Ok(Json(preview))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.tracker.statistics().await)
}

pub async fn load_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = state.store.read().await.map_err(|err| {
        error!("error loading data: {err}");
        AppError::internal(err)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        csv,
    ))
}

pub async fn save_csv(State(state): State<AppState>, body: String) -> Result<impl IntoResponse, AppError> {
    state.store.write(&body).await.map_err(|err| {
        error!("error saving data: {err}");
        AppError::internal(err)
    })?;
    info!("progress data saved at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(SaveResponse {
            status: "success".into(),
            message: "Data saved successfully".into(),
        }),
    ))
}

pub async fn cors_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
