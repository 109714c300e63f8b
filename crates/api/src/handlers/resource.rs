//! Generic CRUD handler factory.
//!
//! The three catalog entities share one request-handling shape:
//! list / detail / create / update / delete, each with the same
//! validate-check-persist-redirect flow. [`Resource`] captures the
//! per-entity differences (paths, form parsing, store operations, the
//! delete guard, and the view fragments); the handlers and the router
//! below are written once and instantiated per entity.
//!
//! ```text
//! GET  {list}                -> list
//! GET  {base}/create         -> create_form
//! POST {base}/create         -> create
//! GET  {base}/{id}           -> detail
//! GET  {base}/{id}/update    -> update_form
//! POST {base}/{id}/update    -> update
//! GET  {base}/{id}/delete    -> delete_form
//! POST {base}/{id}/delete    -> delete
//! ```

use animart_core::error::CoreError;
use animart_core::types::DbId;
use animart_core::validate::FieldError;
use animart_db::models::item::ItemSummary;
use animart_db::DbPool;
use async_trait::async_trait;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::forms::FromPairs;
use crate::state::AppState;

/// Whether a form submission creates a record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(DbId),
}

impl FormMode {
    /// The URL the form posts back to.
    pub fn action(self, base_path: &str) -> String {
        match self {
            FormMode::Create => format!("{base_path}/create"),
            FormMode::Update(id) => format!("{base_path}/{id}/update"),
        }
    }
}

/// Per-entity wiring for the shared CRUD handler set.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Raw form payload as submitted by the browser.
    type Form: FromPairs + Send + 'static;
    /// Sanitized candidate echoed back into re-rendered forms.
    type Candidate: Send + Sync + 'static;
    /// Row shape used by the list view and form prefill.
    type Record: Send + Sync + 'static;
    /// Fully resolved shape for the detail view.
    type Detail: Send + Sync + 'static;
    /// Auxiliary data the form view needs (option sets).
    type FormContext: Send + Sync + 'static;

    /// Entity name used in not-found messages.
    const ENTITY: &'static str;
    /// Singular path prefix, e.g. `/category`.
    const BASE_PATH: &'static str;
    /// Collection path, e.g. `/categories`.
    const LIST_PATH: &'static str;
    /// Body field carrying the target id on delete POST.
    const DELETE_FIELD: &'static str;

    /// Canonical location of one record.
    fn detail_url(id: DbId) -> String {
        format!("{}/{}", Self::BASE_PATH, id)
    }

    /// Field validation and sanitization. Always yields a candidate, so the
    /// form can re-render pre-filled alongside any errors.
    fn validate(form: Self::Form) -> (Self::Candidate, Vec<FieldError>);

    /// Rebuild a candidate from a stored record, for the update form.
    fn candidate_of(record: &Self::Record) -> Self::Candidate;

    async fn list(pool: &DbPool) -> Result<Vec<Self::Record>, sqlx::Error>;
    async fn find(pool: &DbPool, id: DbId) -> Result<Option<Self::Record>, sqlx::Error>;
    async fn load_detail(pool: &DbPool, id: DbId) -> Result<Option<Self::Detail>, sqlx::Error>;
    async fn form_context(pool: &DbPool) -> Result<Self::FormContext, sqlx::Error>;

    /// Items blocking deletion; an empty list means the record may go.
    async fn blockers(pool: &DbPool, id: DbId) -> Result<Vec<ItemSummary>, sqlx::Error>;

    /// Integrity check plus insert. Returns the id whose canonical location
    /// the client is redirected to (an existing record on duplicate names).
    async fn insert(pool: &DbPool, candidate: &Self::Candidate) -> Result<DbId, AppError>;

    /// Integrity check plus full-record replace, same redirect contract as
    /// [`Resource::insert`].
    async fn replace(pool: &DbPool, id: DbId, candidate: &Self::Candidate)
        -> Result<DbId, AppError>;

    async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error>;

    fn render_list(records: &[Self::Record]) -> String;
    fn render_detail(detail: &Self::Detail) -> String;
    fn render_form(
        mode: FormMode,
        candidate: Option<&Self::Candidate>,
        ctx: &Self::FormContext,
        errors: &[FieldError],
    ) -> String;
    fn render_delete(record: &Self::Record, blockers: &[ItemSummary]) -> String;
}

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

/// GET {list}
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<Html<String>> {
    let records = R::list(&state.pool).await?;
    Ok(Html(R::render_list(&records)))
}

/// GET {base}/{id}
pub async fn detail<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let detail = R::load_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Html(R::render_detail(&detail)))
}

/// GET {base}/create
pub async fn create_form<R: Resource>(State(state): State<AppState>) -> AppResult<Html<String>> {
    let ctx = R::form_context(&state.pool).await?;
    Ok(Html(R::render_form(FormMode::Create, None, &ctx, &[])))
}

/// POST {base}/create
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let (candidate, errors) = R::validate(R::Form::from_pairs(&pairs));

    if !errors.is_empty() {
        let ctx = R::form_context(&state.pool).await?;
        let page = R::render_form(FormMode::Create, Some(&candidate), &ctx, &errors);
        return Ok(Html(page).into_response());
    }

    let id = R::insert(&state.pool, &candidate).await?;
    Ok(Redirect::to(&R::detail_url(id)).into_response())
}

/// GET {base}/{id}/update
pub async fn update_form<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let (record, ctx) = tokio::try_join!(R::find(&state.pool, id), R::form_context(&state.pool))?;
    let record = record.ok_or_else(|| not_found::<R>(id))?;
    let candidate = R::candidate_of(&record);
    Ok(Html(R::render_form(
        FormMode::Update(id),
        Some(&candidate),
        &ctx,
        &[],
    )))
}

/// POST {base}/{id}/update
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let (candidate, errors) = R::validate(R::Form::from_pairs(&pairs));

    if !errors.is_empty() {
        let ctx = R::form_context(&state.pool).await?;
        let page = R::render_form(FormMode::Update(id), Some(&candidate), &ctx, &errors);
        return Ok(Html(page).into_response());
    }

    let target = R::replace(&state.pool, id, &candidate).await?;
    Ok(Redirect::to(&R::detail_url(target)).into_response())
}

/// GET {base}/{id}/delete
///
/// An already-absent record redirects to the list view instead of erroring.
pub async fn delete_form<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let (record, blockers) =
        tokio::try_join!(R::find(&state.pool, id), R::blockers(&state.pool, id))?;

    match record {
        None => Ok(Redirect::to(R::LIST_PATH).into_response()),
        Some(record) => Ok(Html(R::render_delete(&record, &blockers)).into_response()),
    }
}

/// POST {base}/{id}/delete
///
/// The target id comes from the request body (the confirmation form
/// resubmits it explicitly), not the URL parameter. Dependents are
/// re-resolved: if any exist the confirmation re-renders and nothing is
/// deleted; a record already gone counts as success.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(_id): Path<DbId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id: DbId = crate::forms::first(&pairs, R::DELETE_FIELD)
        .trim()
        .parse()
        .map_err(|_| {
            AppError::BadRequest(format!("missing or invalid {} field", R::DELETE_FIELD))
        })?;

    let blockers = R::blockers(&state.pool, id).await?;
    if !blockers.is_empty() {
        let record = R::find(&state.pool, id)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        return Ok(Html(R::render_delete(&record, &blockers)).into_response());
    }

    R::delete(&state.pool, id).await?;
    Ok(Redirect::to(R::LIST_PATH).into_response())
}

/// Mount the nine routes for one entity. The literal `create` route is
/// registered before the `{id}` wildcard.
pub fn router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(R::LIST_PATH, get(list::<R>))
        .route(
            &format!("{}/create", R::BASE_PATH),
            get(create_form::<R>).post(create::<R>),
        )
        .route(&format!("{}/{{id}}", R::BASE_PATH), get(detail::<R>))
        .route(
            &format!("{}/{{id}}/update", R::BASE_PATH),
            get(update_form::<R>).post(update::<R>),
        )
        .route(
            &format!("{}/{{id}}/delete", R::BASE_PATH),
            get(delete_form::<R>).post(delete::<R>),
        )
}
