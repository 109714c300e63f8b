//! The `/animes` resource.
//!
//! Animes get the same delete guard as categories: while items still
//! reference one, deletion re-renders the confirmation with the blockers.

use animart_core::error::CoreError;
use animart_core::types::DbId;
use animart_core::validate::{FieldError, FormErrors};
use animart_db::models::anime::{Anime, CreateAnime};
use animart_db::models::item::ItemSummary;
use animart_db::repositories::{AnimeRepo, ItemRepo};
use animart_db::DbPool;
use async_trait::async_trait;

use crate::error::AppError;
use crate::forms::{self, FromPairs};
use crate::handlers::resource::{FormMode, Resource};
use crate::views;

/// Raw anime form fields.
pub struct AnimeForm {
    pub name: String,
    pub summary: String,
}

impl FromPairs for AnimeForm {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: forms::first(pairs, "name"),
            summary: forms::first(pairs, "summary"),
        }
    }
}

/// Sanitized anime candidate.
#[derive(Debug, Clone)]
pub struct AnimeCandidate {
    pub name: String,
    pub summary: String,
}

impl AnimeCandidate {
    fn input(&self) -> CreateAnime {
        CreateAnime {
            name: self.name.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// An anime plus the items referencing it, for the detail view.
pub struct AnimeDetail {
    pub anime: Anime,
    pub items: Vec<ItemSummary>,
}

pub struct AnimeResource;

#[async_trait]
impl Resource for AnimeResource {
    type Form = AnimeForm;
    type Candidate = AnimeCandidate;
    type Record = Anime;
    type Detail = AnimeDetail;
    type FormContext = ();

    const ENTITY: &'static str = "Anime";
    const BASE_PATH: &'static str = "/anime";
    const LIST_PATH: &'static str = "/animes";
    const DELETE_FIELD: &'static str = "animeid";

    fn validate(form: AnimeForm) -> (AnimeCandidate, Vec<FieldError>) {
        let mut errors = FormErrors::new();
        let name = errors.require_text_len(
            "name",
            &form.name,
            3,
            100,
            "Name must be between 3 and 100 characters.",
        );
        let summary = errors.require_text("summary", &form.summary, "Summary is required.");
        (AnimeCandidate { name, summary }, errors.into_vec())
    }

    fn candidate_of(record: &Anime) -> AnimeCandidate {
        AnimeCandidate {
            name: record.name.clone(),
            summary: record.summary.clone(),
        }
    }

    async fn list(pool: &DbPool) -> Result<Vec<Anime>, sqlx::Error> {
        AnimeRepo::list(pool).await
    }

    async fn find(pool: &DbPool, id: DbId) -> Result<Option<Anime>, sqlx::Error> {
        AnimeRepo::find_by_id(pool, id).await
    }

    async fn load_detail(pool: &DbPool, id: DbId) -> Result<Option<AnimeDetail>, sqlx::Error> {
        let (anime, items) = tokio::try_join!(
            AnimeRepo::find_by_id(pool, id),
            ItemRepo::list_by_anime(pool, id),
        )?;
        Ok(anime.map(|anime| AnimeDetail { anime, items }))
    }

    async fn form_context(_pool: &DbPool) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn blockers(pool: &DbPool, id: DbId) -> Result<Vec<ItemSummary>, sqlx::Error> {
        ItemRepo::list_by_anime(pool, id).await
    }

    async fn insert(pool: &DbPool, candidate: &AnimeCandidate) -> Result<DbId, AppError> {
        let anime = AnimeRepo::create(pool, &candidate.input()).await?;
        Ok(anime.id)
    }

    async fn replace(
        pool: &DbPool,
        id: DbId,
        candidate: &AnimeCandidate,
    ) -> Result<DbId, AppError> {
        match AnimeRepo::replace(pool, id, &candidate.input()).await? {
            Some(anime) => Ok(anime.id),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: Self::ENTITY,
                id,
            })),
        }
    }

    async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        AnimeRepo::delete(pool, id).await
    }

    fn render_list(records: &[Anime]) -> String {
        let mut body = String::from("<h1>Animes</h1>\n<ul>\n");
        for anime in records {
            body.push_str(&format!(
                "<li><a href=\"/anime/{}\">{}</a></li>\n",
                anime.id, anime.name
            ));
        }
        body.push_str("</ul>\n<p><a href=\"/anime/create\">Add Anime</a></p>");
        views::layout("Animes", &body)
    }

    fn render_detail(detail: &AnimeDetail) -> String {
        let id = detail.anime.id;
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<h2>Items</h2>\n{}\
             <p><a href=\"/anime/{id}/update\">Update</a> | \
             <a href=\"/anime/{id}/delete\">Delete</a></p>",
            detail.anime.name,
            detail.anime.summary,
            views::item_summaries(&detail.items),
        );
        views::layout(&detail.anime.name, &body)
    }

    fn render_form(
        mode: FormMode,
        candidate: Option<&AnimeCandidate>,
        _ctx: &(),
        errors: &[FieldError],
    ) -> String {
        let title = match mode {
            FormMode::Create => "Add Anime",
            FormMode::Update(_) => "Update Anime",
        };
        let name = candidate.map(|c| c.name.as_str()).unwrap_or("");
        let summary = candidate.map(|c| c.summary.as_str()).unwrap_or("");
        let body = format!(
            "<h1>{title}</h1>\n{}\
             <form method=\"post\" action=\"{}\">\n{}{}\
             <p><button type=\"submit\">Submit</button></p>\n</form>",
            views::field_errors(errors),
            mode.action(Self::BASE_PATH),
            views::text_input("Name:", "name", name),
            views::textarea("Summary:", "summary", summary),
        );
        views::layout(title, &body)
    }

    fn render_delete(record: &Anime, blockers: &[ItemSummary]) -> String {
        let mut body = format!("<h1>Delete Anime: {}</h1>\n", record.name);
        if blockers.is_empty() {
            body.push_str(&format!(
                "<p>Do you really want to delete this anime?</p>\n\
                 <form method=\"post\" action=\"/anime/{id}/delete\">\n\
                 <input type=\"hidden\" name=\"animeid\" value=\"{id}\">\n\
                 <p><button type=\"submit\">Delete</button></p>\n</form>",
                id = record.id
            ));
        } else {
            body.push_str(
                "<p>Delete the following items before attempting to delete this anime:</p>\n",
            );
            body.push_str(&views::item_summaries(blockers));
        }
        views::layout("Delete Anime", &body)
    }
}
