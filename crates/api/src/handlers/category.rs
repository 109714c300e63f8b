//! The `/categories` resource.
//!
//! Categories carry the two integrity rules worth having: duplicate names
//! resolve to the existing record instead of creating a second one, and
//! deletion is blocked while items still reference the category.

use animart_core::error::CoreError;
use animart_core::types::DbId;
use animart_core::validate::{FieldError, FormErrors};
use animart_db::models::category::{Category, CreateCategory};
use animart_db::models::item::ItemSummary;
use animart_db::repositories::{CategoryRepo, ItemRepo};
use animart_db::DbPool;
use async_trait::async_trait;

use crate::error::AppError;
use crate::forms::{self, FromPairs};
use crate::handlers::resource::{FormMode, Resource};
use crate::views;

/// Raw category form fields.
pub struct CategoryForm {
    pub name: String,
}

impl FromPairs for CategoryForm {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: forms::first(pairs, "name"),
        }
    }
}

/// Sanitized category candidate.
#[derive(Debug, Clone)]
pub struct CategoryCandidate {
    pub name: String,
}

impl CategoryCandidate {
    fn input(&self) -> CreateCategory {
        CreateCategory {
            name: self.name.clone(),
        }
    }
}

/// A category plus the items filed under it, for the detail view.
pub struct CategoryDetail {
    pub category: Category,
    pub items: Vec<ItemSummary>,
}

pub struct CategoryResource;

#[async_trait]
impl Resource for CategoryResource {
    type Form = CategoryForm;
    type Candidate = CategoryCandidate;
    type Record = Category;
    type Detail = CategoryDetail;
    type FormContext = ();

    const ENTITY: &'static str = "Category";
    const BASE_PATH: &'static str = "/category";
    const LIST_PATH: &'static str = "/categories";
    const DELETE_FIELD: &'static str = "categoryid";

    fn validate(form: CategoryForm) -> (CategoryCandidate, Vec<FieldError>) {
        let mut errors = FormErrors::new();
        let name = errors.require_text("name", &form.name, "Name is required.");
        (CategoryCandidate { name }, errors.into_vec())
    }

    fn candidate_of(record: &Category) -> CategoryCandidate {
        CategoryCandidate {
            name: record.name.clone(),
        }
    }

    async fn list(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        CategoryRepo::list(pool).await
    }

    async fn find(pool: &DbPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::find_by_id(pool, id).await
    }

    async fn load_detail(pool: &DbPool, id: DbId) -> Result<Option<CategoryDetail>, sqlx::Error> {
        let (category, items) = tokio::try_join!(
            CategoryRepo::find_by_id(pool, id),
            ItemRepo::list_by_category(pool, id),
        )?;
        Ok(category.map(|category| CategoryDetail { category, items }))
    }

    async fn form_context(_pool: &DbPool) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn blockers(pool: &DbPool, id: DbId) -> Result<Vec<ItemSummary>, sqlx::Error> {
        ItemRepo::list_by_category(pool, id).await
    }

    /// Duplicate names resolve to the existing record: the fast-path lookup
    /// redirects without inserting, and a raced insert that still trips
    /// `uq_categories_name_ci` re-fetches the winner.
    async fn insert(pool: &DbPool, candidate: &CategoryCandidate) -> Result<DbId, AppError> {
        if let Some(existing) = CategoryRepo::find_by_name_ci(pool, &candidate.name).await? {
            return Ok(existing.id);
        }
        match CategoryRepo::create(pool, &candidate.input()).await {
            Ok(category) => Ok(category.id),
            Err(err) if animart_db::is_unique_violation(&err) => {
                match CategoryRepo::find_by_name_ci(pool, &candidate.name).await? {
                    Some(existing) => Ok(existing.id),
                    None => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Renaming onto another record's name resolves to that record and
    /// leaves this one untouched; renaming onto this record's own name
    /// (e.g. a capitalization fix) goes through.
    async fn replace(
        pool: &DbPool,
        id: DbId,
        candidate: &CategoryCandidate,
    ) -> Result<DbId, AppError> {
        if let Some(existing) = CategoryRepo::find_by_name_ci(pool, &candidate.name).await? {
            if existing.id != id {
                return Ok(existing.id);
            }
        }
        match CategoryRepo::replace(pool, id, &candidate.input()).await {
            Ok(Some(category)) => Ok(category.id),
            Ok(None) => Err(AppError::Core(CoreError::NotFound {
                entity: Self::ENTITY,
                id,
            })),
            Err(err) if animart_db::is_unique_violation(&err) => {
                match CategoryRepo::find_by_name_ci(pool, &candidate.name).await? {
                    Some(existing) => Ok(existing.id),
                    None => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        CategoryRepo::delete(pool, id).await
    }

    fn render_list(records: &[Category]) -> String {
        let mut body = String::from("<h1>Categories</h1>\n<ul>\n");
        for category in records {
            body.push_str(&format!(
                "<li><a href=\"/category/{}\">{}</a></li>\n",
                category.id, category.name
            ));
        }
        body.push_str("</ul>\n<p><a href=\"/category/create\">Add Category</a></p>");
        views::layout("Categories", &body)
    }

    fn render_detail(detail: &CategoryDetail) -> String {
        let id = detail.category.id;
        let body = format!(
            "<h1>Category: {}</h1>\n<h2>Items</h2>\n{}\
             <p><a href=\"/category/{id}/update\">Update</a> | \
             <a href=\"/category/{id}/delete\">Delete</a></p>",
            detail.category.name,
            views::item_summaries(&detail.items),
        );
        views::layout("Search by Category", &body)
    }

    fn render_form(
        mode: FormMode,
        candidate: Option<&CategoryCandidate>,
        _ctx: &(),
        errors: &[FieldError],
    ) -> String {
        let title = match mode {
            FormMode::Create => "Add Category",
            FormMode::Update(_) => "Update Category",
        };
        let name = candidate.map(|c| c.name.as_str()).unwrap_or("");
        let body = format!(
            "<h1>{title}</h1>\n{}\
             <form method=\"post\" action=\"{}\">\n{}\
             <p><button type=\"submit\">Submit</button></p>\n</form>",
            views::field_errors(errors),
            mode.action(Self::BASE_PATH),
            views::text_input("Name:", "name", name),
        );
        views::layout(title, &body)
    }

    fn render_delete(record: &Category, blockers: &[ItemSummary]) -> String {
        let mut body = format!("<h1>Delete Category: {}</h1>\n", record.name);
        if blockers.is_empty() {
            body.push_str(&format!(
                "<p>Do you really want to delete this category?</p>\n\
                 <form method=\"post\" action=\"/category/{id}/delete\">\n\
                 <input type=\"hidden\" name=\"categoryid\" value=\"{id}\">\n\
                 <p><button type=\"submit\">Delete</button></p>\n</form>",
                id = record.id
            ));
        } else {
            body.push_str(
                "<p>Delete the following items before attempting to delete this category:</p>\n",
            );
            body.push_str(&views::item_summaries(blockers));
        }
        views::layout("Delete Category", &body)
    }
}
