//! The `/items` resource.
//!
//! Items reference exactly one anime and one or more categories. The form
//! pages fetch both option sets concurrently and mark the options matching
//! the candidate's current references; the detail page embeds the resolved
//! records rather than bare ids.

use animart_core::error::CoreError;
use animart_core::types::DbId;
use animart_core::validate::{parse_ref, sanitize_ref, FieldError, FormErrors};
use animart_db::models::anime::Anime;
use animart_db::models::category::Category;
use animart_db::models::item::{CreateItem, Item, ItemDetail, ItemSummary};
use animart_db::repositories::{AnimeRepo, CategoryRepo, ItemRepo};
use animart_db::DbPool;
use async_trait::async_trait;

use crate::error::AppError;
use crate::forms::{self, FromPairs};
use crate::handlers::resource::{FormMode, Resource};
use crate::views;

/// Raw item form fields. `category` arrives as repeated keys from the
/// checkbox group.
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub inventory: String,
    pub anime: String,
    pub categories: Vec<String>,
}

impl FromPairs for ItemForm {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: forms::first(pairs, "name"),
            description: forms::first(pairs, "description"),
            price: forms::first(pairs, "price"),
            inventory: forms::first(pairs, "inventory"),
            anime: forms::first(pairs, "anime"),
            categories: forms::all(pairs, "category"),
        }
    }
}

/// Sanitized item candidate. Numeric fields keep both the sanitized text
/// (for re-rendering) and the parsed value (for persistence).
#[derive(Debug, Clone)]
pub struct ItemCandidate {
    pub name: String,
    pub description: String,
    pub price: String,
    pub inventory: String,
    pub price_value: Option<f64>,
    pub inventory_value: Option<i64>,
    pub anime_id: Option<DbId>,
    pub category_ids: Vec<DbId>,
}

impl ItemCandidate {
    /// The persistable record, present only when validation passed.
    fn input(&self) -> Option<CreateItem> {
        if self.category_ids.is_empty() {
            return None;
        }
        Some(CreateItem {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price_value?,
            inventory: self.inventory_value?,
            anime_id: self.anime_id?,
            category_ids: self.category_ids.clone(),
        })
    }
}

fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

pub struct ItemResource;

#[async_trait]
impl Resource for ItemResource {
    type Form = ItemForm;
    type Candidate = ItemCandidate;
    type Record = Item;
    type Detail = ItemDetail;
    type FormContext = (Vec<Anime>, Vec<Category>);

    const ENTITY: &'static str = "Item";
    const BASE_PATH: &'static str = "/item";
    const LIST_PATH: &'static str = "/items";
    const DELETE_FIELD: &'static str = "itemid";

    fn validate(form: ItemForm) -> (ItemCandidate, Vec<FieldError>) {
        let mut errors = FormErrors::new();
        let name = errors.require_text("name", &form.name, "Name is required.");
        let description =
            errors.require_text("description", &form.description, "Description is Required.");
        let (price, price_value) = errors.require_f64("price", &form.price, "Price is Required.");
        let (inventory, inventory_value) =
            errors.require_i64("inventory", &form.inventory, "Inventory Stock is Required.");

        let anime_id = parse_ref(&sanitize_ref(&form.anime));
        if anime_id.is_none() {
            errors.push("anime", "Anime is required.");
        }

        let category_ids: Vec<DbId> = form
            .categories
            .iter()
            .filter_map(|raw| parse_ref(&sanitize_ref(raw)))
            .collect();
        if category_ids.is_empty() {
            errors.push("category", "Category is required.");
        }

        (
            ItemCandidate {
                name,
                description,
                price,
                inventory,
                price_value,
                inventory_value,
                anime_id,
                category_ids,
            },
            errors.into_vec(),
        )
    }

    fn candidate_of(record: &Item) -> ItemCandidate {
        ItemCandidate {
            name: record.name.clone(),
            description: record.description.clone(),
            price: format_price(record.price),
            inventory: record.inventory.to_string(),
            price_value: Some(record.price),
            inventory_value: Some(record.inventory),
            anime_id: Some(record.anime_id),
            category_ids: record.category_ids.clone(),
        }
    }

    async fn list(pool: &DbPool) -> Result<Vec<Item>, sqlx::Error> {
        ItemRepo::list(pool).await
    }

    async fn find(pool: &DbPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        ItemRepo::find_by_id(pool, id).await
    }

    async fn load_detail(pool: &DbPool, id: DbId) -> Result<Option<ItemDetail>, sqlx::Error> {
        let Some(item) = ItemRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let (anime, categories) = tokio::try_join!(
            AnimeRepo::find_by_id(pool, item.anime_id),
            CategoryRepo::list_for_item(pool, id),
        )?;
        // The FK makes a missing anime impossible short of a raced delete.
        Ok(anime.map(|anime| ItemDetail {
            item,
            anime,
            categories,
        }))
    }

    async fn form_context(pool: &DbPool) -> Result<(Vec<Anime>, Vec<Category>), sqlx::Error> {
        tokio::try_join!(AnimeRepo::list(pool), CategoryRepo::list(pool))
    }

    /// Items block nothing; their deletion is always allowed.
    async fn blockers(_pool: &DbPool, _id: DbId) -> Result<Vec<ItemSummary>, sqlx::Error> {
        Ok(Vec::new())
    }

    async fn insert(pool: &DbPool, candidate: &ItemCandidate) -> Result<DbId, AppError> {
        let input = candidate
            .input()
            .ok_or_else(|| AppError::BadRequest("item form is missing required fields".into()))?;
        let item = ItemRepo::create(pool, &input).await?;
        Ok(item.id)
    }

    async fn replace(pool: &DbPool, id: DbId, candidate: &ItemCandidate) -> Result<DbId, AppError> {
        let input = candidate
            .input()
            .ok_or_else(|| AppError::BadRequest("item form is missing required fields".into()))?;
        match ItemRepo::replace(pool, id, &input).await? {
            Some(item) => Ok(item.id),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: Self::ENTITY,
                id,
            })),
        }
    }

    async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        ItemRepo::delete(pool, id).await
    }

    fn render_list(records: &[Item]) -> String {
        let mut body = String::from("<h1>All Items</h1>\n<ul>\n");
        for item in records {
            body.push_str(&format!(
                "<li><a href=\"/item/{}\">{}</a>: ${}</li>\n",
                item.id,
                item.name,
                format_price(item.price)
            ));
        }
        body.push_str("</ul>\n<p><a href=\"/item/create\">Add Item</a></p>");
        views::layout("All Items", &body)
    }

    fn render_detail(detail: &ItemDetail) -> String {
        let item = &detail.item;
        let categories = detail
            .categories
            .iter()
            .map(|c| format!("<a href=\"/category/{}\">{}</a>", c.id, c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let body = format!(
            "<h1>{}</h1>\n\
             <p>{}</p>\n\
             <p>Price: ${}</p>\n\
             <p>In stock: {}</p>\n\
             <p>Anime: <a href=\"/anime/{}\">{}</a></p>\n\
             <p>Categories: {categories}</p>\n\
             <p><a href=\"/item/{id}/update\">Update</a> | \
             <a href=\"/item/{id}/delete\">Delete</a></p>",
            item.name,
            item.description,
            format_price(item.price),
            item.inventory,
            detail.anime.id,
            detail.anime.name,
            id = item.id,
        );
        views::layout(&item.name, &body)
    }

    fn render_form(
        mode: FormMode,
        candidate: Option<&ItemCandidate>,
        ctx: &(Vec<Anime>, Vec<Category>),
        errors: &[FieldError],
    ) -> String {
        let (animes, categories) = ctx;
        let title = match mode {
            FormMode::Create => "Add Item",
            FormMode::Update(_) => "Update Item",
        };

        let mut anime_options = String::from("<option value=\"\">Select an anime</option>\n");
        for anime in animes {
            let selected = if candidate.and_then(|c| c.anime_id) == Some(anime.id) {
                " selected"
            } else {
                ""
            };
            anime_options.push_str(&format!(
                "<option value=\"{}\"{selected}>{}</option>\n",
                anime.id, anime.name
            ));
        }

        let mut category_boxes = String::new();
        for category in categories {
            let checked = if candidate.is_some_and(|c| c.category_ids.contains(&category.id)) {
                " checked"
            } else {
                ""
            };
            category_boxes.push_str(&format!(
                "<label><input type=\"checkbox\" name=\"category\" value=\"{}\"{checked}> {}</label><br>\n",
                category.id, category.name
            ));
        }

        let body = format!(
            "<h1>{title}</h1>\n{}\
             <form method=\"post\" action=\"{}\">\n\
             {}{}{}{}\
             <p><label for=\"anime\">Anime:</label> \
             <select id=\"anime\" name=\"anime\">\n{anime_options}</select></p>\n\
             <fieldset><legend>Categories</legend>\n{category_boxes}</fieldset>\n\
             <p><button type=\"submit\">Submit</button></p>\n</form>",
            views::field_errors(errors),
            mode.action(Self::BASE_PATH),
            views::text_input("Name:", "name", candidate.map(|c| c.name.as_str()).unwrap_or("")),
            views::textarea(
                "Description:",
                "description",
                candidate.map(|c| c.description.as_str()).unwrap_or(""),
            ),
            views::text_input("Price:", "price", candidate.map(|c| c.price.as_str()).unwrap_or("")),
            views::text_input(
                "Inventory:",
                "inventory",
                candidate.map(|c| c.inventory.as_str()).unwrap_or(""),
            ),
        );
        views::layout(title, &body)
    }

    fn render_delete(record: &Item, _blockers: &[ItemSummary]) -> String {
        let body = format!(
            "<h1>Delete Item: {}</h1>\n\
             <p>Do you really want to delete this item?</p>\n\
             <form method=\"post\" action=\"/item/{id}/delete\">\n\
             <input type=\"hidden\" name=\"itemid\" value=\"{id}\">\n\
             <p><button type=\"submit\">Delete</button></p>\n</form>",
            record.name,
            id = record.id
        );
        views::layout("Delete Item", &body)
    }
}
