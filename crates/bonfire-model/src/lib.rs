#![forbid(unsafe_code)]
//! Core domain model for the bonfire item catalog: game titles, item
//! categories, item identities, per-category field schemas, and the
//! presence-union validation policy applied to incoming payloads.
//!
//! Identifiers are validated at the boundary and cannot be fabricated:
//!
//! ```compile_fail
//! let id = bonfire_model::ItemId("not-checked".to_string());
//! ```

mod category;
mod item;
mod policy;
mod schema;
mod title;

pub use category::Category;
pub use item::{Document, ItemId, ValidationError, ITEM_ID_LEN};
pub use policy::{
    any_field_truthy, is_truthy, project_document, read_path, strip_server_fields, validate_create,
};
pub use schema::{item_schema, ItemSchema, GAME_FIELD, ID_FIELD};
pub use title::Title;

pub const CRATE_NAME: &str = "bonfire-model";
