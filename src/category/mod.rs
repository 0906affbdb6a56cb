//! Category module
//!
//! Categories are the named, typed grouping tags applied to transactions and
//! referenced by budgets. This module provides the domain types, database
//! operations, and the pages and endpoints for managing them.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
    update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryFormData, CategoryId, CategoryName, NewCategory};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
