//! Database operations for categories.

use std::str::FromStr;

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, NewCategory},
    ledger::TransactionKind,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if a category with the same name
/// already exists.
pub fn create_category(new_category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name, kind, color, icon) VALUES (?1, ?2, ?3, ?4);",
            (
                new_category.name.as_ref(),
                new_category.kind.as_str(),
                &new_category.color,
                &new_category.icon,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateCategoryName(new_category.name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: new_category.name,
        kind: new_category.kind,
        color: new_category.color,
        icon: new_category.icon,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, kind, color, icon FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind, color, icon FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Replace a category's fields. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    new_category: NewCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1, kind = ?2, color = ?3, icon = ?4 WHERE id = ?5",
            (
                new_category.name.as_ref(),
                new_category.kind.as_str(),
                &new_category.color,
                &new_category.icon,
                category_id,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateCategoryName(new_category.name.to_string())
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Transactions keep their row but lose the reference (`ON DELETE SET NULL`),
/// while budgets for the category are removed with it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL,
            color TEXT NOT NULL,
            icon TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    let raw_kind: String = row.get(2)?;
    let kind = TransactionKind::from_str(&raw_kind).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(Category {
        id,
        name,
        kind,
        color: row.get(3)?,
        icon: row.get(4)?,
    })
}
