use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use ledgerly::{
    CategoryName, NewBudget, NewCategory, Transaction, TransactionKind, create_budget,
    create_category, create_transaction, initialize_db,
};

/// A utility for creating a demo database for the ledgerly server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const DEFAULT_CATEGORIES: [(&str, TransactionKind, &str, &str); 8] = [
    ("Food", TransactionKind::Expense, "#ef4444", "🍔"),
    ("Transport", TransactionKind::Expense, "#3b82f6", "🚗"),
    ("Housing", TransactionKind::Expense, "#eab308", "🏠"),
    ("Work", TransactionKind::Income, "#22c55e", "💼"),
    ("Entertainment", TransactionKind::Expense, "#a855f7", "🎮"),
    ("Education", TransactionKind::Expense, "#6366f1", "📚"),
    ("Health", TransactionKind::Expense, "#ec4899", "🏥"),
    ("Travel", TransactionKind::Expense, "#06b6d4", "✈️"),
];

/// Create and populate a database for trying out the app.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating demo categories...");

    let mut category_ids = Vec::new();

    for (name, kind, color, icon) in DEFAULT_CATEGORIES {
        let category = create_category(
            NewCategory {
                name: CategoryName::new(name)?,
                kind,
                color: color.to_owned(),
                icon: icon.to_owned(),
            },
            &connection,
        )?;

        category_ids.push((name, category.id));
    }

    let category_id = |name: &str| {
        category_ids
            .iter()
            .find(|(category_name, _)| *category_name == name)
            .map(|(_, id)| *id)
    };

    println!("Creating demo transactions...");

    let today = OffsetDateTime::now_utc().date();

    let demo_transactions = [
        (TransactionKind::Income, 3200.0, 45, "Monthly salary", Some("Work")),
        (TransactionKind::Expense, 1200.0, 42, "Rent", Some("Housing")),
        (TransactionKind::Expense, 86.5, 40, "Weekly groceries", Some("Food")),
        (TransactionKind::Expense, 45.0, 38, "Petrol", Some("Transport")),
        (TransactionKind::Expense, 15.99, 33, "Streaming subscription", Some("Entertainment")),
        (TransactionKind::Income, 3200.0, 15, "Monthly salary", Some("Work")),
        (TransactionKind::Expense, 1200.0, 12, "Rent", Some("Housing")),
        (TransactionKind::Expense, 92.3, 10, "Weekly groceries", Some("Food")),
        (TransactionKind::Expense, 60.0, 7, "Dentist appointment", Some("Health")),
        (TransactionKind::Expense, 23.5, 3, "Takeaways", Some("Food")),
        (TransactionKind::Expense, 12.0, 1, "Parking", None),
    ];

    for (kind, amount, days_ago, description, category) in demo_transactions {
        create_transaction(
            Transaction::build(kind, amount, today - Duration::days(days_ago), description)
                .category_id(category.and_then(category_id)),
            &connection,
        )?;
    }

    println!("Creating demo budgets...");

    let demo_budgets = [("Food", 500.0), ("Transport", 200.0), ("Entertainment", 100.0)];

    for (category_name, limit) in demo_budgets {
        let Some(category_id) = category_id(category_name) else {
            continue;
        };

        create_budget(
            NewBudget {
                category_id,
                limit,
                month: u8::from(today.month()),
                year: today.year(),
            },
            &connection,
        )?;
    }

    println!("Success!");

    Ok(())
}
