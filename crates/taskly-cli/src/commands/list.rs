use std::sync::Arc;

use chrono::Utc;
use clap::Subcommand;
use taskly_core::shopping::{order_shopping_list, ShoppingListStore};
use taskly_core::storage::{KeyValueStore, SqliteStore};

#[derive(Subcommand)]
pub enum ListAction {
    /// Add an item to the list
    Add { name: String },
    /// Flip an item's completed state
    Toggle { id: String },
    /// Remove an item from the list
    Remove { id: String },
    /// Print the list in display order
    Show {
        /// Print raw JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: ListAction) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open()?);
    let list = ShoppingListStore::new(store);
    let now_ms = Utc::now().timestamp_millis();

    match action {
        ListAction::Add { name } => {
            let item = list.add(&name, now_ms).await?;
            println!("Added {} ({})", item.name, item.id);
        }
        ListAction::Toggle { id } => match list.toggle(&id, now_ms).await? {
            Some(item) if item.is_completed() => println!("Completed {}", item.name),
            Some(item) => println!("Uncompleted {}", item.name),
            None => return Err(format!("no item with id {id}").into()),
        },
        ListAction::Remove { id } => {
            if list.remove(&id).await? {
                println!("Removed {id}");
            } else {
                return Err(format!("no item with id {id}").into());
            }
        }
        ListAction::Show { json } => {
            let items = order_shopping_list(list.load().await);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("Your shopping list is empty");
            } else {
                for item in &items {
                    let mark = if item.is_completed() { "x" } else { " " };
                    println!("[{mark}] {}  ({})", item.name, item.id);
                }
            }
        }
    }

    Ok(())
}
