//! Catalog commands - plans and inventory listings.

use common::AppResult;

use super::require_session;
use crate::service::ServiceContainer;
use crate::GymApp;

pub async fn plans(app: &GymApp) -> AppResult<()> {
    let plans = app.services.plans().list_plans().await?;
    if plans.is_empty() {
        println!("No plans yet, run `gymctl seed`");
    }
    for plan in plans {
        println!("{:<14} {:>8}  {} days", plan.name, plan.price, plan.duration);
    }
    Ok(())
}

pub async fn inventory(app: &GymApp) -> AppResult<()> {
    require_session(app).await?;
    let items = app.services.inventory().list_items().await?;
    if items.is_empty() {
        println!("Inventory is empty");
    }
    for item in items {
        println!(
            "{:<20} {:<10} {:>5}  {}",
            item.name, item.category, item.quantity, item.status
        );
    }
    Ok(())
}
