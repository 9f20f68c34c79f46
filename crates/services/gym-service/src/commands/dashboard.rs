//! Dashboard commands - renewals, revenue and headline figures.

use common::AppResult;

use super::require_session;
use crate::cli::args::RevenueArgs;
use crate::service::ServiceContainer;
use crate::GymApp;

pub async fn renewals(app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let renewals = app.services.dashboard().pending_renewals(&actor).await?;
    if renewals.is_empty() {
        println!("No renewals due");
    }
    for renewal in renewals {
        println!(
            "{}  {:<20} {:<14} expired {}",
            renewal.member.id, renewal.member.name, renewal.member.plan, renewal.expiry_date
        );
    }
    Ok(())
}

pub async fn revenue(args: RevenueArgs, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let window = args.window.unwrap_or(app.config.revenue_window);
    let chart = app.services.dashboard().revenue_chart(&actor, window).await?;
    for month in chart {
        println!("{} {}  {:>10}", month.label, month.year, month.revenue);
    }
    Ok(())
}

pub async fn stats(app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let dashboard = app.services.dashboard();
    let stats = dashboard.stats(&actor).await?;
    println!("Total members:     {}", stats.total_members);
    println!("Active plans:      {}", stats.active_plans);
    println!("Revenue (month):   {}", stats.monthly_revenue);
    println!("Pending renewals:  {}", stats.pending_renewals);

    let recent = dashboard.recent_members(&actor).await?;
    if !recent.is_empty() {
        println!();
        println!("Recent members:");
        for member in recent {
            println!("  {:<20} {:<14} {}", member.name, member.plan, member.join_day());
        }
    }
    Ok(())
}
