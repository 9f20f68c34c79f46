//! Commands module - CLI command implementations.
//!
//! Every command except `seed`, `sign-up` and `login` acts as the signed-in
//! user stored in the session.

pub mod account;
pub mod catalog;
pub mod dashboard;
pub mod membership;
pub mod schedule;

use common::{AppError, AppResult};
use domain::SessionUser;

use crate::cli::Commands;
use crate::service::ServiceContainer;
use crate::GymApp;

/// Dispatch one parsed command
pub async fn execute(command: Commands, app: &GymApp) -> AppResult<()> {
    match command {
        Commands::Seed => account::seed(app).await,
        Commands::SignUp(args) => account::sign_up(args, app).await,
        Commands::Login(args) => account::login(args, app).await,
        Commands::Logout => account::logout(app).await,
        Commands::Members => membership::members(app).await,
        Commands::RequestPlan(args) => membership::request_plan(args, app).await,
        Commands::Approve(args) => membership::approve(args, app).await,
        Commands::Renew(args) => membership::renew(args, app).await,
        Commands::ChangePlan(args) => membership::change_plan(args, app).await,
        Commands::Renewals => dashboard::renewals(app).await,
        Commands::Revenue(args) => dashboard::revenue(args, app).await,
        Commands::Stats => dashboard::stats(app).await,
        Commands::Plans => catalog::plans(app).await,
        Commands::Bookings => schedule::bookings(app).await,
        Commands::Book(args) => schedule::book(args, app).await,
        Commands::Confirm(args) => schedule::confirm(args, app).await,
        Commands::Inventory => catalog::inventory(app).await,
    }
}

/// The signed-in user, or `Unauthorized`
pub(crate) async fn require_session(app: &GymApp) -> AppResult<SessionUser> {
    app.services
        .accounts()
        .current_session()
        .await?
        .ok_or(AppError::Unauthorized)
}
