//! Account commands - seeding, signup and the login session.

use common::AppResult;

use crate::cli::args::{LoginArgs, SignUpArgs};
use crate::seed::seed_defaults;
use crate::service::{ServiceContainer, SignUpRequest};
use crate::GymApp;

pub async fn seed(app: &GymApp) -> AppResult<()> {
    let report = seed_defaults(app.uow.as_ref()).await?;
    println!("Plans created: {}", report.plans_created);
    if report.admin_created {
        println!("Admin login created: {}", crate::seed::ADMIN_USERNAME);
    }
    Ok(())
}

pub async fn sign_up(args: SignUpArgs, app: &GymApp) -> AppResult<()> {
    let member = app
        .services
        .accounts()
        .sign_up(SignUpRequest {
            name: args.name,
            email: args.email,
            username: args.username,
            password: args.password,
        })
        .await?;
    println!("Account created for {} ({})", member.name, member.id);
    println!("Sign in and request a plan to get started.");
    Ok(())
}

pub async fn login(args: LoginArgs, app: &GymApp) -> AppResult<()> {
    let session = app.services.accounts().login(&args.login, &args.password).await?;
    println!("Signed in as {} ({})", session.username, session.role);
    Ok(())
}

pub async fn logout(app: &GymApp) -> AppResult<()> {
    app.services.accounts().logout().await?;
    println!("Signed out");
    Ok(())
}
