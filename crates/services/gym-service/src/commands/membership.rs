//! Membership commands - member list and plan lifecycle.

use common::AppResult;
use domain::MemberProfile;

use super::require_session;
use crate::cli::args::{ChangePlanArgs, MemberArg, RequestPlanArgs};
use crate::service::ServiceContainer;
use crate::GymApp;

fn print_member(member: &MemberProfile) {
    println!(
        "{}  {:<20} {:<14} {}",
        member.id, member.name, member.plan, member.plan_status
    );
}

pub async fn members(app: &GymApp) -> AppResult<()> {
    require_session(app).await?;
    let members = app.services.membership().list_members().await?;
    if members.is_empty() {
        println!("No members yet");
        return Ok(());
    }
    for entry in members {
        let expiry = match entry.expiry.expiry_date {
            Some(day) if entry.expiry.is_expired => format!("expired {}", day),
            Some(day) => format!("until {}", day),
            None => "-".to_string(),
        };
        println!(
            "{}  {:<20} {:<14} {:<10} {}",
            entry.member.id, entry.member.name, entry.member.plan, entry.member.plan_status, expiry
        );
    }
    Ok(())
}

pub async fn request_plan(args: RequestPlanArgs, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let member_id = args.member.unwrap_or(actor.id);
    let member = app
        .services
        .membership()
        .request_plan(&actor, member_id, &args.plan)
        .await?;
    println!("Requested '{}', waiting for approval", member.plan);
    Ok(())
}

pub async fn approve(args: MemberArg, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let member = app.services.membership().approve_plan(&actor, args.member).await?;
    print_member(&member);
    Ok(())
}

pub async fn renew(args: MemberArg, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let member = app.services.membership().renew(&actor, args.member).await?;
    print_member(&member);
    Ok(())
}

pub async fn change_plan(args: ChangePlanArgs, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let member = app
        .services
        .membership()
        .change_plan(&actor, args.member, &args.plan)
        .await?;
    print_member(&member);
    Ok(())
}
