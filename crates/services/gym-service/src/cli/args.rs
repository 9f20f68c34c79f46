//! CLI argument definitions.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use domain::RevenueWindow;

/// gymctl - gym membership and scheduling
#[derive(Parser, Debug)]
#[command(name = "gymctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the JSON collections
    #[arg(short, long, global = true, env = "GYM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default plans and admin login if missing
    Seed,

    /// Create a member account
    SignUp(SignUpArgs),

    /// Sign in with email or username
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// List members with their plan expiry
    Members,

    /// Ask for a plan (members for themselves, admins for anyone)
    RequestPlan(RequestPlanArgs),

    /// Approve a pending plan request
    Approve(MemberArg),

    /// Restart a member's current plan from today
    Renew(MemberArg),

    /// Switch a member to another plan from today
    ChangePlan(ChangePlanArgs),

    /// Active members whose plan has lapsed
    Renewals,

    /// Monthly revenue from new members
    Revenue(RevenueArgs),

    /// Dashboard figures
    Stats,

    /// List membership plans
    Plans,

    /// List your bookings
    Bookings,

    /// Request or schedule a training session
    Book(BookArgs),

    /// Confirm a pending booking
    Confirm(BookingArg),

    /// List inventory items
    Inventory,
}

#[derive(Parser, Debug)]
pub struct SignUpArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Email or username
    pub login: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Parser, Debug)]
pub struct MemberArg {
    /// Member id
    pub member: Uuid,
}

#[derive(Parser, Debug)]
pub struct RequestPlanArgs {
    /// Plan name
    pub plan: String,

    /// Member id, defaults to the signed-in member
    #[arg(long)]
    pub member: Option<Uuid>,
}

#[derive(Parser, Debug)]
pub struct ChangePlanArgs {
    pub member: Uuid,

    /// New plan name
    pub plan: String,
}

#[derive(Parser, Debug)]
pub struct RevenueArgs {
    /// Chart window: 6M or 1Y
    #[arg(short, long)]
    pub window: Option<RevenueWindow>,
}

#[derive(Parser, Debug)]
pub struct BookArgs {
    /// Member id, defaults to the signed-in member
    #[arg(long)]
    pub member: Option<Uuid>,

    /// Trainer id, defaults to the signed-in trainer
    #[arg(long)]
    pub trainer: Option<Uuid>,

    /// Session day (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Start time (HH:MM)
    #[arg(long, value_parser = parse_clock_time)]
    pub start: NaiveTime,

    /// End time (HH:MM)
    #[arg(long, value_parser = parse_clock_time)]
    pub end: NaiveTime,
}

#[derive(Parser, Debug)]
pub struct BookingArg {
    /// Booking id
    pub booking: Uuid,
}

fn parse_clock_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM ({})", e))
}
