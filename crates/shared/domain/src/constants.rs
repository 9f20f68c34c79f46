//! Domain-level constants.
//!
//! These constants define business rules and persisted wire values.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role, manages every entity
pub const ROLE_ADMIN: &str = "admin";

/// Trainer role, manages own clients and sessions
pub const ROLE_TRAINER: &str = "trainer";

/// Member role, assigned at signup
pub const ROLE_MEMBER: &str = "member";

// =============================================================================
// Storage Keys
// =============================================================================

/// Login accounts
pub const KEY_USERS: &str = "users";

/// Member profiles
pub const KEY_MEMBERS: &str = "gymMembers";

/// Trainer profiles
pub const KEY_TRAINERS: &str = "gymTrainers";

/// Membership plans
pub const KEY_PLANS: &str = "gymPlans";

/// Training-session bookings
pub const KEY_BOOKINGS: &str = "gymSchedules";

/// Equipment inventory
pub const KEY_INVENTORY: &str = "gymInventory";

/// Logged-in user of the current session
pub const KEY_SESSION: &str = "authUser";

// =============================================================================
// Membership
// =============================================================================

/// Plan name stored on a member profile that has never chosen a plan
pub const PLAN_NONE: &str = "None";

/// Login password given to members created by an admin
pub const DEFAULT_MEMBER_PASSWORD: &str = "password123";

/// Number of members shown in the "recent members" list
pub const RECENT_MEMBERS_LIMIT: usize = 5;

// =============================================================================
// Scheduling
// =============================================================================

/// Legacy spelling of the "awaiting trainer" status written by older pages
pub const LEGACY_PENDING_TRAINER: &str = "Pending Trainer";

/// Number of upcoming confirmed sessions shown to a member
pub const UPCOMING_SESSIONS_LIMIT: usize = 3;

// =============================================================================
// Revenue
// =============================================================================

/// Short revenue window in months
pub const REVENUE_WINDOW_SHORT_MONTHS: u32 = 6;

/// Long revenue window in months
pub const REVENUE_WINDOW_LONG_MONTHS: u32 = 12;

// =============================================================================
// Validation
// =============================================================================

/// Minimum plan duration in days
pub const MIN_PLAN_DURATION_DAYS: u32 = 1;
