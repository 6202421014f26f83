use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub guard_name: String,
    pub created_at: DateTime<Utc>,
}

/// Built-in permission names guarding the HTTP route groups.
pub mod names {
    pub const MANAGE_AUTHORIZATION: &str = "manage authorization";
    pub const MANAGE_ROLE: &str = "manage role";
    pub const VIEW_PERMISSION: &str = "view permission";
    pub const MANAGE_USER: &str = "manage user";

    pub const ALL: [&str; 4] = [MANAGE_AUTHORIZATION, MANAGE_ROLE, VIEW_PERMISSION, MANAGE_USER];
}
