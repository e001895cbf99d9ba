use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Profile joined with its owner's display fields, for the public listings.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileWithOwner {
    #[sqlx(flatten)]
    pub profile: Profile,
    pub owner_name: String,
    pub owner_avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub profile_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from_date: OffsetDateTime,
    pub to_date: Option<OffsetDateTime>,
    pub current: bool,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub profile_id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from_date: OffsetDateTime,
    pub to_date: Option<OffsetDateTime>,
    pub current: bool,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}
