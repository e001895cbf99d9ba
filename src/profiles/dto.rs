use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profiles::repo::ProfileFields;
use crate::profiles::repo_types::{Education, Experience, Profile};

/// Request body for creating or updating the caller's profile. Skills arrive
/// as one comma-separated string, matching the existing client.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub skills: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl UpsertProfileRequest {
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            status: self.status.trim().to_string(),
            skills: split_skills(&self.skills),
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            github_username: self.github_username,
            youtube: self.youtube,
            twitter: self.twitter,
            facebook: self.facebook,
            linkedin: self.linkedin,
            instagram: self.instagram,
        }
    }
}

pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct AddExperienceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub location: Option<String>,
    // Required, but optional at the serde layer so a missing date produces a
    // structured field error instead of a deserialization rejection.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub to: Option<OffsetDateTime>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddEducationRequest {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default, rename = "fieldofstudy")]
    pub field_of_study: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub to: Option<OffsetDateTime>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Owner display fields embedded in profile responses.
#[derive(Debug, Serialize)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileDetails {
    pub id: Uuid,
    pub user: ProfileOwner,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: OffsetDateTime,
}

impl ProfileDetails {
    pub fn assemble(
        profile: Profile,
        owner_name: String,
        owner_avatar: String,
        experience: Vec<Experience>,
        education: Vec<Education>,
    ) -> Self {
        Self {
            id: profile.id,
            user: ProfileOwner {
                id: profile.user_id,
                name: owner_name,
                avatar: owner_avatar,
            },
            status: profile.status,
            skills: profile.skills,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            github_username: profile.github_username,
            youtube: profile.youtube,
            twitter: profile.twitter,
            facebook: profile.facebook,
            linkedin: profile.linkedin,
            instagram: profile.instagram,
            experience,
            education,
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_split_trims_and_drops_empties() {
        assert_eq!(
            split_skills("Rust, SQL ,, axum ,"),
            vec!["Rust", "SQL", "axum"]
        );
        assert!(split_skills("").is_empty());
        assert!(split_skills(" , ").is_empty());
    }

    #[test]
    fn experience_request_tolerates_missing_from() {
        // A body without `from` must still deserialize so the validator can
        // answer with a field error for it.
        let req: AddExperienceRequest =
            serde_json::from_str(r#"{"title":"Engineer","company":"Acme"}"#).unwrap();
        assert!(req.from.is_none());
        assert!(req.to.is_none());

        let req: AddEducationRequest = serde_json::from_str(
            r#"{"school":"State","degree":"BSc","fieldofstudy":"CS","from":"2010-08-10T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(req.from.is_some());
    }

    #[test]
    fn upsert_request_tolerates_missing_optionals() {
        let req: UpsertProfileRequest = serde_json::from_str(
            r#"{"status":"Developer","skills":"Rust,SQL","githubusername":"matt"}"#,
        )
        .unwrap();
        let fields = req.into_fields();
        assert_eq!(fields.status, "Developer");
        assert_eq!(fields.skills, vec!["Rust", "SQL"]);
        assert_eq!(fields.github_username.as_deref(), Some("matt"));
        assert!(fields.company.is_none());
    }
}
