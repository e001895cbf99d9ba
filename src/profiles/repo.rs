use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profiles::repo_types::{Education, Experience, Profile, ProfileWithOwner};

const PROFILE_COLS: &str = "id, user_id, status, skills, company, website, location, bio, \
     github_username, youtube, twitter, facebook, linkedin, instagram, created_at";

/// Normalized profile fields ready for storage.
#[derive(Debug)]
pub struct ProfileFields {
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
}

#[derive(Debug)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from_date: OffsetDateTime,
    pub to_date: Option<OffsetDateTime>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from_date: OffsetDateTime,
    pub to_date: Option<OffsetDateTime>,
    pub current: bool,
    pub description: Option<String>,
}

impl Profile {
    pub async fn list_with_owners(db: &PgPool) -> anyhow::Result<Vec<ProfileWithOwner>> {
        let rows = sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT p.id, p.user_id, p.status, p.skills, p.company, p.website, p.location,
                   p.bio, p.github_username, p.youtube, p.twitter, p.facebook, p.linkedin,
                   p.instagram, p.created_at,
                   u.name AS owner_name, u.avatar AS owner_avatar
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_user_with_owner(
        db: &PgPool,
        user_id: Uuid,
    ) -> anyhow::Result<Option<ProfileWithOwner>> {
        let row = sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT p.id, p.user_id, p.status, p.skills, p.company, p.website, p.location,
                   p.bio, p.github_username, p.youtube, p.twitter, p.facebook, p.linkedin,
                   p.instagram, p.created_at,
                   u.name AS owner_name, u.avatar AS owner_avatar
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Create-or-update keyed on the owner; a user has at most one profile and
    /// the owner reference is never reassigned.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles
                (user_id, status, skills, company, website, location, bio,
                 github_username, youtube, twitter, facebook, linkedin, instagram)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                company = EXCLUDED.company,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                bio = EXCLUDED.bio,
                github_username = EXCLUDED.github_username,
                youtube = EXCLUDED.youtube,
                twitter = EXCLUDED.twitter,
                facebook = EXCLUDED.facebook,
                linkedin = EXCLUDED.linkedin,
                instagram = EXCLUDED.instagram
            RETURNING {PROFILE_COLS}
            "#
        ))
        .bind(user_id)
        .bind(&fields.status)
        .bind(&fields.skills)
        .bind(&fields.company)
        .bind(&fields.website)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.github_username)
        .bind(&fields.youtube)
        .bind(&fields.twitter)
        .bind(&fields.facebook)
        .bind(&fields.linkedin)
        .bind(&fields.instagram)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn experience(db: &PgPool, profile_id: Uuid) -> anyhow::Result<Vec<Experience>> {
        let rows = sqlx::query_as::<_, Experience>(
            r#"
            SELECT id, profile_id, title, company, location, from_date, to_date,
                   current, description, created_at
            FROM profile_experience
            WHERE profile_id = $1
            ORDER BY from_date DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn add_experience(
        db: &PgPool,
        profile_id: Uuid,
        exp: &NewExperience,
    ) -> anyhow::Result<Experience> {
        let row = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO profile_experience
                (profile_id, title, company, location, from_date, to_date, current, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, profile_id, title, company, location, from_date, to_date,
                      current, description, created_at
            "#,
        )
        .bind(profile_id)
        .bind(&exp.title)
        .bind(&exp.company)
        .bind(&exp.location)
        .bind(exp.from_date)
        .bind(exp.to_date)
        .bind(exp.current)
        .bind(&exp.description)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// The user owning the profile this entry belongs to, for the ownership
    /// check. None when the entry does not exist.
    pub async fn find_experience_owner(
        db: &PgPool,
        exp_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT p.user_id
            FROM profile_experience e
            JOIN profiles p ON p.id = e.profile_id
            WHERE e.id = $1
            "#,
        )
        .bind(exp_id)
        .fetch_optional(db)
        .await?;
        Ok(owner)
    }

    pub async fn delete_experience(db: &PgPool, exp_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM profile_experience WHERE id = $1")
            .bind(exp_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn education(db: &PgPool, profile_id: Uuid) -> anyhow::Result<Vec<Education>> {
        let rows = sqlx::query_as::<_, Education>(
            r#"
            SELECT id, profile_id, school, degree, field_of_study, from_date, to_date,
                   current, description, created_at
            FROM profile_education
            WHERE profile_id = $1
            ORDER BY from_date DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn add_education(
        db: &PgPool,
        profile_id: Uuid,
        edu: &NewEducation,
    ) -> anyhow::Result<Education> {
        let row = sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO profile_education
                (profile_id, school, degree, field_of_study, from_date, to_date, current, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, profile_id, school, degree, field_of_study, from_date, to_date,
                      current, description, created_at
            "#,
        )
        .bind(profile_id)
        .bind(&edu.school)
        .bind(&edu.degree)
        .bind(&edu.field_of_study)
        .bind(edu.from_date)
        .bind(edu.to_date)
        .bind(edu.current)
        .bind(&edu.description)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_education_owner(
        db: &PgPool,
        edu_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT p.user_id
            FROM profile_education e
            JOIN profiles p ON p.id = e.profile_id
            WHERE e.id = $1
            "#,
        )
        .bind(edu_id)
        .fetch_optional(db)
        .await?;
        Ok(owner)
    }

    pub async fn delete_education(db: &PgPool, edu_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM profile_education WHERE id = $1")
            .bind(edu_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
