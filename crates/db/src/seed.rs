//! Example portfolio content loaded on first startup.
//!
//! The same sample set feeds both backends: [`seed_if_empty`] writes it to
//! PostgreSQL, [`crate::MemoryStore::seeded`] preloads it in memory.

use chrono::{TimeZone, Utc};
use folio_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::CreateProject;
use crate::models::skill::CreateSkill;
use crate::models::user::CreateUser;

/// Email of the sample profile; its presence marks the store as seeded.
pub const SAMPLE_USER_EMAIL: &str = "hyoukjoo@example.com";

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    AlreadySeeded,
}

fn date(year: i32, month: u32, day: u32) -> Option<Timestamp> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_user() -> CreateUser {
    CreateUser {
        name: "Hyoukjoo Lee".into(),
        email: SAMPLE_USER_EMAIL.into(),
        role: "Full-Stack Developer".into(),
        avatar_url: None,
        bio: Some("Backend engineer specializing in Go, TypeScript, and cloud architecture".into()),
        website: Some("https://hyoukjoolee.github.io/portfolio".into()),
        location: Some("Seoul, Korea".into()),
        skills: strings(&["Go", "TypeScript", "Flutter", "AWS", "Docker", "PostgreSQL"]),
        is_public: true,
    }
}

pub fn sample_projects() -> Vec<CreateProject> {
    vec![
        CreateProject {
            title: "Portfolio Website".into(),
            description: "A responsive portfolio website built with Flutter Web, featuring i18n \
                          support and GitHub Pages deployment"
                .into(),
            tech_stack: strings(&["Flutter", "Dart", "GitHub Actions", "GitHub Pages"]),
            status: "completed".into(),
            featured: true,
            live_url: Some("https://hyoukjoolee.github.io/portfolio".into()),
            github_url: Some("https://github.com/hyoukjoolee/portfolio".into()),
            image_url: Some("https://via.placeholder.com/600x400".into()),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 2, 1),
        },
        CreateProject {
            title: "Portfolio API Server".into(),
            description: "REST API server for the portfolio with PostgreSQL storage and \
                          container deployment"
                .into(),
            tech_stack: strings(&["Rust", "PostgreSQL", "Docker"]),
            status: "in-progress".into(),
            featured: true,
            live_url: None,
            github_url: Some("https://github.com/hyoukjoolee/portfolio-api".into()),
            image_url: Some("https://via.placeholder.com/600x400".into()),
            start_date: date(2024, 3, 1),
            end_date: None,
        },
    ]
}

pub fn sample_skills() -> Vec<CreateSkill> {
    let skill = |name: &str,
                 category: &str,
                 level: &str,
                 years_exp: i32,
                 featured: bool,
                 color: &str| CreateSkill {
        name: name.into(),
        category: category.into(),
        level: level.into(),
        years_exp,
        featured,
        icon: None,
        color: Some(color.into()),
        description: None,
    };

    vec![
        skill("Go", "backend", "expert", 3, true, "#00ADD8"),
        skill("JavaScript", "frontend", "expert", 5, true, "#F7DF1E"),
        skill("TypeScript", "frontend", "advanced", 3, true, "#3178C6"),
        skill("Flutter", "mobile", "advanced", 2, true, "#02569B"),
        skill("Docker", "devops", "advanced", 3, false, "#2496ED"),
        skill("AWS", "cloud", "intermediate", 2, false, "#FF9900"),
    ]
}

/// Insert the sample user with its projects and skills, once.
///
/// The user insert is `ON CONFLICT (email) DO NOTHING`; when it yields no
/// row the store is considered already seeded and nothing else is written.
pub async fn seed_if_empty(pool: &PgPool) -> Result<SeedOutcome, sqlx::Error> {
    let user = sample_user();
    let user_id: Option<DbId> = sqlx::query_scalar(
        "INSERT INTO users (name, email, role, avatar_url, bio, website, location, skills, is_public)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.role)
    .bind(&user.avatar_url)
    .bind(&user.bio)
    .bind(&user.website)
    .bind(&user.location)
    .bind(Json(&user.skills))
    .bind(user.is_public)
    .fetch_optional(pool)
    .await?;

    let Some(user_id) = user_id else {
        tracing::info!(email = SAMPLE_USER_EMAIL, "Sample data already present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    };

    let projects = sample_projects();
    for project in &projects {
        sqlx::query(
            "INSERT INTO projects
                (user_id, title, description, tech_stack, status, featured, live_url,
                 github_url, image_url, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(user_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(Json(&project.tech_stack))
        .bind(&project.status)
        .bind(project.featured)
        .bind(&project.live_url)
        .bind(&project.github_url)
        .bind(&project.image_url)
        .bind(project.start_date)
        .bind(project.end_date)
        .execute(pool)
        .await?;
    }

    let skills = sample_skills();
    for skill in &skills {
        sqlx::query(
            "INSERT INTO skills
                (user_id, name, category, level, years_exp, featured, icon, color, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user_id)
        .bind(&skill.name)
        .bind(&skill.category)
        .bind(&skill.level)
        .bind(skill.years_exp)
        .bind(skill.featured)
        .bind(&skill.icon)
        .bind(&skill.color)
        .bind(&skill.description)
        .execute(pool)
        .await?;
    }

    tracing::info!(
        user_id,
        projects = projects.len(),
        skills = skills.len(),
        "Sample data inserted",
    );
    Ok(SeedOutcome::Seeded)
}
