//! Portfolio statistics: project aggregates and visit analytics.
//!
//! Pure functions over borrowed views of the records so both store
//! backends can feed them without cloning.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Status value counted as a finished project.
pub const STATUS_COMPLETED: &str = "completed";

/// Number of daily buckets in `views_over_time` (today and the six days before).
pub const DAILY_WINDOW_DAYS: i64 = 7;

/// Trailing window for `views_this_month`.
pub const MONTHLY_WINDOW_DAYS: i64 = 30;

/// Maximum number of entries in `top_pages`.
pub const TOP_PAGES_LIMIT: usize = 10;

/// Bucket name for visits without a country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Date format used for daily buckets.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The project fields the statistics depend on.
#[derive(Debug, Clone, Copy)]
pub struct ProjectFacts<'a> {
    pub status: &'a str,
    pub featured: bool,
    pub tech_stack: &'a [String],
}

/// The visit fields the statistics depend on.
#[derive(Debug, Clone, Copy)]
pub struct VisitFacts<'a> {
    pub page: &'a str,
    pub country: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub featured_projects: usize,
    pub tech_stack_stats: Vec<TechStackStat>,
    pub projects_by_status: Vec<ProjectStatusStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechStackStat {
    pub technology: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatusStat {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub total_views: usize,
    pub unique_visitors: usize,
    pub views_today: usize,
    pub views_this_week: usize,
    pub views_this_month: usize,
    pub top_pages: Vec<PageStat>,
    pub views_by_country: Vec<CountryStat>,
    pub views_over_time: Vec<TimeStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStat {
    pub page: String,
    pub views: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStat {
    pub country: String,
    pub views: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStat {
    pub date: String,
    pub views: usize,
}

// ---------------------------------------------------------------------------
// Project statistics
// ---------------------------------------------------------------------------

/// Aggregate counts over the current project collection.
///
/// A project contributes to every technology in its stack, so the
/// technology percentages need not sum to 100. Lists are ordered by count
/// descending, then by name.
pub fn project_statistics<'a, I>(projects: I) -> ProjectStats
where
    I: IntoIterator<Item = ProjectFacts<'a>>,
{
    let mut total = 0usize;
    let mut completed = 0usize;
    let mut featured = 0usize;
    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_tech: BTreeMap<&str, usize> = BTreeMap::new();

    for project in projects {
        total += 1;
        if project.status == STATUS_COMPLETED {
            completed += 1;
        }
        if project.featured {
            featured += 1;
        }
        *by_status.entry(project.status).or_default() += 1;
        for tech in project.tech_stack {
            *by_tech.entry(tech.as_str()).or_default() += 1;
        }
    }

    let tech_stack_stats = ranked(by_tech)
        .into_iter()
        .map(|(technology, count)| TechStackStat {
            technology,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    let projects_by_status = ranked(by_status)
        .into_iter()
        .map(|(status, count)| ProjectStatusStat { status, count })
        .collect();

    ProjectStats {
        total_projects: total,
        completed_projects: completed,
        featured_projects: featured,
        tech_stack_stats,
        projects_by_status,
    }
}

// ---------------------------------------------------------------------------
// View statistics
// ---------------------------------------------------------------------------

/// Derive view counters from the recorded visit log.
///
/// Day boundaries are UTC calendar dates relative to `now`. Visits dated
/// after `now` count toward the totals but fall in no time bucket.
pub fn view_statistics<'a, I>(visits: I, now: Timestamp) -> ViewStats
where
    I: IntoIterator<Item = VisitFacts<'a>>,
{
    let today = now.date_naive();
    let week_start = today - Duration::days(DAILY_WINDOW_DAYS - 1);
    let month_start = today - Duration::days(MONTHLY_WINDOW_DAYS - 1);

    let mut total = 0usize;
    let mut visitors: HashSet<&str> = HashSet::new();
    let mut views_today = 0usize;
    let mut views_week = 0usize;
    let mut views_month = 0usize;
    let mut by_page: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_country: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for visit in visits {
        total += 1;
        if let Some(ip) = visit.ip_address.filter(|ip| !ip.is_empty()) {
            visitors.insert(ip);
        }
        *by_page.entry(visit.page).or_default() += 1;
        let country = visit
            .country
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);
        *by_country.entry(country).or_default() += 1;

        let day = visit.created_at.date_naive();
        if day > today {
            continue;
        }
        if day == today {
            views_today += 1;
        }
        if day >= week_start {
            views_week += 1;
            *by_day.entry(day).or_default() += 1;
        }
        if day >= month_start {
            views_month += 1;
        }
    }

    let mut top_pages: Vec<PageStat> = ranked(by_page)
        .into_iter()
        .map(|(page, views)| PageStat { page, views })
        .collect();
    top_pages.truncate(TOP_PAGES_LIMIT);

    let views_by_country = ranked(by_country)
        .into_iter()
        .map(|(country, views)| CountryStat { country, views })
        .collect();

    let views_over_time = (0..DAILY_WINDOW_DAYS)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            TimeStat {
                date: date.format(DATE_FORMAT).to_string(),
                views: by_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect();

    ViewStats {
        total_views: total,
        unique_visitors: visitors.len(),
        views_today,
        views_this_week: views_week,
        views_this_month: views_month,
        top_pages,
        views_by_country,
        views_over_time,
    }
}

/// Order counted keys by count descending, then key ascending.
fn ranked(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect();
    // BTreeMap iteration is already key-ascending; a stable sort keeps that
    // as the tie-breaker.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stack(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn project<'a>(status: &'a str, featured: bool, tech_stack: &'a [String]) -> ProjectFacts<'a> {
        ProjectFacts {
            status,
            featured,
            tech_stack,
        }
    }

    fn status_stat(status: &str, count: usize) -> ProjectStatusStat {
        ProjectStatusStat {
            status: status.into(),
            count,
        }
    }

    fn country_stat(country: &str, views: usize) -> CountryStat {
        CountryStat {
            country: country.into(),
            views,
        }
    }

    // -- project_statistics ---------------------------------------------------

    #[test]
    fn empty_collection_has_zero_counts() {
        let stats = project_statistics(std::iter::empty());
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.completed_projects, 0);
        assert!(stats.tech_stack_stats.is_empty());
        assert!(stats.projects_by_status.is_empty());
    }

    #[test]
    fn counts_completed_featured_and_status() {
        let a = stack(&["Go", "Docker"]);
        let b = stack(&["Go"]);
        let c = stack(&[]);
        let projects = [
            project("completed", true, &a),
            project("in-progress", true, &b),
            project("completed", false, &c),
        ];

        let stats = project_statistics(projects);

        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.completed_projects, 2);
        assert_eq!(stats.featured_projects, 2);
        assert_eq!(
            stats.projects_by_status,
            vec![
                status_stat("completed", 2),
                status_stat("in-progress", 1),
            ]
        );
    }

    #[test]
    fn tech_percentages_use_total_project_count() {
        let a = stack(&["Go", "Docker"]);
        let b = stack(&["Go"]);
        let c = stack(&["Rust"]);
        let projects = [
            project("completed", false, &a),
            project("completed", false, &b),
            project("completed", false, &c),
        ];

        let stats = project_statistics(projects);

        assert_eq!(stats.tech_stack_stats[0].technology, "Go");
        assert_eq!(stats.tech_stack_stats[0].count, 2);
        assert!((stats.tech_stack_stats[0].percentage - 200.0 / 3.0).abs() < 1e-9);
        // Ties ordered by name.
        assert_eq!(stats.tech_stack_stats[1].technology, "Docker");
        assert_eq!(stats.tech_stack_stats[2].technology, "Rust");

        let sum: f64 = stats.tech_stack_stats.iter().map(|t| t.percentage).sum();
        assert!(sum > 100.0, "percentages may exceed 100 in total");
    }

    // -- view_statistics ------------------------------------------------------

    fn visit<'a>(
        page: &'a str,
        country: Option<&'a str>,
        ip: Option<&'a str>,
        at: Timestamp,
    ) -> VisitFacts<'a> {
        VisitFacts {
            page,
            country,
            ip_address: ip,
            created_at: at,
        }
    }

    #[test]
    fn no_visits_still_has_seven_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let stats = view_statistics(std::iter::empty(), now);

        assert_eq!(stats.total_views, 0);
        assert_eq!(stats.views_over_time.len(), 7);
        assert_eq!(stats.views_over_time[0].date, "2024-03-04");
        assert_eq!(stats.views_over_time[6].date, "2024-03-10");
        assert!(stats.views_over_time.iter().all(|d| d.views == 0));
    }

    #[test]
    fn buckets_by_day_week_and_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let visits = [
            visit("/", Some("KR"), Some("10.0.0.1"), now),
            visit(
                "/projects",
                Some("KR"),
                Some("10.0.0.1"),
                now - Duration::hours(3),
            ),
            visit("/projects", None, Some("10.0.0.2"), now - Duration::days(3)),
            visit("/contact", Some("US"), None, now - Duration::days(20)),
            visit(
                "/projects",
                Some("US"),
                Some("10.0.0.3"),
                now - Duration::days(90),
            ),
        ];

        let stats = view_statistics(visits, now);

        assert_eq!(stats.total_views, 5);
        assert_eq!(stats.unique_visitors, 3);
        assert_eq!(stats.views_today, 2);
        assert_eq!(stats.views_this_week, 3);
        assert_eq!(stats.views_this_month, 4);
        assert_eq!(stats.top_pages[0].page, "/projects");
        assert_eq!(stats.top_pages[0].views, 3);
        assert_eq!(
            stats.views_by_country,
            vec![
                country_stat("KR", 2),
                country_stat("US", 2),
                country_stat(UNKNOWN_COUNTRY, 1),
            ]
        );
        assert_eq!(stats.views_over_time[6].views, 2);
        assert_eq!(stats.views_over_time[3].views, 1);
    }

    #[test]
    fn top_pages_are_capped() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let pages: Vec<String> = (0..15).map(|i| format!("/p{i}")).collect();
        let visits = pages.iter().map(|p| visit(p, None, None, now));

        let stats = view_statistics(visits, now);

        assert_eq!(stats.top_pages.len(), TOP_PAGES_LIMIT);
    }
}
