//! Example projects used on first run, when nothing usable is stored.

use crate::collection::Collection;
use crate::model::project::{Project, Status};
use chrono::{DateTime, Duration, Utc};

/// Id of the Aurora example record.
pub const AURORA_ID: &str = "p_aurora_001";

#[allow(clippy::too_many_arguments)]
fn example(
    id: &str,
    name: &str,
    client_name: &str,
    status: Status,
    last_updated: DateTime<Utc>,
    description: &str,
    phase: &str,
    notes: &str,
    next_action: &str,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        client_name: client_name.to_string(),
        status,
        last_updated,
        description: description.to_string(),
        phase: phase.to_string(),
        notes: notes.to_string(),
        next_action: Some(next_action.to_string()),
    }
}

/// The four example records, timestamped relative to `now`.
#[must_use]
pub fn seed_projects(now: DateTime<Utc>) -> Vec<Project> {
    vec![
        example(
            AURORA_ID,
            "Aurora KPI Audit",
            "Aurora Health",
            Status::Audit,
            now - Duration::hours(36),
            "Discovery and audit of current analytics setup, KPI definitions, and reporting cadence. Goal is to align stakeholders and identify measurement gaps.",
            "Discovery + Audit",
            "Access granted to GA4 and HubSpot. KPI list drafted; pending validation with Head of Growth. Identified event naming inconsistencies across web + app.",
            "Run stakeholder workshop and finalise KPI taxonomy.",
        ),
        example(
            "p_northwind_002",
            "Northwind Funnel Optimisation",
            "Northwind Labs",
            Status::Optimisation,
            now - Duration::hours(6),
            "Improve trial-to-paid conversion by refining onboarding, messaging, and activation triggers. A/B tests and qualitative feedback loops.",
            "Experimentation",
            "Hypothesis backlog created. Test 1 (shorter onboarding) shows +7% activation in early read. Need to verify with full sample size.",
            "Ship Test 2 for pricing page clarity and track cohort results.",
        ),
        example(
            "p_summit_003",
            "Summit Scaling Sprint",
            "Summit Robotics",
            Status::Scaling,
            now - Duration::hours(96),
            "Scale acquisition and operations for new markets. Focus on channel expansion, monitoring, and process reliability.",
            "Scale-up",
            "Paid search structure reworked. Weekly performance dashboard live. Ops checklist updated for new market launches.",
            "Define guardrails and alerts for CAC and lead quality by region.",
        ),
        example(
            "p_ember_004",
            "Ember Retrospective",
            "Ember Finance",
            Status::Completed,
            now - Duration::days(20),
            "Wrap-up, documentation, and handover after a successful optimisation cycle including dashboards and playbooks.",
            "Handover",
            "Documentation delivered. Team trained on dashboard usage. Final report shared with stakeholders.",
            "Optional: quarterly check-in to review KPI drift and new initiatives.",
        ),
    ]
}

/// Seed records as a [`Collection`].
#[must_use]
pub fn seed_collection(now: DateTime<Utc>) -> Collection {
    Collection::new(seed_projects(now))
}
