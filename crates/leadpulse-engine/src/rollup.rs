//! KPI rollups over collapsed interaction sets
//!
//! Every function here takes data already reduced to one row per client
//! (or documents when it does its own reduction) and produces the named
//! dashboard metrics. Unrecognized status/projection values count toward
//! raw totals but not named buckets.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Months, NaiveDate, Weekday};
use leadpulse_core::{Client, ClientId, ContactMode, Interaction, LeadStatus, Projection};
use serde::{Deserialize, Serialize};

use crate::reduce::reduce_latest;
use crate::window::ActivityWindow;
use crate::workdays::{safe_rate, working_days};

/// Placeholder name for a client id present in interactions but missing
/// from the clients fetch.
pub const UNKNOWN_CLIENT_NAME: &str = "Unknown";

/// Exact-match counts over the closed status vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub onboarded: u64,
    pub interested: u64,
    pub not_interested: u64,
    pub reached_out: u64,
    /// Values outside the named vocabulary; kept so raw totals add up.
    pub other: u64,
}

impl StatusBreakdown {
    pub fn tally(collapsed: &[Interaction]) -> Self {
        let mut breakdown = Self::default();
        for interaction in collapsed {
            match &interaction.status {
                LeadStatus::Onboarded => breakdown.onboarded += 1,
                LeadStatus::Interested => breakdown.interested += 1,
                LeadStatus::NotInterested => breakdown.not_interested += 1,
                LeadStatus::ReachedOut => breakdown.reached_out += 1,
                LeadStatus::Other(_) => breakdown.other += 1,
            }
        }
        breakdown
    }
}

/// Exact-match counts over the closed projection vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionBreakdown {
    pub wp_greater50: u64,
    pub wp_less50: u64,
    pub mp_greater50: u64,
    pub mp_less50: u64,
    /// Values outside the named vocabulary. Counted for raw totals but
    /// kept off the wire; the envelope carries the four named buckets.
    #[serde(skip_serializing, default)]
    pub other: u64,
}

impl ProjectionBreakdown {
    pub fn tally(collapsed: &[Interaction]) -> Self {
        let mut breakdown = Self::default();
        for interaction in collapsed {
            match &interaction.projection {
                Projection::WpGreater50 => breakdown.wp_greater50 += 1,
                Projection::WpLess50 => breakdown.wp_less50 += 1,
                Projection::MpGreater50 => breakdown.mp_greater50 += 1,
                Projection::MpLess50 => breakdown.mp_less50 += 1,
                Projection::Other(_) => breakdown.other += 1,
            }
        }
        breakdown
    }
}

/// Current-calendar-month block. Totals cover the first through last
/// calendar day of the month; only `avg` is scoped month-start through
/// today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// Display month, e.g. "January 2024".
    pub month: String,
    pub total_visits: u64,
    pub individual_visits: u64,
    pub total_onboarded: u64,
    /// Latest-state clients in an MP bucket this month; "-" when the
    /// month has no interactions.
    pub mtd_mp: String,
    /// Average visits per working day elapsed so far, "0.00" when no
    /// working days.
    pub avg: String,
}

/// Latest-activity block over the selected window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestActivity {
    /// Window anchor formatted DD/MM/YYYY.
    pub date: String,
    pub total: u64,
    pub individual: u64,
    pub repeat: u64,
    pub interested: u64,
    pub not_interested: u64,
    pub reached_out: u64,
    pub onboarded: u64,
}

/// One row of the recent-leads listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    /// 1-based serial number.
    pub sn: u64,
    /// Contact date formatted DD/MM/YYYY.
    pub date: String,
    pub name: String,
    pub status: String,
    pub sub: String,
    pub color: String,
}

/// The aggregate dashboard document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: u64,
    pub total_onboarded: u64,
    pub total_visits: u64,
    pub projections: ProjectionBreakdown,
    pub monthly_stats: MonthlyStats,
    pub latest_activity: LatestActivity,
    pub latest_leads: Vec<LeadRow>,
}

/// Dashboard display date format.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Compute the current-month block from the caller's full canonically
/// sorted history. Totals span the whole calendar month of `today`, so a
/// future-dated row inside the month still counts; the average alone is
/// rated over the working days elapsed through `today`.
pub fn monthly_stats(
    all_sorted: &[Interaction],
    today: NaiveDate,
    rest_day: Weekday,
) -> MonthlyStats {
    let month_start = today.with_day(1).unwrap_or(today);
    let month_end = month_start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    let in_month: Vec<Interaction> = all_sorted
        .iter()
        .filter(|i| month_start <= i.contact_date && i.contact_date <= month_end)
        .cloned()
        .collect();

    let total_visits = in_month
        .iter()
        .filter(|i| i.mode == ContactMode::Visit)
        .count() as u64;
    let visits_to_date = in_month
        .iter()
        .filter(|i| i.mode == ContactMode::Visit && i.contact_date <= today)
        .count() as u64;
    let individual_visits = in_month
        .iter()
        .filter(|i| i.mode == ContactMode::Visit)
        .map(|i| i.client_id)
        .collect::<HashSet<ClientId>>()
        .len() as u64;

    // Subsequence of a canonically sorted input stays sorted.
    let collapsed = reduce_latest(&in_month);
    let total_onboarded = collapsed
        .iter()
        .filter(|i| i.status == LeadStatus::Onboarded)
        .count() as u64;
    let mtd_mp = if in_month.is_empty() {
        "-".to_string()
    } else {
        collapsed
            .iter()
            .filter(|i| i.projection.is_mp())
            .count()
            .to_string()
    };

    MonthlyStats {
        month: today.format("%B %Y").to_string(),
        total_visits,
        individual_visits,
        total_onboarded,
        mtd_mp,
        avg: safe_rate(visits_to_date, working_days(month_start, today, rest_day)),
    }
}

/// Compute the latest-activity block.
///
/// `windowed` is every interaction inside the window, `collapsed` its
/// one-per-client reduction, and `sourced_in_window` the number of clients
/// whose sourcing date falls inside the window. Repeat visits are the
/// window total minus newly sourced clients, clamped at zero.
pub fn latest_activity(
    window: &ActivityWindow,
    windowed: &[Interaction],
    collapsed: &[Interaction],
    sourced_in_window: u64,
) -> LatestActivity {
    let statuses = StatusBreakdown::tally(collapsed);
    let total = windowed.len() as u64;

    LatestActivity {
        date: format_display_date(window.anchor()),
        total,
        individual: collapsed.len() as u64,
        repeat: total.saturating_sub(sourced_in_window),
        interested: statuses.interested,
        not_interested: statuses.not_interested,
        reached_out: statuses.reached_out,
        onboarded: statuses.onboarded,
    }
}

/// Build the recent-leads listing from a collapsed windowed set.
///
/// Rows are ordered most-recent-first (contact_date desc, created_at desc)
/// with 1-based serial numbers; a client missing from the clients fetch
/// still appears under the "Unknown" placeholder.
pub fn recent_leads(
    collapsed: &[Interaction],
    clients: &HashMap<ClientId, Client>,
) -> Vec<LeadRow> {
    let mut rows: Vec<&Interaction> = collapsed.iter().collect();
    rows.sort_by(|a, b| {
        b.contact_date
            .cmp(&a.contact_date)
            .then(b.created_at.cmp(&a.created_at))
    });

    rows.iter()
        .enumerate()
        .map(|(idx, interaction)| LeadRow {
            sn: idx as u64 + 1,
            date: format_display_date(interaction.contact_date),
            name: clients
                .get(&interaction.client_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CLIENT_NAME.to_string()),
            status: interaction.status.label().to_string(),
            sub: interaction.sub_status.clone(),
            color: interaction.status.color().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use leadpulse_core::{AgentId, InteractionId};

    fn interaction(
        client_id: ClientId,
        date: (i32, u32, u32),
        hour: u32,
        mode: ContactMode,
        status: LeadStatus,
        projection: Projection,
    ) -> Interaction {
        Interaction {
            id: InteractionId::new(),
            client_id,
            agent_id: AgentId::new(),
            contact_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            created_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, hour, 0, 0)
                .unwrap(),
            mode,
            status,
            sub_status: "warm".to_string(),
            projection,
            remarks: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_breakdown_counts_named_buckets() {
        let c = ClientId::new;
        let rows = vec![
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Onboarded, Projection::WpGreater50),
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::NotInterested, Projection::WpLess50),
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Other("Callback".into()), Projection::WpLess50),
        ];
        let breakdown = StatusBreakdown::tally(&rows);
        assert_eq!(breakdown.onboarded, 1);
        assert_eq!(breakdown.not_interested, 1);
        assert_eq!(breakdown.interested, 0);
        // Unmatched values count raw, not in named buckets.
        assert_eq!(breakdown.other, 1);
    }

    #[test]
    fn test_projection_breakdown() {
        let c = ClientId::new;
        let rows = vec![
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Interested, Projection::MpGreater50),
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Interested, Projection::MpGreater50),
            interaction(c(), (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Interested, Projection::WpLess50),
        ];
        let breakdown = ProjectionBreakdown::tally(&rows);
        assert_eq!(breakdown.mp_greater50, 2);
        assert_eq!(breakdown.wp_less50, 1);
        assert_eq!(breakdown.wp_greater50, 0);
    }

    #[test]
    fn test_projection_json_field_names() {
        let breakdown = ProjectionBreakdown {
            wp_greater50: 1,
            wp_less50: 2,
            mp_greater50: 3,
            mp_less50: 4,
            other: 5,
        };
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["wpGreater50"], 1);
        assert_eq!(json["wpLess50"], 2);
        assert_eq!(json["mpGreater50"], 3);
        assert_eq!(json["mpLess50"], 4);
        // The wire shape stays at the four named buckets even when
        // unrecognized values were tallied.
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_monthly_stats_scopes_to_calendar_month() {
        let c1 = ClientId::new();
        let c2 = ClientId::new();
        // Today: Wednesday 2024-01-10; month window is 01..=10 with one
        // Sunday (the 7th) => 9 working days.
        let today = day(2024, 1, 10);
        let rows = vec![
            interaction(c1, (2023, 12, 29), 9, ContactMode::Visit, LeadStatus::Interested, Projection::WpLess50),
            interaction(c1, (2024, 1, 4), 9, ContactMode::Visit, LeadStatus::Interested, Projection::MpGreater50),
            interaction(c1, (2024, 1, 8), 9, ContactMode::Visit, LeadStatus::Onboarded, Projection::MpGreater50),
            interaction(c2, (2024, 1, 9), 9, ContactMode::Call, LeadStatus::ReachedOut, Projection::WpLess50),
        ];
        let mut sorted = rows;
        crate::reduce::sort_canonical(&mut sorted);

        let stats = monthly_stats(&sorted, today, Weekday::Sun);
        assert_eq!(stats.month, "January 2024");
        // December visit excluded; the call is not a visit.
        assert_eq!(stats.total_visits, 2);
        assert_eq!(stats.individual_visits, 1);
        assert_eq!(stats.total_onboarded, 1);
        assert_eq!(stats.mtd_mp, "1");
        assert_eq!(stats.avg, safe_rate(2, 9));
    }

    #[test]
    fn test_monthly_totals_cover_whole_calendar_month() {
        let c1 = ClientId::new();
        let c2 = ClientId::new();
        // Today: 2024-01-10. The Jan 20 row is a future-dated backfill and
        // must still count toward the month's totals; only the average is
        // rated over the days elapsed so far (9 working days, one visit).
        let today = day(2024, 1, 10);
        let rows = vec![
            interaction(c1, (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Interested, Projection::MpGreater50),
            interaction(c2, (2024, 1, 20), 9, ContactMode::Visit, LeadStatus::Onboarded, Projection::WpLess50),
        ];
        let mut sorted = rows;
        crate::reduce::sort_canonical(&mut sorted);

        let stats = monthly_stats(&sorted, today, Weekday::Sun);
        assert_eq!(stats.total_visits, 2);
        assert_eq!(stats.individual_visits, 2);
        assert_eq!(stats.total_onboarded, 1);
        assert_eq!(stats.mtd_mp, "1");
        assert_eq!(stats.avg, safe_rate(1, 9));
    }

    #[test]
    fn test_monthly_stats_empty_month() {
        let stats = monthly_stats(&[], day(2024, 1, 10), Weekday::Sun);
        assert_eq!(stats.total_visits, 0);
        assert_eq!(stats.mtd_mp, "-");
        assert_eq!(stats.avg, "0.00");
    }

    #[test]
    fn test_latest_activity_repeat_clamps_at_zero() {
        let window = ActivityWindow::LatestDay(day(2024, 1, 5));
        let rows = vec![interaction(
            ClientId::new(),
            (2024, 1, 5),
            9,
            ContactMode::Visit,
            LeadStatus::Interested,
            Projection::WpLess50,
        )];
        let collapsed = reduce_latest(&rows);
        let block = latest_activity(&window, &rows, &collapsed, 5);
        assert_eq!(block.total, 1);
        assert_eq!(block.repeat, 0);
        assert_eq!(block.date, "05/01/2024");
    }

    #[test]
    fn test_recent_leads_order_serials_and_unknown_name() {
        let known = ClientId::new();
        let missing = ClientId::new();
        let rows = vec![
            interaction(known, (2024, 1, 3), 9, ContactMode::Visit, LeadStatus::Interested, Projection::WpLess50),
            interaction(missing, (2024, 1, 5), 9, ContactMode::Visit, LeadStatus::Onboarded, Projection::WpLess50),
        ];
        let mut clients = HashMap::new();
        clients.insert(
            known,
            Client {
                id: known,
                agent_id: AgentId::new(),
                name: "Acme".to_string(),
                category: "Retail".to_string(),
                location: "Pune".to_string(),
                state: "MH".to_string(),
                sourced_on: day(2024, 1, 1),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            },
        );

        let leads = recent_leads(&rows, &clients);
        assert_eq!(leads.len(), 2);
        // Most recent first, serials 1-based.
        assert_eq!(leads[0].sn, 1);
        assert_eq!(leads[0].date, "05/01/2024");
        assert_eq!(leads[0].name, UNKNOWN_CLIENT_NAME);
        assert_eq!(leads[0].color, "green");
        assert_eq!(leads[1].sn, 2);
        assert_eq!(leads[1].name, "Acme");
        assert_eq!(leads[1].sub, "warm");
    }
}
