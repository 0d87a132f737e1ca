pub mod assemble;
pub mod reduce;
pub mod rollup;
pub mod window;
pub mod workdays;

// Re-export specific items to avoid ambiguity
pub use assemble::DashboardService;
pub use reduce::{reduce_latest, sort_canonical};
pub use rollup::{
    format_display_date, latest_activity, monthly_stats, recent_leads, DashboardSummary,
    LatestActivity, LeadRow, MonthlyStats, ProjectionBreakdown, StatusBreakdown,
    UNKNOWN_CLIENT_NAME,
};
pub use window::ActivityWindow;
pub use workdays::{rest_day_from_name, safe_rate, working_days, DEFAULT_REST_DAY};
