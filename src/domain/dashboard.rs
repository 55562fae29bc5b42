use serde::Serialize;

use crate::domain::follow_up::DueFollowUp;
use crate::domain::lead::LeadStatus;

/// Number of leads in a pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadStatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

/// Figures shown on the back-office landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// One entry per [`LeadStatus`], zero counts included.
    pub lead_counts: Vec<LeadStatusCount>,
    /// Leads that still need work, i.e. everything but converted, lost and cancelled.
    pub open_leads: usize,
    pub due_follow_ups: Vec<DueFollowUp>,
    pub upcoming_trips: usize,
    /// Payments minus refunds received this month.
    pub month_received_paise: i64,
    pub month_expenses_paise: i64,
}

impl DashboardSummary {
    /// Fill in zero counts and derive the number of open leads.
    pub fn lead_counts_from(raw: &[(LeadStatus, usize)]) -> (Vec<LeadStatusCount>, usize) {
        let counts: Vec<LeadStatusCount> = LeadStatus::ALL
            .iter()
            .map(|status| LeadStatusCount {
                status: *status,
                count: raw
                    .iter()
                    .filter(|(raw_status, _)| raw_status == status)
                    .map(|(_, count)| *count)
                    .sum(),
            })
            .collect();

        let open = counts
            .iter()
            .filter(|entry| {
                !matches!(
                    entry.status,
                    LeadStatus::Converted | LeadStatus::Lost | LeadStatus::Cancelled
                )
            })
            .map(|entry| entry.count)
            .sum();

        (counts, open)
    }
}
