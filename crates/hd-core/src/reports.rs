//! Dashboard counters and the filtered ticket report.
//!
//! Both operate on ticket lists already fetched from the store; nothing here
//! touches the backing store.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::entities::{Ticket, User};
use crate::enums::{Role, TicketStatus};

/// Counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub pending: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Closed => stats.closed += 1,
                TicketStatus::Pending => stats.pending += 1,
            }
            stats
        })
    }
}

/// Filter for the ticket report. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// First creation day included.
    pub from: Option<NaiveDate>,
    /// Last creation day included (the whole day counts).
    pub to: Option<NaiveDate>,
    pub technician_id: Option<String>,
    pub client_id: Option<String>,
}

impl ReportFilter {
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let day = ticket.created_at.date_naive();
        self.from.is_none_or(|from| day >= from)
            && self.to.is_none_or(|to| day <= to)
            && self
                .technician_id
                .as_deref()
                .is_none_or(|id| ticket.technician_id.as_deref() == Some(id))
            && self
                .client_id
                .as_deref()
                .is_none_or(|id| ticket.client_id == id)
    }

    /// Tickets matching the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Summary block printed above the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    /// Mean of `updated_at - created_at` over closed tickets, rounded to whole
    /// hours. `None` when no ticket in the report is closed.
    pub avg_completion_hours: Option<i64>,
    /// `None` for an empty report. Ties go to the status listed first in
    /// [`TicketStatus::ALL`].
    pub most_common_status: Option<TicketStatus>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_tickets(tickets: &[&Ticket]) -> Self {
        let closed: Vec<TimeDelta> = tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Closed)
            .map(|t| t.updated_at - t.created_at)
            .collect();

        let avg_completion_hours = if closed.is_empty() {
            None
        } else {
            let total_secs: i64 = closed.iter().map(TimeDelta::num_seconds).sum();
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let hours = (total_secs as f64 / closed.len() as f64 / 3600.0).round() as i64;
            Some(hours)
        };

        let mut best: Option<(TicketStatus, usize)> = None;
        for status in TicketStatus::ALL {
            let count = tickets.iter().filter(|t| t.status == status).count();
            if count > 0 && best.is_none_or(|(_, n)| count > n) {
                best = Some((status, count));
            }
        }

        Self {
            total: tickets.len(),
            avg_completion_hours,
            most_common_status: best.map(|(status, _)| status),
        }
    }
}

/// A filtered report: the summary plus the matching tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketReport {
    pub filter: ReportFilter,
    pub summary: ReportSummary,
    pub tickets: Vec<Ticket>,
}

impl TicketReport {
    #[must_use]
    pub fn build(filter: ReportFilter, tickets: &[Ticket]) -> Self {
        let matching = filter.apply(tickets);
        let summary = ReportSummary::from_tickets(&matching);
        Self {
            summary,
            tickets: matching.into_iter().cloned().collect(),
            filter,
        }
    }
}

/// Users that can be picked as a ticket's technician.
#[must_use]
pub fn technician_roster(users: &[User]) -> Vec<&User> {
    users.iter().filter(|u| u.role == Role::Technician).collect()
}
