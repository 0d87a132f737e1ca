//! Latest-state reduction
//!
//! The current state of a client is its interaction row with the largest
//! (contact_date, created_at), obtained by scanning a canonically sorted
//! sequence and keeping the first row per client id. The scan never
//! re-sorts; callers apply [`sort_canonical`] (or rely on the store's
//! ORDER BY) so the ordering contract is explicit rather than an accident
//! of map insertion order.

use std::collections::HashSet;

use leadpulse_core::Interaction;

/// Canonical ordering: `client_id ASC, contact_date DESC, created_at DESC`.
pub fn sort_canonical(interactions: &mut [Interaction]) {
    interactions.sort_by(|a, b| {
        a.client_id
            .cmp(&b.client_id)
            .then(b.contact_date.cmp(&a.contact_date))
            .then(b.created_at.cmp(&a.created_at))
    });
}

/// Collapse a canonically sorted sequence to one row per client id.
///
/// Keeps the first occurrence per client, which under the canonical sort is
/// the row with maximum (contact_date, created_at); same-day ties break on
/// creation time, latest wins. Output preserves input order (client id
/// ascending). Idempotent.
pub fn reduce_latest(interactions: &[Interaction]) -> Vec<Interaction> {
    let mut seen = HashSet::with_capacity(interactions.len());
    let mut latest = Vec::new();
    for interaction in interactions {
        if seen.insert(interaction.client_id) {
            latest.push(interaction.clone());
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use leadpulse_core::{
        AgentId, ClientId, ContactMode, InteractionId, LeadStatus, Projection,
    };

    fn interaction(
        client_id: ClientId,
        date: (i32, u32, u32),
        hour: u32,
        status: LeadStatus,
    ) -> Interaction {
        Interaction {
            id: InteractionId::new(),
            client_id,
            agent_id: AgentId::new(),
            contact_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            created_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, hour, 0, 0)
                .unwrap(),
            mode: ContactMode::Visit,
            status,
            sub_status: String::new(),
            projection: Projection::WpGreater50,
            remarks: String::new(),
        }
    }

    #[test]
    fn test_same_day_tie_breaks_on_creation_time() {
        let c1 = ClientId::new();
        let c2 = ClientId::new();
        let mut rows = vec![
            interaction(c1, (2024, 1, 5), 10, LeadStatus::Interested),
            interaction(c1, (2024, 1, 5), 14, LeadStatus::Onboarded),
            interaction(c2, (2024, 1, 4), 9, LeadStatus::NotInterested),
        ];
        sort_canonical(&mut rows);
        let latest = reduce_latest(&rows);

        assert_eq!(latest.len(), 2);
        let for_c1 = latest.iter().find(|i| i.client_id == c1).unwrap();
        let for_c2 = latest.iter().find(|i| i.client_id == c2).unwrap();
        // Later creation wins the same-day tie.
        assert_eq!(for_c1.status, LeadStatus::Onboarded);
        assert_eq!(for_c2.status, LeadStatus::NotInterested);
    }

    #[test]
    fn test_one_entry_per_client_regardless_of_input_order() {
        let c1 = ClientId::new();
        let forward = vec![
            interaction(c1, (2024, 1, 3), 9, LeadStatus::ReachedOut),
            interaction(c1, (2024, 1, 5), 9, LeadStatus::Interested),
            interaction(c1, (2024, 1, 4), 9, LeadStatus::NotInterested),
        ];
        let mut reversed: Vec<Interaction> = forward.iter().rev().cloned().collect();
        let mut forward = forward;

        sort_canonical(&mut forward);
        sort_canonical(&mut reversed);
        let a = reduce_latest(&forward);
        let b = reduce_latest(&reversed);

        assert_eq!(a.len(), 1);
        assert_eq!(a[0].status, LeadStatus::Interested);
        assert_eq!(b[0].id, a[0].id);
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let c1 = ClientId::new();
        let c2 = ClientId::new();
        let mut rows = vec![
            interaction(c1, (2024, 1, 5), 10, LeadStatus::Interested),
            interaction(c1, (2024, 1, 2), 8, LeadStatus::ReachedOut),
            interaction(c2, (2024, 1, 4), 9, LeadStatus::Onboarded),
        ];
        sort_canonical(&mut rows);
        let once = reduce_latest(&rows);
        let twice = reduce_latest(&once);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(reduce_latest(&[]).is_empty());
    }
}
