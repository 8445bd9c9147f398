use crate::models::{Guest, Party, Rsvp};

/// A guest entry resolved from an RSVP for the detail view.
///
/// An RSVP may reference a guest id missing from the guest collection;
/// that is surfaced as `Unknown` so the renderer shows a placeholder
/// instead of a fabricated name.
#[derive(Debug, Clone, PartialEq)]
pub enum GuestRef {
    Known(Guest),
    Unknown { guest_id: i64 },
}

impl GuestRef {
    pub fn display_name(&self) -> String {
        match self {
            GuestRef::Known(guest) => guest.name.clone(),
            GuestRef::Unknown { guest_id } => format!("(unknown guest #{})", guest_id),
        }
    }
}

/// The application's single source of local truth.
///
/// Owns the last-fetched snapshot of all three collections plus the
/// current selection. Only the controller mutates it, always after a
/// successful service call, and collections are replaced wholesale;
/// there is no incremental merge.
#[derive(Debug, Default)]
pub struct AppState {
    parties: Vec<Party>,
    guests: Vec<Guest>,
    rsvps: Vec<Rsvp>,
    selected_party: Option<Party>,
    // Selection fetches are tagged so a stale response from rapid
    // re-selection never overwrites a newer one.
    last_issued_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        &self.rsvps
    }

    pub fn selected_party(&self) -> Option<&Party> {
        self.selected_party.as_ref()
    }

    /// Replace the party collection with a fresh fetch
    pub fn replace_parties(&mut self, parties: Vec<Party>) {
        self.parties = parties;
    }

    /// Replace the guest and RSVP collections with a fresh fetch
    pub fn replace_guests_and_rsvps(&mut self, guests: Vec<Guest>, rsvps: Vec<Rsvp>) {
        self.guests = guests;
        self.rsvps = rsvps;
    }

    /// Hand out a sequence number for a new selection fetch.
    /// Later numbers always supersede earlier ones.
    pub fn begin_selection(&mut self) -> u64 {
        self.last_issued_seq += 1;
        self.last_issued_seq
    }

    /// Install a fetched selection result, unless a newer selection has
    /// been issued since. Returns whether the result was applied.
    pub fn apply_selection(&mut self, seq: u64, party: Party) -> bool {
        if seq != self.last_issued_seq {
            tracing::debug!(
                seq,
                latest = self.last_issued_seq,
                "discarding stale selection response"
            );
            return false;
        }
        self.selected_party = Some(party);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_party = None;
    }

    /// Derive the guest list for a party: every RSVP for the party,
    /// resolved against the guest collection. Dangling guest references
    /// are kept as `Unknown` entries and logged as a data-integrity
    /// warning rather than dropped.
    pub fn guest_refs_for(&self, party_id: i64) -> Vec<GuestRef> {
        self.rsvps
            .iter()
            .filter(|rsvp| rsvp.event_id == party_id)
            .map(|rsvp| {
                match self.guests.iter().find(|guest| guest.id == rsvp.guest_id) {
                    Some(guest) => GuestRef::Known(guest.clone()),
                    None => {
                        tracing::warn!(
                            rsvp_id = rsvp.id,
                            guest_id = rsvp.guest_id,
                            "RSVP references a guest missing from the guest collection"
                        );
                        GuestRef::Unknown {
                            guest_id: rsvp.guest_id,
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn party(id: i64, name: &str) -> Party {
        Party {
            id,
            name: name.to_string(),
            date: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
            description: "Annual".to_string(),
            location: "Hall A".to_string(),
        }
    }

    fn rsvp(id: i64, event_id: i64, guest_id: i64) -> Rsvp {
        Rsvp {
            id,
            event_id,
            guest_id,
        }
    }

    #[test]
    fn test_collections_are_replaced_wholesale() {
        let mut state = AppState::new();
        state.replace_parties(vec![party(1, "Gala"), party(2, "Picnic")]);
        state.replace_parties(vec![party(3, "Brunch")]);

        assert_eq!(state.parties().len(), 1);
        assert_eq!(state.parties()[0].id, 3);
    }

    #[test]
    fn test_guest_refs_match_rsvps_exactly() {
        let mut state = AppState::new();
        state.replace_guests_and_rsvps(
            vec![
                Guest {
                    id: 1,
                    name: "Ada".to_string(),
                },
                Guest {
                    id: 2,
                    name: "Grace".to_string(),
                },
            ],
            vec![rsvp(10, 5, 1), rsvp(11, 5, 2), rsvp(12, 6, 1)],
        );

        let refs = state.guest_refs_for(5);
        assert_eq!(
            refs.iter().map(|r| r.display_name()).collect::<Vec<_>>(),
            vec!["Ada", "Grace"]
        );
        assert!(state.guest_refs_for(7).is_empty());
    }

    #[test]
    fn test_duplicate_rsvps_yield_duplicate_entries() {
        let mut state = AppState::new();
        state.replace_guests_and_rsvps(
            vec![Guest {
                id: 1,
                name: "Ada".to_string(),
            }],
            vec![rsvp(10, 5, 1), rsvp(11, 5, 1)],
        );

        assert_eq!(state.guest_refs_for(5).len(), 2);
    }

    #[test]
    fn test_dangling_guest_reference_becomes_unknown_entry() {
        let mut state = AppState::new();
        state.replace_guests_and_rsvps(vec![], vec![rsvp(10, 5, 99)]);

        let refs = state.guest_refs_for(5);
        assert_eq!(refs, vec![GuestRef::Unknown { guest_id: 99 }]);
        assert_eq!(refs[0].display_name(), "(unknown guest #99)");
    }

    #[test]
    fn test_stale_selection_response_is_discarded() {
        let mut state = AppState::new();
        let first = state.begin_selection();
        let second = state.begin_selection();

        // The second (newer) selection resolves first
        assert!(state.apply_selection(second, party(2, "Picnic")));
        // The first response arrives late and must not win
        assert!(!state.apply_selection(first, party(1, "Gala")));

        assert_eq!(state.selected_party().unwrap().id, 2);
    }

    #[test]
    fn test_clear_selection() {
        let mut state = AppState::new();
        let seq = state.begin_selection();
        state.apply_selection(seq, party(1, "Gala"));
        assert!(state.selected_party().is_some());

        state.clear_selection();
        assert!(state.selected_party().is_none());
    }
}
