use crate::calendar::{Attendee, User};

/// Attendee records for the selected user IDs, in selection order, plus the
/// IDs that have no entry in `directory`.
pub fn resolve_attendees(ids: &[u64], directory: &[User]) -> (Vec<Attendee>, Vec<u64>) {
    let mut attendees = Vec::with_capacity(ids.len());
    let mut unresolved = Vec::new();

    for id in ids {
        match directory.iter().find(|user| user.id == *id) {
            Some(user) => attendees.push(Attendee::required(user.display_name(), user.email.clone())),
            None => unresolved.push(*id),
        }
    }

    (attendees, unresolved)
}

/// Directory IDs of the attendees that can be matched by email.
pub fn attendee_ids_for(attendees: &[Attendee], directory: &[User]) -> Vec<u64> {
    attendees
        .iter()
        .filter_map(|attendee| {
            directory
                .iter()
                .find(|user| user.email.eq_ignore_ascii_case(&attendee.email))
                .map(|user| user.id)
        })
        .collect()
}
