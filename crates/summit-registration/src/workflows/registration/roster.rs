/// Detail records needed besides the primary registrant.
pub fn additional_slots(total_attendees: u8) -> usize {
    usize::from(total_attendees.saturating_sub(1))
}

/// Grow or shrink `roster` to match `total_attendees`, keeping entries at
/// indices that survive and filling new slots with blank records.
pub fn sync_roster<T: Default>(roster: &mut Vec<T>, total_attendees: u8) {
    roster.resize_with(additional_slots(total_attendees), T::default);
}
