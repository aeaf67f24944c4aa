use crate::actions::Action;

/// Counts in-flight gateway requests; the bar shows while non-zero.
pub fn reduce(pending: u32, action: &Action) -> u32 {
    match action {
        Action::ShowLoading => pending.saturating_add(1),
        Action::HideLoading => pending.saturating_sub(1),
        _ => pending,
    }
}
