//! Selection cursor: which turbine and blade are "current".
//!
//! The cursor is two ids stored on [`TrackerState`]. Nothing here caches a
//! reference to a turbine or blade; every read re-resolves the ids against
//! the live collections, so an id whose entity is gone reads as unselected.

use blade_model::{Blade, BladeId, TrackerState, Turbine, TurbineId};

/// The currently selected turbine and blade, if they resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection<'a> {
    pub turbine: Option<&'a Turbine>,
    pub blade: Option<&'a Blade>,
}

/// Resolve the cursor ids against the live collections.
///
/// The blade is only looked up inside the selected turbine.
pub fn resolve_selected(state: &TrackerState) -> Selection<'_> {
    let turbine = state
        .selected_turbine_id
        .and_then(|id| state.turbine(id));
    let blade = match (turbine, state.selected_blade_id.as_ref()) {
        (Some(turbine), Some(blade_id)) => turbine.blade(blade_id),
        _ => None,
    };
    Selection { turbine, blade }
}

/// Select a turbine. Always clears the blade selection.
pub fn select_turbine(state: &mut TrackerState, turbine_id: TurbineId) {
    state.selected_turbine_id = Some(turbine_id);
    state.selected_blade_id = None;
}

/// Select a blade. The caller is responsible for picking a blade of the
/// selected turbine; a foreign id simply resolves to no blade.
pub fn select_blade(state: &mut TrackerState, blade_id: BladeId) {
    state.selected_blade_id = Some(blade_id);
}

/// Set both cursor ids at once.
pub fn jump_to(state: &mut TrackerState, turbine_id: TurbineId, blade_id: BladeId) {
    state.selected_turbine_id = Some(turbine_id);
    state.selected_blade_id = Some(blade_id);
}

/// Repair the cursor after a load or mutation.
///
/// An unset or dangling turbine id falls back to the first turbine (collection
/// order); an unset or dangling blade id falls back to the first blade of the
/// selected turbine. A valid selection is never overridden, so applying this
/// twice gives the same result as applying it once. Returns whether the
/// cursor changed.
pub fn ensure_selection(state: &mut TrackerState) -> bool {
    let before = (state.selected_turbine_id, state.selected_blade_id.clone());

    let turbine_valid = state
        .selected_turbine_id
        .is_some_and(|id| state.turbine(id).is_some());
    if !turbine_valid {
        state.selected_turbine_id = state.turbines.first().map(|turbine| turbine.id);
        state.selected_blade_id = None;
    }

    let selected = state
        .selected_turbine_id
        .and_then(|id| state.turbine(id));
    let blade_valid = match (selected, state.selected_blade_id.as_ref()) {
        (Some(turbine), Some(blade_id)) => turbine.blade(blade_id).is_some(),
        _ => false,
    };
    if !blade_valid {
        state.selected_blade_id =
            selected.and_then(|turbine| turbine.blades.first().map(|blade| blade.id.clone()));
    }

    let changed = before != (state.selected_turbine_id, state.selected_blade_id.clone());
    if changed {
        tracing::debug!(
            turbine = ?state.selected_turbine_id,
            blade = ?state.selected_blade_id,
            "Repaired selection"
        );
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> TrackerState {
        let mut state = TrackerState::default();
        for (id, blades) in [(4, 2), (2, 0), (9, 1)] {
            let mut turbine = Turbine::new(id, format!("SN-{id}"));
            for position in 0..blades {
                let blade_id = turbine.next_blade_id();
                turbine
                    .blades
                    .push(Blade::new(blade_id, format!("B-{id}-{position}")));
            }
            state.turbines.push(turbine);
        }
        state
    }

    #[test]
    fn select_turbine_clears_blade() {
        let mut state = forest();
        jump_to(&mut state, 4, "4-2".into());
        select_turbine(&mut state, 9);
        assert_eq!(state.selected_turbine_id, Some(9));
        assert_eq!(state.selected_blade_id, None);
    }

    #[test]
    fn ensure_selection_picks_first_turbine_and_blade() {
        let mut state = forest();
        assert!(ensure_selection(&mut state));
        assert_eq!(state.selected_turbine_id, Some(4));
        assert_eq!(state.selected_blade_id, Some("4-1".into()));
        assert!(!ensure_selection(&mut state));
    }

    #[test]
    fn ensure_selection_keeps_valid_selection() {
        let mut state = forest();
        jump_to(&mut state, 4, "4-2".into());
        assert!(!ensure_selection(&mut state));
        assert_eq!(state.selected_blade_id, Some("4-2".into()));
    }

    #[test]
    fn ensure_selection_leaves_bladeless_turbine_without_blade() {
        let mut state = forest();
        select_turbine(&mut state, 2);
        assert!(!ensure_selection(&mut state));
        assert_eq!(state.selected_turbine_id, Some(2));
        assert_eq!(state.selected_blade_id, None);
    }

    #[test]
    fn ensure_selection_repairs_dangling_ids() {
        let mut state = forest();
        jump_to(&mut state, 77, "77-1".into());
        assert!(ensure_selection(&mut state));
        assert_eq!(state.selected_turbine_id, Some(4));
        assert_eq!(state.selected_blade_id, Some("4-1".into()));

        jump_to(&mut state, 9, "4-1".into());
        assert!(ensure_selection(&mut state));
        assert_eq!(state.selected_blade_id, Some("9-1".into()));
    }

    #[test]
    fn ensure_selection_on_empty_state_selects_nothing() {
        let mut state = TrackerState::default();
        assert!(!ensure_selection(&mut state));
        assert_eq!(state.selected_turbine_id, None);
    }

    #[test]
    fn resolve_selected_ignores_foreign_blade() {
        let mut state = forest();
        select_turbine(&mut state, 9);
        select_blade(&mut state, "4-1".into());
        let selection = resolve_selected(&state);
        assert_eq!(selection.turbine.map(|t| t.id), Some(9));
        assert!(selection.blade.is_none());
    }
}
