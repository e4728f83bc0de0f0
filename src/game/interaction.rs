//! Per-round interaction state and the session state that wraps it

use crate::core::{ItemId, Side, Variant};
use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

/// Evaluation result of the latest answer in the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

/// The player's in-progress answer for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum InteractionState {
    Counting {
        /// Toys the player has ticked off while counting
        tapped: FxHashSet<ItemId>,
        /// Last number submitted, highlighted until its feedback clears
        last_choice: Option<u32>,
    },
    Selection {
        selected: FxHashSet<ItemId>,
    },
    Comparison {
        last_choice: Option<Side>,
    },
    Sequencing {
        /// Ordinals placed so far, always `1..=placed.len()`
        placed: SmallVec<[u8; 5]>,
        /// Item shaking after a wrong tap
        wrong_item: Option<ItemId>,
    },
}

impl InteractionState {
    pub fn fresh(variant: Variant) -> Self {
        match variant {
            Variant::Counting => InteractionState::Counting {
                tapped: FxHashSet::default(),
                last_choice: None,
            },
            Variant::Selection => InteractionState::Selection {
                selected: FxHashSet::default(),
            },
            Variant::Comparison => InteractionState::Comparison { last_choice: None },
            Variant::Sequencing => InteractionState::Sequencing {
                placed: SmallVec::new(),
                wrong_item: None,
            },
        }
    }

    /// Whether `id` is ticked (counting) or selected (selection)
    pub fn is_marked(&self, id: ItemId) -> bool {
        match self {
            InteractionState::Counting { tapped, .. } => tapped.contains(&id),
            InteractionState::Selection { selected } => selected.contains(&id),
            _ => false,
        }
    }

    /// Number of ticked or selected items
    pub fn marked_count(&self) -> usize {
        match self {
            InteractionState::Counting { tapped, .. } => tapped.len(),
            InteractionState::Selection { selected } => selected.len(),
            _ => 0,
        }
    }

    pub fn placed(&self) -> &[u8] {
        match self {
            InteractionState::Sequencing { placed, .. } => placed,
            _ => &[],
        }
    }

    /// Flip membership of `id`; returns whether it is now marked
    pub(crate) fn toggle(&mut self, id: ItemId) -> Option<bool> {
        let set = match self {
            InteractionState::Counting { tapped, .. } => tapped,
            InteractionState::Selection { selected } => selected,
            _ => return None,
        };
        if set.remove(&id) {
            Some(false)
        } else {
            set.insert(id);
            Some(true)
        }
    }

    /// Forget highlight-only state once a feedback window closes
    pub(crate) fn clear_highlight(&mut self) {
        match self {
            InteractionState::Counting { last_choice, .. } => *last_choice = None,
            InteractionState::Comparison { last_choice } => *last_choice = None,
            InteractionState::Sequencing { wrong_item, .. } => *wrong_item = None,
            InteractionState::Selection { .. } => {}
        }
    }
}

/// Mutable session state owned by one engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub current_round: u32,
    pub score: u32,
    pub interaction: InteractionState,
    pub outcome: RoundOutcome,
}

impl SessionState {
    pub fn new(variant: Variant) -> Self {
        SessionState {
            current_round: 1,
            score: 0,
            interaction: InteractionState::fresh(variant),
            outcome: RoundOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selection() {
        let mut state = InteractionState::fresh(Variant::Selection);
        let id = ItemId::new(2);
        assert_eq!(state.toggle(id), Some(true));
        assert!(state.is_marked(id));
        assert_eq!(state.marked_count(), 1);
        assert_eq!(state.toggle(id), Some(false));
        assert_eq!(state.marked_count(), 0);
    }

    #[test]
    fn test_toggle_not_supported_for_sequencing() {
        let mut state = InteractionState::fresh(Variant::Sequencing);
        assert_eq!(state.toggle(ItemId::new(0)), None);
        assert!(state.placed().is_empty());
    }

    #[test]
    fn test_clear_highlight_keeps_ticks() {
        let mut state = InteractionState::Counting {
            tapped: [ItemId::new(1)].into_iter().collect(),
            last_choice: Some(4),
        };
        state.clear_highlight();
        assert!(state.is_marked(ItemId::new(1)));
        assert!(matches!(state, InteractionState::Counting { last_choice: None, .. }));
    }

    #[test]
    fn test_new_session_state() {
        let state = SessionState::new(Variant::Comparison);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.outcome, RoundOutcome::Pending);
    }
}
