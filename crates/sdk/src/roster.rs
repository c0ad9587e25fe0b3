use indexmap::IndexMap;

use crate::types::{Player, Position};

/// Number of players in a complete roster.
pub const ROSTER_SIZE: usize = 11;

/// Client-side roster selection for one draft.
///
/// Caps per position (GK 1, DEF 4, MID 3, FWD 3) and the total of
/// [`ROSTER_SIZE`] are enforced on every [`toggle`](Self::toggle), so
/// the selection can never exceed them.
#[derive(Debug, Clone)]
pub struct RosterSelector {
    selected: IndexMap<u64, Position>,
    tab: Position,
}

impl Default for RosterSelector {
    fn default() -> Self {
        Self {
            selected: IndexMap::with_capacity(ROSTER_SIZE),
            tab: Position::Goalkeeper,
        }
    }
}

impl RosterSelector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from player ids looked up in `catalog`.
    pub fn from_catalog<'a>(
        catalog: impl IntoIterator<Item = &'a Player>,
        ids: impl IntoIterator<Item = u64>,
    ) -> crate::Result<Self> {
        let catalog = catalog
            .into_iter()
            .map(|player| (player.id, player))
            .collect::<IndexMap<_, _>>();
        let mut selector = Self::new();
        for id in ids {
            let player = catalog
                .get(&id)
                .ok_or_else(|| crate::Error::validation(format!("unknown player id {id}")))?;
            if selector.is_selected(id) {
                return Err(crate::Error::validation(format!(
                    "player {id} is selected more than once"
                )));
            }
            selector.toggle(player)?;
        }
        Ok(selector)
    }

    /// Select or deselect `player`.
    ///
    /// Deselecting always succeeds. Selecting fails with a message naming
    /// the violated cap and leaves the selection unchanged.
    pub fn toggle(&mut self, player: &Player) -> crate::Result<()> {
        if self.selected.shift_remove(&player.id).is_some() {
            return Ok(());
        }
        self.check_can_select(player.position)?;
        self.selected.insert(player.id, player.position);
        Ok(())
    }

    fn check_can_select(&self, position: Position) -> crate::Result<()> {
        if self.count(position) >= position.cap() {
            return Err(crate::Error::validation(format!(
                "Maximum {} {position} players allowed",
                position.cap()
            )));
        }
        if self.len() >= ROSTER_SIZE {
            return Err(crate::Error::validation(format!(
                "Maximum {ROSTER_SIZE} players allowed"
            )));
        }
        Ok(())
    }

    /// Whether `player` could be added right now.
    pub fn can_select(&self, player: &Player) -> bool {
        self.is_selected(player.id) || self.check_can_select(player.position).is_ok()
    }

    /// Whether the player is selected.
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains_key(&id)
    }

    /// Number of selected players.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected players at `position`.
    pub fn count(&self, position: Position) -> usize {
        self.selected.values().filter(|p| **p == position).count()
    }

    /// Free slots at `position`.
    pub fn remaining(&self, position: Position) -> usize {
        position.cap() - self.count(position)
    }

    /// Whether exactly [`ROSTER_SIZE`] players are selected.
    pub fn is_complete(&self) -> bool {
        self.len() == ROSTER_SIZE
    }

    /// Selected ids in selection order.
    pub fn selected(&self) -> impl Iterator<Item = u64> + '_ {
        self.selected.keys().copied()
    }

    /// Selected ids at `position` in selection order.
    pub fn selected_by_position(&self, position: Position) -> impl Iterator<Item = u64> + '_ {
        self.selected
            .iter()
            .filter(move |(_, p)| **p == position)
            .map(|(id, _)| *id)
    }

    /// The position tab being viewed.
    pub fn tab(&self) -> Position {
        self.tab
    }

    /// Switch the position tab.
    pub fn select_tab(&mut self, position: Position) {
        self.tab = position;
    }

    /// Clear the selection and return to the GK tab.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.tab = Position::Goalkeeper;
    }

    /// Produce the roster to submit. Fails unless complete.
    pub fn to_submission(&self) -> crate::Result<CompleteRoster> {
        if !self.is_complete() {
            return Err(crate::Error::validation(format!(
                "Please select exactly {ROSTER_SIZE} players ({} selected)",
                self.len()
            )));
        }
        Ok(CompleteRoster {
            player_ids: self.selected().collect(),
        })
    }
}

/// An 11-player roster distributed 1/4/3/3, the only roster accepted for joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteRoster {
    player_ids: Vec<u64>,
}

impl CompleteRoster {
    /// Player ids in selection order.
    pub fn player_ids(&self) -> &[u64] {
        &self.player_ids
    }
}

impl TryFrom<&RosterSelector> for CompleteRoster {
    type Error = crate::Error;

    fn try_from(selector: &RosterSelector) -> Result<Self, Self::Error> {
        selector.to_submission()
    }
}
