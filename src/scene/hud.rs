//! HUD model: per-player angle/speed panels and the winner banner

use crate::sim::{AimReadout, GameState, Player};

/// Everything the DOM overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Left panel (player one), right panel (player two)
    pub readouts: [AimReadout; 2],
    pub winner_visible: bool,
    /// `"Player N"`, empty while nobody has won
    pub winner_label: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            readouts: state.readouts,
            winner_visible: state.winner.is_some(),
            winner_label: state.winner.map(winner_label).unwrap_or_default(),
        }
    }

    pub fn readout(&self, player: Player) -> AimReadout {
        self.readouts[player.index()]
    }
}

/// Banner text for the winner
pub fn winner_label(player: Player) -> String {
    format!("Player {}", player.number())
}
