use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What every bound like button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum UiState {
    Unknown,
    Loading,
    Liked,
    NotLiked,
}

/// Per-session position in the like flow.
///
/// `Liked` is terminal: once reached, nothing moves the session out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikePhase {
    Init,
    Loading,
    NotLiked,
    Authenticating,
    CheckingDuplicate,
    Writing,
    Liked,
}

impl LikePhase {
    pub fn ui_state(self) -> UiState {
        match self {
            Self::Init => UiState::Unknown,
            Self::Loading | Self::Authenticating | Self::CheckingDuplicate | Self::Writing => {
                UiState::Loading
            }
            Self::NotLiked => UiState::NotLiked,
            Self::Liked => UiState::Liked,
        }
    }

    /// A call to an external system is outstanding; clicks are ignored.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Authenticating | Self::CheckingDuplicate | Self::Writing
        )
    }

    pub fn can_transition_to(self, next: LikePhase) -> bool {
        use LikePhase::*;
        matches!(
            (self, next),
            (Init, Loading)
                | (Loading, Liked)
                | (Loading, NotLiked)
                | (NotLiked, Authenticating)
                | (Authenticating, CheckingDuplicate)
                | (Authenticating, NotLiked)
                | (CheckingDuplicate, Liked)
                | (CheckingDuplicate, Writing)
                | (CheckingDuplicate, NotLiked)
                | (Writing, Liked)
                | (Writing, NotLiked)
        )
    }
}
