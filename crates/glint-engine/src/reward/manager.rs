use crate::core::rng::Rng;

/// Fixed pool of completion messages. One is chosen at random when the last
/// marker is found and frozen for the rest of the session.
pub const REWARD_MESSAGES: [&str; 6] = [
    "You found every hidden secret. Incredible!",
    "All secrets discovered — you have quite the eye.",
    "Every last secret, uncovered. Well done!",
    "Nothing stays hidden from you. All secrets found!",
    "The full set! You noticed everything.",
    "Secret hunter extraordinaire: a perfect score.",
];

/// How far progress may climb before the passive "secrets await" indicator
/// stops showing.
const INDICATOR_THRESHOLD: u32 = 2;

/// Lifecycle of the completion notice within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardPhase {
    /// Not every marker found yet.
    Incomplete,
    /// Completion detected; notice not yet rendered. Message is frozen.
    Pending,
    /// Notice rendered this session.
    Shown,
    /// Dismissed by the visitor. Sticky until the page reloads.
    Dismissed,
}

/// Watches completion and owns the one-time-per-session reveal state.
///
/// All state here is in-memory only. A full reload rebuilds the manager, so
/// the notice re-arms whenever the persisted completion flag is still set;
/// that is intentional.
pub struct RewardManager {
    phase: RewardPhase,
    message: Option<&'static str>,
    rng: Rng,
    indicator_dismissed: bool,
}

impl RewardManager {
    /// `seed` makes message selection reproducible in tests.
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RewardPhase::Incomplete,
            message: None,
            rng: Rng::new(seed),
            indicator_dismissed: false,
        }
    }

    /// Feed the store's completion flag. The `Incomplete -> Pending`
    /// transition selects the message; every later call is a no-op, so
    /// duplicate `mark_found` calls can never re-roll it.
    pub fn observe_completion(&mut self, completed: bool) {
        if completed && self.phase == RewardPhase::Incomplete {
            let index = self.rng.next_index(REWARD_MESSAGES.len());
            self.message = Some(REWARD_MESSAGES[index]);
            self.phase = RewardPhase::Pending;
        }
    }

    /// The notice is about to render. `Pending -> Shown`, once per session.
    /// Returns true if this call performed the transition.
    pub fn mark_shown(&mut self) -> bool {
        if self.phase == RewardPhase::Pending {
            self.phase = RewardPhase::Shown;
            true
        } else {
            false
        }
    }

    /// The visitor closed the notice. Sticky for the session.
    pub fn dismiss(&mut self) {
        if matches!(self.phase, RewardPhase::Pending | RewardPhase::Shown) {
            self.phase = RewardPhase::Dismissed;
        }
    }

    pub fn phase(&self) -> RewardPhase {
        self.phase
    }

    /// The frozen message, available from `Pending` onward. Re-opening the
    /// notice shows the same message; there is no re-roll.
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Whether the passive "N secrets await" indicator should render:
    /// incomplete, early progress, and not dismissed this session.
    pub fn indicator_visible(&self, progress: u32) -> bool {
        self.phase == RewardPhase::Incomplete
            && progress < INDICATOR_THRESHOLD
            && !self.indicator_dismissed
    }

    /// Dismiss the passive indicator for the rest of the session.
    pub fn dismiss_indicator(&mut self) {
        self.indicator_dismissed = true;
    }
}
