//! Round lifecycle: setup, the pre-round countdown, the fixed-rate tick
//! schedule, and the end-of-round summary.

pub mod message;
pub mod setup;
pub mod summary;

pub use message::{MessageBanner, MessageView};
pub use summary::{Leader, PlayerLine, RoundSummary};

use crate::arena::engine::{tick, ArenaEvent};
use crate::arena::round::{RoundSnapshot, RoundState};
use crate::arena::types::{Board, Direction};
use crate::core::config::GameConfig;
use crate::core::constants::{END_OF_ROUND_MESSAGE, MAX_PLAYERS};
use crate::input::{key_intent, RawKey, ScreenPoint, ScreenSize, SwipeTracker};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No round in progress (menu).
    Idle,
    /// Snakes are placed and drawn; ticking starts at `until`.
    Countdown { until: u64 },
    Playing,
    /// Round over; the summary is available.
    Summary,
}

pub struct SessionController {
    config: GameConfig,
    phase: SessionPhase,
    round: Option<RoundState>,
    summary: Option<RoundSummary>,
    swipes: SwipeTracker,
    banner: MessageBanner,
    tick_interval_ms: u64,
    next_tick_at: u64,
    ticks: u64,
}

impl SessionController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: SessionPhase::Idle,
            round: None,
            summary: None,
            swipes: SwipeTracker::new(),
            banner: MessageBanner::new(),
            tick_interval_ms: 0,
            next_tick_at: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn players(&self) -> usize {
        self.config.players
    }

    /// Change the player count for the next round.
    pub fn set_players(&mut self, players: usize) {
        let max = self.config.player_colors.len().min(MAX_PLAYERS);
        self.config.players = players.clamp(1, max.max(1));
    }

    /// Milliseconds between ticks for the current round.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Ticks run so far this round.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Countdown { .. } | SessionPhase::Playing
        )
    }

    /// Reset everything and set up a new round on `board`. Ticking begins
    /// after the pre-round delay.
    pub fn start_round<R: Rng + ?Sized>(&mut self, board: Board, now_ms: u64, rng: &mut R) {
        let speed = self.config.effective_speed(board);
        self.tick_interval_ms = (1000 / speed.max(1)) as u64;
        self.round = Some(setup::new_round(&self.config, board, rng));
        self.summary = None;
        self.swipes.clear();
        self.banner.clear();
        self.ticks = 0;

        let until = now_ms.saturating_add(self.config.pre_round_delay_ms);
        self.next_tick_at = until;
        self.phase = SessionPhase::Countdown { until };

        info!(
            players = self.config.players,
            width = board.width,
            height = board.height,
            speed,
            starting_length = self.config.starting_length(board),
            "round starting"
        );
    }

    /// Drop the current round and return to the menu.
    pub fn abandon(&mut self) {
        if self.round.is_some() {
            debug!(ticks = self.ticks, "round abandoned");
        }
        self.round = None;
        self.summary = None;
        self.swipes.clear();
        self.banner.clear();
        self.phase = SessionPhase::Idle;
    }

    /// Advance the session to `now_ms`. Runs at most one tick per call; the
    /// next tick is scheduled one interval after this one ran, so ticks
    /// never overlap or burst after a stall.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        board: Board,
        now_ms: u64,
        rng: &mut R,
    ) -> Vec<ArenaEvent> {
        if let SessionPhase::Countdown { until } = self.phase {
            if now_ms < until {
                return Vec::new();
            }
            debug!("countdown finished");
            self.phase = SessionPhase::Playing;
        }
        if self.phase != SessionPhase::Playing || now_ms < self.next_tick_at {
            return Vec::new();
        }
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };

        let events = tick(round, board, now_ms, rng);
        self.ticks += 1;
        self.next_tick_at = now_ms.saturating_add(self.tick_interval_ms);

        for event in &events {
            if let Some(text) = event.message() {
                self.banner.show(text, now_ms);
            }
        }

        if round.is_ended() {
            let summary = RoundSummary::from_round(round);
            info!(
                survivor = ?summary.survivor,
                deaths = summary.death_order.len(),
                ticks = self.ticks,
                "round summary ready"
            );
            self.summary = Some(summary);
            self.swipes.clear();
            self.banner.show(END_OF_ROUND_MESSAGE, now_ms);
            self.phase = SessionPhase::Summary;
        }

        events
    }

    pub fn change_snake_direction(&mut self, slot: usize, direction: Direction) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.round.as_mut() {
            Some(round) => round.change_snake_direction(slot, direction),
            None => false,
        }
    }

    /// Route a key press to its player. Returns true if a snake turned.
    pub fn handle_key(&mut self, key: RawKey) -> bool {
        match key_intent(key) {
            Some(intent) => self.change_snake_direction(intent.slot, intent.direction),
            None => false,
        }
    }

    pub fn touch_start(&mut self, id: u64, point: ScreenPoint) {
        if self.accepts_input() {
            self.swipes.touch_start(id, point);
        }
    }

    /// Finish a swipe. Returns true if a snake turned.
    pub fn touch_end(&mut self, id: u64, point: ScreenPoint, screen: ScreenSize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let players = self.round.as_ref().map_or(0, |r| r.snakes.len());
        match self.swipes.touch_end(id, point, screen, players) {
            Some(intent) => self.change_snake_direction(intent.slot, intent.direction),
            None => false,
        }
    }

    pub fn message(&self, now_ms: u64) -> Option<MessageView<'_>> {
        self.banner.view(now_ms)
    }

    pub fn snapshot(&self, now_ms: u64, board: Board) -> Option<RoundSnapshot> {
        self.round.as_ref().map(|round| round.snapshot(now_ms, board))
    }

    /// Milliseconds left in the pre-round countdown, if one is running.
    pub fn countdown_remaining(&self, now_ms: u64) -> Option<u64> {
        match self.phase {
            SessionPhase::Countdown { until } => Some(until.saturating_sub(now_ms)),
            _ => None,
        }
    }
}
