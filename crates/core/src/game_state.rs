//! Game state module - the reducer
//!
//! This module ties together all core components: board, pieces, bag, and scoring.
//! [`GameState::apply_action`] is the only way state changes. Every action is
//! either applied completely or rejected without touching anything; there is no
//! error channel, only legal transitions, silent no-ops, and the terminal
//! game-over state that only `Restart` leaves.

use log::{debug, info};

use crate::board::Board;
use crate::pieces::{hard_drop_target, try_rotate, Tetromino};
use crate::rng::PieceBag;
use crate::scoring::{calculate_level, drop_score, drop_speed_ms, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, PieceKind, GAME_OVER_ROWS, NEXT_QUEUE_LEN};

/// Coarse lifecycle state derived from the paused/game-over flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    next_queue: [PieceKind; NEXT_QUEUE_LEN],
    bag: PieceBag,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Last lock event (consumed by the host).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    can_hold: bool,
}

impl GameState {
    /// Create a new game with the given bag seed and spawn the first piece.
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Start a game on a prepared board.
    ///
    /// If the first piece cannot spawn on `board` the game is over from the start.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut bag = PieceBag::new(seed);
        let next_queue = std::array::from_fn(|_| bag.draw());

        let mut state = Self {
            board,
            active: None,
            hold: None,
            next_queue,
            bag,
            episode_id: 0,
            last_event: None,
            score: 0,
            level: calculate_level(0),
            lines: 0,
            paused: false,
            game_over: false,
            can_hold: true,
        };
        state.spawn_next();
        info!("game started (seed {seed})");
        state
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_QUEUE_LEN] {
        &self.next_queue
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Last lock event, if any, without consuming it.
    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Tick interval the host should use at the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        drop_speed_ms(self.level)
    }

    /// Row the active piece would land on if hard-dropped.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| hard_drop_target(&self.board, &piece))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next_queue;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.drop_interval_ms = self.drop_interval_ms();
        out.seed = self.bag.seed();
        out.episode_id = self.episode_id;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Pure form of [`GameState::apply_action`]: returns the next state and
    /// leaves `self` untouched.
    pub fn reduce(&self, action: GameAction) -> Self {
        let mut next = self.clone();
        next.apply_action(action);
        next
    }

    /// Apply a game action
    ///
    /// Returns `true` if the state changed. While game over only `Restart`
    /// does anything; while paused only `Resume` and `Restart` do.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.game_over => false,
            GameAction::Resume => {
                let was_paused = self.paused;
                self.paused = false;
                was_paused
            }
            _ if self.paused => false,
            GameAction::Pause => {
                self.paused = true;
                true
            }
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.score = self.score.saturating_add(drop_score(1, false));
                }
                moved
            }
            GameAction::MoveDown | GameAction::Tick => self.step_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Hold => self.hold(),
        }
    }

    /// Move the active piece by (dx, dy) if the target does not collide.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.board.collides(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Gravity step: fall one row, or lock where the piece is.
    fn step_down(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece(0);
        }
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let target_y = hard_drop_target(&self.board, &active);
        let distance = (target_y - active.y) as u32;
        self.active = Some(Tetromino {
            y: target_y,
            ..active
        });

        let points = drop_score(distance, true);
        self.score = self.score.saturating_add(points);
        self.lock_piece(points);
        true
    }

    /// Swap active piece with hold piece
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let incoming = match self.hold {
            Some(held) => held,
            None => self.take_next(),
        };
        self.hold = Some(active.kind);
        self.can_hold = false;

        let piece = Tetromino::spawn(incoming);
        if self.board.collides(&piece) {
            self.end_game();
        } else {
            self.active = Some(piece);
        }
        true
    }

    /// Lock the active piece: place it, clear lines, spawn the next piece and
    /// check for game over.
    fn lock_piece(&mut self, drop_points: u32) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.place(&active);

        let cleared = self.board.clear_full_rows().len();
        let bonus = line_clear_score(cleared);
        if cleared > 0 {
            self.lines += cleared as u32;
            self.score = self.score.saturating_add(bonus);

            let level = calculate_level(self.lines).max(self.level);
            if level != self.level {
                debug!("level {} -> {}", self.level, level);
            }
            self.level = level;
            debug!("cleared {cleared} line(s), +{bonus}, total {}", self.lines);
        }

        let spawned = self.spawn_next();
        if !spawned || self.board.top_rows_occupied(GAME_OVER_ROWS) {
            self.end_game();
        }
        self.can_hold = true;

        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            line_clear_score: bonus,
            drop_score: drop_points,
            game_over: self.game_over,
        });
    }

    /// Pop the front of the preview queue and top it up from the bag.
    fn take_next(&mut self) -> PieceKind {
        let kind = self.next_queue[0];
        self.next_queue.rotate_left(1);
        self.next_queue[NEXT_QUEUE_LEN - 1] = self.bag.draw();
        kind
    }

    /// Spawn the next queued piece. Returns false (and ends the game) if it collides.
    fn spawn_next(&mut self) -> bool {
        let piece = Tetromino::spawn(self.take_next());
        if self.board.collides(&piece) {
            self.end_game();
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn end_game(&mut self) {
        if !self.game_over {
            info!(
                "game over: score {}, lines {}, level {}",
                self.score, self.lines, self.level
            );
        }
        self.game_over = true;
        self.active = None;
    }

    fn restart(&mut self) {
        let seed = self.bag.next_seed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(seed);
        self.episode_id = next_episode;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH};

    /// State with a chosen active piece on a prepared board.
    fn state_with(board: Board, piece: Tetromino) -> GameState {
        let mut state = GameState::with_board(12345, board);
        state.active = Some(piece);
        state.game_over = false;
        state
    }

    fn fill_row_except(board: &mut Board, y: i8, gap: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gap.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert!(state.can_hold);
        assert!(state.active.is_some());
        assert!(state.hold.is_none());
        assert_eq!(state.next_queue.len(), NEXT_QUEUE_LEN);
        assert_eq!(state.drop_interval_ms(), 1000);
    }

    #[test]
    fn test_first_pieces_come_from_one_bag() {
        let state = GameState::new(777);
        let mut seen = vec![state.active.unwrap().kind];
        seen.extend_from_slice(&state.next_queue);
        seen.sort_by_key(|k| k.code());
        seen.dedup();
        assert_eq!(seen.len(), 1 + NEXT_QUEUE_LEN);
    }

    #[test]
    fn test_move_rejected_at_wall_leaves_state() {
        let piece = Tetromino::spawn(PieceKind::O);
        let mut state = state_with(Board::new(), Tetromino { x: 0, ..piece });
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().x, 0);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.unwrap().x, 1);
    }

    #[test]
    fn test_soft_drop_scores_and_never_locks() {
        let piece = Tetromino::spawn(PieceKind::O);
        let mut state = state_with(Board::new(), Tetromino { y: 17, ..piece });

        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score, 1);
        assert_eq!(state.active.unwrap().y, 18);

        // On the floor: rejected, no points, still active.
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score, 1);
        assert_eq!(state.active.unwrap().y, 18);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_tick_locks_when_grounded() {
        let piece = Tetromino::spawn(PieceKind::O);
        let mut state = state_with(Board::new(), Tetromino { y: 18, ..piece });

        assert!(state.apply_action(GameAction::Tick));
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.score, 0);

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_move_down_is_tick() {
        let piece = Tetromino::spawn(PieceKind::T);
        let state = state_with(Board::new(), piece);
        let a = state.reduce(GameAction::Tick);
        let b = state.reduce(GameAction::MoveDown);
        assert_eq!(a.active, b.active);
        assert_eq!(a.active.unwrap().y, 1);
    }

    #[test]
    fn test_hard_drop_awards_two_per_cell_and_locks() {
        let piece = Tetromino::spawn(PieceKind::O);
        let mut state = state_with(Board::new(), piece);

        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.score, 2 * 18);
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.last_event.unwrap().drop_score, 36);
    }

    #[test]
    fn test_single_line_clear() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[4, 5]);
        board.set(0, 18, Some(PieceKind::J));
        let piece = Tetromino::spawn(PieceKind::O);
        let mut state = state_with(board, piece);

        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 2 * 18 + 100);
        // The O's top half and the J drop to the floor.
        assert_eq!(state.board.get(0, 19), Some(Some(PieceKind::J)));
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.filled_count(), 3);
        assert_eq!(state.last_event.unwrap().line_clear_score, 100);
    }

    #[test]
    fn test_tetris_bonus() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row_except(&mut board, y, &[0]);
        }
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::West,
            x: -1,
            y: 0,
        };
        let mut state = state_with(board, piece);
        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.lines, 4);
        assert_eq!(state.score, 2 * 16 + 800);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_level_advances_every_ten_lines() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[4, 5]);
        let mut state = state_with(board, Tetromino::spawn(PieceKind::O));
        state.lines = 9;
        state.level = calculate_level(9);

        state.apply_action(GameAction::HardDrop);
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms(), 800);
    }

    #[test]
    fn test_rotate_applies_kick() {
        let i = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::West,
            x: 8,
            y: 5,
        };
        let mut state = state_with(Board::new(), i);
        assert!(state.apply_action(GameAction::Rotate));
        let active = state.active.unwrap();
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(active.x, 6);
    }

    #[test]
    fn test_hold_with_empty_slot_takes_from_queue() {
        let mut state = GameState::new(12345);
        let initial = state.active.unwrap().kind;
        let queued = state.next_queue;

        assert!(state.apply_action(GameAction::Hold));
        assert_eq!(state.hold, Some(initial));
        assert_eq!(state.active.unwrap().kind, queued[0]);
        assert_eq!(state.active.unwrap(), Tetromino::spawn(queued[0]));
        assert_eq!(&state.next_queue[..NEXT_QUEUE_LEN - 1], &queued[1..]);
        assert!(!state.can_hold);
    }

    #[test]
    fn test_hold_blocked_until_lock() {
        let mut state = GameState::new(12345);
        let initial = state.active.unwrap().kind;
        assert!(state.apply_action(GameAction::Hold));

        let before = state.clone();
        assert!(!state.apply_action(GameAction::Hold));
        assert_eq!(state.active, before.active);
        assert_eq!(state.hold, before.hold);
        assert_eq!(state.next_queue, before.next_queue);

        let second = state.active.unwrap().kind;
        state.apply_action(GameAction::HardDrop);
        assert!(state.can_hold);

        // Swap brings the first piece back; the locked piece is not held.
        let current = state.active.unwrap().kind;
        assert!(state.apply_action(GameAction::Hold));
        assert_eq!(state.active.unwrap().kind, initial);
        assert_eq!(state.hold, Some(current));
        assert_ne!(state.hold, Some(second));
    }

    #[test]
    fn test_hold_into_blocked_spawn_ends_game() {
        let mut board = Board::new();
        // Block the spawn area but leave the current piece room lower down.
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 1, Some(PieceKind::S));
        }
        let piece = Tetromino::spawn(PieceKind::O).shifted(0, 10);
        let mut state = state_with(board, piece);

        assert!(state.apply_action(GameAction::Hold));
        assert!(state.game_over);
        assert!(state.active.is_none());
        assert_eq!(state.hold, Some(PieceKind::O));
    }

    #[test]
    fn test_pause_blocks_everything_but_resume_and_restart() {
        let mut state = GameState::new(12345);
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase(), GamePhase::Paused);

        let before = state.snapshot();
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Rotate,
            GameAction::Hold,
            GameAction::Tick,
            GameAction::Pause,
        ] {
            assert!(!state.apply_action(action), "{action:?}");
        }
        assert_eq!(state.snapshot(), before);

        assert!(state.apply_action(GameAction::Resume));
        assert!(!state.apply_action(GameAction::Resume));
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn test_game_over_when_spawn_collides() {
        let mut board = Board::new();
        // Leave a three-wide lane on the left; the O cannot complete a row.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 3..BOARD_WIDTH as i8 {
                board.set(x, y, Some(PieceKind::L));
            }
        }
        let piece = Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 5,
        };
        let mut state = state_with(board, piece);

        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.game_over);
        assert!(state.active.is_none());
        assert!(state.last_event.unwrap().game_over);
        assert_eq!(state.phase(), GamePhase::GameOver);

        let frozen = state.snapshot();
        for action in GameAction::ALL {
            if action != GameAction::Restart {
                assert!(!state.apply_action(action));
            }
        }
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_game_over_when_lock_reaches_top_rows() {
        let mut board = Board::new();
        // Stack reaching row 2 in the left lane; the O lands on rows 0-1.
        for y in 2..BOARD_HEIGHT as i8 {
            board.set(0, y, Some(PieceKind::T));
            board.set(1, y, Some(PieceKind::T));
        }
        let piece = Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        };
        let mut state = state_with(board, piece);

        state.apply_action(GameAction::Tick);
        assert!(state.game_over);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_restart_resets_and_increments_episode() {
        let mut state = GameState::new(12345);
        state.apply_action(GameAction::HardDrop);
        state.apply_action(GameAction::Pause);
        assert!(state.score > 0);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert!(!state.paused);
        assert!(!state.game_over);
        assert!(state.hold.is_none());
        assert!(state.can_hold);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_reduce_leaves_original_untouched() {
        let state = GameState::new(12345);
        let next = state.reduce(GameAction::HardDrop);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(next.board.filled_count(), 4);
    }

    #[test]
    fn test_ghost_y_matches_hard_drop_landing() {
        let state = GameState::new(5);
        let ghost = state.ghost_y().unwrap();
        let mut dropped = state.clone();
        let active = state.active.unwrap();
        dropped.apply_action(GameAction::HardDrop);
        assert_eq!(dropped.score, 2 * (ghost - active.y) as u32);
    }
}
