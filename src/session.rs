//! Room session state machine.
//!
//! One [`Session`] is owned per page load and passed explicitly to the
//! poll/render glue, so nothing lives in module-level globals.

use thiserror::Error;

use crate::protocol::{Outcome, Role, Side, Snapshot};

/// Session lifecycle. `Finished` is terminal; a new page load means a new
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No room bound yet.
    NoRoom,
    /// Room id known, join outstanding.
    Joining,
    /// Joined; the sync loop feeds frames in.
    Active,
    /// The server reported the game finished.
    Finished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("room already bound to {0}")]
    RoomAlreadyBound(String),
}

/// The only mutable client state kept between polls, besides the board
/// snapshot the renderer was last fed.
#[derive(Debug)]
pub struct Session {
    identity: String,
    room_id: Option<String>,
    role: Option<Role>,
    phase: Phase,
    outcome: Option<Outcome>,
    poll_seq: u64,
    applied_seq: u64,
}

impl Session {
    pub fn new(identity: String) -> Self {
        Self {
            identity,
            room_id: None,
            role: None,
            phase: Phase::NoRoom,
            outcome: None,
            poll_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Binds the room id from a create response or the launch URL.
    /// Immutable for the rest of the session once set.
    pub fn bind_room(&mut self, room_id: &str) -> Result<(), SessionError> {
        if let Some(existing) = &self.room_id {
            return Err(SessionError::RoomAlreadyBound(existing.clone()));
        }

        self.room_id = Some(room_id.to_string());
        self.phase = Phase::Joining;
        Ok(())
    }

    /// Records the role assigned by a successful join and activates the
    /// session.
    pub fn joined(&mut self, role: Role) {
        self.role = Some(role);
        if self.phase == Phase::Joining {
            self.phase = Phase::Active;
        }
    }

    /// Sequence number for the next outgoing poll.
    pub fn next_poll_seq(&mut self) -> u64 {
        self.poll_seq += 1;
        self.poll_seq
    }

    /// Applies a validated poll frame. Returns the status line to show,
    /// or `None` when the frame is stale — an older poll completing after
    /// a newer one must not overwrite the newer view.
    pub fn apply(&mut self, seq: u64, snapshot: &Snapshot) -> Option<String> {
        if seq <= self.applied_seq {
            return None;
        }
        self.applied_seq = seq;

        if snapshot.finished && self.phase != Phase::Finished {
            self.phase = Phase::Finished;
            self.outcome = snapshot.outcome;
        }

        Some(self.status_line(snapshot.turn))
    }

    /// True while a click may become a move request: the session is
    /// active and the local role is a seated color. Spectators, unjoined
    /// sessions, and finished games never submit.
    pub fn may_move(&self) -> bool {
        self.phase == Phase::Active && self.role.is_some_and(Role::can_move)
    }

    fn status_line(&self, turn: Side) -> String {
        if self.phase == Phase::Finished {
            return verdict_text(self.outcome.unwrap_or(Outcome::Draw)).to_string();
        }

        let role = self.role.map(Role::as_str).unwrap_or("spectator");
        format!("你是：{role} ｜ 当前回合：{}", turn.as_str())
    }
}

fn verdict_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::BlackWins => "♟ 黑棋胜利！",
        Outcome::WhiteWins => "♟ 白棋胜利！",
        Outcome::Draw => "🤝 平局",
    }
}

/// Room-info markup shown after creating a room.
pub fn room_info_html(room_id: &str, href: &str) -> String {
    format!("房间号：{room_id}<br>分享链接：{href}")
}
