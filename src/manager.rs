//! Game manager: owns at most one active [`Session`] and routes the host's
//! open/close/submit/advance/restart requests to it. Pure logic — the DOM
//! layer owns the modal surface and the timers and holds the manager in its
//! composition root (a thread-local cell on wasm).

use crate::games::{GameKind, Lcg, Session, Submit, View};

#[derive(Debug)]
pub struct GameManager {
    active: Option<Session>,
    rng: Lcg,
}

impl GameManager {
    pub fn new(seed: u64) -> Self {
        Self {
            active: None,
            rng: Lcg::new(seed),
        }
    }

    pub fn active_kind(&self) -> Option<GameKind> {
        self.active.as_ref().map(Session::kind)
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Open a game. Returns the first view of a freshly started session, or
    /// `None` when that kind is already active — the caller then only has to
    /// re-show the surface, the session keeps its state (and any pending
    /// timer stays valid). A different kind replaces the old session; the
    /// caller must cancel that session's pending timer first.
    pub fn open(&mut self, kind: GameKind) -> Option<View> {
        if self.active_kind() == Some(kind) {
            return None;
        }
        let mut session = Session::new(kind);
        let view = session.start(&mut self.rng);
        self.active = Some(session);
        Some(view)
    }

    /// Discard the active session. No-op when idle.
    pub fn close(&mut self) {
        self.active = None;
    }

    /// Route an answer/pick to the active session. `None` when idle or when
    /// the session is not accepting input (double-submit window, ended game).
    pub fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        self.active.as_mut()?.submit(choice, now_ms)
    }

    /// A scheduled delay elapsed: step the active session. `None` when the
    /// session was discarded or nothing is pending — a canceled or stale
    /// timer firing is harmless.
    pub fn advance(&mut self) -> Option<View> {
        let session = self.active.as_mut()?;
        session.advance(&mut self.rng)
    }

    /// The "play again" / reset control: restart the active session from
    /// scratch.
    pub fn restart(&mut self) -> Option<View> {
        let session = self.active.as_mut()?;
        Some(session.start(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_replaces_a_session_of_a_different_kind() {
        let mut m = GameManager::new(1);
        assert!(m.open(GameKind::Count).is_some());
        assert_eq!(m.active_kind(), Some(GameKind::Count));
        assert!(m.open(GameKind::Math).is_some());
        assert_eq!(m.active_kind(), Some(GameKind::Math));
    }

    #[test]
    fn reopening_the_same_kind_keeps_session_state() {
        let mut m = GameManager::new(2);
        m.open(GameKind::Count).unwrap();
        m.submit(0, 0.0).unwrap();
        let answered = m.session().unwrap().state().unwrap().questions_answered();
        assert_eq!(answered, 1);
        assert!(m.open(GameKind::Count).is_none(), "same kind: no restart");
        let still = m.session().unwrap().state().unwrap().questions_answered();
        assert_eq!(still, answered);
    }

    #[test]
    fn close_then_everything_is_a_no_op() {
        let mut m = GameManager::new(3);
        m.open(GameKind::Solar).unwrap();
        m.close();
        assert!(m.active_kind().is_none());
        assert!(m.submit(0, 0.0).is_none());
        assert!(m.advance().is_none());
        assert!(m.restart().is_none());
        m.close(); // idempotent
    }

    #[test]
    fn stale_advance_after_submit_and_close_is_harmless() {
        let mut m = GameManager::new(4);
        m.open(GameKind::Blocks).unwrap();
        m.submit(0, 0.0).unwrap();
        m.close();
        // The DOM layer cancels timers on close; even if one slipped through,
        // the fire must not act on a discarded session.
        assert!(m.advance().is_none());
    }

    #[test]
    fn restart_resets_the_score() {
        let mut m = GameManager::new(5);
        m.open(GameKind::Math).unwrap();
        // Play one question through, then restart.
        m.submit(0, 0.0).unwrap();
        m.advance().unwrap();
        m.restart().unwrap();
        let st = m.session().unwrap().state().unwrap();
        assert_eq!(st.score(), 0);
        assert_eq!(st.questions_answered(), 0);
    }
}
