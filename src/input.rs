//! Keyboard handling on its own thread.
//!
//! The reader blocks on the next key and only ever talks to the game loop
//! through a [`Steering`] handle and a quit channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info};

use crate::snake::Direction::{self, *};

pub trait KeySource {
    fn next_key(&mut self) -> Result<KeyEvent>;
}

#[derive(Debug, PartialEq, Eq)]
pub struct Quit;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Quit,
    Ignore,
}

impl From<&KeyEvent> for KeyAction {
    fn from(ev: &KeyEvent) -> Self {
        if is_ctrl_c(ev) {
            return KeyAction::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Steer(Up),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Steer(Left),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Steer(Down),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Steer(Right),
            _ => KeyAction::Ignore,
        }
    }
}

struct Heading {
    committed: Direction,
    candidate: Direction,
}

/// The one value shared between the input thread and the game loop.
///
/// The input side proposes, the game loop commits once per tick. A proposal
/// is checked against the committed direction, never against another pending
/// proposal, so a burst of keys between two ticks cannot reverse the snake.
#[derive(Clone)]
pub struct Steering {
    heading: Arc<Mutex<Heading>>,
}

impl Steering {
    pub fn new(initial: Direction) -> Self {
        Steering {
            heading: Arc::new(Mutex::new(Heading { committed: initial, candidate: initial })),
        }
    }

    /// Records `direction` as the next turn if it is perpendicular to the
    /// committed one. Returns whether it was accepted.
    pub fn propose(&self, direction: Direction) -> bool {
        let mut heading = self.lock();
        if direction.is_perpendicular(heading.committed) {
            heading.candidate = direction;
            true
        } else {
            false
        }
    }

    pub fn commit(&self) -> Direction {
        let mut heading = self.lock();
        heading.committed = heading.candidate;
        heading.committed
    }

    pub fn committed(&self) -> Direction {
        self.lock().committed
    }

    fn lock(&self) -> MutexGuard<'_, Heading> {
        // Every write leaves Heading consistent, so a poisoned lock is still usable.
        self.heading.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn spawn<K>(keys: K, steering: Steering, quit: Sender<Quit>) -> Result<JoinHandle<()>>
where
    K: KeySource + Send + 'static,
{
    thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            if let Err(err) = listen(keys, &steering, &quit) {
                error!(error = %err, "input reader stopped");
            }
        })
        .context("Error spawning input thread")
}

pub fn listen<K: KeySource>(mut keys: K, steering: &Steering, quit: &Sender<Quit>) -> Result<()> {
    loop {
        let key = keys.next_key()?;

        match KeyAction::from(&key) {
            KeyAction::Steer(direction) => {
                steering.propose(direction);
            }
            KeyAction::Quit => {
                info!("quit requested");
                // The receiver may already be gone if the game just ended.
                let _ = quit.send(Quit);
                return Ok(());
            }
            KeyAction::Ignore => {}
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::VecDeque;
    use std::sync::mpsc;

    struct Scripted(VecDeque<KeyEvent>);

    impl Scripted {
        fn new(codes: &[KeyEvent]) -> Self {
            Scripted(codes.iter().copied().collect())
        }
    }

    impl KeySource for Scripted {
        fn next_key(&mut self) -> Result<KeyEvent> {
            self.0.pop_front().ok_or_else(|| anyhow!("out of keys"))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    #[test]
    fn maps_arrows_and_wasd() {
        assert_eq!(KeyAction::from(&key(KeyCode::Up)), KeyAction::Steer(Up));
        assert_eq!(KeyAction::from(&key(KeyCode::Char('a'))), KeyAction::Steer(Left));
        assert_eq!(KeyAction::from(&key(KeyCode::Char('S'))), KeyAction::Steer(Down));
        assert_eq!(KeyAction::from(&key(KeyCode::Right)), KeyAction::Steer(Right));
        assert_eq!(KeyAction::from(&key(KeyCode::Char('x'))), KeyAction::Ignore);
        assert_eq!(KeyAction::from(&key(KeyCode::Char('c'))), KeyAction::Ignore);
        assert_eq!(KeyAction::from(&ctrl_c()), KeyAction::Quit);
    }

    #[test]
    fn reversal_is_rejected() {
        let steering = Steering::new(Up);

        assert!(!steering.propose(Down));
        assert_eq!(steering.commit(), Up);

        assert!(steering.propose(Left));
        assert_eq!(steering.commit(), Left);

        let steering = Steering::new(Up);
        assert!(steering.propose(Right));
        assert_eq!(steering.commit(), Right);
    }

    #[test]
    fn same_direction_is_not_a_turn() {
        let steering = Steering::new(Right);
        assert!(!steering.propose(Right));
        assert_eq!(steering.commit(), Right);
    }

    #[test]
    fn burst_between_ticks_cannot_reverse() {
        let steering = Steering::new(Right);

        assert!(steering.propose(Up));
        // Left is perpendicular to the pending Up but opposite the committed Right.
        assert!(!steering.propose(Left));
        assert_eq!(steering.committed(), Right);
        assert_eq!(steering.commit(), Up);
    }

    #[test]
    fn latest_valid_proposal_wins() {
        let steering = Steering::new(Right);
        steering.propose(Up);
        steering.propose(Down);
        assert_eq!(steering.commit(), Down);
    }

    #[test]
    fn listen_steers_then_quits() {
        let steering = Steering::new(Right);
        let (tx, rx) = mpsc::channel();
        let keys = Scripted::new(&[key(KeyCode::Left), key(KeyCode::Char('q')), key(KeyCode::Up), ctrl_c()]);

        listen(keys, &steering, &tx).unwrap();

        assert_eq!(rx.try_recv(), Ok(Quit));
        assert_eq!(steering.commit(), Up);
    }

    #[test]
    fn listen_reports_source_failure() {
        let steering = Steering::new(Right);
        let (tx, rx) = mpsc::channel();

        assert!(listen(Scripted::new(&[key(KeyCode::Down)]), &steering, &tx).is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn spawned_reader_delivers_quit() {
        let steering = Steering::new(Left);
        let (tx, rx) = mpsc::channel();

        let handle = spawn(Scripted::new(&[key(KeyCode::Down), ctrl_c()]), steering.clone(), tx).unwrap();
        handle.join().unwrap();

        assert_eq!(rx.recv(), Ok(Quit));
        assert_eq!(steering.commit(), Down);
    }
}
