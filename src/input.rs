use std::time::Duration;

use crate::error::Result;
use crate::grid::Direction::{self, *};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Quit,
}

pub trait InputSource {
    /// Everything that arrived since the last call, oldest first. Never blocks.
    fn drain(&mut self) -> Result<Vec<InputEvent>>;
}

/// Key presses from the terminal.
pub struct Keyboard;

impl InputSource for Keyboard {
    fn drain(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while event::poll(Duration::ZERO)? {
            if let Event::Key(ev) = event::read()? {
                events.extend(map_key(&ev));
            }
        }

        Ok(events)
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Turn(Right)),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
