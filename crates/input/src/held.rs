use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Tracks held left/right keys and turns press/release edges into move
/// actions. The most recently pressed direction wins; releasing it falls
/// back to the other key if still held, else stops.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    left: bool,
    right: bool,
    last: Option<Direction>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Direction) -> Action {
        match dir {
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
        self.last = Some(dir);
        self.current()
    }

    pub fn release(&mut self, dir: Direction) -> Action {
        match dir {
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
        if self.last == Some(dir) {
            self.last = match (self.left, self.right) {
                (true, _) => Some(Direction::Left),
                (_, true) => Some(Direction::Right),
                _ => None,
            };
        }
        self.current()
    }

    /// Move action for the keys currently held.
    pub fn current(&self) -> Action {
        match self.last {
            Some(Direction::Left) => Action::MoveLeft,
            Some(Direction::Right) => Action::MoveRight,
            None => Action::Stop,
        }
    }
}
