use sandbox_kernel::WorldError;

use crate::config::GameConfig;
use crate::session::Session;

/// Longest accepted character name, in chars.
pub const MAX_NAME_LEN: usize = 24;

/// Top-level mode of the game. Menus draw themselves elsewhere; this only
/// tracks which one is active and owns the session while one exists.
pub enum Screen {
    MainMenu,
    CharacterCreation { name: String },
    Playing(Box<Session>),
    Paused(Box<Session>),
    Quit,
}

/// Inputs that move between screens.
pub enum ScreenEvent {
    StartNewGame,
    EditName(String),
    ConfirmCharacter,
    /// A session restored by the caller from a save slot.
    LoadGame(Box<Session>),
    Pause,
    Resume,
    ExitToMenu,
    Quit,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu => "main_menu",
            Screen::CharacterCreation { .. } => "character_creation",
            Screen::Playing(_) => "playing",
            Screen::Paused(_) => "paused",
            Screen::Quit => "quit",
        }
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Screen::Playing(s) | Screen::Paused(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Mutable session access. Only a playing screen accepts frames.
    pub fn playing_mut(&mut self) -> Option<&mut Session> {
        match self {
            Screen::Playing(s) => Some(s.as_mut()),
            _ => None,
        }
    }

    /// Consume the current screen and return the next one. Events that do
    /// not apply to the current screen leave it unchanged. Fails only when
    /// confirming a character cannot build its world.
    pub fn handle(self, event: ScreenEvent, config: &GameConfig) -> Result<Screen, WorldError> {
        let from = self.name();
        let next = match (self, event) {
            (_, ScreenEvent::Quit) => Screen::Quit,
            (Screen::MainMenu, ScreenEvent::StartNewGame) => Screen::CharacterCreation {
                name: String::new(),
            },
            (Screen::MainMenu, ScreenEvent::LoadGame(session)) => Screen::Playing(session),
            (Screen::CharacterCreation { .. }, ScreenEvent::EditName(name)) => {
                Screen::CharacterCreation {
                    name: name.chars().take(MAX_NAME_LEN).collect(),
                }
            }
            (Screen::CharacterCreation { name }, ScreenEvent::ConfirmCharacter) => {
                if name.trim().is_empty() {
                    Screen::CharacterCreation { name }
                } else {
                    let session = Session::new(config, name.trim())?;
                    tracing::info!(player = session.player_name(), "new game started");
                    Screen::Playing(Box::new(session))
                }
            }
            (Screen::CharacterCreation { .. }, ScreenEvent::ExitToMenu) => Screen::MainMenu,
            (Screen::Playing(session), ScreenEvent::Pause) => Screen::Paused(session),
            (Screen::Paused(session), ScreenEvent::Resume) => Screen::Playing(session),
            (Screen::Paused(_), ScreenEvent::ExitToMenu) => Screen::MainMenu,
            (screen, _) => screen,
        };
        if next.name() != from {
            tracing::debug!(from, to = next.name(), "screen changed");
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_kernel::WorldConfig;
    use sandbox_input::Action;

    fn config() -> GameConfig {
        GameConfig {
            world: WorldConfig {
                cols: 60,
                rows: 30,
                tile_size: 32,
                seed: 3,
            },
            ..GameConfig::default()
        }
    }

    fn step(screen: Screen, event: ScreenEvent) -> Screen {
        screen.handle(event, &config()).unwrap()
    }

    #[test]
    fn new_game_flow() {
        let screen = step(Screen::MainMenu, ScreenEvent::StartNewGame);
        assert_eq!(screen.name(), "character_creation");
        let screen = step(screen, ScreenEvent::EditName("  Ada ".into()));
        let screen = step(screen, ScreenEvent::ConfirmCharacter);
        assert_eq!(screen.name(), "playing");
        assert_eq!(screen.session().unwrap().player_name(), "Ada");
    }

    #[test]
    fn blank_name_cannot_be_confirmed() {
        let screen = step(Screen::MainMenu, ScreenEvent::StartNewGame);
        let screen = step(screen, ScreenEvent::EditName("   ".into()));
        let screen = step(screen, ScreenEvent::ConfirmCharacter);
        assert_eq!(screen.name(), "character_creation");
    }

    #[test]
    fn long_names_are_truncated() {
        let screen = step(Screen::MainMenu, ScreenEvent::StartNewGame);
        let screen = step(screen, ScreenEvent::EditName("x".repeat(100)));
        match screen {
            Screen::CharacterCreation { name } => assert_eq!(name.len(), MAX_NAME_LEN),
            _ => panic!("expected character creation"),
        }
    }

    #[test]
    fn pause_keeps_the_session() {
        let session = Session::new(&config(), "p").unwrap();
        let hash = session.world().state_hash();
        let mut screen = step(Screen::MainMenu, ScreenEvent::LoadGame(Box::new(session)));
        screen.playing_mut().unwrap().frame(&[Action::MoveRight]);
        let position = screen.session().unwrap().player().position();

        let mut screen = step(screen, ScreenEvent::Pause);
        assert_eq!(screen.name(), "paused");
        assert!(screen.playing_mut().is_none());

        let screen = step(screen, ScreenEvent::Resume);
        let session = screen.session().unwrap();
        assert_eq!(session.player().position(), position);
        assert_eq!(session.world().state_hash(), hash);
    }

    #[test]
    fn inapplicable_events_are_ignored() {
        let screen = step(Screen::MainMenu, ScreenEvent::Resume);
        assert_eq!(screen.name(), "main_menu");
        let screen = step(screen, ScreenEvent::ConfirmCharacter);
        assert_eq!(screen.name(), "main_menu");
    }

    #[test]
    fn exit_and_quit() {
        let screen = step(Screen::MainMenu, ScreenEvent::StartNewGame);
        let screen = step(screen, ScreenEvent::ExitToMenu);
        assert_eq!(screen.name(), "main_menu");

        let session = Session::new(&config(), "p").unwrap();
        let screen = step(Screen::Paused(Box::new(session)), ScreenEvent::ExitToMenu);
        assert_eq!(screen.name(), "main_menu");
        assert_eq!(step(screen, ScreenEvent::Quit).name(), "quit");
    }

    #[test]
    fn world_errors_surface_on_confirm() {
        let mut bad = config();
        bad.world.cols = 2;
        let screen = Screen::CharacterCreation {
            name: "Ada".into(),
        };
        assert!(matches!(
            screen.handle(ScreenEvent::ConfirmCharacter, &bad),
            Err(WorldError::DegenerateSize { .. })
        ));
    }
}
