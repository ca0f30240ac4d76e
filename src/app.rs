//! Ties a session to its collaborators: score store, sound, vendor SDK queue.

use crate::audio::SoundSink;
use crate::core::constants::HIGH_SCORE_KEY;
use crate::core::rules::DeathSound;
use crate::core::session::{format_score, Session, SessionEvent, SessionState};
use crate::input::AppInput;
use crate::sdk::{forward_session_events, ops, CallQueue, LogBackend};
use crate::utils::persistence::{ScoreStore, StoreError};
use crate::utils::settings::Settings;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

pub struct App<S: ScoreStore, A: SoundSink> {
    pub session: Session,
    pub settings: Settings,
    pub sdk: CallQueue<LogBackend>,
    pub should_quit: bool,
    store: S,
    sound: A,
    rng: StdRng,
}

impl<S: ScoreStore, A: SoundSink> App<S, A> {
    pub fn new(settings: Settings, store: S, sound: A) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Session::new(settings.rules(), store.high_score());

        let mut sdk = CallQueue::new(LogBackend::default());
        sdk.enqueue_detached(ops::INIT, vec![json!({}), json!({})]);
        sdk.enqueue_detached("gameLoadingFinished", vec![]);
        sdk.mark_ready();

        Self {
            session,
            settings,
            sdk,
            should_quit: false,
            store,
            sound,
            rng,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    /// The cue played on game over under the current rules.
    pub fn death_sound(&self) -> DeathSound {
        if self.session.rules.death_sound_enabled {
            self.settings.death_sound
        } else {
            DeathSound::Hit
        }
    }

    /// Sound can only be switched from the menus, not mid-flight.
    pub fn can_toggle_sound(&self) -> bool {
        self.session.rules.death_sound_enabled
            && matches!(
                self.session.state,
                SessionState::NotStarted | SessionState::Over
            )
    }

    pub fn handle_input(&mut self, input: AppInput) {
        match input {
            AppInput::Game(game_input) => self.session.handle_input(game_input),
            AppInput::ToggleSound => {
                if self.can_toggle_sound() {
                    self.settings.death_sound = self.settings.death_sound.toggled();
                }
            }
            AppInput::Quit => self.should_quit = true,
            AppInput::Other => {}
        }
        self.process_events();
    }

    /// Advance the game by `dt_ms` of wall time. Returns true if anything moved.
    pub fn tick(&mut self, dt_ms: u64) -> bool {
        let changed = self.session.tick(dt_ms, &mut self.rng);
        self.process_events();
        changed
    }

    /// Forget the stored best score.
    pub fn reset_high_score(&mut self) -> Result<(), StoreError> {
        self.store.remove(HIGH_SCORE_KEY)?;
        self.session.high_score = 0.0;
        Ok(())
    }

    fn process_events(&mut self) {
        let events = self.session.drain_events();
        if events.is_empty() {
            return;
        }

        let death_sound = self.death_sound();
        for event in &events {
            match event {
                SessionEvent::GameOver { .. } => self.sound.play(death_sound),
                SessionEvent::NewHighScore { score, previous } => {
                    log::info!(
                        "new high score {} (was {})",
                        format_score(*score),
                        format_score(*previous)
                    );
                    if let Err(e) = self.store.set_high_score(*score) {
                        log::warn!("could not save high score: {}", e);
                    }
                }
                _ => {}
            }
        }

        forward_session_events(&mut self.sdk, &events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::core::rules::Variant;
    use crate::core::session::GameInput;
    use crate::utils::persistence::MemoryStore;

    fn app(variant: Variant) -> App<MemoryStore, RecordingSink> {
        let settings = Settings {
            variant,
            seed: Some(1),
            ..Settings::default()
        };
        App::new(settings, MemoryStore::default(), RecordingSink::default())
    }

    #[test]
    fn test_sdk_initialised_on_startup() {
        let app = app(Variant::Endless);
        assert_eq!(app.sdk.backend().history, vec!["init", "gameLoadingFinished"]);
    }

    #[test]
    fn test_sound_toggle_only_on_menus() {
        let mut app = app(Variant::Endless);
        app.handle_input(AppInput::ToggleSound);
        assert_eq!(app.settings.death_sound, DeathSound::Risky);

        app.handle_input(AppInput::Game(GameInput::Jump));
        app.handle_input(AppInput::ToggleSound);
        assert_eq!(app.settings.death_sound, DeathSound::Risky);
    }

    #[test]
    fn test_classic_has_no_sound_toggle() {
        let mut app = app(Variant::Classic);
        app.handle_input(AppInput::ToggleSound);
        assert_eq!(app.settings.death_sound, DeathSound::Hit);
    }

    #[test]
    fn test_crash_plays_selected_sound_and_saves_record() {
        let mut app = app(Variant::Endless);
        app.handle_input(AppInput::ToggleSound);
        app.handle_input(AppInput::Game(GameInput::Jump));
        app.session.score = 2.5;
        app.session.body.y = 700.0;
        app.tick(16);

        assert_eq!(app.session.state, SessionState::Over);
        assert_eq!(app.sound().played, vec![DeathSound::Risky]);
        assert!((app.store().high_score() - 2.5).abs() < f64::EPSILON);
        assert!(app
            .sdk
            .backend()
            .history
            .contains(&"sendHighscore".to_string()));
    }

    #[test]
    fn test_quit() {
        let mut app = app(Variant::Classic);
        app.handle_input(AppInput::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_reset_high_score() {
        let mut app = app(Variant::Classic);
        app.session.high_score = 9.0;
        app.reset_high_score().unwrap();
        assert!(app.session.high_score.abs() < f64::EPSILON);
        assert!(app.store().get(HIGH_SCORE_KEY).is_none());
    }
}
