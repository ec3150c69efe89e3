//! The playthrough state machine.
//!
//! ```text
//! START -> BRIEFING -> GAME -> END
//!             |  ^      |  ^    |
//!             v  |      v  |    +-> restart -> BRIEFING | GAME
//!            DOCTRINE <-+--+
//! ```
//!
//! Every change goes through a named transition. A transition that is not
//! allowed from the current screen fails with `InvalidTransition` and leaves
//! the state untouched.

use nf_core::{Content, RandomSource, ResponseKey, Scenario, SeededRandom};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::journal::{self, RoundRecord};
use crate::meter::Ending;
use crate::resolver::OutcomeResolver;
use crate::snapshot::SessionSnapshot;
use crate::state::{GameState, RoundOutcome, Screen};

/// Where a restart from the ending screen lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartTarget {
    /// Back to the briefing.
    Briefing,
    /// Straight into a new game.
    Game,
}

/// A response as the presentation layer should offer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOption {
    /// The response key.
    pub key: ResponseKey,
    /// Remaining charges, `None` for unlimited responses.
    pub charges: Option<u32>,
    /// False when a limited response is out of charges.
    pub enabled: bool,
}

/// One player's run through the scenario deck.
pub struct Playthrough {
    content: Content,
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    state: GameState,
    snapshot: Option<SessionSnapshot>,
}

impl std::fmt::Debug for Playthrough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playthrough")
            .field("screen", &self.state.screen)
            .field("round", &self.state.round)
            .field("meter", &self.state.meter.value())
            .field("snapshot", &self.snapshot.is_some())
            .finish()
    }
}

impl Playthrough {
    /// Validate `content` and open on the start screen with a seeded source.
    pub fn new(content: Content, config: EngineConfig) -> EngineResult<Self> {
        let rng = Box::new(SeededRandom::new(config.seed));
        Self::with_random(content, config, rng)
    }

    /// Like [`Playthrough::new`] but with an injected random source.
    pub fn with_random(
        content: Content,
        config: EngineConfig,
        rng: Box<dyn RandomSource>,
    ) -> EngineResult<Self> {
        let content = content.validated()?;
        let state = GameState::idle(Screen::Start, &content, &config);
        tracing::debug!(
            scenarios = content.scenarios.len(),
            limited = content.charges.len(),
            seed = config.seed,
            "playthrough created"
        );
        Ok(Self {
            content,
            config,
            rng,
            state,
            snapshot: None,
        })
    }

    /// The live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The content this playthrough runs on.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The active screen.
    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Current meter value.
    pub fn meter(&self) -> i32 {
        self.state.meter.value()
    }

    /// The held snapshot, if a digression is in progress.
    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.snapshot.as_ref()
    }

    /// The scenario for the current round, while a game is running.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        if self.state.screen != Screen::Game {
            return None;
        }
        self.state.deck.at(self.state.round).ok()
    }

    /// The current round's responses with their availability.
    pub fn options(&self) -> EngineResult<Vec<ResponseOption>> {
        self.expect_screen(&[Screen::Game], "list responses")?;
        let scenario = self.state.deck.at(self.state.round)?;
        Ok(scenario
            .responses
            .keys()
            .map(|key| ResponseOption {
                key: key.clone(),
                charges: self.state.charges.count(key),
                enabled: self.state.charges.is_available(key),
            })
            .collect())
    }

    /// The final classification, once the ending screen is reached.
    pub fn ending(&self) -> Option<Ending> {
        (self.state.screen == Screen::End).then(|| self.state.meter.classify())
    }

    /// Localized announcement for a granted charge.
    pub fn reward_message(&self, resource: &ResponseKey) -> String {
        journal::reward_message(&self.content.strings, resource)
    }

    /// The after-action report for the rounds played so far.
    pub fn report(&self) -> String {
        self.state
            .journal
            .export_markdown(self.ending(), &self.content.strings)
    }

    /// Accept the oath: START -> BRIEFING.
    pub fn swear(&mut self) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::Start], "take the oath")?;
        self.go(Screen::Briefing);
        Ok(self.state.screen)
    }

    /// Deal a fresh game from the briefing: BRIEFING -> GAME.
    pub fn start_game(&mut self) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::Briefing], "start a game")?;
        self.deal();
        Ok(self.state.screen)
    }

    /// Enter the doctrine digression from the briefing or a running game.
    ///
    /// Leaving a game captures a snapshot, superseding any earlier one. The
    /// briefing has no progression to save, so any stale snapshot is dropped.
    pub fn open_doctrine(&mut self) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::Briefing, Screen::Game], "open the doctrine")?;
        self.snapshot = match self.state.screen {
            Screen::Game => Some(SessionSnapshot::capture(&self.state)),
            _ => None,
        };
        self.go(Screen::Doctrine);
        Ok(self.state.screen)
    }

    /// Leave the doctrine digression.
    ///
    /// Restores the held snapshot if there is one; otherwise deals a fresh
    /// game.
    pub fn close_doctrine(&mut self) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::Doctrine], "close the doctrine")?;
        match self.snapshot.take() {
            Some(snapshot) => {
                self.state = snapshot.restore();
                tracing::debug!(
                    screen = %self.state.screen,
                    round = self.state.round,
                    meter = self.state.meter.value(),
                    "snapshot restored"
                );
            }
            None => self.deal(),
        }
        Ok(self.state.screen)
    }

    /// Resolve a response for the current round.
    ///
    /// On any error the meter, charges, cursor and journal are unchanged.
    pub fn choose(&mut self, key: &ResponseKey) -> EngineResult<&RoundOutcome> {
        self.expect_screen(&[Screen::Game], "choose a response")?;
        if self.state.pending.is_some() {
            return Err(EngineError::InvalidTransition {
                screen: Screen::Game,
                action: "choose again before proceeding",
            });
        }

        let scenario = self.state.deck.at(self.state.round)?;
        let resolution = OutcomeResolver::new(&self.content.outcomes).resolve(
            scenario,
            key,
            &self.state.charges,
            self.rng.as_mut(),
        )?;

        let mut charges = self.state.charges.clone();
        if charges.is_limited(key) {
            charges.consume(key)?;
        }
        if let Some(resource) = &resolution.reward {
            charges.grant(resource)?;
        }

        let round = scenario.round;
        let prompt = scenario.prompt.clone();

        // Commit.
        let meter_before = self.state.meter.value();
        let meter_after = self.state.meter.apply(resolution.variant.shift);
        self.state.charges = charges;
        self.state.journal.append(RoundRecord {
            round,
            prompt,
            response: key.clone(),
            category: resolution.category,
            feedback: resolution.variant.text.clone(),
            meter_after,
            reward: resolution.reward.clone(),
        });

        tracing::debug!(
            round,
            key = %key,
            category = %resolution.category,
            meter = meter_after,
            "round resolved"
        );

        let outcome: &RoundOutcome = self.state.pending.insert(RoundOutcome {
            round,
            response: key.clone(),
            resolution,
            meter_before,
            meter_after,
        });
        Ok(outcome)
    }

    /// Acknowledge the pending outcome and move to the next round, or to the
    /// ending screen after the last one.
    pub fn proceed(&mut self) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::Game], "proceed")?;
        if self.state.pending.is_none() {
            return Err(EngineError::InvalidTransition {
                screen: Screen::Game,
                action: "proceed without a resolved round",
            });
        }
        self.state.pending = None;

        if self.state.is_last_round() {
            self.go(Screen::End);
            tracing::info!(
                meter = self.state.meter.value(),
                ending = %self.state.meter.classify(),
                rounds = self.state.journal.len(),
                "playthrough finished"
            );
        } else {
            self.state.round += 1;
        }
        Ok(self.state.screen)
    }

    /// Reset everything from the ending screen.
    pub fn restart(&mut self, target: RestartTarget) -> EngineResult<Screen> {
        self.expect_screen(&[Screen::End], "restart")?;
        self.snapshot = None;
        match target {
            RestartTarget::Briefing => {
                self.state = GameState::idle(Screen::Briefing, &self.content, &self.config);
            }
            RestartTarget::Game => self.deal(),
        }
        Ok(self.state.screen)
    }

    fn deal(&mut self) {
        self.state = GameState::fresh_game(&self.content, &self.config, self.rng.as_mut());
        tracing::info!(rounds = self.state.deck.len(), "game dealt");
    }

    fn go(&mut self, to: Screen) {
        tracing::debug!(from = %self.state.screen, to = %to, "screen transition");
        self.state.screen = to;
    }

    fn expect_screen(&self, allowed: &[Screen], action: &'static str) -> EngineResult<()> {
        if allowed.contains(&self.state.screen) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                screen: self.state.screen,
                action,
            })
        }
    }
}
