//! Session controller.
//!
//! Drives the turn loop as a small state machine:
//!
//! ```text
//! AwaitingCommand --ShowMap--> AwaitingCommand
//! AwaitingCommand --Attack---> AttackInProgress --stop(0)--> AwaitingCommand
//! AwaitingCommand --Exit-----> SessionEnded
//! AttackInProgress --mission fulfilled--> SessionEnded
//! ```
//!
//! Every attack request, whether it resolved a battle or was rejected, is
//! followed by a mission check over all players in registration order.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::game::{
    BattleReport, MissionCatalog, Player, RandomSource, Registry, Territory, bind, evaluate,
    resolve_attack,
};

/// Where the session currently is in the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Waiting for a main menu command.
    AwaitingCommand,
    /// Accepting attack orders.
    AttackInProgress,
    /// Terminal: a mission was fulfilled or the players exited.
    SessionEnded,
}

/// A main menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Show the map (`1`).
    ShowMap,
    /// Enter the attack phase (`2`).
    Attack,
    /// Leave the game (`0`).
    Exit,
    /// Anything else, kept verbatim for the error message.
    Invalid(String),
}

impl MenuChoice {
    /// Parse a main menu answer.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(1) => Self::ShowMap,
            Ok(2) => Self::Attack,
            Ok(0) => Self::Exit,
            _ => Self::Invalid(input.trim().to_string()),
        }
    }
}

/// What the caller should do after a menu command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Render the map.
    ShowMap,
    /// The attack phase began; these players had their missions revealed just now.
    AttackPhase {
        /// Indices of players whose mission should be shown.
        revealed: Vec<usize>,
    },
    /// The session ended at the players' request.
    Exited,
}

/// The player who fulfilled their mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Victory {
    /// Index in registration order.
    pub player: usize,
    /// Player name.
    pub name: String,
    /// The fulfilled mission text.
    pub mission: String,
}

/// Result of one attack request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTurn {
    /// The battle, or why no battle took place.
    pub battle: GameResult<BattleReport>,
    /// Set when this turn ended the session.
    pub victory: Option<Victory>,
}

/// Serializable end-of-session snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Seed of the random source, when known.
    pub seed: Option<u64>,
    /// Battles actually fought.
    pub battles: u32,
    /// Final state.
    pub state: SessionState,
    /// Winner, if a mission was fulfilled.
    pub winner: Option<Victory>,
    /// Final map.
    pub territories: Vec<Territory>,
    /// Players with their missions.
    pub players: Vec<Player>,
}

/// One conquest session: the map, the players and the shared random source.
#[derive(Debug)]
pub struct Session<R: RandomSource> {
    registry: Registry,
    players: Vec<Player>,
    dice: R,
    state: SessionState,
    seed: Option<u64>,
    battles: u32,
    winner: Option<Victory>,
}

impl<R: RandomSource> Session<R> {
    /// Create a session from a populated map and players with bound missions.
    #[must_use]
    pub fn new(registry: Registry, players: Vec<Player>, dice: R) -> Self {
        Self {
            registry,
            players,
            dice,
            state: SessionState::AwaitingCommand,
            seed: None,
            battles: 0,
            winner: None,
        }
    }

    /// Create a session, drawing and binding a mission for each `(name, color)`
    /// in order from `catalog`.
    #[must_use]
    pub fn deal<I, N, C>(
        registry: Registry,
        roster: I,
        catalog: &MissionCatalog,
        mut dice: R,
    ) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let players = roster
            .into_iter()
            .enumerate()
            .map(|(index, (name, color))| {
                let color: String = color.into();
                let (template_index, template) = catalog.draw(&mut dice);
                info!(player = index, template = template_index, "mission assigned");
                let mission = bind(template, &color);
                Player::new(name, color, mission)
            })
            .collect();

        Self::new(registry, players, dice)
    }

    /// Record the seed for the session summary.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The map.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Players in registration order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The winner, once a mission has been fulfilled.
    #[must_use]
    pub const fn winner(&self) -> Option<&Victory> {
        self.winner.as_ref()
    }

    /// Battles fought so far.
    #[must_use]
    pub const fn battles(&self) -> u32 {
        self.battles
    }

    /// The random source.
    #[must_use]
    pub const fn dice(&self) -> &R {
        &self.dice
    }

    /// Whether the session has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == SessionState::SessionEnded
    }

    /// Handle a main menu command.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidOption`] for an unknown choice or when not
    /// at the main menu, and [`GameError::SessionOver`] after the session ended.
    pub fn menu(&mut self, choice: MenuChoice) -> GameResult<MenuOutcome> {
        match self.state {
            SessionState::SessionEnded => return Err(GameError::SessionOver),
            SessionState::AttackInProgress => {
                return Err(GameError::InvalidOption(
                    "an attack phase is in progress".to_string(),
                ));
            }
            SessionState::AwaitingCommand => {}
        }

        match choice {
            MenuChoice::ShowMap => Ok(MenuOutcome::ShowMap),
            MenuChoice::Attack => {
                self.state = SessionState::AttackInProgress;
                let revealed = self
                    .players
                    .iter_mut()
                    .enumerate()
                    .filter_map(|(i, p)| p.reveal_mission().then_some(i))
                    .collect();
                Ok(MenuOutcome::AttackPhase { revealed })
            }
            MenuChoice::Exit => {
                self.state = SessionState::SessionEnded;
                info!(battles = self.battles, "session exited");
                Ok(MenuOutcome::Exited)
            }
            MenuChoice::Invalid(input) => Err(GameError::InvalidOption(input)),
        }
    }

    /// Order an attack from `origin` on `destination`, then check missions.
    ///
    /// Lookup misses and rejected attacks are reported in
    /// [`AttackTurn::battle`]; the mission check runs regardless.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] after the session ended and
    /// [`GameError::InvalidOption`] outside the attack phase.
    pub fn attack(&mut self, origin: &str, destination: &str) -> GameResult<AttackTurn> {
        match self.state {
            SessionState::SessionEnded => return Err(GameError::SessionOver),
            SessionState::AwaitingCommand => {
                return Err(GameError::InvalidOption(
                    "no attack phase in progress".to_string(),
                ));
            }
            SessionState::AttackInProgress => {}
        }

        let battle = self.fight(origin, destination);
        if battle.is_ok() {
            self.battles += 1;
        }

        let victory = self.check_missions().map(|index| {
            let player = &self.players[index];
            Victory {
                player: index,
                name: player.name.clone(),
                mission: player.mission().text().to_string(),
            }
        });
        if let Some(victory) = &victory {
            info!(player = victory.player, battles = self.battles, "mission fulfilled");
            self.state = SessionState::SessionEnded;
            self.winner = Some(victory.clone());
        }

        Ok(AttackTurn { battle, victory })
    }

    /// Answer the "attack again?" prompt. Only `0` stops.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] after the session ended and
    /// [`GameError::InvalidOption`] outside the attack phase.
    pub fn continue_attacking(&mut self, answer: i64) -> GameResult<SessionState> {
        match self.state {
            SessionState::SessionEnded => Err(GameError::SessionOver),
            SessionState::AwaitingCommand => Err(GameError::InvalidOption(
                "no attack phase in progress".to_string(),
            )),
            SessionState::AttackInProgress => {
                if answer == 0 {
                    self.state = SessionState::AwaitingCommand;
                }
                Ok(self.state)
            }
        }
    }

    /// Index of the first player, in registration order, whose mission holds.
    #[must_use]
    pub fn check_missions(&self) -> Option<usize> {
        let found = self
            .players
            .iter()
            .position(|p| evaluate(p.mission(), &self.registry));
        debug!(winner = ?found, "missions checked");
        found
    }

    /// Snapshot the session for reporting.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            battles: self.battles,
            state: self.state,
            winner: self.winner.clone(),
            territories: self.registry.territories().to_vec(),
            players: self.players.clone(),
        }
    }

    fn fight(&mut self, origin: &str, destination: &str) -> GameResult<BattleReport> {
        let from = self.registry.find_by_name(origin)?;
        let to = self.registry.find_by_name(destination)?;

        let same_color = match (self.registry.get(from), self.registry.get(to)) {
            (Some(a), Some(b)) => a.color == b.color,
            _ => return Err(GameError::NotFound(origin.to_string())),
        };
        if same_color {
            return Err(GameError::SameFaction {
                attacker: origin.to_string(),
                defender: destination.to_string(),
            });
        }

        let (attacker, defender) = self
            .registry
            .pair_mut(from, to)
            .ok_or_else(|| GameError::NotFound(destination.to_string()))?;
        resolve_attack(attacker, defender, &mut self.dice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BattleOutcome, BoundMission, LoadedDice};

    fn registry() -> Registry {
        Registry::from_territories(vec![
            Territory::new("America", "Green", 5),
            Territory::new("Europe", "Blue", 3),
            Territory::new("Asia", "Green", 2),
            Territory::new("Africa", "Red", 1),
            Territory::new("Oceania", "Blue", 4),
        ])
    }

    fn session(missions: &[&str], rolls: &[u32]) -> Session<LoadedDice> {
        let colors = ["Green", "Blue", "Red"];
        let players = missions
            .iter()
            .enumerate()
            .map(|(i, m)| Player::new(format!("P{i}"), colors[i], BoundMission::from_text(*m)))
            .collect();
        Session::new(registry(), players, LoadedDice::new(rolls.iter().copied()))
    }

    const NEVER: &str = "Control all territories with your color (Purple).";

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::from_input(" 1\n"), MenuChoice::ShowMap);
        assert_eq!(MenuChoice::from_input("2"), MenuChoice::Attack);
        assert_eq!(MenuChoice::from_input("0"), MenuChoice::Exit);
        assert_eq!(MenuChoice::from_input("7"), MenuChoice::Invalid("7".into()));
        assert_eq!(MenuChoice::from_input("abc"), MenuChoice::Invalid("abc".into()));
    }

    #[test]
    fn test_show_map_keeps_state() {
        let mut s = session(&[NEVER, NEVER], &[]);
        assert_eq!(s.menu(MenuChoice::ShowMap), Ok(MenuOutcome::ShowMap));
        assert_eq!(s.state(), SessionState::AwaitingCommand);
    }

    #[test]
    fn test_invalid_option_has_no_side_effect() {
        let mut s = session(&[NEVER, NEVER], &[]);
        let err = s.menu(MenuChoice::Invalid("9".into())).unwrap_err();
        assert_eq!(err, GameError::InvalidOption("9".into()));
        assert_eq!(s.state(), SessionState::AwaitingCommand);
        assert!(!s.players()[0].mission_revealed());
    }

    #[test]
    fn test_attack_phase_reveals_missions_once() {
        let mut s = session(&[NEVER, NEVER], &[]);
        assert_eq!(
            s.menu(MenuChoice::Attack),
            Ok(MenuOutcome::AttackPhase { revealed: vec![0, 1] })
        );
        assert_eq!(s.continue_attacking(0), Ok(SessionState::AwaitingCommand));
        assert_eq!(
            s.menu(MenuChoice::Attack),
            Ok(MenuOutcome::AttackPhase { revealed: vec![] })
        );
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut s = session(&[NEVER, NEVER], &[]);
        assert_eq!(s.menu(MenuChoice::Exit), Ok(MenuOutcome::Exited));
        assert!(s.is_over());
        assert_eq!(s.menu(MenuChoice::ShowMap), Err(GameError::SessionOver));
        assert_eq!(s.attack("America", "Europe").unwrap_err(), GameError::SessionOver);
    }

    #[test]
    fn test_attack_requires_attack_phase() {
        let mut s = session(&[NEVER, NEVER], &[]);
        assert!(matches!(
            s.attack("America", "Europe"),
            Err(GameError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_attack_resolves_battle() {
        let mut s = session(&[NEVER, NEVER], &[6, 2]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("America", "Europe").unwrap();
        let report = turn.battle.unwrap();

        assert_eq!(report.outcome, BattleOutcome::Conquered);
        assert_eq!(turn.victory, None);
        assert_eq!(s.registry().get(1).unwrap().color, "Green");
        assert_eq!(s.battles(), 1);
        assert_eq!(s.state(), SessionState::AttackInProgress);
    }

    #[test]
    fn test_lookup_miss_reports_not_found() {
        let mut s = session(&[NEVER, NEVER], &[6, 2]);
        s.menu(MenuChoice::Attack).unwrap();
        let before = s.registry().clone();

        let origin_miss = s.attack("Atlantis", "Europe").unwrap();
        assert_eq!(origin_miss.battle, Err(GameError::NotFound("Atlantis".into())));
        let dest_miss = s.attack("America", "Atlantis").unwrap();
        assert_eq!(dest_miss.battle, Err(GameError::NotFound("Atlantis".into())));

        assert_eq!(s.registry(), &before);
        assert_eq!(s.dice().draws(), 0);
        assert_eq!(s.battles(), 0);
    }

    #[test]
    fn test_same_color_rejected_before_combat() {
        let mut s = session(&[NEVER, NEVER], &[6, 2]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("America", "Asia").unwrap();
        assert!(matches!(turn.battle, Err(GameError::SameFaction { .. })));
        let self_attack = s.attack("Asia", "Asia").unwrap();
        assert!(matches!(self_attack.battle, Err(GameError::SameFaction { .. })));
        assert_eq!(s.dice().draws(), 0);
    }

    #[test]
    fn test_mission_checked_after_rejected_attack() {
        // Nobody plays Purple, so this mission already holds; a failed lookup
        // still runs the check and ends the session.
        let gone = "Eliminate color Purple from the map.";
        let mut s = session(&[NEVER, gone], &[]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("Atlantis", "Europe").unwrap();

        assert_eq!(turn.battle, Err(GameError::NotFound("Atlantis".into())));
        assert_eq!(turn.victory.map(|v| v.player), Some(1));
        assert!(s.is_over());
        assert_eq!(s.battles(), 0);
    }

    #[test]
    fn test_unmet_missions_keep_attack_phase() {
        let green = "Control at least 3 territories with your color (Green).";
        let mut s = session(&[green, NEVER], &[1, 6]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("America", "Africa").unwrap();

        assert!(turn.victory.is_none());
        assert_eq!(s.registry().get(0).unwrap().troops, 4);
        assert_eq!(s.state(), SessionState::AttackInProgress);
    }

    #[test]
    fn test_conquest_fulfils_mission() {
        let green = "Control at least 3 territories with your color (Green).";
        let mut s = session(&[NEVER, green], &[6, 1]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("America", "Africa").unwrap();

        let victory = turn.victory.unwrap();
        assert_eq!(victory.player, 1);
        assert_eq!(victory.mission, green);
        assert!(s.is_over());
        assert_eq!(s.winner(), Some(&victory));
    }

    #[test]
    fn test_first_registered_player_wins_ties() {
        let blue = "Accumulate at least 20 troops across territories of your color (Blue).";
        let gone = "Eliminate color Purple from the map.";
        let mut s = session(&[blue, gone, gone], &[]);
        s.menu(MenuChoice::Attack).unwrap();

        let turn = s.attack("Europe", "Oceania").unwrap();

        assert_eq!(turn.victory.unwrap().player, 1);
        assert_eq!(s.state(), SessionState::SessionEnded);
    }

    #[test]
    fn test_continue_semantics() {
        let mut s = session(&[NEVER, NEVER], &[]);
        s.menu(MenuChoice::Attack).unwrap();
        assert_eq!(s.continue_attacking(1), Ok(SessionState::AttackInProgress));
        assert_eq!(s.continue_attacking(-4), Ok(SessionState::AttackInProgress));
        assert_eq!(s.continue_attacking(0), Ok(SessionState::AwaitingCommand));
    }

    #[test]
    fn test_deal_draws_missions_in_order() {
        let catalog = MissionCatalog::standard();
        let dice = LoadedDice::new([0, 3]);
        let s = Session::deal(
            registry(),
            [("Ana", "Green"), ("Bia", "Blue")],
            &catalog,
            dice,
        );
        assert_eq!(
            s.players()[0].mission().text(),
            "Control at least 3 territories with your color (Green)."
        );
        assert_eq!(s.players()[1].mission().text(), "Eliminate color Red from the map.");
        assert_eq!(s.dice().draws(), 2);
    }

    #[test]
    fn test_summary_serializes() {
        let s = session(&[NEVER, NEVER], &[]).with_seed(99);
        let json = serde_json::to_string(&s.summary()).unwrap();
        assert!(json.contains("\"seed\":99"));
        assert!(json.contains("AwaitingCommand"));
    }
}
