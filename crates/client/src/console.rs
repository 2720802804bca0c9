//! Line-based action provider over any reader/writer pair.

use std::io::{BufRead, Write};

use battle_core::{
    ActionProvider, AutoProvider, BattleEvent, Decision, DecisionRequest, TargetChoice,
    TargetRequest,
};
use tracing::{debug, warn};

use crate::presentation;

/// Prompts a human for every party decision.
///
/// Input is parsed with the engine's menu helpers, so bad input just
/// re-prompts. When input runs out (EOF or a read error) the provider
/// switches to autopilot for the rest of the session.
pub struct ConsoleProvider<R, W> {
    input: R,
    output: W,
    autopilot: bool,
}

impl<R: BufRead, W: Write> ConsoleProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            autopilot: false,
        }
    }

    /// Renders events only; decisions are taken by [`AutoProvider`].
    pub fn autopilot(input: R, output: W) -> Self {
        Self {
            input,
            output,
            autopilot: true,
        }
    }

    pub fn is_autopilot(&self) -> bool {
        self.autopilot
    }

    /// Prints a line. Console write failures are logged, not fatal.
    pub fn say(&mut self, text: &str) {
        if let Err(error) = writeln!(self.output, "{}", text) {
            warn!(%error, "console write failed");
        }
    }

    /// Asks a yes/no question. EOF and autopilot answer no.
    pub fn confirm(&mut self, question: &str) -> bool {
        if self.autopilot {
            return false;
        }
        self.prompt(&format!("{} [y/N]", question))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Option<String> {
        if let Err(error) = write!(self.output, "{}\n> ", text).and_then(|_| self.output.flush()) {
            warn!(%error, "console write failed");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                debug!("console input closed");
                None
            }
            Ok(_) => Some(line),
            Err(error) => {
                warn!(%error, "console read failed");
                None
            }
        }
    }

    fn fall_back_to_autopilot(&mut self) {
        self.autopilot = true;
        self.say("(input closed, continuing on autopilot)");
    }
}

impl<R: BufRead, W: Write> ActionProvider for ConsoleProvider<R, W> {
    fn provide_decision(&mut self, request: &DecisionRequest) -> Decision {
        let menu = presentation::render_menu(request);

        loop {
            if self.autopilot {
                return AutoProvider.provide_decision(request);
            }
            let Some(line) = self.prompt(&menu) else {
                self.fall_back_to_autopilot();
                continue;
            };

            match request.parse_input(&line) {
                Ok(Some(decision)) => return decision,
                Ok(None) => {
                    if let Some(actor) = request.actor_view() {
                        let sheet = presentation::render_status(actor);
                        self.say(&sheet);
                    }
                }
                Err(error) => self.say(&format!("  ! {}", error)),
            }
        }
    }

    fn provide_target(&mut self, request: &TargetRequest) -> TargetChoice {
        let list = presentation::render_targets(request);

        loop {
            if self.autopilot {
                return AutoProvider.provide_target(request);
            }
            let Some(line) = self.prompt(&list) else {
                self.fall_back_to_autopilot();
                continue;
            };

            match request.parse_input(&line) {
                Ok(choice) => return choice,
                Err(error) => self.say(&format!("  ! {}", error)),
            }
        }
    }

    fn observe(&mut self, event: &BattleEvent) {
        let text = presentation::render_event(event);
        self.say(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use battle_core::{
        Battle, BattleConfig, Bounty, Combatant, CoreStats, Inventory, ItemKind, Outcome, Role,
        SequenceRng, SkillId,
    };

    fn console(script: &str) -> ConsoleProvider<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleProvider::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(provider: ConsoleProvider<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(provider.into_output()).unwrap()
    }

    fn goblins() -> Vec<Combatant> {
        (0..2)
            .map(|i| {
                Combatant::enemy(
                    format!("Goblin {}", i + 1),
                    CoreStats::new(8, 3, 1, 4),
                    40,
                    Bounty::new(50, 60),
                )
            })
            .collect()
    }

    #[test]
    fn bad_input_reprompts_and_status_is_shown_for_zero() {
        let mut party = vec![Combatant::hero("Raka", Role::warrior())];
        let mut enemies = goblins();
        let mut rng = SequenceRng::new(vec![0]);
        let config = BattleConfig::default();
        let mut battle = Battle::new(&mut party, &mut enemies, &mut rng, &config).unwrap();

        // "x" is rejected, "0" shows status, "1" picks slash, "9" is an
        // invalid target, "2" picks the second goblin
        let mut console = console("x\n0\n1\n9\n2\n");
        battle.step(&mut console);

        assert_eq!(battle.enemies()[0].hp.current, 40);
        assert!(battle.enemies()[1].hp.current < 40);
        let out = transcript(console);
        assert!(out.contains("invalid selection"));
        assert!(out.contains("Raka (warrior, level 1)"));
        assert!(out.contains("Choose a target for Slash:"));
    }

    #[test]
    fn backing_out_of_targeting_keeps_the_item() {
        let mut party = vec![
            Combatant::hero("Raka", Role::warrior())
                .with_inventory(Inventory::new().with(ItemKind::WeakenPotion, 1)),
        ];
        let mut enemies = goblins();
        let mut rng = SequenceRng::new(vec![0]);
        let config = BattleConfig::default();
        let mut battle = Battle::new(&mut party, &mut enemies, &mut rng, &config).unwrap();

        // menu: slash, power strike, weaken potion; back out, then slash goblin 1
        let mut console = console("3\n0\n1\n1\n");
        battle.step(&mut console);

        assert_eq!(
            battle.party()[0].inventory.count(ItemKind::WeakenPotion),
            1
        );
        assert!(battle.enemies()[0].hp.current < 40);
        assert!(transcript(console).contains("Weaken Potion cancelled"));
    }

    #[test]
    fn closed_input_switches_to_autopilot() {
        let mut party = vec![Combatant::hero("Raka", Role::warrior()).with_skills([SkillId::Heal])];
        let mut enemies = vec![Combatant::enemy(
            "Green Slime",
            CoreStats::new(5, 2, 2, 1),
            25,
            Bounty::new(25, 30),
        )];
        let mut rng = battle_core::PcgRng::new(9);
        let config = BattleConfig::default();

        let mut console = console("");
        let report = Battle::new(&mut party, &mut enemies, &mut rng, &config)
            .unwrap()
            .run(&mut console);

        assert_eq!(report.outcome, Outcome::Won);
        assert!(console.is_autopilot());
        assert!(transcript(console).contains("continuing on autopilot"));
    }

    #[test]
    fn confirm_reads_yes_and_defaults_to_no() {
        assert!(console("y\n").confirm("Fight again?"));
        assert!(!console("\n").confirm("Fight again?"));
        assert!(!console("").confirm("Fight again?"));
    }
}
