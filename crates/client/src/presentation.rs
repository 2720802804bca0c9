//! Text rendering of battle events, menus and rosters.
//!
//! Everything here is a pure function returning a `String`; the console
//! provider decides where it goes.

use std::fmt::Write as _;

use battle_core::{
    BattleEvent, BattleReport, Combatant, CombatantView, Decision, DecisionRequest, Outcome,
    SkillCatalog, SkillId, TargetRequest,
};

const RULE: &str = "======================================================================";

pub fn render_event(event: &BattleEvent) -> String {
    match event {
        BattleEvent::BattleStarted {
            preamble,
            party,
            enemies,
        } => {
            let mut text = String::new();
            if let Some(preamble) = preamble {
                let _ = writeln!(text, "\n{}\n", preamble.trim());
            }
            let _ = writeln!(text, "{}", RULE);
            let _ = writeln!(text, "BATTLE START");
            let _ = writeln!(text, "{}", RULE);
            let _ = write!(text, "{}  vs  {}", party.join(", "), enemies.join(", "));
            text
        }
        BattleEvent::RoundStarted { round } => format!("\n--- Round {} ---", round),
        BattleEvent::TurnStarted { name, .. } => format!("\n{}'s turn", name),
        BattleEvent::ActionRejected { error, .. } => format!("  ! {}", error),
        BattleEvent::ActionCancelled {
            decision,
            refunded_mp,
            ..
        } => {
            if *refunded_mp > 0 {
                format!("  {} cancelled, {} MP returned", decision, refunded_mp)
            } else {
                format!("  {} cancelled", decision)
            }
        }
        BattleEvent::SkillUsed {
            name,
            skill,
            mp_spent,
            ..
        } => {
            if *mp_spent > 0 {
                format!("{} uses {} (-{} MP)", name, skill_name(*skill), mp_spent)
            } else {
                format!("{} uses {}", name, skill_name(*skill))
            }
        }
        BattleEvent::ItemUsed {
            name,
            item,
            remaining,
            ..
        } => format!(
            "{} uses a {} ({} left)",
            name,
            item.display_name(),
            remaining
        ),
        BattleEvent::EnemyAttacked {
            name,
            skill,
            target_name,
            ..
        } => format!("{} uses {} on {}", name, skill_name(*skill), target_name),
        BattleEvent::DamageDealt {
            name,
            amount,
            remaining_hp,
            ..
        } => format!(
            "  {} takes {} damage ({} HP left)",
            name, amount, remaining_hp
        ),
        BattleEvent::Healed { name, restored, .. } => {
            format!("  {} recovers {} HP", name, restored)
        }
        BattleEvent::StatusApplied { name, effect, .. } => format!("  {} gains {}", name, effect),
        BattleEvent::Defeated { name, .. } => format!("  {} is defeated!", name),
        BattleEvent::EffectsExpired { name, effects, .. } => {
            let labels: Vec<&str> = effects.iter().map(|effect| effect.label()).collect();
            format!("  {}'s {} wore off", name, labels.join(", "))
        }
        BattleEvent::BattleEnded { outcome, rounds } => {
            let banner = match outcome {
                Outcome::Won => "VICTORY",
                Outcome::Lost => "DEFEAT",
            };
            format!("\n{}\n{} after {} rounds\n{}", RULE, banner, rounds, RULE)
        }
        BattleEvent::RewardsGranted { share, recipients } => {
            if *recipients > 1 {
                format!(
                    "Each of {} members receives {} EXP and {} gold",
                    recipients, share.exp, share.gold
                )
            } else {
                format!("Received {} EXP and {} gold", share.exp, share.gold)
            }
        }
        BattleEvent::LeveledUp { name, level, .. } => {
            format!("{} reached level {}! HP and MP fully restored", name, level)
        }
    }
}

/// The action menu for the acting party member.
pub fn render_menu(request: &DecisionRequest) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", render_rosters(&request.party, &request.enemies));

    let actor = request
        .actor_view()
        .map(|view| view.name.as_str())
        .unwrap_or("?");
    let _ = writeln!(text, "Choose an action for {}:", actor);

    for (position, option) in request.options.iter().enumerate() {
        let mut line = format!("[{}] {}", position + 1, option.decision);
        match option.decision {
            Decision::Skill(_) if option.mp_cost > 0 => {
                let _ = write!(line, " (MP: {})", option.mp_cost);
            }
            Decision::Item(_) => {
                let _ = write!(line, " x{}", option.count.unwrap_or(0));
            }
            Decision::Skill(_) => {}
        }
        if !option.enabled {
            line.push_str("  - not enough MP");
        }
        let _ = writeln!(text, "{}", line);
    }
    let _ = write!(text, "[0] Status");
    text
}

pub fn render_targets(request: &TargetRequest) -> String {
    let mut text = format!("Choose a target for {}:\n", request.source);
    for (position, candidate) in request.candidates.iter().enumerate() {
        let _ = writeln!(
            text,
            "[{}] {} (HP {}/{})",
            position + 1,
            candidate.name,
            candidate.hp,
            candidate.hp_max
        );
    }
    text.push_str("[0] Back");
    text
}

pub fn render_rosters(party: &[CombatantView], enemies: &[CombatantView]) -> String {
    let mut text = String::from("Party:\n");
    for view in party {
        let _ = writeln!(text, "  {}", roster_line(view, true));
    }
    text.push_str("Enemies:");
    for view in enemies.iter().filter(|view| view.is_alive()) {
        let _ = write!(text, "\n  {}", roster_line(view, false));
    }
    text
}

/// Detailed sheet shown for the `Status` menu entry.
pub fn render_status(view: &CombatantView) -> String {
    let mut text = format!(
        "{} ({}, level {})\n  HP {}/{}  MP {}/{}  ATK {}",
        view.name,
        view.role,
        view.level,
        view.hp.current,
        view.hp.maximum,
        view.mp.current,
        view.mp.maximum,
        view.attack
    );
    if view.damage_out_percent != 100 || view.damage_reduction_percent != 100 {
        let _ = write!(
            text,
            "\n  Damage dealt x{:.2}  Damage taken x{:.2}",
            view.damage_out_multiplier(),
            view.damage_reduction_multiplier()
        );
    }
    for effect in &view.effects {
        let _ = write!(text, "\n  {}", effect);
    }
    text
}

/// Post-battle party summary.
pub fn render_report(report: &BattleReport, party: &[Combatant]) -> String {
    let mut text = format!("Result: {} in {} rounds", report.outcome, report.rounds);
    for member in party {
        let _ = write!(
            text,
            "\n  {}  Lv {}  EXP {}/{}  Gold {}  HP {}/{}  MP {}/{}",
            member.name,
            member.progression.level,
            member.progression.exp,
            member.progression.exp_to_next,
            member.progression.gold,
            member.hp.current,
            member.hp.maximum,
            member.mp.current,
            member.mp.maximum
        );
    }
    text
}

fn roster_line(view: &CombatantView, show_mp: bool) -> String {
    let mut line = format!("{}  HP {}/{}", view.name, view.hp.current, view.hp.maximum);
    if show_mp {
        let _ = write!(line, "  MP {}/{}", view.mp.current, view.mp.maximum);
    }
    if !view.is_alive() {
        line.push_str("  (down)");
    }
    if !view.effects.is_empty() {
        let labels: Vec<&str> = view.effects.iter().map(|effect| effect.label()).collect();
        let _ = write!(line, "  [{}]", labels.join(", "));
    }
    line
}

fn skill_name(skill: SkillId) -> &'static str {
    SkillCatalog::definition(skill).name
}
