//! Build the decision menu and validate decisions against it.
//!
//! The menu lists the actor's capability set (role baseline plus learned
//! skills) and every held item. Skills that need an enemy are left out when
//! none is alive. Unaffordable skills stay listed but disabled, so choosing
//! one is rejected with [`ActionError::InsufficientResource`].

use crate::env::ItemKind;
use crate::state::Combatant;
use crate::stats::ResourceKind;

use super::{ActionError, Decision, MenuOption, SkillCatalog, SkillId, targeting};

/// Menu entries for `actor`, skills first (catalog order) then items.
pub fn menu_for(actor: &Combatant, enemies: &[Combatant]) -> Vec<MenuOption> {
    let enemy_alive = enemies.iter().any(Combatant::is_alive);

    let skills = actor
        .capabilities()
        .into_iter()
        .map(SkillCatalog::definition)
        .filter(|def| enemy_alive || !def.needs_enemy())
        .map(|def| MenuOption {
            decision: Decision::Skill(def.id),
            mp_cost: def.mp_cost,
            count: None,
            enabled: actor.mp.current >= def.mp_cost,
        });

    let items = actor
        .inventory
        .iter()
        .filter(|(item, _)| enemy_alive || !item_needs_enemy(*item))
        .map(|(item, count)| MenuOption {
            decision: Decision::Item(item),
            mp_cost: 0,
            count: Some(count),
            enabled: true,
        });

    skills.chain(items).collect()
}

/// Checks a decision before anything is spent.
///
/// A decision that passes may still be cancelled at target selection.
pub fn validate(
    actor: &Combatant,
    decision: Decision,
    enemies: &[Combatant],
) -> Result<(), ActionError> {
    if !actor.is_alive() {
        return Err(ActionError::ActorDefeated);
    }

    match decision {
        Decision::Skill(id) => validate_skill(actor, id, enemies),
        Decision::Item(item) => {
            if !actor.inventory.has(item) {
                return Err(ActionError::ItemNotAvailable(item));
            }
            if item_needs_enemy(item) && targeting::live_indices(enemies).is_empty() {
                return Err(ActionError::NoValidTarget);
            }
            Ok(())
        }
    }
}

fn validate_skill(
    actor: &Combatant,
    id: SkillId,
    enemies: &[Combatant],
) -> Result<(), ActionError> {
    let def = SkillCatalog::definition(id);

    if let Some(required) = def.required_role {
        if !actor.role.is(required) {
            return Err(ActionError::RoleMismatch {
                skill: id,
                required: required.to_owned(),
            });
        }
    }
    if !actor.can_use(id) {
        return Err(ActionError::SkillNotLearned(id));
    }
    if actor.mp.current < def.mp_cost {
        return Err(ActionError::InsufficientResource {
            resource: ResourceKind::Mp,
            required: def.mp_cost,
            available: actor.mp.current,
        });
    }
    if def.needs_enemy() && targeting::live_indices(enemies).is_empty() {
        return Err(ActionError::NoValidTarget);
    }
    Ok(())
}

fn item_needs_enemy(item: ItemKind) -> bool {
    !matches!(item.target(), crate::env::ItemTarget::User)
}
