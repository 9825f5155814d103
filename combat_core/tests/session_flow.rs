//! End-to-end flows against the shipped ruleset

use combat_core::prelude::*;
use combat_core::{add_buff, process_round_end};

fn ruleset() -> Ruleset {
    default_ruleset().unwrap()
}

fn pair(a: u8, b: u8) -> DicePair {
    DicePair::new(a, b).unwrap()
}

#[test]
fn physical_attack_against_buffed_defense() {
    let ruleset = ruleset();
    let knight = BaseStats::new(3, 2);
    let ledger = add_buff(
        &BuffLedger::new(),
        Buff::new("Shield Wall", "shield_wall", BuffKind::additive(StatTarget::Defense), 2.0).with_rounds(2),
        &ruleset.stacking,
    )
    .unwrap();

    let target = aggregate_stats(&knight, &ledger);
    assert_eq!(target.defense, 5);

    let result = AttackSession::new(AttackSpec::physical(20))
        .with_manual_bonus(2)
        .with_roll(0, pair(3, 4))
        .resolve(&target, ResolveOptions::default(), &ruleset.power_table);
    assert_eq!(result.total, 24);
}

#[test]
fn physical_attack_floors_at_zero() {
    let ruleset = ruleset();
    let target = AggregatedStats { defense: 50, mnd_resist: 0 };

    let result = AttackSession::new(AttackSpec::physical(1)).resolve(
        &target,
        ResolveOptions::default(),
        &ruleset.power_table,
    );
    assert_eq!(result.total, 0);
}

#[test]
fn magic_chain_through_power_table() {
    let ruleset = ruleset();
    let part = EnemyPart::new("Head", 8).with_skill(MagicSkill::new("Fire Bolt", 20, 10, 3));
    let skill = part.skill("Fire Bolt").unwrap();

    let session = AttackSession::magic(skill, &ruleset)
        .unwrap()
        .with_manual_bonus(1)
        .with_roll(0, pair(5, 5));
    assert!(session.offers_next_roll());

    let session = session.with_roll(1, pair(3, 4));
    let result = session.resolve(&AggregatedStats::default(), ResolveOptions::default(), &ruleset.power_table);

    let expected = ruleset.power_table.row(20).unwrap()[8] + ruleset.power_table.row(20).unwrap()[5] + 3 + 1;
    assert_eq!(result.total as i32, expected);
    assert_eq!(result.total, 9 + 6 + 3 + 1);
}

#[test]
fn magic_without_dice_is_zero() {
    let ruleset = ruleset();
    let session = AttackSession::magic(&MagicSkill::new("Fire Bolt", 20, 10, 30), &ruleset)
        .unwrap()
        .with_manual_bonus(10);

    let result = session.resolve(&AggregatedStats::default(), ResolveOptions::resisted(), &ruleset.power_table);
    assert!(result.is_zero());
}

#[test]
fn resisted_magic_rounds_up() {
    let ruleset = ruleset();
    let session = AttackSession::magic(&MagicSkill::new("Bolt", 20, 10, 0), &ruleset)
        .unwrap()
        .with_manual_bonus(1)
        .with_roll(0, pair(3, 4));

    let result = session.resolve(&AggregatedStats::default(), ResolveOptions::resisted(), &ruleset.power_table);
    assert_eq!(result.total, 4);
}

#[test]
fn buffs_expire_over_rounds() {
    let ruleset = ruleset();
    let base = BaseStats::new(4, 4);
    let ledger = BuffLedger::new()
        .add(
            Buff::new("Bless", "blessing", BuffKind::additive(StatTarget::All), 1.0).with_rounds(1),
            &ruleset.stacking,
        )
        .unwrap()
        .add(
            Buff::new("Bless", "blessing", BuffKind::additive(StatTarget::All), 1.0).with_rounds(2),
            &ruleset.stacking,
        )
        .unwrap()
        .add(
            Buff::new("Stone Skin", "stone_skin", BuffKind::multiplicative(StatTarget::Defense), 2.0),
            &ruleset.stacking,
        )
        .unwrap();

    let stats = aggregate_stats(&base, &ledger);
    assert_eq!(stats, AggregatedStats { defense: 12, mnd_resist: 6 });

    let ledger = process_round_end(&ledger);
    assert_eq!(aggregate_stats(&base, &ledger), AggregatedStats { defense: 10, mnd_resist: 5 });

    let ledger = process_round_end(&ledger);
    assert_eq!(ledger.len(), 1);
    assert_eq!(aggregate_stats(&base, &ledger), AggregatedStats { defense: 8, mnd_resist: 4 });
}

#[test]
fn duplicate_then_force_replace() {
    let ruleset = ruleset();
    let guard = |rounds| {
        Buff::new("Guard", "guard", BuffKind::additive(StatTarget::Defense), 3.0).with_rounds(rounds)
    };
    let ledger = BuffLedger::new().add(guard(2), &ruleset.stacking).unwrap();

    let err = ledger.add(guard(4), &ruleset.stacking).unwrap_err();
    assert!(matches!(err, CombatError::DuplicateBuff { .. }));

    let ledger = combat_core::force_add_buff(&ledger, guard(4));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.buffs()[0].remaining_duration, BuffDuration::Rounds(4));
}
