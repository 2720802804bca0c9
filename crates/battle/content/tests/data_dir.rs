//! Loading content from a data directory on disk.

use std::fs;

use battle_content::ContentFactory;
use battle_core::{AutoProvider, Battle, Outcome, PcgRng};
use tempfile::tempdir;

#[test]
fn directory_files_override_built_in_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[enemy]\nbasic_weight = 1\npower_weight = 0\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("bestiary.ron"),
        r#"{
            "rat": (
                name: "Sewer Rat",
                stats: (attack: 3, defense: 0, magic: 0, agility: 2),
                hp_max: 8,
                bounty: (exp: 10, gold: 4),
            ),
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("encounters.ron"),
        r#"(encounters: { "cellar": (preamble: "Squeaking.", enemies: ["rat", "rat"]) })"#,
    )
    .unwrap();

    let content = ContentFactory::new(dir.path()).load_all().unwrap();

    assert_eq!(content.config.enemy.power_weight, 0);
    assert_eq!(content.config.growth.hp_max, 15);
    // party.ron was not overridden
    assert!(content.party.get("hero").is_some());

    let mut rng = PcgRng::new(3);
    let staged = content.stage("cellar", &mut rng).unwrap();
    assert_eq!(staged.enemies.len(), 2);
    assert_eq!(staged.enemies[0].name, "Sewer Rat");
}

#[test]
fn malformed_file_reports_the_format() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("party.ron"), "{ \"hero\": ( name: ").unwrap();

    let err = ContentFactory::new(dir.path()).load_party().unwrap_err();

    assert!(err.to_string().contains("party RON"));
}

#[test]
fn dangling_encounter_reference_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("encounters.ron"),
        r#"(regions: { "swamp": (name: "the Swamp", candidates: ["bog_witch"]) })"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();

    assert!(err.to_string().contains("bog_witch"));
}

#[test]
fn staged_content_runs_to_completion() {
    let content = ContentFactory::embedded().load_all().unwrap();
    let mut rng = PcgRng::new(42);

    let mut party = content.party(&["hero", "archer"]).unwrap();
    let staged = content.stage("dark_forest", &mut rng).unwrap();
    let mut enemies = staged.enemies;

    let report = Battle::new(&mut party, &mut enemies, &mut rng, &content.config)
        .unwrap()
        .with_preamble(staged.preamble)
        .run(&mut AutoProvider);

    // two full-strength heroes against one forest creature
    assert_eq!(report.outcome, Outcome::Won);
    assert!(report.rewards.is_some());
}
