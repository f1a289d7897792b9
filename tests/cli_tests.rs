use pokemon_btc_arena::{run, CliOptions, Difficulty};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("arena-{}-{name}", std::process::id()))
}

fn options(catalog_path: Option<PathBuf>, creature_id: u32, output_path: PathBuf) -> CliOptions {
    CliOptions {
        creature_id,
        level: 5,
        difficulty: Difficulty::Easy,
        pilot: Difficulty::Hard,
        runs: 6,
        seed: 3,
        rules_path: None,
        catalog_path,
        output_path,
    }
}

#[test]
fn custom_catalog_drives_the_run() {
    let catalog_path = temp_path("catalog.json");
    let output_path = temp_path("champions.csv");
    let raw = r#"[
        {"id":1,"name":"Ember Pup","types":["Fire"],
         "baseStats":{"hp":50,"attack":60,"defense":40,"speed":55},
         "moves":[{"name":"Ember","type":"Fire","power":40},{"name":"Growl","type":"Normal","power":0}]},
        {"id":2,"name":"Reed Toad","types":["Grass"],
         "baseStats":{"hp":60,"attack":45,"defense":55,"speed":35},
         "moves":[{"name":"Vine Whip","type":"Grass","power":45}]}
    ]"#;
    std::fs::write(&catalog_path, raw).expect("write catalog");

    run(options(Some(catalog_path.clone()), 2, output_path.clone())).expect("run succeeds");

    let csv = std::fs::read_to_string(&output_path).expect("csv written");
    std::fs::remove_file(&catalog_path).ok();
    std::fs::remove_file(&output_path).ok();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("champion,titles,share"));
    let mut titles = 0;
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert!(fields[0] == "Ember Pup" || fields[0] == "Reed Toad", "{line}");
        titles += fields[1].parse::<usize>().expect("title count");
    }
    assert_eq!(titles, 6);
}

#[test]
fn unknown_creature_in_custom_catalog_is_an_error() {
    let catalog_path = temp_path("small-catalog.json");
    let raw = r#"[{"id":1,"name":"Solo","types":["Normal"],
        "baseStats":{"hp":40,"attack":40,"defense":40,"speed":40},
        "moves":[{"name":"Tackle","type":"Normal","power":40}]}]"#;
    std::fs::write(&catalog_path, raw).expect("write catalog");

    // Pikachu lives in the embedded table but not in this one.
    let result = run(options(Some(catalog_path.clone()), 25, temp_path("unused.csv")));
    std::fs::remove_file(&catalog_path).ok();
    let err = result.expect_err("id 25 is missing");
    assert!(err.to_string().contains("Unknown creature id 25"));
}
