use rolestat::report::render_partners;
use rolestat::*;

fn dex() -> Pokedex {
    let entries: [(&str, &[PokeType]); 6] = [
        ("charizard", &[PokeType::Fire, PokeType::Flying]),
        ("swampert", &[PokeType::Water, PokeType::Ground]),
        ("moltres", &[PokeType::Fire, PokeType::Flying]),
        ("ferrothorn", &[PokeType::Grass, PokeType::Steel]),
        ("golem", &[PokeType::Rock, PokeType::Ground]),
        ("aerodactyl", &[PokeType::Rock, PokeType::Flying]),
    ];
    Pokedex::from_records(entries.iter().map(|(name, types)| {
        StatRecord::new(*name, types.to_vec(), BaseStats::new(80, 80, 80, 80, 80, 80))
    }))
    .unwrap()
}

#[test]
fn test_subject_is_never_a_partner() {
    let chart = TypeChart::standard();
    let partners = find_partners(&chart, &dex(), "charizard", 10).unwrap();
    assert_eq!(partners.len(), 5);
    assert!(partners.iter().all(|p| p.name != "charizard"));
}

#[test]
fn test_partners_sorted_ascending() {
    let chart = TypeChart::standard();
    let partners = find_partners(&chart, &dex(), "charizard", 10).unwrap();
    for pair in partners.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }

    // Same-typed teammate shares the 4x rock weakness.
    assert_eq!(partners.last().unwrap().name, "moltres");
}

#[test]
fn test_scores_match_type_synergy() {
    let chart = TypeChart::standard();
    let dex = dex();
    let partners = find_partners(&chart, &dex, "swampert", 10).unwrap();
    for partner in &partners {
        let expected = type_synergy(
            &chart,
            &dex.get("swampert").unwrap().types,
            &dex.get(&partner.name).unwrap().types,
        )
        .unwrap();
        assert_eq!(partner.score, expected);
    }
}

#[test]
fn test_limit_truncates() {
    let chart = TypeChart::standard();
    let all = find_partners(&chart, &dex(), "golem", 10).unwrap();
    let top = find_partners(&chart, &dex(), "golem", 2).unwrap();
    assert_eq!(top.as_slice(), &all[..2]);
    assert!(find_partners(&chart, &dex(), "golem", 0).unwrap().is_empty());
}

#[test]
fn test_ties_keep_store_order() {
    let chart = TypeChart::standard();
    let mut dex = dex();
    dex.insert(StatRecord::new(
        "talonflame",
        vec![PokeType::Fire, PokeType::Flying],
        BaseStats::new(78, 81, 71, 74, 69, 126),
    ))
    .unwrap();

    let partners = find_partners(&chart, &dex, "swampert", 10).unwrap();
    let charizard = partners.iter().position(|p| p.name == "charizard").unwrap();
    let moltres = partners.iter().position(|p| p.name == "moltres").unwrap();
    let talonflame = partners.iter().position(|p| p.name == "talonflame").unwrap();
    assert_eq!(partners[charizard].score, partners[talonflame].score);
    assert!(charizard < moltres && moltres < talonflame);
}

#[test]
fn test_unknown_subject() {
    let chart = TypeChart::standard();
    let err = find_partners(&chart, &dex(), "mew", 10).unwrap_err();
    assert_eq!(err, RoleError::UnknownCreature("mew".to_string()));
    assert!(err.is_malformed_input());
}

#[test]
fn test_incomplete_chart_is_reported() {
    let chart = TypeChart::from_json(
        r#"{
            "water": {"weaknesses": ["grass", "electric"], "resistances": ["fire", "water"]},
            "ground": {"weaknesses": ["water"], "immunities": ["electric"]}
        }"#,
    )
    .unwrap();
    let err = find_partners(&chart, &dex(), "swampert", 10).unwrap_err();
    assert!(matches!(err, RoleError::MissingTypeEntry(PokeType::Fire)));
}

#[test]
fn test_rendered_partner_list() {
    let chart = TypeChart::standard();
    let partners = find_partners(&chart, &dex(), "charizard", 3).unwrap();
    let text = render_partners("charizard", &partners);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Results for charizard:");
    assert_eq!(lines.len(), 6);
    assert!(lines[2].starts_with("|  1  |  "));
    assert!(lines[2].contains("Score = "));
    assert_eq!(lines[1], lines[5]);
}
