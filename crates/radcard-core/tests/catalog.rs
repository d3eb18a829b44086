use radcard_core::catalog::{normalize_weight, Catalog};
use radcard_core::error::CoreError;
use radcard_core::models::content::{LinkRelation, Modality};

const CHOLECYSTITIS: &str = r#"{
    "id": "acute-cholecystitis",
    "name": "Acute cholecystitis",
    "organ": "gallbladder",
    "core": {
        "definition": "Acute inflammation of the gallbladder wall.",
        "etiology": ["Obstruction of the cystic duct by a stone", ""]
    },
    "clinical": {
        "redFlags": [{ "text": "Fever with jaundice", "weight": 4 }]
    },
    "imaging": {
        "US": {
            "main_findings": {
                "title": "Key signs",
                "items": [
                    { "text": "wall thickening ≥3mm", "weight": 3 },
                    { "text": "pericholecystic fluid", "weight": 2.4 }
                ]
            },
            "ddx": ["Adenomyomatosis"]
        },
        "PET": { "main_findings": ["ignored"] }
    },
    "links": { "progression": ["gangrenous-cholecystitis", "nowhere"] }
}"#;

const GANGRENOUS: &str = r#"{ "id": "gangrenous-cholecystitis", "name": "Gangrenous cholecystitis" }"#;

fn two_card_catalog() -> Catalog {
    let json = format!("[{CHOLECYSTITIS}, {GANGRENOUS}]");
    Catalog::from_json_str(&json).unwrap()
}

#[test]
fn weight_normalization_clamps_and_defaults() {
    assert_eq!(normalize_weight(None), 1);
    assert_eq!(normalize_weight(Some(f64::NAN)), 1);
    assert_eq!(normalize_weight(Some(f64::INFINITY)), 1);
    assert_eq!(normalize_weight(Some(0.0)), 1);
    assert_eq!(normalize_weight(Some(2.6)), 3);
    assert_eq!(normalize_weight(Some(9.0)), 5);
}

#[test]
fn every_section_is_present_after_normalization() {
    let catalog = two_card_catalog();
    let bare = catalog.get("gangrenous-cholecystitis").unwrap();

    assert_eq!(bare.core.etiology.title, "Etiology");
    assert!(bare.core.etiology.is_empty());
    assert_eq!(bare.clinical.red_flags.title, "Red flags");
    for modality in Modality::ALL {
        let block = bare.imaging.for_modality(modality);
        assert_eq!(block.main_findings.title, "Main findings");
        assert!(block.blocks().iter().all(|b| b.is_empty()));
    }
}

#[test]
fn items_accept_bare_strings_and_weighted_objects() {
    let catalog = two_card_catalog();
    let card = catalog.get("acute-cholecystitis").unwrap();

    assert_eq!(card.core.definition.items.len(), 1);
    assert_eq!(card.core.definition.items[0].weight, 1);
    // Blank items are dropped.
    assert_eq!(card.core.etiology.items.len(), 1);
    assert_eq!(card.clinical.red_flags.items[0].weight, 4);

    let us = card.imaging.for_modality(Modality::Us);
    assert_eq!(us.main_findings.title, "Key signs");
    assert_eq!(us.main_findings.items[1].weight, 2);
    assert_eq!(us.differential.items[0].text, "Adenomyomatosis");
}

#[test]
fn dangling_links_are_dropped() {
    let catalog = two_card_catalog();
    let card = catalog.get("acute-cholecystitis").unwrap();

    assert_eq!(card.links.len(), 1);
    assert_eq!(card.links[0].relation, LinkRelation::ProgressesTo);
    assert_eq!(card.links[0].target_id, "gangrenous-cholecystitis");
}

#[test]
fn ids_are_listed_in_order_and_lookup_signals_absence() {
    let catalog = two_card_catalog();
    assert_eq!(
        catalog.ids(),
        vec!["acute-cholecystitis", "gangrenous-cholecystitis"]
    );
    assert!(catalog.get("missing").is_none());
    assert_eq!(catalog.len(), 2);
}

#[test]
fn duplicate_ids_are_rejected() {
    let json = format!("[{GANGRENOUS}, {GANGRENOUS}]");
    let err = Catalog::from_json_str(&json).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateId(id) if id == "gangrenous-cholecystitis"));
}

#[test]
fn missing_id_is_rejected() {
    let err = Catalog::from_json_str(r#"{ "name": "No id" }"#).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(field) if field == "id"));
}

#[test]
fn load_dir_reads_json_files_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.json"), CHOLECYSTITIS).unwrap();
    std::fs::write(dir.path().join("b.json"), format!("[{GANGRENOUS}]")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a card").unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("acute-cholecystitis").unwrap().links.len(), 1);
}
