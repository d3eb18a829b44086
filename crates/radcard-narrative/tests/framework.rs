use radcard_core::models::narrative::{Likelihood, Urgency};
use radcard_narrative::board::{leading_candidate, DifferentialBoard};
use radcard_narrative::cascade::first_match;
use radcard_narrative::choice::{Degree, Presence};
use radcard_narrative::findings::Findings;
use radcard_narrative::measure::{format_mm, parse_measure, UNMEASURED};
use radcard_narrative::resolve::{resolve, ResolutionSource};
use radcard_narrative::rules::{apply_rules, DifferentialRule};
use radcard_narrative::sentence::{capitalize, join_clauses, list_phrase, sentence};
use radcard_narrative::{all_modules, SelectionState};

#[test]
fn parse_measure_never_turns_garbage_into_zero() {
    assert_eq!(parse_measure("6"), Some(6.0));
    assert_eq!(parse_measure(" 4,5 "), Some(4.5));
    assert_eq!(parse_measure("0"), Some(0.0));
    assert_eq!(parse_measure(""), None);
    assert_eq!(parse_measure("   "), None);
    assert_eq!(parse_measure("abc"), None);
    assert_eq!(parse_measure("inf"), None);
    assert_eq!(parse_measure("NaN"), None);

    assert_eq!(format_mm(Some(6.0)), "6 mm");
    assert_eq!(format_mm(Some(7.5)), "7.5 mm");
    assert_eq!(format_mm(None), UNMEASURED);
}

#[test]
fn clauses_join_with_single_spaces() {
    assert_eq!(
        join_clauses([Some("left "), None, Some("  frontal\tlobe"), Some("")]),
        "left frontal lobe"
    );
    assert_eq!(sentence([Some("acute"), None, Some("infarct")]).unwrap(), "Acute infarct.");
    assert_eq!(sentence([Some("already done.")]).unwrap(), "Already done.");
    assert_eq!(sentence::<_, &str>([None, None]), None);
    assert_eq!(capitalize("ívory"), "Ívory");
    assert_eq!(capitalize(""), "");
}

#[test]
fn list_phrase_uses_commas_and_a_final_and() {
    assert_eq!(list_phrase::<&str>(&[]), None);
    assert_eq!(list_phrase(&["a"]).unwrap(), "a");
    assert_eq!(list_phrase(&["a", "b"]).unwrap(), "a and b");
    assert_eq!(list_phrase(&["a", "b", "c"]).unwrap(), "a, b and c");
}

#[test]
fn explicit_beats_inferred_beats_unknown() {
    let explicit = resolve(Degree::Mild, Some(Degree::Marked));
    assert_eq!(explicit.value, Degree::Mild);
    assert_eq!(explicit.source, ResolutionSource::Explicit);

    let inferred = resolve(Degree::Unknown, Some(Degree::Marked));
    assert_eq!(inferred.value, Degree::Marked);
    assert_eq!(inferred.source, ResolutionSource::Inferred);

    let unknown = resolve(Presence::Unknown, Some(Presence::Unknown));
    assert_eq!(unknown.source, ResolutionSource::Unknown);
    assert!(!unknown.is_known());
    assert_eq!(resolve::<Presence>(Presence::Unknown, None).value, Presence::Unknown);
}

#[test]
fn first_matching_condition_wins() {
    let cascade = [
        (false, Urgency::Emergency),
        (true, Urgency::Priority),
        (true, Urgency::Emergency),
    ];
    assert_eq!(first_match(&cascade, Urgency::Routine), Urgency::Priority);
    assert_eq!(first_match(&[(false, Urgency::Emergency)], Urgency::Routine), Urgency::Routine);
}

#[test]
fn propose_keeps_the_first_assertion() {
    let mut board = DifferentialBoard::new();
    assert!(board.is_empty());
    assert!(!board.raise("Hemorrhage", "SDH", "unproposed"));
    assert!(board.is_empty());
    assert!(board.propose("Hemorrhage", "SDH", Likelihood::Medium, "crescentic"));
    assert!(!board.is_empty());
    assert!(!board.propose("Hemorrhage", "SDH", Likelihood::High, "again"));

    let entry = board.get("Hemorrhage", "SDH").unwrap();
    assert_eq!(entry.likelihood, Likelihood::Medium);
    assert_eq!(entry.rationale, vec!["crescentic".to_string()]);
}

#[test]
fn adjustments_step_once_and_clamp() {
    let mut board = DifferentialBoard::new();
    board.propose("Mass lesion", "Abscess", Likelihood::High, "ring");
    assert!(board.raise("Mass lesion", "Abscess", "fever"));
    assert!(board.raise("Mass lesion", "Abscess", "fever"));
    let entry = board.get("Mass lesion", "Abscess").unwrap();
    assert_eq!(entry.likelihood, Likelihood::High);
    assert_eq!(entry.rationale, vec!["ring".to_string(), "fever".to_string()]);

    assert!(board.lower("Mass lesion", "Abscess", "afebrile"));
    assert!(board.lower("Mass lesion", "Abscess", "afebrile"));
    assert!(board.lower("Mass lesion", "Abscess", "afebrile"));
    assert_eq!(board.get("Mass lesion", "Abscess").unwrap().likelihood, Likelihood::Low);

    assert!(!board.raise("Mass lesion", "Lymphoma", "never proposed"));
    assert!(!board.contains("Mass lesion", "Lymphoma"));
}

#[test]
fn groups_rank_by_likelihood_keeping_proposal_order_on_ties() {
    let mut board = DifferentialBoard::new();
    board.propose("Focal lesion", "Cyst", Likelihood::Medium, "");
    board.propose("Biliary", "Stone", Likelihood::Low, "");
    board.propose("Focal lesion", "Hemangioma", Likelihood::High, "");
    board.propose("Focal lesion", "Metastasis", Likelihood::Medium, "");

    let groups = board.into_groups();
    assert_eq!(groups[0].category, "Focal lesion");
    let names: Vec<&str> = groups[0].entries.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Hemangioma", "Cyst", "Metastasis"]);
    assert!(groups[0].entries[1].rationale.is_empty());
    assert_eq!(groups[1].category, "Biliary");

    assert_eq!(leading_candidate(&groups).unwrap().name, "Hemangioma");
    assert!(leading_candidate(&[]).is_none());
}

struct Case {
    stones: bool,
    fever: bool,
}

#[test]
fn rules_fire_in_order_and_report_what_changed() {
    let rules = vec![
        DifferentialRule::raise("raise.early", "GB", "Cholecystitis", "too early", |c: &Case| {
            c.fever
        }),
        DifferentialRule::propose(
            "propose",
            "GB",
            "Cholecystitis",
            Likelihood::Low,
            "stones",
            |c: &Case| c.stones,
        ),
        DifferentialRule::raise("raise", "GB", "Cholecystitis", "fever", |c: &Case| c.fever),
        DifferentialRule::lower("lower.skip", "GB", "Cholecystitis", "no stones", |c: &Case| {
            !c.stones
        }),
    ];
    let mut board = DifferentialBoard::new();
    let fired = apply_rules(&rules, &Case { stones: true, fever: true }, &mut board);

    assert_eq!(fired, vec!["propose", "raise"]);
    let entry = board.get("GB", "Cholecystitis").unwrap();
    assert_eq!(entry.likelihood, Likelihood::Medium);
    assert_eq!(entry.rationale, vec!["stones".to_string(), "fever".to_string()]);
}

#[test]
fn findings_deduplicate_in_first_seen_order() {
    let mut findings = Findings::new();
    findings.recommend("B");
    findings.recommend("A");
    findings.recommend("B");
    findings.warn("W");
    findings.warn("W");
    findings.study("MRI");
    findings.suggest("Hemorrhage", Urgency::Priority, vec!["x".into(), "x".into()]);
    findings.suggest("Hemorrhage", Urgency::Emergency, vec!["y".into(), "x".into()]);
    findings.suggest("Hemorrhage", Urgency::Routine, Vec::new());

    assert_eq!(findings.recommendations().collect::<Vec<_>>(), vec!["B", "A"]);
    assert_eq!(findings.warnings().count(), 1);
    assert_eq!(findings.next_studies().collect::<Vec<_>>(), vec!["MRI"]);
    assert_eq!(findings.suggestions().len(), 1);
    assert_eq!(findings.suggestions()[0].details.len(), 2);
    let (recs, warnings, studies, suggestions) = findings.into_parts();
    assert_eq!(recs.len(), 2);
    assert_eq!(warnings, vec!["W".to_string()]);
    assert_eq!(studies, vec!["MRI".to_string()]);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].urgency, Urgency::Emergency);
    assert_eq!(suggestions[0].details, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn modules_are_listed_and_states_tagged() {
    let ids: Vec<String> = all_modules().into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["liver".to_string(), "brain".to_string()]);

    let state: SelectionState = serde_json::from_str(r#"{"module":"brain"}"#).unwrap();
    assert_eq!(state.module_id(), "brain");
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["module"], "brain");
    assert_eq!(json["bleedType"], "None");

    assert!(serde_json::from_str::<SelectionState>(r#"{"module":"kidney"}"#).is_err());
}
