use crate::config::GrindConfig;
use crate::flags::Flags;
use crate::grinder::Grinder;
use crate::order::{CaseOrder, LegacyOrder};

use super::bank_model;

fn sense_index(grinder: &Grinder) -> String {
    let dir = tempfile::tempdir().unwrap();
    grinder.grind(dir.path()).unwrap();
    std::fs::read_to_string(dir.path().join("index.sense")).unwrap()
}

fn index_line(grinder: &Grinder) -> String {
    let dir = tempfile::tempdir().unwrap();
    grinder.grind(dir.path()).unwrap();
    let text = std::fs::read_to_string(dir.path().join("index.noun")).unwrap();
    text.lines().last().unwrap().to_string()
}

#[test]
fn test_sense_numbers() {
    let model = bank_model();
    let grinder = Grinder::new(&model, GrindConfig::default());
    let offsets = grinder.offsets().unwrap();
    let slope = offsets.get("b-slope").unwrap();
    let finance = offsets.get("b-finance").unwrap();
    let proper = offsets.get("b-proper").unwrap();

    assert_eq!(
        sense_index(&grinder),
        format!(
            "bank%1:14:00:: {finance:08} 1 20\n\
             Bank%1:14:02:: {proper:08} 2 0\n\
             bank%1:17:01:: {slope:08} 3 0\n"
        )
    );
    assert_eq!(
        index_line(&grinder),
        format!("bank n 3 0 3 1 {finance:08} {proper:08} {slope:08}  ")
    );
}

#[test]
fn test_sense_numbers_lower_first() {
    let model = bank_model();
    let config = GrindConfig::default().case_order(CaseOrder::LowerFirst);
    let grinder = Grinder::new(&model, config);
    let offsets = grinder.offsets().unwrap();
    let slope = offsets.get("b-slope").unwrap();
    let finance = offsets.get("b-finance").unwrap();
    let proper = offsets.get("b-proper").unwrap();

    assert_eq!(
        sense_index(&grinder),
        format!(
            "bank%1:14:00:: {finance:08} 1 20\n\
             Bank%1:14:02:: {proper:08} 3 0\n\
             bank%1:17:01:: {slope:08} 2 0\n"
        )
    );
}

#[test]
fn test_sense_numbers_no_reindex() {
    let model = bank_model();
    let grinder = Grinder::new(&model, GrindConfig::new(Flags::NO_REINDEX));
    let offsets = grinder.offsets().unwrap();
    let slope = offsets.get("b-slope").unwrap();
    let finance = offsets.get("b-finance").unwrap();
    let proper = offsets.get("b-proper").unwrap();

    assert_eq!(
        sense_index(&grinder),
        format!(
            "bank%1:14:00:: {finance:08} 2 20\n\
             Bank%1:14:02:: {proper:08} 1 0\n\
             bank%1:17:01:: {slope:08} 1 0\n"
        )
    );
}

#[test]
fn test_sense_numbers_legacy_order() {
    let model = bank_model();
    let legacy = LegacyOrder::from_reader(include_str!("./resources/bank.order").as_bytes()).unwrap();
    assert_eq!(legacy.len(), 1);

    let grinder = Grinder::new(&model, GrindConfig::default()).legacy_order(legacy);
    let offsets = grinder.offsets().unwrap();
    let slope = offsets.get("b-slope").unwrap();
    let finance = offsets.get("b-finance").unwrap();
    let proper = offsets.get("b-proper").unwrap();

    assert_eq!(
        index_line(&grinder),
        format!("bank n 3 0 3 1 {finance:08} {slope:08} {proper:08}  ")
    );
}
