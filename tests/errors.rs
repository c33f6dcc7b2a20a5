//! Integrity errors abort the conversion with no partial output.

use sekai_rs::prelude::*;

fn convert(entities: Vec<RawEntity>) -> Result<ConvertOutput, ConvertError> {
    LevelData::from_extended(&ExtendedLevelData::new(0.0, entities))
}

fn guide_at_origin() -> RawEntity {
    let mut entity = RawEntity::new("Guide");
    for prefix in ["start", "head", "tail", "end"] {
        entity = entity
            .with(format!("{prefix}Beat"), 0.0)
            .with(format!("{prefix}Lane"), 0.0)
            .with(format!("{prefix}Size"), 1.0)
            .with(format!("{prefix}TimeScaleGroup"), -1.0);
    }
    entity
}

#[test]
fn missing_required_field() {
    let result = convert(vec![RawEntity::new("#BPM_CHANGE").with("#BEAT", 0.0)]);
    assert!(matches!(
        result,
        Err(ConvertError::MissingField { field: "#BPM", .. })
    ));

    let result = convert(vec![RawEntity::new("NormalTapNote").with("lane", 1.0)]);
    assert!(matches!(
        result,
        Err(ConvertError::MissingField { field: "#BEAT", .. })
    ));
}

#[test]
fn connector_ease_is_required() {
    let result = convert(vec![
        RawEntity::new("NormalSlideStartNote").with("#BEAT", 0.0),
        RawEntity::new("NormalSlideEndNote").with("#BEAT", 4.0),
        RawEntity::new("NormalSlideConnector")
            .with("head", 0.0)
            .with("tail", 1.0)
            .with("start", 0.0)
            .with("end", 1.0),
    ]);
    assert!(matches!(
        result,
        Err(ConvertError::MissingField { field: "ease", .. })
    ));
}

#[test]
fn textual_value_where_number_required() {
    let result = convert(vec![
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", "zero")
            .with("#BPM", 120.0),
    ]);
    assert!(matches!(
        result,
        Err(ConvertError::NonNumericField { field: "#BEAT", .. })
    ));
}

#[test]
fn non_finite_value_is_rejected() {
    let result = convert(vec![
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", 0.0)
            .with("#BPM", f64::NAN),
    ]);
    assert!(matches!(
        result,
        Err(ConvertError::NonFiniteField { field: "#BPM", .. })
    ));
}

#[test]
fn dangling_note_reference() {
    let result = convert(vec![
        RawEntity::new("NormalSlideStartNote").with("#BEAT", 0.0),
        RawEntity::new("NormalSlideConnector")
            .with("head", 0.0)
            .with("tail", 7.0)
            .with("start", 0.0)
            .with("end", 7.0)
            .with("ease", 0.0),
    ]);
    assert!(matches!(result, Err(ConvertError::UnresolvedNote(7))));

    let result = convert(vec![
        RawEntity::new("NormalTapNote").with("#BEAT", 0.0),
        RawEntity::new("SimLine").with("a", 0.0).with("b", 3.0),
    ]);
    assert!(matches!(result, Err(ConvertError::UnresolvedNote(3))));
}

#[test]
fn dangling_connector_reference() {
    let result = convert(vec![
        RawEntity::new("NormalAttachedSlideTickNote")
            .with("#BEAT", 1.0)
            .with("attach", 5.0),
    ]);
    assert!(matches!(result, Err(ConvertError::UnresolvedConnector(5))));

    let result = convert(vec![
        RawEntity::new("NormalSlideStartNote")
            .with("#BEAT", 1.0)
            .with("slide", 2.0),
    ]);
    assert!(matches!(result, Err(ConvertError::UnresolvedConnector(2))));
}

#[test]
fn chain_index_out_of_bounds() {
    let result = convert(vec![RawEntity::new("TimeScaleGroup").with("first", 99.0)]);
    assert!(matches!(
        result,
        Err(ConvertError::EntityIndexOutOfBounds(99))
    ));
}

#[test]
fn cyclic_chain_is_detected() {
    let result = convert(vec![
        RawEntity::new("TimeScaleGroup").with("first", 1.0),
        RawEntity::new("TimeScaleChange")
            .with("#BEAT", 0.0)
            .with("timeScale", 1.0)
            .with("next", 2.0),
        RawEntity::new("TimeScaleChange")
            .with("#BEAT", 2.0)
            .with("timeScale", 1.0)
            .with("next", 1.0),
    ]);
    assert!(matches!(result, Err(ConvertError::TimescaleChainCycle(0))));
}

#[test]
fn out_of_table_codes_are_rejected() {
    let result = convert(vec![
        RawEntity::new("NormalFlickNote")
            .with("#BEAT", 0.0)
            .with("direction", 2.0),
    ]);
    assert!(matches!(result, Err(ConvertError::InvalidDirection(2))));

    let result = convert(vec![
        RawEntity::new("NormalSlideStartNote").with("#BEAT", 0.0),
        RawEntity::new("NormalSlideEndNote").with("#BEAT", 4.0),
        RawEntity::new("NormalSlideConnector")
            .with("head", 0.0)
            .with("tail", 1.0)
            .with("start", 0.0)
            .with("end", 1.0)
            .with("ease", 3.0),
    ]);
    assert!(matches!(result, Err(ConvertError::InvalidEase(3))));

    let result = convert(vec![guide_at_origin().with("fade", 5.0)]);
    assert!(matches!(result, Err(ConvertError::InvalidFade(5))));

    let result = convert(vec![guide_at_origin().with("color", 9.0)]);
    assert!(matches!(result, Err(ConvertError::InvalidColor(9))));
}
