//! End-to-end conversion behavior: ordering, determinism, pass-through.

use pretty_assertions::assert_eq;
use sekai_rs::prelude::*;

fn convert(entities: Vec<RawEntity>) -> ConvertOutput {
    LevelData::from_extended(&ExtendedLevelData::new(0.0, entities)).expect("well-formed chart")
}

#[test]
fn empty_chart_yields_initialization_only() {
    let output = convert(vec![]);
    assert_eq!(output.level_data.entities, vec![Entity::Initialization]);
    assert_eq!(output.warnings, vec![]);
}

#[test]
fn single_bpm_change() {
    let output = convert(vec![
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", 0.0)
            .with("#BPM", 120.0),
    ]);
    assert_eq!(
        output.level_data.entities,
        vec![
            Entity::Initialization,
            Entity::BpmChange(BpmChange {
                beat: FinF64::new(0.0).expect("finite"),
                bpm: FinF64::new(120.0).expect("finite"),
            }),
        ]
    );
}

#[test]
fn bgm_offset_passes_through_unchanged() {
    let data = ExtendedLevelData::new(-0.375, vec![]);
    let output = LevelData::from_extended(&data).expect("well-formed chart");
    assert_eq!(output.level_data.bgm_offset, -0.375);
}

#[test]
fn entities_are_sorted_by_beat_with_initialization_pinned() {
    let output = convert(vec![
        RawEntity::new("NormalTapNote").with("#BEAT", 8.0),
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", 0.0)
            .with("#BPM", 160.0),
        RawEntity::new("CriticalTapNote").with("#BEAT", 2.0),
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", 4.0)
            .with("#BPM", 80.0),
    ]);
    let entities = &output.level_data.entities;
    assert!(matches!(entities[0], Entity::Initialization));
    let beats: Vec<f64> = entities[1..]
        .iter()
        .map(|entity| entity.beat().map_or(-1.0, FinF64::as_f64))
        .collect();
    let mut sorted = beats.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(beats, sorted);
}

#[test]
fn untimed_entities_sort_before_timed_ones() {
    // A slide connector has no beat of its own and sorts as beat -1.
    let output = convert(vec![
        RawEntity::new("NormalSlideStartNote").with("#BEAT", 0.0),
        RawEntity::new("NormalSlideEndNote").with("#BEAT", 4.0),
        RawEntity::new("NormalSlideConnector")
            .with("head", 0.0)
            .with("tail", 1.0)
            .with("start", 0.0)
            .with("end", 1.0)
            .with("ease", 0.0),
    ]);
    let entities = &output.level_data.entities;
    assert!(matches!(entities[0], Entity::Initialization));
    assert!(matches!(entities[1], Entity::Connector(_)));
    assert!(matches!(entities[2], Entity::Note(_)));
}

#[test]
fn conversion_is_deterministic() {
    let entities = vec![
        RawEntity::new("#BPM_CHANGE")
            .with("#BEAT", 0.0)
            .with("#BPM", 120.0),
        RawEntity::new("TimeScaleGroup").with("first", 2.0),
        RawEntity::new("TimeScaleChange")
            .with("#BEAT", 0.0)
            .with("timeScale", 1.5),
        RawEntity::new("NormalTapNote")
            .with("#BEAT", 1.0)
            .with("lane", -2.0)
            .with("size", 1.5)
            .with("timeScaleGroup", 1.0),
        RawEntity::new("CriticalTapNote").with("#BEAT", 1.0).with("lane", 2.0),
        RawEntity::new("SimLine").with("a", 3.0).with("b", 4.0),
        RawEntity::new("Guide")
            .with("startBeat", 0.0)
            .with("startLane", 0.0)
            .with("startSize", 1.0)
            .with("startTimeScaleGroup", 1.0)
            .with("headBeat", 0.0)
            .with("headLane", 0.0)
            .with("headSize", 1.0)
            .with("headTimeScaleGroup", 1.0)
            .with("tailBeat", 2.0)
            .with("tailLane", 1.0)
            .with("tailSize", 1.0)
            .with("tailTimeScaleGroup", 1.0)
            .with("endBeat", 2.0)
            .with("endLane", 1.0)
            .with("endSize", 1.0)
            .with("endTimeScaleGroup", 1.0),
    ];
    let data = ExtendedLevelData::new(0.25, entities);
    let first = LevelData::from_extended(&data).expect("well-formed chart");
    let second = LevelData::from_extended(&data).expect("well-formed chart");
    assert_eq!(first, second);
}

#[test]
fn try_from_discards_warnings() {
    let data = ExtendedLevelData::new(
        0.0,
        vec![
            RawEntity::new("#BPM_CHANGE")
                .with("#BEAT", 0.0)
                .with("#BPM", 120.0),
        ],
    );
    let level_data = LevelData::try_from(data).expect("well-formed chart");
    assert_eq!(level_data.entities.len(), 2);
}
