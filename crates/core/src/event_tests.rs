use super::*;

#[test]
fn event_type_wire_tags_match_spec_closed_set() {
    let expected = [
        (EventType::Execution, "execution"),
        (EventType::Publish, "publish"),
        (EventType::Deploy, "deploy"),
        (EventType::Discovery, "discovery"),
        (EventType::PipelineStarted, "pipeline_started"),
        (EventType::PipelineStepStarted, "pipeline_step_started"),
        (EventType::PipelineStepCompleted, "pipeline_step_completed"),
        (EventType::PipelineStepFailed, "pipeline_step_failed"),
        (EventType::PipelineCompleted, "pipeline_completed"),
        (EventType::PipelineFailed, "pipeline_failed"),
    ];
    for (variant, tag) in expected {
        assert_eq!(variant.as_str(), tag);
        let json = serde_json::to_string(&variant).unwrap();
        assert_eq!(json, format!("\"{tag}\""));
    }
}

#[test]
fn event_round_trips_through_json() {
    let event = Event {
        id: 7,
        event_type: EventType::PipelineCompleted,
        data: serde_json::json!({"pipeline_id": "p1"}),
        created_at: "2026-01-01 00:00:00".to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}
