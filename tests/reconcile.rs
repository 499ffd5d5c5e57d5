use graphsync::sliders::{GraphSource, MemberStatus, SliderEngine};
use graphsync::{GraphSpec, RawSlider, SyncSession};
use serde_json::json;

fn sources(value: serde_json::Value) -> Vec<GraphSource> {
    serde_json::from_value(value).unwrap()
}

fn radius_sources() -> Vec<GraphSource> {
    sources(json!([
        {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "Radius", "min": 0, "max": 10, "value": 5}]},
        {"graphId": "B", "sliders": [{"nodeId": "n2", "nickName": "radius", "min": 0, "max": 100, "value": 50}]}
    ]))
}

#[test]
fn test_case_insensitive_nicknames_share_a_group() {
    let mut engine = SliderEngine::default();
    engine.reconcile(&radius_sources(), None);

    let groups = engine.list();
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.id, "radius");
    assert_eq!(group.graph_count, 2);
    assert_eq!(group.canonical_source.graph_id, "A");
    assert_eq!((group.min, group.max), (0.0, 10.0));
    assert_eq!(group.members.len(), 2);
    assert!((group.members[1].normalized_value - 5.0).abs() < 1e-12);
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut engine = SliderEngine::default();
    let input = radius_sources();
    engine.reconcile(&input, Some("B"));
    let first = engine.list();
    engine.reconcile(&input, Some("B"));
    assert_eq!(first, engine.list());
}

#[test]
fn test_map_round_trip() {
    let mut engine = SliderEngine::default();
    engine.reconcile(
        &sources(json!([
            {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "Gain", "min": -1, "max": 1, "value": 0}]},
            {"graphId": "B", "sliders": [{"nodeId": "n2", "nickName": "gain", "min": "20", "max": "120", "value": "70"}]}
        ])),
        None,
    );

    for target in [-1.0, -0.35, 0.0, 0.72, 1.0] {
        let result = engine.map_value("gain", target).unwrap();
        let update = result.updates.iter().find(|u| u.graph_id == "B").unwrap();
        let back = -1.0 + (update.value - 20.0) / 100.0 * 2.0;
        assert!((back - target).abs() < 1e-9, "{} mapped to {}", target, update.value);
    }
}

#[test]
fn test_mapping_current_value_returns_member_values() {
    let mut engine = SliderEngine::default();
    engine.reconcile(
        &sources(json!([
            {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "Gain", "min": -1, "max": 1, "value": 0.3}]},
            {"graphId": "B", "sliders": [{"nodeId": "n2", "nickName": "gain", "min": 20, "max": 120, "value": 85}]},
            {"graphId": "C", "sliders": [{"nodeId": "n3", "nickName": "GAIN", "min": 5, "max": 6, "value": 5.65}]}
        ])),
        None,
    );

    let group = engine.get_group("gain").unwrap();
    let result = engine.map_value("gain", group.value).unwrap();
    assert_eq!(result.updates.len(), group.members.len());
    for member in &group.members {
        let update = result
            .updates
            .iter()
            .find(|u| u.graph_id == member.graph_id && u.node_id == member.node_id)
            .unwrap();
        assert!((update.value - member.value).abs() < 1e-9, "{} -> {}", member.value, update.value);
    }
}

#[test]
fn test_malformed_source_does_not_block_good_graphs() {
    let decoded = sources(json!([
        {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "Radius", "min": 0, "max": 10, "value": 5}]},
        {"graphId": "B", "sliders": {"oops": true}},
        {"graphId": "C", "sliders": [{"nodeId": "n3", "nickName": 7, "max": 4}]}
    ]));
    let mut engine = SliderEngine::default();
    engine.reconcile(&decoded, None);

    let radius = engine.get_group("radius").unwrap();
    assert_eq!(radius.members.len(), 1);
    assert_eq!(radius.canonical_source.graph_id, "A");
    assert_eq!(engine.len(), 2);
    assert!(engine.list().iter().all(|g| g.members.iter().all(|m| m.graph_id != "B")));
}

#[test]
fn test_map_clamps_out_of_range_values() {
    let mut engine = SliderEngine::default();
    engine.reconcile(&radius_sources(), None);
    let result = engine.map_value("radius", 42.0).unwrap();
    assert_eq!(result.value, 10.0);
    assert!(result.updates.iter().all(|u| u.value <= 100.0));
}

#[test]
fn test_unnamed_sliders_collide_into_numbered_slugs() {
    let mut engine = SliderEngine::default();
    engine.reconcile(
        &sources(json!([
            {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "   "}, {"nodeId": "n2", "nickName": "!!!"}]}
        ])),
        None,
    );
    let ids = engine.group_ids();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| !id.is_empty()));

    let mut engine = SliderEngine::default();
    engine.reconcile(
        &sources(json!([
            {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "***"}]},
            {"graphId": "B", "sliders": [{"nodeId": "n2", "nickName": "???"}]}
        ])),
        None,
    );
    assert_eq!(engine.group_ids(), vec!["slider".to_string(), "slider-2".to_string()]);
}

#[test]
fn test_malformed_sliders_produce_warnings() {
    let mut engine = SliderEngine::default();
    engine.reconcile(
        &sources(json!([
            {"graphId": "A", "sliders": [{"nodeId": "n1", "nickName": "Depth", "max": "oops", "value": "abc"}]}
        ])),
        None,
    );
    let group = engine.get_group("depth").unwrap();
    assert_eq!((group.min, group.max), (0.0, 10.0));
    assert_eq!(group.value, 0.0);
    assert!(group.has_warnings);
    assert_eq!(group.members[0].status, MemberStatus::Warning);
    assert!(!group.members[0].notes.is_empty());
}

#[test]
fn test_session_keeps_groups_in_sync() {
    let mut session = SyncSession::default();
    let first = session.add_graph(
        GraphSpec::new().with_slider(RawSlider::new("n1").with_nick_name("Width").with_min(0.0).with_max(1.0).with_value(0.5)),
    );
    let second = session.add_graph(
        GraphSpec::new().with_slider(RawSlider::new("n7").with_nick_name("width").with_min(10.0).with_max(20.0).with_value(15.0)),
    );
    assert_ne!(first, second);

    session.set_group_value("width", 0.25).unwrap();
    let group = session.group("width").unwrap();
    assert!((group.value - 0.25).abs() < 1e-12);
    assert!((group.members[1].value - 12.5).abs() < 1e-9);

    session.remove_graph(&first);
    let group = session.group("width").unwrap();
    assert_eq!(group.canonical_source.graph_id, second);
    assert_eq!((group.min, group.max), (10.0, 20.0));
}
