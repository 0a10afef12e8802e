use trace_timeline::calltree::{build_call_tree, Event, TreeBuilder};
use trace_timeline::parser::{EventKind, TraceRecord};
use trace_timeline::utils::config::LEAF_EPSILON;
use trace_timeline::utils::{TraceAnomaly, TreeError};

fn balanced_stream() -> Vec<TraceRecord> {
    vec![
        TraceRecord::call(0.0, 0, "main.py^1^main"),
        TraceRecord::call(1.0, 1, "main.py^5^parse"),
        TraceRecord::call(1.5, 2, "@len"),
        TraceRecord::ret(1.6, 2, "@len"),
        TraceRecord::ret(4.0, 1, "main.py^5^parse"),
        TraceRecord::call(4.0, 1, "main.py^9^render"),
        TraceRecord::call(5.0, 2, "dict@get"),
        TraceRecord::ret(6.0, 2, "dict@get"),
        TraceRecord::call(6.5, 2, "dict@get"),
        TraceRecord::ret(7.0, 2, "dict@get"),
        TraceRecord::ret(9.0, 1, "main.py^9^render"),
        TraceRecord::ret(12.0, 0, "main.py^1^main"),
    ]
}

fn assert_nested(event: &Event) {
    for child in event.children() {
        assert!(child.start() >= event.start(), "{} starts before parent", child.name());
        assert!(child.end() <= event.end(), "{} ends after parent", child.name());
        assert_eq!(child.level(), event.level() + 1);
        assert_nested(child);
    }
}

#[test]
fn test_balanced_stream_root_spans_trace() {
    let records = balanced_stream();
    let tree = build_call_tree(&records).unwrap();

    assert_eq!(tree.root.name(), "main");
    assert_eq!(tree.root.start(), 0.0);
    assert_eq!(tree.root.end(), records.last().unwrap().timestamp);
    assert!(tree.anomalies.is_empty());
    assert_nested(&tree.root);
}

#[test]
fn test_children_in_call_order() {
    let tree = build_call_tree(&balanced_stream()).unwrap();

    let names: Vec<&str> = tree.root.children().iter().map(Event::name).collect();
    assert_eq!(names, vec!["parse", "render"]);

    let render = &tree.root.children()[1];
    let starts: Vec<f64> = render.children().iter().map(Event::start).collect();
    assert_eq!(starts, vec![5.0, 6.5]);
}

#[test]
fn test_concrete_two_call_scenario() {
    let records = vec![
        TraceRecord::call(0.0, 0, "a"),
        TraceRecord::call(1.0, 1, "b"),
        TraceRecord::ret(3.0, 1, "b"),
        TraceRecord::ret(5.0, 0, "a"),
    ];
    let tree = build_call_tree(&records).unwrap();

    assert_eq!((tree.root.start(), tree.root.end()), (0.0, 5.0));
    let b = &tree.root.children()[0];
    assert_eq!(b.name(), "b");
    assert_eq!((b.start(), b.end()), (1.0, 3.0));
}

#[test]
fn test_leading_underflow_is_skipped() {
    let mut with_spurious = vec![TraceRecord::ret(0.0, 0, "__enter__")];
    with_spurious.extend(balanced_stream());

    let clean = build_call_tree(&balanced_stream()).unwrap();
    let recovered = build_call_tree(&with_spurious).unwrap();

    assert_eq!(recovered.root, clean.root);
    assert_eq!(
        recovered.anomalies,
        vec![TraceAnomaly::StackUnderflow {
            index: 0,
            name: "__enter__".to_string(),
        }]
    );
}

#[test]
fn test_extra_top_level_call_is_skipped() {
    let mut records = balanced_stream();
    records.push(TraceRecord::call(13.0, 0, "late"));
    records.push(TraceRecord::ret(14.0, 0, "late"));

    let tree = build_call_tree(&records).unwrap();
    assert_eq!(tree.root.name(), "main");
    assert_eq!(tree.root.end(), 12.0);

    assert_eq!(tree.anomalies.len(), 2);
    assert!(matches!(tree.anomalies[0], TraceAnomaly::ExtraTopLevelCall { index: 12, .. }));
    assert!(matches!(tree.anomalies[1], TraceAnomaly::StackUnderflow { index: 13, .. }));
    let indices: Vec<usize> = tree.anomalies.iter().map(TraceAnomaly::index).collect();
    assert_eq!(indices, vec![12, 13]);
}

#[test]
fn test_unterminated_call_ends_with_last_child() {
    let records = vec![
        TraceRecord::call(0.0, 0, "main"),
        TraceRecord::call(1.0, 1, "a"),
        TraceRecord::ret(2.0, 1, "a"),
        TraceRecord::call(3.0, 1, "b"),
        TraceRecord::ret(7.0, 1, "b"),
    ];

    let tree = build_call_tree(&records).unwrap();
    assert_eq!(tree.root.end(), 7.0);
    assert!(tree.anomalies.is_empty());
}

#[test]
fn test_unterminated_leaf_gets_epsilon() {
    let records = vec![
        TraceRecord::call(0.0, 0, "main"),
        TraceRecord::call(2.0, 1, "hang"),
    ];

    let tree = build_call_tree(&records).unwrap();
    let hang = &tree.root.children()[0];
    assert_eq!(hang.end(), 2.0 + LEAF_EPSILON);
    // the root inherits its only child's derived end
    assert_eq!(tree.root.end(), 2.0 + LEAF_EPSILON);
}

#[test]
fn test_unrecognized_kind_reported_not_structural() {
    let records = vec![
        TraceRecord::call(0.0, 0, "main"),
        TraceRecord::new(EventKind::Unrecognized("line".to_string()), 0.5, 1, "main"),
        TraceRecord::ret(1.0, 0, "main"),
    ];

    let tree = build_call_tree(&records).unwrap();
    assert_eq!(tree.root.end(), 1.0);
    assert_eq!(
        tree.anomalies,
        vec![TraceAnomaly::UnrecognizedKind {
            index: 1,
            kind: "line".to_string(),
        }]
    );
    assert_eq!(tree.structural_anomalies().count(), 0);
}

#[test]
fn test_mismatch_does_not_corrupt_siblings() {
    let records = vec![
        TraceRecord::call(0.0, 0, "main"),
        TraceRecord::call(1.0, 1, "a"),
        TraceRecord::ret(2.0, 1, "not_a"),
        TraceRecord::call(3.0, 1, "b"),
        TraceRecord::ret(4.0, 1, "b"),
        TraceRecord::ret(5.0, 0, "main"),
    ];

    let tree = build_call_tree(&records).unwrap();
    let names: Vec<&str> = tree.root.children().iter().map(Event::name).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(tree.structural_anomalies().count(), 1);
}

#[test]
fn test_exception_unwinds_nested_frames() {
    let records = vec![
        TraceRecord::call(0.0, 0, "main"),
        TraceRecord::call(1.0, 1, "outer"),
        TraceRecord::call(2.0, 2, "inner"),
        TraceRecord::exception(3.0, 2, "@int"),
        TraceRecord::exception(3.5, 1, "@int"),
        TraceRecord::ret(6.0, 0, "main"),
    ];

    let tree = build_call_tree(&records).unwrap();
    assert!(tree.anomalies.is_empty());
    let outer = &tree.root.children()[0];
    assert_eq!(outer.end(), 3.5);
    assert_eq!(outer.children()[0].end(), 3.0);
}

#[test]
fn test_only_returns_is_empty_trace() {
    let records = vec![TraceRecord::ret(1.0, 0, "x"), TraceRecord::ret(2.0, 0, "y")];
    assert_eq!(
        build_call_tree(&records).unwrap_err(),
        TreeError::EmptyTrace { skipped: 2 }
    );
}

#[test]
fn test_incremental_builder_matches_batch() {
    let records = balanced_stream();

    let mut builder = TreeBuilder::new();
    for record in &records {
        builder.push(record);
    }
    assert_eq!(builder.depth(), 0);

    let incremental = builder.finish().unwrap();
    assert_eq!(incremental.root, build_call_tree(&records).unwrap().root);
}

#[test]
fn test_descendants_preorder() {
    let tree = build_call_tree(&balanced_stream()).unwrap();
    let names: Vec<&str> = tree.root.descendants().map(Event::name).collect();
    assert_eq!(
        names,
        vec!["main", "parse", "@len", "render", "dict@get", "dict@get"]
    );
}
