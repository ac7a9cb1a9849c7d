use legend_test_utils::{three_bucket_list, three_bucket_threshold};
use legend_threshold::prelude::*;
use legend_threshold::LegendEntry;
use pretty_assertions::assert_eq;

#[test]
fn three_bucket_list_converts() {
    let t = to_threshold(&three_bucket_list()).unwrap();
    assert_eq!(t, three_bucket_threshold());
}

#[test]
fn classification_at_and_around_breakpoints() {
    let t = to_threshold(&three_bucket_list()).unwrap();

    let low = classify(&t, 30.0);
    assert_eq!((low.bucket_index, low.color.as_str()), (0, "#000"));

    let edge = classify(&t, 40.0);
    assert_eq!((edge.bucket_index, edge.color.as_str()), (1, "#aaa"));

    let high = classify(&t, 80.0);
    assert_eq!((high.bucket_index, high.color.as_str()), (2, "#fff"));
}

#[test]
fn labels_for_three_buckets() {
    let t = to_threshold(&three_bucket_list()).unwrap();
    assert_eq!(labels_for(Some(&t)), vec!["< 40%", "40% - 70%", "> 70%"]);
}

#[test]
fn add_appends_first_palette_color() {
    let config = LegendConfig::default();
    let list = add_boundary(&three_bucket_list(), &config);

    let added = list.last().unwrap();
    assert_eq!(added.upper_bound, 39.0);
    assert_eq!(added.color, config.palette[0]);
    assert_eq!(list.len(), 4);
}

#[test]
fn remove_middle_boundary() {
    let list = remove_boundary(&three_bucket_list(), 1).unwrap();
    assert_eq!(
        list.pairs(),
        vec![(100.0, "#fff".to_string()), (40.0, "#000".to_string())]
    );
}

#[test]
fn absent_threshold_gives_cap_only() {
    let config = LegendConfig::default();
    let list = from_threshold(None, &config);
    assert_eq!(list.pairs(), vec![(100.0, config.fallback_color.clone())]);
}

#[test]
fn persisted_json_drives_rendering() {
    let stored = ScaleThreshold::from_json(
        r##"{"domain":[25,50,75],"range":["#d00","#f80","#fd0","#0a0"]}"##,
    )
    .unwrap();
    assert!(stored.validate().is_ok());

    let config = LegendConfig::default();
    let legend = legend_threshold::legend_entries(&stored, &config);
    assert_eq!(
        legend.last(),
        Some(&LegendEntry {
            label: "> 75%".into(),
            color: "#0a0".into()
        })
    );

    let colors: Vec<String> = [0.0, 25.0, 60.0, 100.0]
        .iter()
        .map(|v| classify(&stored, *v).color)
        .collect();
    assert_eq!(colors, vec!["#d00", "#f80", "#fd0", "#0a0"]);
}

#[test]
fn editing_session_end_to_end() {
    let mut editor = LegendEditor::open(Some(&three_bucket_threshold()), LegendConfig::default());

    let added = editor.add();
    assert_eq!(editor.bounds(3), Some(Bounds { min: 0.0, max: 39.0 }));
    editor.edit_bound(added, 10.0).unwrap();
    editor.edit_color(added, "#333").unwrap();

    let middle = editor.boundaries().get(1).unwrap().id;
    editor.remove(middle).unwrap();

    let committed = editor.commit().unwrap();
    assert_eq!(committed.domain, vec![10.0, 40.0]);
    assert_eq!(committed.range, vec!["#333", "#000", "#fff"]);
    assert_eq!(
        committed.to_json().unwrap(),
        r##"{"domain":[10,40],"range":["#333","#000","#fff"]}"##
    );
}

#[test]
fn stored_or_default_threshold() {
    let config = LegendConfig::default();
    let t = legend_threshold::resolve_threshold(None, &config);
    assert_eq!(t.bucket_count(), 2);
    assert_eq!(classify(t, 75.0).bucket_index, 1);
}
