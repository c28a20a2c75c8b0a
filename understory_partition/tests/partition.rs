// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `understory_partition`.
//!
//! These run whole batches through `run` and check the emitted descriptors,
//! viewports and color fallbacks together.

use std::f64::consts::{FRAC_PI_2, TAU};

use understory_partition::{
    ColorMap, DiagnosticLog, EMPTY_CATEGORY, EMPTY_DEFAULT_COLOR, PartitionConfig,
    PartitionDatum, Shape, ShapeDescriptor, layout, run, run_with_diagnostics,
};

fn sample() -> PartitionDatum {
    PartitionDatum::branch(
        "root",
        [PartitionDatum::leaf("a", 1.0), PartitionDatum::leaf("b", 3.0)],
    )
}

fn wide_and_deep() -> PartitionDatum {
    let mut children = Vec::new();
    for i in 0..6_u32 {
        let grandchildren = (0..i).map(|j| PartitionDatum::leaf("leaf", f64::from(j)));
        children.push(
            PartitionDatum::branch("group", grandchildren).with_size(f64::from(i % 2)),
        );
    }
    PartitionDatum::branch("root", children)
}

#[test]
fn linear_scenario_geometry() {
    let mut config = PartitionConfig::new(Shape::Linear, 100.0, 10.0)
        .with_colors(ColorMap::new().with("a", "#ff0000").with("b", "#00ff00"))
        .with_tree(sample());
    let results = run(&mut config);

    let rects: Vec<_> = results[0]
        .nodes
        .iter()
        .map(|n| {
            let r = n.as_rect().unwrap();
            (r.x, r.y, r.width, r.height)
        })
        .collect();
    assert_eq!(
        rects,
        [
            (0.0, 0.0, 100.0, 6.0),
            (0.0, 0.0, 25.0, 6.0),
            (25.0, 0.0, 75.0, 6.0)
        ]
    );
    assert_eq!(results[0].viewport.to_string(), "0 0 100 6");
}

#[test]
fn angular_scenario_geometry() {
    let tree = sample();
    let nodes = layout(&tree, Shape::Angular, 100.0, 100.0);
    assert!((nodes[0].interval_end - TAU).abs() < 1e-9);
    assert!((nodes[1].interval_end - FRAC_PI_2).abs() < 1e-9);
    assert_eq!(nodes[1].depth, 1);
    assert_eq!(nodes[2].depth, 1);
    assert_eq!(nodes[1].secondary_start, nodes[2].secondary_start);

    let mut config = PartitionConfig::new(Shape::Angular, 100.0, 100.0).with_tree(tree);
    let results = run(&mut config);
    assert_eq!(results[0].shape_kind, Shape::Angular);
    assert_eq!(results[0].nodes.len(), 2);

    let b = results[0].nodes[1].as_arc().unwrap();
    assert!((b.sector.start_angle - FRAC_PI_2).abs() < 1e-9);
    assert!((b.sector.end_angle - TAU).abs() < 1e-9);
    assert_eq!(
        b.path_data,
        "M0 50A50 50 0 1 1 50 0L47.5 0A47.5 47.5 0 1 0 0 47.5Z"
    );
}

#[test]
fn color_fallback_scenario() {
    let mut colors = ColorMap::new().with("a", "#ff0000");
    let mut log = DiagnosticLog::new();

    assert_eq!(colors.resolve_with("b", &mut log), EMPTY_DEFAULT_COLOR);
    assert_eq!(log.len(), 1);
    assert_eq!(colors.get(EMPTY_CATEGORY), Some(EMPTY_DEFAULT_COLOR));
    assert!(!colors.contains("b"));
}

#[test]
fn configured_empty_color_does_not_replace_the_fallback() {
    let tree = PartitionDatum::branch(
        "root",
        [PartitionDatum::leaf("empty", 1.0), PartitionDatum::leaf("b", 1.0)],
    );
    let mut config = PartitionConfig::new(Shape::Linear, 100.0, 10.0)
        .with_colors(
            ColorMap::new()
                .with("root", "#000000")
                .with(EMPTY_CATEGORY, "#123456"),
        )
        .with_tree(tree);
    let mut log = DiagnosticLog::new();
    let results = run_with_diagnostics(&mut config, &mut log);

    let fills: Vec<_> = results[0].nodes.iter().map(ShapeDescriptor::fill).collect();
    assert_eq!(fills, ["#000000", "#123456", EMPTY_DEFAULT_COLOR]);
    assert_eq!(log.unknown_categories().collect::<Vec<_>>(), ["b"]);
}

#[test]
fn runs_are_idempotent() {
    let base = PartitionConfig::new(Shape::Angular, 240.0, 240.0)
        .with_colors(ColorMap::new().with("group", "#336699"))
        .with_tree(wide_and_deep())
        .with_tree(sample());

    let mut first_config = base.clone();
    let first = run(&mut first_config);
    let healed = first_config.clone();
    let second = run(&mut first_config);
    assert_eq!(first, second);
    assert_eq!(first_config, healed);

    let mut fresh = base;
    assert_eq!(run(&mut fresh), first);
}

#[test]
fn order_matches_level_order_walk() {
    let tree = wide_and_deep();
    let nodes = layout(&tree, Shape::Linear, 600.0, 10.0);

    let mut expected = vec![("root", 0)];
    expected.extend(tree.children.iter().map(|c| (c.name.as_str(), 1)));
    for child in &tree.children {
        expected.extend(child.children.iter().map(|c| (c.name.as_str(), 2)));
    }
    let actual: Vec<_> = nodes.iter().map(|n| (n.category(), n.depth)).collect();
    assert_eq!(actual, expected);
    assert_eq!(nodes.len(), tree.node_count());
}

#[test]
fn weight_is_conserved_at_every_level() {
    let tree = wide_and_deep();
    for shape in [Shape::Linear, Shape::Angular] {
        let nodes = layout(&tree, shape, 600.0, 600.0);
        for (index, node) in nodes.iter().enumerate() {
            let widths: Vec<f64> = nodes
                .iter()
                .filter(|n| n.parent == Some(index))
                .map(|n| n.interval_width())
                .collect();
            if widths.is_empty() {
                continue;
            }
            let sum: f64 = widths.iter().sum();
            assert!(
                (sum - node.interval_width()).abs() < 1e-9,
                "{shape}: node {index} width {} vs children {sum}",
                node.interval_width()
            );
        }
    }
}

#[test]
fn zero_weight_children_split_evenly() {
    // Group 0 has no children; group 1 has one leaf of weight 0.
    let tree = wide_and_deep();
    let nodes = layout(&tree, Shape::Linear, 600.0, 10.0);
    let group1 = &nodes[2];
    let only_child = nodes.iter().find(|n| n.parent == Some(2)).unwrap();
    assert_eq!(only_child.interval(), group1.interval());
}

#[test]
fn every_descriptor_has_a_parseable_fill() {
    let mut config = PartitionConfig::new(Shape::Linear, 600.0, 10.0)
        .with_colors(ColorMap::new().with("root", "rebeccapurple").with("leaf", "#0a0b0c"))
        .with_tree(wide_and_deep());
    let mut log = DiagnosticLog::new();
    let results = run_with_diagnostics(&mut config, &mut log);

    for node in &results[0].nodes {
        assert!(node.fill_color().is_ok(), "unparseable fill {}", node.fill());
    }
    assert_eq!(log.unknown_categories().collect::<Vec<_>>(), ["group"]);
}

#[test]
fn arc_descriptor_geometry_matches_path_data() {
    use kurbo::Shape as _;

    let mut config = PartitionConfig::new(Shape::Angular, 100.0, 100.0).with_tree(sample());
    let results = run(&mut config);
    let ShapeDescriptor::Arc(a) = &results[0].nodes[0] else {
        panic!("expected an arc");
    };
    let bbox = a.sector.to_path(1e-3).bounding_box();
    assert!((bbox.x1 - 50.0).abs() < 1e-2);
    assert!((bbox.y1 - 50.0).abs() < 1e-2);

    // The -90 degree rotation moves angle 0 to the top.
    let top = a.transform_affine() * kurbo::Point::new(50.0, 0.0);
    assert!(top.x.abs() < 1e-9 && (top.y + 50.0).abs() < 1e-9);
}

#[cfg(feature = "serde")]
mod serde_io {
    use super::*;

    #[test]
    fn deserializes_host_message() {
        let json = r##"{
            "colorMap": {"a": "#ff0000", "b": "#0000ff"},
            "data": [
                {"name": "root", "children": [
                    {"name": "a", "size": 1},
                    {"name": "b", "size": 3, "extra": true}
                ]}
            ],
            "shape": "path",
            "width": 100,
            "height": 100
        }"##;
        let mut config: PartitionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shape, Shape::Angular);
        assert_eq!(config.data[0].children[1].size, Some(3.0));
        assert!(config.data[0].children[0].children.is_empty());
        assert_eq!(config.params.rect_stroke, 6.0);

        let results = run(&mut config);
        assert_eq!(results[0].nodes.len(), 2);
    }

    #[test]
    fn serializes_result_in_host_shape() {
        let mut config = PartitionConfig::new(Shape::Linear, 100.0, 10.0)
            .with_colors(ColorMap::new().with("a", "#ff0000"))
            .with_tree(PartitionDatum::branch("a", [PartitionDatum::leaf("a", 1.0)]));
        let results = run(&mut config);
        let value = serde_json::to_value(&results[0]).unwrap();

        assert_eq!(value["tag"], "rect");
        assert_eq!(value["viewBox"], "0 0 100 6");
        assert_eq!(value["nodes"][1]["width"], 100.0);
        assert_eq!(value["nodes"][1]["fill"], "#ff0000");

        let mut config = PartitionConfig::new(Shape::Angular, 100.0, 100.0)
            .with_tree(PartitionDatum::branch("a", [PartitionDatum::leaf("a", 1.0)]));
        let results = run(&mut config);
        let value = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(value["tag"], "path");
        assert_eq!(value["nodes"][0]["transform"], "rotate(-90)");
        assert!(value["nodes"][0]["d"].as_str().unwrap().starts_with('M'));
        assert!(value["nodes"][0].get("sector").is_none());
    }

    #[test]
    fn accepts_descriptive_shape_names_and_params() {
        let json = r#"{
            "data": [{"name": "x", "size": 2}],
            "shape": "linear",
            "width": 10,
            "height": 10,
            "params": {"rectStroke": 3}
        }"#;
        let mut config: PartitionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shape, Shape::Linear);
        assert_eq!(config.params.rect_stroke, 3.0);
        assert_eq!(config.params.inner_radius_scale, 1.9);

        let results = run(&mut config);
        assert_eq!(results[0].viewport.to_string(), "0 0 10 3");
    }
}
