use approx::assert_relative_eq;
use survey_charts::ChartError;
use survey_charts::core::{
    Hierarchy, HierarchyNode, Lcg, PackLayout, PackedCircle, TreemapLayout, enclose,
    pack_siblings,
};
use survey_charts::data::remote_work;

fn names(hierarchy: &Hierarchy, ids: &[usize]) -> Vec<String> {
    ids.iter()
        .map(|&id| hierarchy.entry(id).name.clone())
        .collect()
}

#[test]
fn hierarchy_sums_values_bottom_up() {
    let hierarchy = Hierarchy::from_node(&remote_work::dataset()).expect("valid hierarchy");

    let root = hierarchy.entry(hierarchy.root());
    assert_relative_eq!(root.value, 456.0);
    assert_eq!(root.children.len(), 2);
    assert_relative_eq!(hierarchy.entry(root.children[0]).value, 284.0);
    assert_relative_eq!(hierarchy.entry(root.children[1]).value, 172.0);
    assert_eq!(hierarchy.leaves().len(), 18);
}

#[test]
fn hierarchy_sort_is_descending_and_stable() {
    let node = HierarchyNode::branch(
        "root",
        vec![
            HierarchyNode::leaf("a", 1.0),
            HierarchyNode::leaf("b", 3.0),
            HierarchyNode::leaf("c", 3.0),
            HierarchyNode::leaf("d", 2.0),
        ],
    );
    let mut hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    hierarchy.sort_by_value_desc();

    assert_eq!(names(&hierarchy, &hierarchy.leaves()), vec!["b", "c", "d", "a"]);
}

#[test]
fn hierarchy_reports_parent_names_and_depths() {
    let hierarchy = Hierarchy::from_node(&remote_work::advantages()).expect("valid hierarchy");

    let leaves = hierarchy.leaves();
    assert_eq!(leaves.len(), 9);
    for id in leaves {
        assert_eq!(hierarchy.parent_name(id), Some(remote_work::ADVANTAGES));
        assert_eq!(hierarchy.entry(id).depth, 1);
    }
    assert_eq!(hierarchy.parent_name(hierarchy.root()), None);
}

#[test]
fn hierarchy_post_order_visits_children_first() {
    let hierarchy = Hierarchy::from_node(&remote_work::dataset()).expect("valid hierarchy");

    let order = hierarchy.post_order();
    assert_eq!(order.len(), hierarchy.len());
    assert_eq!(order.last().copied(), Some(hierarchy.root()));
    for (position, &id) in order.iter().enumerate() {
        for child in &hierarchy.entry(id).children {
            let child_position = order
                .iter()
                .position(|candidate| candidate == child)
                .expect("child visited");
            assert!(child_position < position);
        }
    }
}

#[test]
fn hierarchy_rejects_negative_values() {
    let node = HierarchyNode::branch("root", vec![HierarchyNode::leaf("bad", -1.0)]);
    let err = Hierarchy::from_node(&node).expect_err("negative value must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn lcg_sequence_is_deterministic() {
    let mut random = Lcg::default();
    let first = random.next_unit();
    assert_relative_eq!(first, 1_015_568_748.0 / 4_294_967_296.0);

    let mut again = Lcg::default();
    assert_eq!(again.next_unit(), first);
}

#[test]
fn pack_siblings_places_unit_circles_tangent() {
    let mut circles = vec![PackedCircle::new(0.0, 0.0, 1.0); 3];
    let radius = pack_siblings(&mut circles, &mut Lcg::default()).expect("packed");

    assert_relative_eq!(radius, 1.0 + 2.0 / 3f64.sqrt(), epsilon = 1e-6);
    for i in 0..circles.len() {
        for j in i + 1..circles.len() {
            let distance = (circles[i].x - circles[j].x).hypot(circles[i].y - circles[j].y);
            assert_relative_eq!(distance, 2.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn pack_siblings_handles_one_and_two_circles() {
    let mut single = vec![PackedCircle::new(5.0, 5.0, 3.0)];
    let radius = pack_siblings(&mut single, &mut Lcg::default()).expect("packed");
    assert_relative_eq!(radius, 3.0);
    assert_eq!((single[0].x, single[0].y), (0.0, 0.0));

    let mut pair = vec![PackedCircle::new(0.0, 0.0, 2.0), PackedCircle::new(0.0, 0.0, 1.0)];
    let radius = pack_siblings(&mut pair, &mut Lcg::default()).expect("packed");
    assert_relative_eq!(radius, 3.0);
    assert_relative_eq!(pair[1].x - pair[0].x, 3.0);
}

#[test]
fn enclose_of_single_circle_is_itself() {
    let circle = PackedCircle::new(4.0, -2.0, 1.5);
    let enclosing = enclose(&[circle], &mut Lcg::default()).expect("enclosed");
    assert_eq!(enclosing, circle);

    assert!(enclose(&[], &mut Lcg::default()).is_err());
}

#[test]
fn enclose_covers_every_input_circle() {
    let circles = [
        PackedCircle::new(0.0, 0.0, 1.0),
        PackedCircle::new(5.0, 0.0, 2.0),
        PackedCircle::new(2.0, 4.0, 0.5),
        PackedCircle::new(-1.0, 3.0, 1.0),
    ];
    let enclosing = enclose(&circles, &mut Lcg::default()).expect("enclosed");

    for circle in circles {
        let distance = (circle.x - enclosing.x).hypot(circle.y - enclosing.y);
        assert!(distance + circle.r <= enclosing.r + 1e-6);
    }
}

#[test]
fn pack_layout_centers_single_leaf() {
    let node = HierarchyNode::branch("", vec![HierarchyNode::leaf("X", 50.0)]);
    let hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    let circles = PackLayout::new(1160.0, 570.0)
        .with_padding(25.0)
        .layout(&hierarchy)
        .expect("layout");

    let root = circles[hierarchy.root()];
    assert_relative_eq!(root.r, 285.0, epsilon = 1e-9);

    let leaf = circles[hierarchy.leaves()[0]];
    assert_relative_eq!(leaf.x, 580.0, epsilon = 1e-9);
    assert_relative_eq!(leaf.y, 285.0, epsilon = 1e-9);
    assert!(leaf.r > 0.0 && leaf.r < 285.0);
}

#[test]
fn pack_layout_rejects_zero_total() {
    let node = HierarchyNode::branch("", vec![HierarchyNode::leaf("none", 0.0)]);
    let hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    let err = PackLayout::new(100.0, 100.0)
        .layout(&hierarchy)
        .expect_err("zero total must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn pack_layout_is_deterministic() {
    let node = HierarchyNode::branch(
        "",
        (1..=8)
            .map(|i| HierarchyNode::leaf(format!("c{i}"), f64::from(i * 7 % 11 + 1)))
            .collect(),
    );
    let hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    let layout = PackLayout::new(800.0, 600.0).with_padding(10.0);

    let first = layout.layout(&hierarchy).expect("layout");
    let second = layout.layout(&hierarchy).expect("layout");
    assert_eq!(first, second);
}

#[test]
fn treemap_single_leaf_is_inset_by_padding() {
    let node = HierarchyNode::branch("group", vec![HierarchyNode::leaf("only", 10.0)]);
    let hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    let cells = TreemapLayout::new(1160.0, 640.0)
        .with_padding(4.0)
        .layout(&hierarchy)
        .expect("layout");

    let leaf = cells[hierarchy.leaves()[0]];
    assert_relative_eq!(leaf.x0, 4.0);
    assert_relative_eq!(leaf.y0, 4.0);
    assert_relative_eq!(leaf.x1, 1156.0);
    assert_relative_eq!(leaf.y1, 636.0);
}

#[test]
fn treemap_splits_equal_children_along_long_side() {
    let node = HierarchyNode::branch(
        "group",
        vec![HierarchyNode::leaf("a", 1.0), HierarchyNode::leaf("b", 1.0)],
    );
    let hierarchy = Hierarchy::from_node(&node).expect("valid hierarchy");
    let cells = TreemapLayout::new(200.0, 100.0)
        .layout(&hierarchy)
        .expect("layout");

    let leaves = hierarchy.leaves();
    let a = cells[leaves[0]];
    let b = cells[leaves[1]];
    assert_relative_eq!(a.x0, 0.0);
    assert_relative_eq!(a.x1, 100.0);
    assert_relative_eq!(b.x0, 100.0);
    assert_relative_eq!(b.x1, 200.0);
    assert_relative_eq!(a.area(), b.area());
}

#[test]
fn treemap_rejects_invalid_size() {
    let hierarchy = Hierarchy::from_node(&remote_work::advantages()).expect("valid hierarchy");
    assert!(TreemapLayout::new(0.0, 100.0).layout(&hierarchy).is_err());
}
