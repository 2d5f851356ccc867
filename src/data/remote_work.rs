//! Embedded "Working From Home" survey used by the treemaps.

use crate::core::HierarchyNode;

pub const ROOT_NAME: &str = "Working From Home";
pub const ADVANTAGES: &str = "Advantages";
pub const DISADVANTAGES: &str = "Disadvantages";

const ADVANTAGE_ITEMS: [(&str, f64); 9] = [
    ("Improved work life balance", 78.0),
    ("Fewer distractions", 53.0),
    ("Quicker to complete work", 52.0),
    ("Improved wellbeing", 47.0),
    ("Easier to think of new ideas", 16.0),
    ("Easier to work with others", 12.0),
    ("Other, please specify", 11.0),
    ("No benefit", 8.0),
    ("More jobs", 7.0),
];

const DISADVANTAGE_ITEMS: [(&str, f64); 9] = [
    ("Harder to work with others", 48.0),
    ("No disadvantages", 31.0),
    ("More distractions", 26.0),
    ("Reduced wellbeing", 19.0),
    ("Fewer new ideas", 15.0),
    ("Other, please specify", 10.0),
    ("Reduced work life balance", 9.0),
    ("Slower to complete work", 9.0),
    ("Fewer jobs", 5.0),
];

/// Full two-level dataset: root → {Advantages, Disadvantages} → items.
#[must_use]
pub fn dataset() -> HierarchyNode {
    HierarchyNode::branch(ROOT_NAME, vec![advantages(), disadvantages()])
}

#[must_use]
pub fn advantages() -> HierarchyNode {
    group(ADVANTAGES, &ADVANTAGE_ITEMS)
}

#[must_use]
pub fn disadvantages() -> HierarchyNode {
    group(DISADVANTAGES, &DISADVANTAGE_ITEMS)
}

fn group(name: &str, items: &[(&str, f64)]) -> HierarchyNode {
    HierarchyNode::branch(
        name,
        items
            .iter()
            .map(|&(item, value)| HierarchyNode::leaf(item, value))
            .collect(),
    )
}
