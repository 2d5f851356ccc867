use survey_charts::api::{
    LabelWrapRules, format_named_percent, format_percent, format_value, truncate_category,
    wrap_category_label,
};

#[test]
fn values_print_in_shortest_form() {
    assert_eq!(format_value(47.0), "47");
    assert_eq!(format_value(12.5), "12.5");
    assert_eq!(format_value(-0.0), "0");
    assert_eq!(format_percent(8.0), "8%");
    assert_eq!(format_named_percent("No benefit", 8.0), "No benefit (8%)");
}

#[test]
fn short_categories_are_not_truncated() {
    let rules = LabelWrapRules::default();
    assert_eq!(truncate_category("no benefit", rules), "no benefit");
    assert_eq!(truncate_category("exactly fifteen", rules), "exactly fifteen");
}

#[test]
fn long_categories_keep_twenty_chars_and_an_ellipsis() {
    let rules = LabelWrapRules::default();
    assert_eq!(
        truncate_category("Improved work life balance", rules),
        "Improved work life b..."
    );
    assert_eq!(
        truncate_category("improved wellbeing", rules),
        "improved wellbeing..."
    );
}

#[test]
fn wrap_packs_words_greedily() {
    let rules = LabelWrapRules::default();

    let lines = wrap_category_label("Improved work life balance", rules);
    assert_eq!(lines.as_slice(), ["Improved work", "life b..."]);

    let lines = wrap_category_label("improved wellbeing", rules);
    assert_eq!(lines.as_slice(), ["improved", "wellbeing..."]);

    let lines = wrap_category_label("no benefit", rules);
    assert_eq!(lines.as_slice(), ["no benefit"]);
}

#[test]
fn overlong_word_keeps_its_own_line() {
    let rules = LabelWrapRules::default();
    let lines = wrap_category_label("supercalifragilistic", rules);
    assert_eq!(lines.as_slice(), ["supercalifragilistic..."]);
}

#[test]
fn custom_rules_change_wrapping() {
    let rules = LabelWrapRules {
        wrap_width: 5,
        truncate_threshold: 100,
        truncate_length: 100,
    };
    let lines = wrap_category_label("a bb ccc dddd", rules);
    assert_eq!(lines.as_slice(), ["a bb", "ccc", "dddd"]);
}
