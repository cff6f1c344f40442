use restyle_core::{extract_specifiers, is_compatible};

#[test]
fn plain_text_has_no_specifiers() {
    assert!(extract_specifiers("no placeholders here").is_empty());
    assert!(extract_specifiers("").is_empty());
}

#[test]
fn extracts_conversions_in_order() {
    assert_eq!(extract_specifiers("Error %d at %s"), vec!["%d", "%s"]);
    assert_eq!(extract_specifiers("%c%c%c"), vec!["%c", "%c", "%c"]);
}

#[test]
fn captures_flags_width_precision_and_length_modifiers() {
    assert_eq!(extract_specifiers("value: %-5.2f"), vec!["%-5.2f"]);
    assert_eq!(extract_specifiers("addr=%08lx"), vec!["%08lx"]);
    assert_eq!(extract_specifiers("%+d and %.3e"), vec!["%+d", "%.3e"]);
}

#[test]
fn escaped_percent_is_not_a_specifier() {
    assert!(extract_specifiers("100%% done").is_empty());
}

#[test]
fn doubling_every_percent_escapes_every_specifier() {
    assert!(extract_specifiers("Error %%d at %%s").is_empty());
    assert!(extract_specifiers("%%-5.2f").is_empty());
}

#[test]
fn triple_percent_is_one_escape_then_a_placeholder() {
    assert_eq!(extract_specifiers("%%%d"), vec!["%d"]);
    assert_eq!(extract_specifiers("progress %%%d%%"), vec!["%d"]);
}

#[test]
fn dangling_percent_yields_nothing() {
    assert!(extract_specifiers("100%").is_empty());
    assert!(extract_specifiers("%!?").is_empty());
}

#[test]
fn compatibility_is_reflexive() {
    for text in [
        "plain",
        "one %s",
        "%d %i %u",
        "%%escaped",
        "%-5.2f and %03d",
        "",
    ] {
        assert!(is_compatible(text, text), "failed for {text:?}");
    }
}

#[test]
fn compatibility_requires_same_tokens_in_the_same_order() {
    assert!(is_compatible("Error %d at %s", "Failure %d near %s"));
    assert!(!is_compatible("Error %d at %s", "Failure %s at %d"));
}

#[test]
fn missing_or_extra_specifiers_are_incompatible() {
    assert!(!is_compatible("Error %d at %s", "Failure %d"));
    assert!(!is_compatible("Error %d", "Failure %d at %s"));
}

#[test]
fn sources_without_specifiers_match_any_specifier_free_rewrite() {
    assert!(is_compatible("just some words", "other words entirely"));
}
