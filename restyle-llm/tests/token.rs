use restyle_llm::count_tokens;

#[test]
fn empty_text_has_no_tokens() {
    assert_eq!(count_tokens(""), 0);
}

#[test]
fn longer_text_costs_more_tokens() {
    let short = count_tokens("binary");
    let long = count_tokens("a considerably longer string lifted from a binary image");
    assert!(short >= 1);
    assert!(long > short);
}
