use like_matcher::matcher::LikeMatcher;

fn main() {
    let matcher = LikeMatcher::new("la vie est %").unwrap();
    assert!(matcher.is_match("la vie est drôle"));

    let matcher = LikeMatcher::new("%猫%").unwrap();
    assert!(matcher.is_match("吾輩は猫である"));

    let matcher = LikeMatcher::new("_o_b__").unwrap();
    assert!(matcher.is_match("foobar"));
    assert!(matcher.is_match("football") == false);

    // With an escape character, wildcards can be matched literally.
    let matcher = LikeMatcher::builder(r"100\%").escape('\\').build().unwrap();
    assert!(matcher.is_match("100%"));
    assert!(matcher.is_match("100x") == false);
}
