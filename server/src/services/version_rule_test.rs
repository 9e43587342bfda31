use super::*;

// =============================================================================
// Version parsing and ordering
// =============================================================================

#[test]
fn trailing_zeros_are_insignificant() {
    assert_eq!("1.0".parse::<Version>().unwrap(), "1.0.0".parse::<Version>().unwrap());
    assert_eq!("2".parse::<Version>().unwrap(), "2.0.0.0".parse::<Version>().unwrap());
}

#[test]
fn leading_v_is_accepted() {
    assert_eq!("v1.2".parse::<Version>().unwrap(), "1.2".parse::<Version>().unwrap());
}

#[test]
fn components_compare_numerically() {
    let a: Version = "1.2".parse().unwrap();
    let b: Version = "1.10".parse().unwrap();
    assert!(a < b);
}

#[test]
fn shorter_prefix_sorts_first() {
    let a: Version = "1".parse().unwrap();
    let b: Version = "1.0.1".parse().unwrap();
    assert!(a < b);
}

#[test]
fn malformed_versions_are_rejected() {
    for raw in ["", "v", "1..2", "1.0+local", "1.0foo", "1.0.post1.post2", " . ", "-1", "1.0rcx"] {
        assert!(raw.parse::<Version>().is_err(), "expected error for {raw:?}");
    }
}

#[test]
fn pre_post_and_dev_releases_order() {
    let ordered = [
        "1.0.dev1", "1.0a1.dev1", "1.0a1", "1.0a2", "1.0b1", "1.0rc1", "1.0", "1.0.post1.dev1", "1.0.post1", "1.1.dev1",
    ];
    for pair in ordered.windows(2) {
        let low: Version = pair[0].parse().unwrap();
        let high: Version = pair[1].parse().unwrap();
        assert!(low < high, "expected {} < {}", pair[0], pair[1]);
    }
}

#[test]
fn alternate_spellings_normalize() {
    let same = |a: &str, b: &str| assert_eq!(a.parse::<Version>().unwrap(), b.parse::<Version>().unwrap(), "{a} vs {b}");
    same("1.0-alpha.1", "1.0a1");
    same("1.0.BETA2", "1.0b2");
    same("1.0c1", "1.0rc1");
    same("1.0pre1", "1.0rc1");
    same("1.0rc", "1.0rc0");
    same("1.0-1", "1.0.post1");
    same("1.0_rev2", "1.0.post2");
    same("1.0dev", "1.0.dev0");
}

#[test]
fn epoch_outranks_release() {
    let a: Version = "1!0.5".parse().unwrap();
    let b: Version = "2.0".parse().unwrap();
    assert!(a > b);
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn exact_rule() {
    assert!(check_version("1.0.0", "1.0.0"));
    assert!(check_version("1.0", "1.0.0"));
    assert!(!check_version("1.0.1", "1.0.0"));
}

#[test]
fn at_least_rule() {
    assert!(check_version("1.0.0", ">=1.0.0"));
    assert!(check_version("2.3", ">=1.0.0"));
    assert!(!check_version("0.9.9", ">=1.0.0"));
}

#[test]
fn at_most_rule() {
    assert!(check_version("1.0.0", "<=1.0.0"));
    assert!(check_version("0.1", "<=1.0.0"));
    assert!(!check_version("1.0.1", "<=1.0.0"));
}

#[test]
fn range_rule_is_inclusive() {
    assert!(check_version("1.0.0", "1.0.0-2.0.0"));
    assert!(check_version("1.5.3", "1.0.0-2.0.0"));
    assert!(check_version("2.0", "1.0.0-2.0.0"));
    assert!(!check_version("2.0.1", "1.0.0-2.0.0"));
    assert!(!check_version("0.9", "1.0.0-2.0.0"));
}

#[test]
fn release_candidates_are_checked_by_pep440_order() {
    assert!(check_version("2.0.0rc1", ">=1.0"));
    assert!(!check_version("1.0rc1", ">=1.0"));
    assert!(check_version("1.0.post1", ">=1.0"));
    assert!(check_version("2.0b1", "1.0-2.0"));
    assert!(!check_version("2.0.post1", "<=2.0"));
}

#[test]
fn range_with_extra_bounds_never_matches() {
    assert!(!check_version("1.5", "1.0-2.0-3.0"));
}

#[test]
fn rule_whitespace_is_trimmed() {
    assert!(check_version("1.2", "  >=1.0 "));
}

#[test]
fn unparseable_current_never_matches() {
    assert!(!check_version("latest", ">=1.0"));
    assert!(!check_version("", "1.0"));
}

#[test]
fn unparseable_rule_never_matches() {
    assert!(!check_version("1.0", ">=abc"));
    assert!(!check_version("1.0", "*"));
    assert!(!check_version("1.0", ""));
}
