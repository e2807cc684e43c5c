//! Pure allow/deny resolution over an effective permission set.
//!
//! The effective set is a list of canonical `resource:action` strings. A
//! request for `(resource, action)` is allowed when the set contains the
//! exact pair, the global wildcard `*:*`, or the resource wildcard
//! `resource:*`. Action-only wildcards (`*:action`) never grant access;
//! the asymmetry is deliberate and callers rely on it.

/// Canonical form granting every action on every resource.
pub const GLOBAL_WILDCARD: &str = "*:*";

/// Returns whether the effective set allows the requested pair.
pub fn allows<I, S>(effective: I, resource: &str, action: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let target = format!("{resource}:{action}");
    let resource_wildcard = format!("{resource}:*");

    effective.into_iter().any(|entry| {
        let entry = entry.as_ref();
        entry == target || entry == GLOBAL_WILDCARD || entry == resource_wildcard
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::allows;

    #[test]
    fn exact_pair_is_allowed() {
        assert!(allows(["posts:write"], "posts", "write"));
    }

    #[test]
    fn unrelated_pair_is_denied() {
        assert!(!allows(["posts:write"], "posts", "delete"));
        assert!(!allows(["posts:write"], "users", "write"));
    }

    #[test]
    fn global_wildcard_allows_everything() {
        assert!(allows(["*:*"], "posts", "write"));
        assert!(allows(["*:*"], "anything", "at-all"));
    }

    #[test]
    fn resource_wildcard_allows_any_action_on_that_resource() {
        assert!(allows(["posts:*"], "posts", "delete"));
        assert!(!allows(["posts:*"], "users", "read"));
    }

    #[test]
    fn action_wildcard_never_grants() {
        assert!(!allows(["*:write"], "posts", "write"));
    }

    #[test]
    fn empty_set_denies() {
        assert!(!allows(std::iter::empty::<&str>(), "posts", "write"));
    }

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![Just("*".to_owned()), "[a-z]{1,4}"]
    }

    proptest! {
        #[test]
        fn verdict_matches_membership_rule(
            entries in prop::collection::vec((token(), token()), 0..8),
            resource in token(),
            action in token(),
        ) {
            let set: Vec<String> = entries
                .iter()
                .map(|(res, act)| format!("{res}:{act}"))
                .collect();

            let expected = set.iter().any(|entry| {
                entry == &format!("{resource}:{action}")
                    || entry == "*:*"
                    || entry == &format!("{resource}:*")
            });

            prop_assert_eq!(allows(&set, &resource, &action), expected);
        }
    }
}
