//! Incremental selection of features from a list of changed paths.

use crate::config::ChangeMatch;

fn normalize(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

/// Whether a feature named `leaf` at `feature_path` is affected by `changed`.
///
/// Comparison is on `/`-separated, lower-cased paths. An empty change list
/// selects nothing.
pub fn feature_selected(
    mode: ChangeMatch,
    leaf: &str,
    feature_path: &str,
    changed: &[String],
) -> bool {
    let leaf = normalize(leaf);
    let feature_path = normalize(feature_path);
    let feature_path = feature_path.trim_end_matches('/');

    changed.iter().map(|c| normalize(c)).any(|change| match mode {
        ChangeMatch::Loose => {
            change.contains(&leaf)
                || change.contains(feature_path)
                || (!change.is_empty() && feature_path.contains(change.as_str()))
        }
        ChangeMatch::Segment => {
            change.split('/').any(|segment| segment == leaf)
                || change.starts_with(&format!("{feature_path}/"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn loose_matches_leaf_anywhere() {
        let list = changed(&["src\\Features\\Cart\\components\\CartList.tsx"]);
        assert!(feature_selected(ChangeMatch::Loose, "cart", "/repo/src/features/cart", &list));
        assert!(!feature_selected(ChangeMatch::Loose, "checkout", "/repo/src/features/checkout", &list));
    }

    #[test]
    fn loose_matches_feature_path_both_ways() {
        let inside = changed(&["/repo/src/features/user-profile/index.ts"]);
        assert!(feature_selected(
            ChangeMatch::Loose,
            "user-profile",
            "/repo/src/features/user-profile",
            &inside
        ));

        let parent = changed(&["/repo/src/features"]);
        assert!(feature_selected(ChangeMatch::Loose, "orders", "/repo/src/features/orders", &parent));
    }

    #[test]
    fn loose_over_matches_substrings() {
        let list = changed(&["src/features/superuser/x.ts"]);
        assert!(feature_selected(ChangeMatch::Loose, "user", "src/features/user", &list));
        assert!(!feature_selected(ChangeMatch::Segment, "user", "src/features/user", &list));
    }

    #[test]
    fn segment_matches_whole_segments_or_prefix() {
        let list = changed(&["src/features/user/hooks/useUser.ts"]);
        assert!(feature_selected(ChangeMatch::Segment, "user", "/elsewhere/user-admin", &list));

        let under = changed(&["/repo/features/billing-v2/api.ts"]);
        assert!(feature_selected(
            ChangeMatch::Segment,
            "billing",
            "/repo/features/billing-v2",
            &under
        ));
        assert!(!feature_selected(
            ChangeMatch::Segment,
            "billing",
            "/repo/features/billing",
            &under
        ));
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(!feature_selected(ChangeMatch::Loose, "cart", "features/cart", &[]));
        assert!(!feature_selected(ChangeMatch::Segment, "cart", "features/cart", &[]));
    }
}
