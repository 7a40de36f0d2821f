use std::collections::BTreeSet;

use ext_actions::{InstalledPackage, PackageMetadata};
use ext_core::{PackageStatus, PlatformVersion, reconcile};
use indexmap::IndexMap;
use proptest::prelude::*;

fn installed(names: &BTreeSet<String>) -> Vec<InstalledPackage> {
    names
        .iter()
        .map(|name| InstalledPackage::new(PackageMetadata::new(name.as_str(), "1.0.0")))
        .collect()
}

fn required(names: &BTreeSet<String>) -> IndexMap<String, String> {
    names
        .iter()
        .map(|name| (name.clone(), "^2.0".to_string()))
        .collect()
}

proptest! {
    #[test]
    fn disjoint_sets_are_all_reported(
        installed_names in prop::collection::btree_set("ins/[a-z]{1,8}", 0..12),
        required_names in prop::collection::btree_set("req/[a-z]{1,8}", 0..12),
    ) {
        let packages = reconcile(
            &required(&required_names),
            &installed(&installed_names),
            &PlatformVersion::new("1.4.0"),
        );

        prop_assert_eq!(packages.len(), installed_names.len() + required_names.len());
        for name in &installed_names {
            prop_assert_eq!(packages[name].status, PackageStatus::Installed);
            prop_assert!(packages[name].valid);
        }
        for name in &required_names {
            prop_assert_eq!(packages[name].status, PackageStatus::Pending);
            prop_assert_eq!(packages[name].version.as_str(), "^2.0");
        }

        // installed first, then requirement-only
        let statuses: Vec<PackageStatus> = packages.values().map(|e| e.status).collect();
        let first_pending = statuses
            .iter()
            .position(|s| *s == PackageStatus::Pending)
            .unwrap_or(statuses.len());
        prop_assert!(statuses[first_pending..].iter().all(|s| *s == PackageStatus::Pending));
    }

    #[test]
    fn installed_wins_on_overlap(
        names in prop::collection::btree_set("[a-z]{1,6}/[a-z]{1,6}", 1..12),
        split in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let cut = split.index(names.len());
        let installed_names: BTreeSet<String> = names[..=cut].iter().cloned().collect();
        let required_names: BTreeSet<String> = names.iter().cloned().collect();

        let packages = reconcile(
            &required(&required_names),
            &installed(&installed_names),
            &PlatformVersion::new("1.4.0"),
        );

        prop_assert_eq!(packages.len(), required_names.len());
        for name in &installed_names {
            prop_assert_eq!(packages[name].status, PackageStatus::Installed);
            prop_assert_eq!(packages[name].version.as_str(), "1.0.0");
        }
    }

    #[test]
    fn reconcile_is_deterministic(
        installed_names in prop::collection::btree_set("[a-z]{1,6}", 0..8),
        required_names in prop::collection::btree_set("[a-z]{1,6}", 0..8),
    ) {
        let requirements = required(&required_names);
        let packages = installed(&installed_names);
        let resolution = PlatformVersion::new("1.4.0");

        let first = reconcile(&requirements, &packages, &resolution);
        let second = reconcile(&requirements, &packages, &resolution);

        let first_keys: Vec<&String> = first.keys().collect();
        let second_keys: Vec<&String> = second.keys().collect();
        prop_assert_eq!(first_keys, second_keys);
        prop_assert_eq!(first, second);
    }
}
