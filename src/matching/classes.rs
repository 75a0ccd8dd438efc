//! Class-level diff between reference and client schemas.

use std::collections::BTreeSet;

use crate::model::{ClassMap, ClassSymbol};
use crate::report::Issue;

/// What a client class lacks compared to its reference counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDiff {
    pub class_name: String,
    /// Sorted.
    pub missing_fields: Vec<String>,
    /// Sorted, ignored bases removed.
    pub missing_bases: Vec<String>,
}

impl ClassDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_fields.is_empty() && self.missing_bases.is_empty()
    }

    /// At most one issue per kind, attributed to `file`.
    pub fn into_issues(self, file: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        if !self.missing_fields.is_empty() {
            issues.push(Issue::missing_fields(&self.class_name, &self.missing_fields, file));
        }
        if !self.missing_bases.is_empty() {
            issues.push(Issue::missing_bases(&self.class_name, &self.missing_bases, file));
        }
        issues
    }
}

/// Fields and bases of `reference` that `client` does not declare.
///
/// Extra fields or bases on the client side are never reported.
pub fn diff_class(
    reference: &ClassSymbol,
    client: &ClassSymbol,
    ignored_bases: &BTreeSet<String>,
) -> ClassDiff {
    let missing_fields = reference
        .fields
        .difference(&client.fields)
        .cloned()
        .collect();
    let missing_bases = reference
        .bases
        .difference(&client.bases)
        .filter(|base| !ignored_bases.contains(*base))
        .cloned()
        .collect();

    ClassDiff {
        class_name: reference.name.clone(),
        missing_fields,
        missing_bases,
    }
}

/// Ordered merge: classes in `overlay` replace same-named classes in `base`.
pub fn merge_class_maps(mut base: ClassMap, overlay: ClassMap) -> ClassMap {
    base.extend(overlay);
    base
}

/// Diff every client class that has a reference counterpart.
pub fn diff_classes(
    reference: &ClassMap,
    client: &ClassMap,
    ignored_bases: &BTreeSet<String>,
) -> Vec<ClassDiff> {
    client
        .iter()
        .filter_map(|(name, client_class)| {
            let reference_class = reference.get(name)?;
            let diff = diff_class(reference_class, client_class, ignored_bases);
            (!diff.is_empty()).then_some(diff)
        })
        .collect()
}
