//! Resource coordinates
//!
//! A coordinate is the graph's primary key: two nodes describe the same
//! entity exactly when their coordinates are equal.

use std::fmt;

/// Identifies a concrete or abstract resource
///
/// Empty fields are valid. Synthetic actors such as the release payload or a
/// human operator have no API group and no namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub api_group: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl Coordinate {
    pub fn new(
        api_group: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api_group: api_group.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// Write one field, escaping the characters used as separators in labels
fn write_field(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    for c in field.chars() {
        if matches!(c, '\\' | '/' | '(') {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    Ok(())
}

/// Renders `group/kind/namespace/name`
///
/// All four fields are always present, empty ones included, so distinct
/// coordinates never render alike: the core group shows as a leading `/`
/// and a cluster-scoped resource as `//` before its name.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, &self.api_group)?;
        f.write_str("/")?;
        write_field(f, &self.kind)?;
        f.write_str("/")?;
        write_field(f, &self.namespace)?;
        f.write_str("/")?;
        write_field(f, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_core_group() {
        let coord = Coordinate::new("", "secrets", "openshift-config", "initial-key");
        assert_eq!(coord.to_string(), "/secrets/openshift-config/initial-key");
    }

    #[test]
    fn test_display_named_group_without_namespace() {
        let coord = Coordinate::new("config.openshift.io", "clusteroperators", "", "network");
        assert_eq!(
            coord.to_string(),
            "config.openshift.io/clusteroperators//network"
        );
    }

    #[test]
    fn test_display_keeps_empty_fields_apart() {
        let namespaced = Coordinate::new("", "Installer", "cluster", "");
        let named = Coordinate::new("", "Installer", "", "cluster");
        assert_eq!(namespaced.to_string(), "/Installer/cluster/");
        assert_eq!(named.to_string(), "/Installer//cluster");
    }

    #[test]
    fn test_display_keeps_dotted_groups_apart() {
        let a = Coordinate::new("a.b", "x", "", "n");
        let b = Coordinate::new("b", "x.a", "", "n");
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_display_escapes_separators() {
        let slashed = Coordinate::new("", "a/b", "", "c");
        let split = Coordinate::new("", "a", "b", "c");
        assert_eq!(slashed.to_string(), "/a\\/b//c");
        assert_ne!(slashed.to_string(), split.to_string());

        let coord = Coordinate::new("", "secrets", "ns", "key (Static)");
        assert_eq!(coord.to_string(), "/secrets/ns/key \\(Static)");
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = Coordinate::new("", "Secret", "ns", "s");
        let b = Coordinate::new("", "Secret", "ns", "s");
        let c = Coordinate::new("", "Secret", "other", "s");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
