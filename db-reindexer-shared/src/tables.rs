//! Table roles and the mapping from role to source table name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven source tables a full reindex walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    Collections,
    Executions,
    AsyncOperations,
    Granules,
    Pdrs,
    Providers,
    Rules,
}

impl TableRole {
    /// All roles, in the order a full reindex starts them.
    pub const ALL: [TableRole; 7] = [
        TableRole::Collections,
        TableRole::Executions,
        TableRole::AsyncOperations,
        TableRole::Granules,
        TableRole::Pdrs,
        TableRole::Providers,
        TableRole::Rules,
    ];

    /// Resolve a single-table selector.
    ///
    /// Only `asyncOperation`, `granule` and `provider` can be reindexed on
    /// their own. Anything else yields `None`.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "asyncOperation" => Some(TableRole::AsyncOperations),
            "granule" => Some(TableRole::Granules),
            "provider" => Some(TableRole::Providers),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableRole::Collections => "collections",
            TableRole::Executions => "executions",
            TableRole::AsyncOperations => "asyncOperations",
            TableRole::Granules => "granules",
            TableRole::Pdrs => "pdrs",
            TableRole::Providers => "providers",
            TableRole::Rules => "rules",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source table identifiers, one per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNames {
    pub collections_table: String,
    pub executions_table: String,
    pub async_operations_table: String,
    pub granules_table: String,
    pub pdrs_table: String,
    pub providers_table: String,
    pub rules_table: String,
}

impl TableNames {
    /// The table identifier configured for `role`.
    pub fn table_for(&self, role: TableRole) -> &str {
        match role {
            TableRole::Collections => &self.collections_table,
            TableRole::Executions => &self.executions_table,
            TableRole::AsyncOperations => &self.async_operations_table,
            TableRole::Granules => &self.granules_table,
            TableRole::Pdrs => &self.pdrs_table,
            TableRole::Providers => &self.providers_table,
            TableRole::Rules => &self.rules_table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selector_recognised() {
        assert_eq!(
            TableRole::from_selector("asyncOperation"),
            Some(TableRole::AsyncOperations)
        );
        assert_eq!(TableRole::from_selector("granule"), Some(TableRole::Granules));
        assert_eq!(TableRole::from_selector("provider"), Some(TableRole::Providers));
    }

    #[test]
    fn test_from_selector_only_three_roles() {
        assert_eq!(TableRole::from_selector("collection"), None);
        assert_eq!(TableRole::from_selector("rule"), None);
        assert_eq!(TableRole::from_selector("granules"), None);
        assert_eq!(TableRole::from_selector(""), None);
    }

    #[test]
    fn test_table_for_each_role() {
        let tables = TableNames {
            collections_table: "c".to_string(),
            executions_table: "e".to_string(),
            async_operations_table: "a".to_string(),
            granules_table: "g".to_string(),
            pdrs_table: "p".to_string(),
            providers_table: "pr".to_string(),
            rules_table: "r".to_string(),
        };

        let names: Vec<&str> = TableRole::ALL.iter().map(|r| tables.table_for(*r)).collect();
        assert_eq!(names, vec!["c", "e", "a", "g", "p", "pr", "r"]);
    }
}
