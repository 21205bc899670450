use serde::{Deserialize, Serialize};

/// Sort direction of one index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexType {
    #[serde(rename = "BTREE")]
    BTree,
    #[serde(rename = "BITMAP")]
    Bitmap,
    #[serde(rename = "FUNCTION_BASED")]
    FunctionBased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexColumn {
    pub name: String,
    pub order: ColumnOrder,
}

/// Immutable snapshot of one index definition, as read from the catalog at
/// fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub index_name: String,
    pub owner: Option<String>,
    pub table: String,
    pub columns: Vec<IndexColumn>,
    pub unique: bool,
    pub index_type: IndexType,
    pub leaf_blocks: Option<u64>,
    pub clustering_factor: Option<u64>,
}

impl IndexMetadata {
    /// Convenience constructor for a plain ascending b-tree index.
    pub fn btree(index_name: &str, table: &str, columns: &[&str]) -> Self {
        Self {
            index_name: index_name.to_string(),
            owner: None,
            table: table.to_string(),
            columns: columns
                .iter()
                .map(|name| IndexColumn { name: name.to_string(), order: ColumnOrder::Asc })
                .collect(),
            unique: false,
            index_type: IndexType::BTree,
            leaf_blocks: None,
            clustering_factor: None,
        }
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    pub fn with_leaf_blocks(mut self, leaf_blocks: u64) -> Self {
        self.leaf_blocks = Some(leaf_blocks);
        self
    }

    pub fn with_clustering_factor(mut self, clustering_factor: u64) -> Self {
        self.clustering_factor = Some(clustering_factor);
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn is_on(&self, table: &str) -> bool {
        self.table.eq_ignore_ascii_case(table)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{ColumnOrder, IndexMetadata, IndexType};

    #[test]
    pub fn test_btree_constructor() {
        let index = IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id", "hire_date"]);

        assert_eq!(index.index_name, "IDX_EMP_DEPT");
        assert_eq!(index.column_names(), vec!["dept_id", "hire_date"]);
        assert_eq!(index.columns[0].order, ColumnOrder::Asc);
        assert_eq!(index.index_type, IndexType::BTree);
        assert!(!index.unique);
    }

    #[test]
    pub fn test_is_on_case_insensitive() {
        let index = IndexMetadata::btree("IDX", "EMP", &["a"]);

        assert!(index.is_on("emp"));
        assert!(!index.is_on("dept"));
    }
}
