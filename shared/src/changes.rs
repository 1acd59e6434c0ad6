//! Change sets - batched writes against the catalog
//!
//! A [`ChangeSet`] is an explicit transaction object: it accumulates write
//! operations and is handed to a backend as one unit. Backends apply it
//! all-or-nothing from the caller's perspective. Dropping an unsubmitted
//! change set is rollback, there is nothing to undo.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CommentCreate, ProductCreate, ProductUpdate, Supplier, SupplierCreate};

/// A single write operation against the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ChangeOp {
    CreateProduct(ProductCreate),
    UpdateProduct {
        id: String,
        changes: ProductUpdate,
    },
    DeleteProducts {
        ids: Vec<String>,
    },
    CreateSupplier(SupplierCreate),
    CreateComment(CommentCreate),
    LinkSubcategory {
        product_id: String,
        subcategory_id: String,
    },
    UnlinkSubcategory {
        product_id: String,
        subcategory_id: String,
    },
    LinkSupplier {
        product_id: String,
        supplier_id: String,
    },
    UnlinkSupplier {
        product_id: String,
        supplier_id: String,
    },
}

/// A named, ordered batch of write operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
    pub id: Uuid,
    /// Logical group name ("SaveProductGroup", "CreateSupplierGroup", ...)
    pub group: String,
    pub ops: Vec<ChangeOp>,
}

impl ChangeSet {
    /// Create an empty change set for the given group
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group: group.into(),
            ops: Vec::new(),
        }
    }

    /// Append an operation
    pub fn push(&mut self, op: ChangeOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Result of submitting a change set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Id assigned to a product created by this batch
    pub created_product_id: Option<String>,
    /// Supplier master record created by this batch, with its assigned id
    pub created_supplier: Option<Supplier>,
    /// Number of operations applied
    pub applied: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_push() {
        let mut batch = ChangeSet::new("SaveProductGroup");
        assert!(batch.is_empty());

        batch
            .push(ChangeOp::LinkSubcategory {
                product_id: "p1".into(),
                subcategory_id: "s1".into(),
            })
            .push(ChangeOp::UnlinkSupplier {
                product_id: "p1".into(),
                supplier_id: "sup1".into(),
            });

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.group, "SaveProductGroup");
    }

    #[test]
    fn test_change_op_serializes_with_tag() {
        let op = ChangeOp::DeleteProducts {
            ids: vec!["a".into(), "b".into()],
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"op\":\"delete_products\""));
    }
}
