pub mod builder;
pub mod error;
pub mod node;
pub mod order;
pub mod traverse;
pub mod validate;

pub use builder::{build_tree, try_build_tree, DanglingPolicy, HierarchyBuilder};
pub use error::{DiagnosticKind, HierarchyError, HierarchyResult};
pub use node::{FlatNode, TreeNode};
pub use order::{parse_order, OrderError, OrderInfo, SortDirection, SortField};
pub use validate::{diagnose, validate};
