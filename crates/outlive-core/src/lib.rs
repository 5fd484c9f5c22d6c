pub mod contracts;
pub mod pset;
pub mod span;
pub mod variable;

// Re-export commonly used types
pub use contracts::{ContractKind, ContractMap, DeclContracts};
pub use pset::PSet;
pub use span::SourceRange;
pub use variable::{ChainItem, ContractVariable, RecordId, VarBase};
