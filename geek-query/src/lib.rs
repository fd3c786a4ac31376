//! Metadata-driven search engine for catalog entities.
//!
//! Given only static entity declarations, builds a paginated, filtered,
//! partially projected native query at runtime: a `COUNT(DISTINCT id)`
//! statement and a data statement sharing one FROM/JOIN/WHERE, executed
//! through a [`StatementExecutor`] and mapped back into entities.

pub mod builder;
pub mod engine;
pub mod error;
pub mod execute;
pub mod mapper;
pub mod metadata;
pub mod page;
pub mod plan;
pub mod value;

pub use builder::{build, quote_ident, Params, Statements};
pub use engine::SearchEngine;
pub use error::{ExecutionError, FieldError, QueryError, RowMappingError};
pub use execute::{run_paged, StatementExecutor};
pub use mapper::{map_row, Entity};
pub use metadata::{
    camel_to_snake, AssociationInfo, EntityDecl, EntityMetadata, EntityRegistry, FieldDecl,
    FieldDescriptor, FieldKind, FieldType, RegistryBuilder, Relation, ResolutionError,
};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use plan::{plan, ProjectedField, QueryPlan, RequestedFields, SearchFields, SearchRequest};
pub use value::{coerce, FieldValue, RawRow, Value};
