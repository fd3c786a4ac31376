//! The search entry point tying planner, builder, and executor together.

use crate::builder::{build, Statements};
use crate::error::QueryError;
use crate::execute::{run_paged, StatementExecutor};
use crate::mapper::Entity;
use crate::metadata::EntityRegistry;
use crate::page::Page;
use crate::plan::{plan, QueryPlan, SearchFields, SearchRequest};

/// Paged, filtered, partially projected search over any registered entity.
///
/// Holds no per-call state; one engine can serve any number of calls.
pub struct SearchEngine<'r, X> {
    registry: &'r EntityRegistry,
    executor: X,
    fields: SearchFields,
}

impl<'r, X: StatementExecutor> SearchEngine<'r, X> {
    pub fn new(registry: &'r EntityRegistry, executor: X) -> Self {
        Self::with_fields(registry, executor, SearchFields::default())
    }

    pub fn with_fields(registry: &'r EntityRegistry, executor: X, fields: SearchFields) -> Self {
        Self {
            registry,
            executor,
            fields,
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Plan and render a search without running it.
    pub fn prepare<E: Entity>(
        &self,
        request: &SearchRequest,
    ) -> Result<(QueryPlan, Statements), QueryError> {
        let type_name = E::decl().type_name;
        let meta = self
            .registry
            .get(type_name)
            .ok_or(QueryError::UnknownEntity(type_name))?;
        let plan = plan(meta, request, &self.fields);
        let statements = build(&plan);
        Ok((plan, statements))
    }

    /// Run a search: count, then (if anything matched) one page of entities.
    pub fn search<E: Entity>(&self, request: &SearchRequest) -> Result<Page<E>, QueryError> {
        let (plan, statements) = self.prepare::<E>(request)?;
        log::debug!("count: {}", statements.count_sql);
        log::debug!("data: {}", statements.data_sql);
        run_paged(&self.executor, &statements, &plan.projection, request.page)
    }
}
