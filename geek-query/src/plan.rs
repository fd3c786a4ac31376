//! Turning a search request into a projection and a list of predicates.

use std::collections::{BTreeMap, HashSet};

use crate::metadata::{AssociationInfo, EntityMetadata, FieldType};
use crate::page::PageRequest;
use crate::value::Value;

/// Join column used for the category filter when the category field
/// declares none.
pub const DEFAULT_CATEGORY_COLUMN: &str = "media_category_id";

pub const NAME_PARAM: &str = "name";
pub const CATEGORY_PARAM: &str = "category";
pub const ALT_TITLE_PARAM: &str = "altTitle";

/// Requested fields keyed by logical name. The values (nested selections)
/// are not interpreted by the engine.
///
/// Keys iterate in sorted order, so the caller's insertion order does not
/// survive into the projection.
pub type RequestedFields = BTreeMap<String, Vec<String>>;

/// Which logical fields the fixed filter shape targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFields {
    pub name_field: &'static str,
    pub category_field: &'static str,
    pub category_fallback_column: &'static str,
    pub association_field: &'static str,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            name_field: "name",
            category_field: "mediaCategory",
            category_fallback_column: DEFAULT_CATEGORY_COLUMN,
            association_field: "alternativeTitles",
        }
    }
}

/// Arguments of a single search call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub name: Option<String>,
    pub alternative_title: Option<String>,
    pub category_id: Option<i64>,
    pub requested_fields: RequestedFields,
    pub page: PageRequest,
}

impl SearchRequest {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn alternative_title(mut self, title: impl Into<String>) -> Self {
        self.alternative_title = Some(title.into());
        self
    }

    pub fn category(mut self, id: i64) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_fields
            .extend(fields.into_iter().map(|f| (f.into(), Vec::new())));
        self
    }
}

/// Which table a predicate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Joined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `LOWER(col) LIKE :param`, with the pattern already lowercased.
    ContainsIgnoreCase,
    Equals,
}

/// A single bound filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub scope: Scope,
    pub column: String,
    pub comparison: Comparison,
    pub param: &'static str,
    pub value: Value,
}

/// A field that will be selected and mapped back, in select-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField {
    pub name: String,
    pub column: String,
    pub ty: FieldType,
}

/// Everything the builder needs to render the count and data statements.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub table: String,
    pub id_column: String,
    pub projection: Vec<ProjectedField>,
    pub join: Option<AssociationInfo>,
    pub predicates: Vec<Predicate>,
}

/// Plan a search over the entity described by `meta`.
///
/// The projection starts with the id and `name` fields and continues with
/// the requested scalar fields in key order, each at most once; unknown and
/// association fields are dropped without error. Metadata that cannot be resolved removes the join and the
/// filter that depends on it.
pub fn plan(meta: &EntityMetadata, request: &SearchRequest, fields: &SearchFields) -> QueryPlan {
    let projection = plan_projection(meta, &request.requested_fields, fields.name_field);

    let join = match meta.association(fields.association_field) {
        Ok(info) => Some(info.clone()),
        Err(e) => {
            log::debug!("{}: searching without join: {}", meta.type_name(), e);
            None
        }
    };

    let mut predicates = Vec::new();

    if let Some(name) = non_blank(request.name.as_deref()) {
        match meta.column(fields.name_field) {
            Ok(column) => predicates.push(Predicate {
                scope: Scope::Root,
                column: column.to_string(),
                comparison: Comparison::ContainsIgnoreCase,
                param: NAME_PARAM,
                value: contains_pattern(name),
            }),
            Err(e) => log::debug!("name filter ignored: {}", e),
        }
    }

    if let Some(category) = request.category_id {
        predicates.push(Predicate {
            scope: Scope::Root,
            column: meta.join_column_or(fields.category_field, fields.category_fallback_column),
            comparison: Comparison::Equals,
            param: CATEGORY_PARAM,
            value: Value::Integer(category),
        });
    }

    if let Some(title) = non_blank(request.alternative_title.as_deref()) {
        match &join {
            Some(info) => predicates.push(Predicate {
                scope: Scope::Joined,
                column: info.display_column.clone(),
                comparison: Comparison::ContainsIgnoreCase,
                param: ALT_TITLE_PARAM,
                value: contains_pattern(title),
            }),
            None => log::debug!("alternative title filter ignored: no association"),
        }
    }

    QueryPlan {
        table: meta.table_name().to_string(),
        id_column: meta.id_column().to_string(),
        projection,
        join,
        predicates,
    }
}

fn plan_projection(
    meta: &EntityMetadata,
    requested: &RequestedFields,
    name_field: &str,
) -> Vec<ProjectedField> {
    let mut seen = HashSet::new();
    let mut names: Vec<&str> = Vec::new();

    let always = [meta.id_field(), name_field];
    let candidates = always
        .into_iter()
        .filter(|f| meta.has_field(f))
        .chain(requested.keys().map(String::as_str).filter(|f| meta.is_scalar(f)));
    for name in candidates {
        if seen.insert(name) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .filter_map(|name| {
            let field = meta.field(name)?;
            Some(ProjectedField {
                name: name.to_string(),
                column: field.column_name.clone(),
                ty: field.raw_type,
            })
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `%value%`, lowercased. The value is bound, never spliced into SQL.
fn contains_pattern(value: &str) -> Value {
    Value::Text(format!("%{}%", value.to_lowercase()))
}
