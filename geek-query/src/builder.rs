//! SQL rendering for the count and data statements of a [`QueryPlan`].
//!
//! Both statements share one FROM/JOIN/WHERE tail so that the reported total
//! always describes the same rows the data statement pages through.

use crate::page::PageRequest;
use crate::plan::{Comparison, Predicate, QueryPlan, Scope};
use crate::value::Value;

/// Alias of the searched entity's table.
pub const ROOT_ALIAS: &str = "e";
/// Alias of the associated table.
pub const JOIN_ALIAS: &str = "a";

pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";

/// Named parameters, without the leading `:`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(&'static str, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: Value) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// These parameters plus `:limit` and `:offset` for `page`.
    pub fn with_page(&self, page: PageRequest) -> Self {
        let mut params = self.clone();
        params.push(LIMIT_PARAM, Value::Integer(i64::from(page.size())));
        params.push(
            OFFSET_PARAM,
            Value::Integer(i64::try_from(page.offset()).unwrap_or(i64::MAX)),
        );
        params
    }
}

/// The rendered statement pair and the parameters they share.
///
/// `data_sql` additionally expects `:limit` and `:offset`, see
/// [`Params::with_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct Statements {
    pub count_sql: String,
    pub data_sql: String,
    pub params: Params,
}

/// Render `plan` into a count statement and a data statement.
pub fn build(plan: &QueryPlan) -> Statements {
    let id = format!("{ROOT_ALIAS}.{}", plan.id_column);

    let mut tail = format!("FROM {} {ROOT_ALIAS}", plan.table);
    if let Some(join) = &plan.join {
        // LEFT so that entities without associated rows still match.
        tail.push_str(&format!(
            " LEFT JOIN {} {JOIN_ALIAS} ON {JOIN_ALIAS}.{} = {ROOT_ALIAS}.{}",
            join.related_table, join.foreign_key_column, join.related_id_column
        ));
    }

    let mut params = Params::new();
    if !plan.predicates.is_empty() {
        let conditions: Vec<String> = plan
            .predicates
            .iter()
            .map(|p| {
                params.push(p.param, p.value.clone());
                render_predicate(p)
            })
            .collect();
        tail.push_str(" WHERE ");
        tail.push_str(&conditions.join(" AND "));
    }

    let count_sql = format!("SELECT COUNT(DISTINCT {id}) {tail}");

    // All projected columns come from the root table and include the id, so
    // DISTINCT folds join fan-out back to one row per entity.
    let select_list: Vec<String> = plan
        .projection
        .iter()
        .map(|f| format!("{ROOT_ALIAS}.{} AS {}", f.column, quote_ident(&f.name)))
        .collect();
    let data_sql = format!(
        "SELECT DISTINCT {} {tail} ORDER BY {id} ASC LIMIT :{LIMIT_PARAM} OFFSET :{OFFSET_PARAM}",
        select_list.join(", ")
    );

    Statements {
        count_sql,
        data_sql,
        params,
    }
}

fn render_predicate(p: &Predicate) -> String {
    let alias = match p.scope {
        Scope::Root => ROOT_ALIAS,
        Scope::Joined => JOIN_ALIAS,
    };
    match p.comparison {
        Comparison::ContainsIgnoreCase => format!("LOWER({alias}.{}) LIKE :{}", p.column, p.param),
        Comparison::Equals => format!("{alias}.{} = :{}", p.column, p.param),
    }
}

/// ANSI double-quoted identifier with embedded quotes doubled.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
