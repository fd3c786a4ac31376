//! Declarative entity metadata and its resolution.
//!
//! Each entity type declares a static [`EntityDecl`]: an optional table
//! name, an optional parent declaration whose fields it inherits, and one
//! [`FieldDecl`] per field. Names that are not declared explicitly are derived
//! with [`camel_to_snake`]. An [`EntityRegistry`] resolves every registered
//! declaration once into an immutable [`EntityMetadata`], including the join
//! shape of each collection field.

use std::collections::HashMap;

use thiserror::Error;

use crate::mapper::Entity;

/// Column read from the related type when it declares no `name` field.
pub const DEFAULT_DISPLAY_COLUMN: &str = "name";

/// Primary-key column assumed when an entity declares no id field.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Logical name of the display field on associated types.
const DISPLAY_FIELD: &str = "name";

// ── Declarations ────────────────────────────────────────────────────────────

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Long,
    Float,
    Double,
    Text,
    Bool,
    Date,
    DateTime,
    Time,
    Bytes,
    /// Single reference to another entity type, by type name.
    Reference(&'static str),
    /// Collection of another entity type, by type name.
    Collection(&'static str),
}

impl FieldType {
    /// Whether values of this type can be projected and filtered on.
    pub fn is_scalar_type(self) -> bool {
        matches!(
            self,
            FieldType::Int
                | FieldType::Long
                | FieldType::Float
                | FieldType::Double
                | FieldType::Text
                | FieldType::Bool
                | FieldType::Date
                | FieldType::DateTime
                | FieldType::Time
        )
    }
}

/// Relationship annotation on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// Declaration of a single entity field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    pub name: &'static str,
    pub column: Option<&'static str>,
    pub ty: FieldType,
    pub id: bool,
    pub relation: Option<Relation>,
    pub join_column: Option<&'static str>,
}

impl FieldDecl {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            column: None,
            ty,
            id: false,
            relation: None,
            join_column: None,
        }
    }

    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    pub const fn id(mut self) -> Self {
        self.id = true;
        self
    }

    pub const fn relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub const fn join_column(mut self, column: &'static str) -> Self {
        self.join_column = Some(column);
        self
    }

    /// Mapped column: the declared name if non-blank, else the snake-cased
    /// field name.
    pub fn column_name(&self) -> String {
        match self.column {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => camel_to_snake(self.name),
        }
    }

    /// Scalar fields have a scalar type and carry no relationship annotation.
    pub fn is_scalar(&self) -> bool {
        self.relation.is_none() && self.ty.is_scalar_type()
    }

    fn explicit_join_column(&self) -> Option<&'static str> {
        self.join_column.filter(|c| !c.trim().is_empty())
    }
}

/// Declaration of an entity type.
#[derive(Debug)]
pub struct EntityDecl {
    pub type_name: &'static str,
    pub table: Option<&'static str>,
    pub parent: Option<&'static EntityDecl>,
    pub fields: &'static [FieldDecl],
}

impl EntityDecl {
    /// Table name: the declared one if non-blank, else the snake-cased type
    /// name.
    pub fn table_name(&self) -> String {
        match self.table {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => camel_to_snake(self.type_name),
        }
    }

    /// All fields along the inheritance chain, most derived first.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDecl> + '_ {
        std::iter::successors(Some(self), |d| d.parent).flat_map(|d| d.fields.iter())
    }

    /// Look a field up by logical name; a subtype's field shadows its parent's.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn id_field(&self) -> Option<&FieldDecl> {
        self.all_fields().find(|f| f.id)
    }

    pub fn id_column(&self) -> String {
        self.id_field()
            .map(FieldDecl::column_name)
            .unwrap_or_else(|| DEFAULT_ID_COLUMN.to_string())
    }
}

/// Convert an identifier such as `MediaModel` or `totalSeason` to
/// `media_model` / `total_season`.
///
/// An underscore is inserted before every uppercase character except the
/// first, then everything is lowercased.
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

// ── Resolved metadata ───────────────────────────────────────────────────────

/// Why a piece of metadata could not be resolved.
///
/// These never fail a query; the engine drops the affected join or filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("entity `{entity}` has no field `{field}`")]
    UnknownField { entity: String, field: String },
    #[error("field `{entity}.{field}` is not a collection of entities")]
    NotACollection { entity: String, field: String },
    #[error("entity type `{0}` is not registered")]
    UnregisteredType(String),
    #[error("`{related}` has no many-to-one reference back to `{owner}`")]
    MissingBackReference { related: String, owner: String },
}

/// Coarse classification of a field for planning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Association,
    /// Neither projectable nor a relationship (binary payloads, for instance).
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub column_name: String,
    pub kind: FieldKind,
    pub raw_type: FieldType,
    /// Explicit join column of a many-to-one field.
    pub join_column: Option<String>,
}

/// Join shape of a one-to-many association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationInfo {
    pub related_table: String,
    /// Column on the related table pointing back at the owner.
    pub foreign_key_column: String,
    /// Owner's primary-key column the foreign key references.
    pub related_id_column: String,
    /// Human-readable column on the related table.
    pub display_column: String,
}

/// Immutable, fully resolved metadata for one entity type.
#[derive(Debug, Clone)]
pub struct EntityMetadata {
    type_name: &'static str,
    table_name: String,
    id_field: &'static str,
    id_column: String,
    fields: HashMap<&'static str, FieldDescriptor>,
    associations: HashMap<&'static str, Result<AssociationInfo, ResolutionError>>,
}

impl EntityMetadata {
    fn resolve(decl: &'static EntityDecl, decls: &HashMap<&'static str, &'static EntityDecl>) -> Self {
        let mut fields = HashMap::new();
        let mut associations = HashMap::new();

        for field in decl.all_fields() {
            // Shadowed parent fields are skipped.
            if fields.contains_key(field.name) {
                continue;
            }
            let kind = if field.relation.is_some() {
                FieldKind::Association
            } else if field.ty.is_scalar_type() {
                FieldKind::Scalar
            } else {
                FieldKind::Other
            };
            fields.insert(
                field.name,
                FieldDescriptor {
                    column_name: field.column_name(),
                    kind,
                    raw_type: field.ty,
                    join_column: field.explicit_join_column().map(str::to_string),
                },
            );
            if matches!(field.ty, FieldType::Collection(_)) {
                let resolved = resolve_association(decl, field, decls);
                if let Err(e) = &resolved {
                    log::debug!("association {}.{} unavailable: {}", decl.type_name, field.name, e);
                }
                associations.insert(field.name, resolved);
            }
        }

        Self {
            type_name: decl.type_name,
            table_name: decl.table_name(),
            id_field: decl.id_field().map_or(DEFAULT_ID_COLUMN, |f| f.name),
            id_column: decl.id_column(),
            fields,
            associations,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Logical name of the primary-key field.
    pub fn id_field(&self) -> &'static str {
        self.id_field
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn column(&self, name: &str) -> Result<&str, ResolutionError> {
        self.fields
            .get(name)
            .map(|f| f.column_name.as_str())
            .ok_or_else(|| ResolutionError::UnknownField {
                entity: self.type_name.to_string(),
                field: name.to_string(),
            })
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|f| f.kind == FieldKind::Scalar)
    }

    /// Join column of a many-to-one field, or `default` when the field is
    /// missing or declares none.
    pub fn join_column_or(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .and_then(|f| f.join_column.clone())
            .unwrap_or_else(|| default.to_string())
    }

    /// Join shape of the named collection field.
    pub fn association(&self, name: &str) -> Result<&AssociationInfo, ResolutionError> {
        match self.associations.get(name) {
            Some(Ok(info)) => Ok(info),
            Some(Err(e)) => Err(e.clone()),
            None if self.fields.contains_key(name) => Err(ResolutionError::NotACollection {
                entity: self.type_name.to_string(),
                field: name.to_string(),
            }),
            None => Err(ResolutionError::UnknownField {
                entity: self.type_name.to_string(),
                field: name.to_string(),
            }),
        }
    }
}

fn resolve_association(
    owner: &EntityDecl,
    field: &FieldDecl,
    decls: &HashMap<&'static str, &'static EntityDecl>,
) -> Result<AssociationInfo, ResolutionError> {
    let FieldType::Collection(related_name) = field.ty else {
        return Err(ResolutionError::NotACollection {
            entity: owner.type_name.to_string(),
            field: field.name.to_string(),
        });
    };
    let related = decls
        .get(related_name)
        .ok_or_else(|| ResolutionError::UnregisteredType(related_name.to_string()))?;

    let mut foreign_key = None;
    let mut display = None;
    for f in related.all_fields() {
        let points_back = matches!(f.ty, FieldType::Reference(target) if target == owner.type_name);
        if f.relation == Some(Relation::ManyToOne) && points_back {
            foreign_key = Some(
                f.explicit_join_column()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}_id", camel_to_snake(f.name))),
            );
        }
        if f.name == DISPLAY_FIELD && display.is_none() {
            display = Some(f.column_name());
        }
    }

    let foreign_key_column = foreign_key.ok_or_else(|| ResolutionError::MissingBackReference {
        related: related_name.to_string(),
        owner: owner.type_name.to_string(),
    })?;

    Ok(AssociationInfo {
        related_table: related.table_name(),
        foreign_key_column,
        related_id_column: owner.id_column(),
        display_column: display.unwrap_or_else(|| DEFAULT_DISPLAY_COLUMN.to_string()),
    })
}

// ── Registry ────────────────────────────────────────────────────────────────

/// Collects entity declarations before resolving them together.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    decls: Vec<&'static EntityDecl>,
}

impl RegistryBuilder {
    pub fn register<E: Entity>(self) -> Self {
        self.register_decl(E::decl())
    }

    pub fn register_decl(mut self, decl: &'static EntityDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Resolve every registered declaration. Later registrations of the same
    /// type name replace earlier ones.
    pub fn build(self) -> EntityRegistry {
        let decls: HashMap<&'static str, &'static EntityDecl> =
            self.decls.into_iter().map(|d| (d.type_name, d)).collect();
        let entities = decls
            .values()
            .map(|&decl| (decl.type_name, EntityMetadata::resolve(decl, &decls)))
            .collect();
        EntityRegistry { entities }
    }
}

/// Resolved metadata for a set of entity types. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<&'static str, EntityMetadata>,
}

impl EntityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, type_name: &str) -> Option<&EntityMetadata> {
        self.entities.get(type_name)
    }

    pub fn metadata_of<E: Entity>(&self) -> Option<&EntityMetadata> {
        self.get(E::decl().type_name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entities.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: EntityDecl = EntityDecl {
        type_name: "BaseModel",
        table: None,
        parent: None,
        fields: &[FieldDecl::new("id", FieldType::Int).id()],
    };

    static SHOW: EntityDecl = EntityDecl {
        type_name: "ShowModel",
        table: Some("shows"),
        parent: Some(&BASE),
        fields: &[
            FieldDecl::new("name", FieldType::Text),
            FieldDecl::new("episodeCount", FieldType::Int).column("episodes"),
            FieldDecl::new("network", FieldType::Reference("NetworkModel"))
                .relation(Relation::ManyToOne)
                .join_column("id_network"),
            FieldDecl::new("aliases", FieldType::Collection("AliasModel")).relation(Relation::OneToMany),
            FieldDecl::new("clips", FieldType::Collection("ClipModel")).relation(Relation::OneToMany),
            FieldDecl::new("poster", FieldType::Bytes),
        ],
    };

    static ALIAS: EntityDecl = EntityDecl {
        type_name: "AliasModel",
        table: None,
        parent: None,
        fields: &[
            FieldDecl::new("id", FieldType::Int).id(),
            FieldDecl::new("show", FieldType::Reference("ShowModel")).relation(Relation::ManyToOne),
        ],
    };

    static CLIP: EntityDecl = EntityDecl {
        type_name: "ClipModel",
        table: Some("  "),
        parent: None,
        fields: &[FieldDecl::new("title", FieldType::Text)],
    };

    fn registry() -> EntityRegistry {
        EntityRegistry::builder()
            .register_decl(&SHOW)
            .register_decl(&ALIAS)
            .register_decl(&CLIP)
            .build()
    }

    #[test]
    fn camel_to_snake_is_deterministic() {
        assert_eq!(camel_to_snake("MediaModel"), "media_model");
        assert_eq!(camel_to_snake("totalSeason"), "total_season");
        assert_eq!(camel_to_snake("id"), "id");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
        assert_eq!(camel_to_snake("URL"), "u_r_l");
    }

    #[test]
    fn table_and_column_names_prefer_declarations() {
        let reg = registry();
        let show = reg.get("ShowModel").unwrap();
        assert_eq!(show.table_name(), "shows");
        assert_eq!(show.column("episodeCount").unwrap(), "episodes");
        assert_eq!(show.column("name").unwrap(), "name");
        assert_eq!(reg.get("AliasModel").unwrap().table_name(), "alias_model");
        // Blank declared names fall back to the derived one.
        assert_eq!(reg.get("ClipModel").unwrap().table_name(), "clip_model");
    }

    #[test]
    fn inherited_id_is_found() {
        let reg = registry();
        let show = reg.get("ShowModel").unwrap();
        assert!(show.has_field("id"));
        assert_eq!(show.id_field(), "id");
        assert_eq!(show.id_column(), "id");
        // No id declared at all.
        assert_eq!(reg.get("ClipModel").unwrap().id_column(), DEFAULT_ID_COLUMN);
    }

    #[test]
    fn scalar_classification() {
        let show = registry().get("ShowModel").cloned().unwrap();
        assert!(show.is_scalar("name"));
        assert!(show.is_scalar("id"));
        assert!(!show.is_scalar("network"));
        assert!(!show.is_scalar("aliases"));
        assert!(!show.is_scalar("poster"));
        assert!(!show.is_scalar("missing"));
        assert_eq!(show.field("poster").unwrap().kind, FieldKind::Other);
    }

    #[test]
    fn association_uses_back_reference_and_fallbacks() {
        let reg = registry();
        let info = reg.get("ShowModel").unwrap().association("aliases").unwrap().clone();
        assert_eq!(
            info,
            AssociationInfo {
                related_table: "alias_model".into(),
                foreign_key_column: "show_id".into(),
                related_id_column: "id".into(),
                display_column: DEFAULT_DISPLAY_COLUMN.into(),
            }
        );
    }

    #[test]
    fn association_without_back_reference_degrades() {
        let reg = registry();
        let err = reg.get("ShowModel").unwrap().association("clips").unwrap_err();
        assert!(matches!(err, ResolutionError::MissingBackReference { .. }));
    }

    #[test]
    fn association_to_unregistered_type_degrades() {
        let reg = EntityRegistry::builder().register_decl(&SHOW).build();
        let err = reg.get("ShowModel").unwrap().association("aliases").unwrap_err();
        assert_eq!(err, ResolutionError::UnregisteredType("AliasModel".into()));
    }

    #[test]
    fn join_column_defaults_when_absent() {
        let reg = registry();
        let show = reg.get("ShowModel").unwrap();
        assert_eq!(show.join_column_or("network", "network_id"), "id_network");
        assert_eq!(show.join_column_or("category", "category_id"), "category_id");
    }
}
