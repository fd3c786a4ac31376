//! Table layouts of the catalog entities, as seen by the search engine.
//!
//! Columns left undeclared are derived from the field name (`totalSeason` →
//! `total_season`), tables from the type name.

use geek_query::{
    Entity, EntityDecl, EntityRegistry, FieldDecl, FieldError, FieldType, FieldValue, Relation,
    RowMappingError,
};

use crate::types::*;

pub static MEDIA: EntityDecl = EntityDecl {
    type_name: "MediaModel",
    table: Some("medias"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id().column("id_media"),
        FieldDecl::new("name", FieldType::Text).column("name_media"),
        FieldDecl::new("about", FieldType::Text),
        FieldDecl::new("cover", FieldType::Text),
        FieldDecl::new("banner", FieldType::Text),
        FieldDecl::new("totalSeason", FieldType::Int),
        FieldDecl::new("updateAt", FieldType::DateTime),
        FieldDecl::new("mediaCategory", FieldType::Reference("MediaCategoryModel"))
            .relation(Relation::ManyToOne)
            .join_column("id_media_category"),
        FieldDecl::new("alternativeTitles", FieldType::Collection("AlternativeTitleModel"))
            .relation(Relation::OneToMany),
        FieldDecl::new("externalReferences", FieldType::Collection("ExternalReferenceModel"))
            .relation(Relation::OneToMany),
    ],
};

pub static MEDIA_CATEGORY: EntityDecl = EntityDecl {
    type_name: "MediaCategoryModel",
    table: Some("medias_category"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id().column("id_media_category"),
        FieldDecl::new("typeCategory", FieldType::Text),
    ],
};

pub static ALTERNATIVE_TITLE: EntityDecl = EntityDecl {
    type_name: "AlternativeTitleModel",
    table: Some("alternative_titles"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id().column("id_alternative_title"),
        FieldDecl::new("name", FieldType::Text).column("name_title"),
        FieldDecl::new("media", FieldType::Reference("MediaModel"))
            .relation(Relation::ManyToOne)
            .join_column("id_media"),
    ],
};

pub static EXTERNAL_REFERENCE: EntityDecl = EntityDecl {
    type_name: "ExternalReferenceModel",
    table: Some("external_references"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id().column("id_external_reference"),
        FieldDecl::new("reference", FieldType::Text),
        FieldDecl::new("media", FieldType::Reference("MediaModel"))
            .relation(Relation::ManyToOne)
            .join_column("id_media"),
        FieldDecl::new("typeReference", FieldType::Reference("TypeReferenceModel"))
            .relation(Relation::ManyToOne)
            .join_column("id_type_reference"),
    ],
};

pub static TYPE_REFERENCE: EntityDecl = EntityDecl {
    type_name: "TypeReferenceModel",
    table: Some("type_references"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id().column("id_type_reference"),
        FieldDecl::new("nameReference", FieldType::Text),
    ],
};

pub static TYPE_PERSON: EntityDecl = EntityDecl {
    type_name: "TypePersonModel",
    table: Some("types_person"),
    parent: None,
    fields: &[
        FieldDecl::new("id", FieldType::Int).id(),
        FieldDecl::new("nameTypePerson", FieldType::Text).column("name_type_person"),
    ],
};

/// Registry holding every catalog entity.
pub fn catalog_registry() -> EntityRegistry {
    EntityRegistry::builder()
        .register::<MediaModel>()
        .register::<MediaCategoryModel>()
        .register::<AlternativeTitleModel>()
        .register::<ExternalReferenceModel>()
        .register::<TypeReferenceModel>()
        .register::<TypePersonModel>()
        .build()
}

// ── Entity impls ────────────────────────────────────────────────────────────

impl Entity for MediaModel {
    fn decl() -> &'static EntityDecl {
        &MEDIA
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("name", FieldValue::Text(v)) => self.name = Some(v),
            ("about", FieldValue::Text(v)) => self.about = Some(v),
            ("cover", FieldValue::Text(v)) => self.cover = Some(v),
            ("banner", FieldValue::Text(v)) => self.banner = Some(v),
            ("totalSeason", FieldValue::Int(v)) => self.total_season = Some(v),
            ("updateAt", FieldValue::Temporal(raw)) => {
                let at = raw
                    .to_datetime()
                    .ok_or_else(|| FieldError::unparseable(field, &raw))?;
                self.update_at = Some(at);
            }
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}

impl Entity for MediaCategoryModel {
    fn decl() -> &'static EntityDecl {
        &MEDIA_CATEGORY
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("typeCategory", FieldValue::Text(v)) => self.type_category = Some(v),
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}

impl Entity for AlternativeTitleModel {
    fn decl() -> &'static EntityDecl {
        &ALTERNATIVE_TITLE
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("name", FieldValue::Text(v)) => self.name = Some(v),
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}

impl Entity for ExternalReferenceModel {
    fn decl() -> &'static EntityDecl {
        &EXTERNAL_REFERENCE
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("reference", FieldValue::Text(v)) => self.reference = Some(v),
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}

impl Entity for TypeReferenceModel {
    fn decl() -> &'static EntityDecl {
        &TYPE_REFERENCE
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("nameReference", FieldValue::Text(v)) => self.name_reference = Some(v),
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}

impl Entity for TypePersonModel {
    fn decl() -> &'static EntityDecl {
        &TYPE_PERSON
    }

    fn instantiate() -> Result<Self, RowMappingError> {
        Ok(Self::default())
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            ("id", FieldValue::Int(v)) => self.id = Some(v),
            ("nameTypePerson", FieldValue::Text(v)) => self.name_type_person = Some(v),
            (f, v) => return Err(FieldError::mismatch(f, &v)),
        }
        Ok(())
    }
}
