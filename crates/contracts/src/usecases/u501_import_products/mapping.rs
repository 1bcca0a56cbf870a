use serde::{Deserialize, Serialize};

/// The fixed target schema a CSV column can be mapped to.
///
/// Every variant carries a keyword list used for heuristic auto-mapping;
/// the vocabulary covers the Spanish headers merchants actually upload plus
/// the usual English equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Name,
    Code,
    Category,
    Price,
    Stock,
    Description,
}

impl TargetField {
    /// All target fields, in auto-mapping priority order.
    /// A header is assigned to the FIRST field here whose keyword matches.
    pub const ALL: [TargetField; 6] = [
        TargetField::Name,
        TargetField::Code,
        TargetField::Category,
        TargetField::Price,
        TargetField::Stock,
        TargetField::Description,
    ];

    /// Case-insensitive substring keywords that pull a header onto this field
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            TargetField::Name => &["nombre", "name", "producto", "servicio", "título", "titulo", "title"],
            TargetField::Code => &["código", "codigo", "code", "sku", "ref"],
            TargetField::Category => &["categoría", "categoria", "category", "rubro", "tipo"],
            TargetField::Price => &["precio", "price", "valor", "importe"],
            TargetField::Stock => &["stock", "cantidad", "existencia", "qty", "unidades"],
            TargetField::Description => &["descripción", "descripcion", "description", "detalle"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::Name => "name",
            TargetField::Code => "code",
            TargetField::Category => "category",
            TargetField::Price => "price",
            TargetField::Stock => "stock",
            TargetField::Description => "description",
        }
    }
}

/// One resolved assignment: a target field fed by a source column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub field: TargetField,
    /// Zero-based index into the source header row
    pub column: usize,
}

/// Partial mapping from the target schema to source columns.
/// Source columns without a binding are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub bindings: Vec<ColumnBinding>,
}

impl ColumnMapping {
    pub fn column_for(&self, field: TargetField) -> Option<usize> {
        self.bindings
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.column)
    }

    /// Import is only possible once some column feeds the name field
    pub fn is_importable(&self) -> bool {
        self.column_for(TargetField::Name).is_some()
    }
}
