pub mod mapping;
pub mod record;
pub mod request;
pub mod response;

pub use mapping::{ColumnBinding, ColumnMapping, TargetField};
pub use record::ParsedRecord;
pub use request::{ImportPolicy, ImportRequest, PreviewRequest};
pub use response::{ImportPreview, ImportReport};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportProducts;

impl UseCaseMetadata for ImportProducts {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_products"
    }

    fn display_name() -> &'static str {
        "Importación de productos desde CSV"
    }

    fn description() -> &'static str {
        "Carga masiva de productos y servicios desde un archivo CSV con mapeo de columnas"
    }
}
