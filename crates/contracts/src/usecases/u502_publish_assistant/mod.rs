pub mod document;
pub mod request;
pub mod response;

pub use document::{AssistantDocument, AssistantRule, CatalogItem, CommerceCard};
pub use request::{ExportRequest, UploadGistRequest};
pub use response::{ExportResponse, GistInfo, UploadGistResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct PublishAssistant;

impl UseCaseMetadata for PublishAssistant {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "publish_assistant"
    }

    fn display_name() -> &'static str {
        "Publicación del asistente"
    }

    fn description() -> &'static str {
        "Genera el documento JSON del asistente y lo publica en un Gist público para el widget de chat"
    }
}
