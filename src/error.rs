//! Error types for caprino-checker

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("No camera device found")]
    NoCameraFound,

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("No frame captured")]
    NoFrameCaptured,

    #[error("Analysis already in progress")]
    AnalysisInProgress,

    #[error("AI response failed shape check: {0}")]
    MalformedAiResponse(String),

    #[error("AI transport failure: {0}")]
    AiTransport(String),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// User-facing message (pt-BR), selected by failure category.
    ///
    /// Diagnostic detail stays in the `Display` impl and the logs; what the
    /// user sees is only the category text.
    pub fn user_message(&self) -> String {
        match self {
            Error::PermissionDenied => {
                "Você precisa dar permissão para acessar a câmera.".to_string()
            }
            Error::NoCameraFound => {
                "Nenhuma câmera foi encontrada no seu dispositivo.".to_string()
            }
            Error::CameraUnavailable(_) => {
                "Ocorreu um erro ao tentar acessar a câmera. Verifique as permissões.".to_string()
            }
            Error::NoFrameCaptured => "Nenhuma imagem capturada para analisar.".to_string(),
            Error::MalformedAiResponse(_) => {
                "Não foi possível processar a resposta da IA. Tente uma imagem diferente."
                    .to_string()
            }
            Error::AiTransport(_) => {
                "Falha na comunicação com o serviço de IA. Tente novamente.".to_string()
            }
            Error::MissingApiKey => "A chave de API não está configurada.".to_string(),
            Error::InvalidInput(_) => {
                "Por favor, informe uma circunferência torácica válida e positiva.".to_string()
            }
            other => format!("Falha na análise da IA: {}", other),
        }
    }
}
