//! AI prompt for photo weight estimation
//!
//! Language convention:
//! - Portuguese for the instruction text shown to the model (the tool's user
//!   base and training examples are pt-BR livestock photos)
//! - English JSON key names on the wire (estimatedWeightKg, reasoning)
//!
//! The response schema is sent alongside the prompt so the model answers in
//! strict JSON; the prompt still spells the keys out because models ignore
//! schemas more often than inline instructions.

use serde_json::json;

// JSON field name constants
pub const KEY_ESTIMATED_WEIGHT_KG: &str = "estimatedWeightKg";
pub const KEY_REASONING: &str = "reasoning";

/// Build the weight-estimation prompt for one goat/sheep photo.
pub fn build_estimation_prompt() -> String {
    format!(
        "Analise a imagem deste caprino (cabra ou ovelha). Estime seu peso vivo em \
         quilogramas. Forneça um breve raciocínio para sua estimativa, considerando a \
         raça aparente, a condição corporal e o desenvolvimento muscular. Retorne o \
         resultado como um objeto JSON com as chaves \"{}\" (um número) e \"{}\" (uma string).",
        KEY_ESTIMATED_WEIGHT_KG, KEY_REASONING
    )
}

/// Build the structured-output schema for the estimation response.
///
/// Mirrors the prompt: a numeric weight in kilograms and a textual
/// justification, both required.
pub fn build_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            KEY_ESTIMATED_WEIGHT_KG: {
                "type": "NUMBER",
                "description": "O peso estimado do animal em quilogramas."
            },
            KEY_REASONING: {
                "type": "STRING",
                "description": "A justificativa para a estimativa de peso."
            }
        },
        "required": [KEY_ESTIMATED_WEIGHT_KG, KEY_REASONING]
    })
}
