use std::collections::HashMap;

use serde::Deserialize;

// Payload arbitrario de un formulario de contacto, reenviado tal cual
#[derive(Debug, Deserialize)]
pub struct SendFormRequest {
    #[serde(rename = "formData")]
    pub form_data: HashMap<String, serde_json::Value>,
}
