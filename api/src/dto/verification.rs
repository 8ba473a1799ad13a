use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InitiateQuery {
    /// Phone number to verify, E.164 expected by the provider
    #[validate(length(max = 20))]
    pub number: Option<String>,

    /// Client-chosen correlation token
    #[validate(length(max = 128))]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateResponse {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

/// Query parameters of the provider redirect
///
/// Missing values arrive as empty strings and are rejected by the flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    pub access_token: String,
    /// Token lifetime in milliseconds
    pub expires_at: u64,
    pub state: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyNumberRequest {
    #[validate(length(max = 20))]
    pub number: Option<String>,
}
