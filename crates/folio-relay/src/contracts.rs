use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Body of `POST /api/contact`. Missing or `null` fields deserialize as
/// empty so they fail validation instead of parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
    pub subject: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid e-mail address";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_SEND_FAILED: &str = "Failed to send message. Please try again later.";
pub const MSG_RESUME_MISSING: &str = "Could not find resume file.";
pub const MSG_API_RUNNING: &str = "API is running...";
