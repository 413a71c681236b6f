use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use serde_json::Value;

use crate::roles::{ROLE_PREFIX, Role};

/// base64url, padding optional. Tokens minted by the backend are unpadded.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Outcome of reading the role claim out of a session token.
///
/// Decoding never fails loudly: every malformed input collapses to
/// [`RoleClaim::Invalid`], which the guard treats as "logged out".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleClaim {
    /// The bare role string with the `ROLE_` prefix removed. It is not
    /// necessarily one of the known [`Role`]s.
    Decoded { role: String },
    Invalid,
}

impl RoleClaim {
    /// The known role this claim names, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleClaim::Decoded { role } => role.parse().ok(),
            RoleClaim::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RoleClaim::Decoded { .. })
    }
}

/// The part of the token payload the client cares about.
#[derive(Debug, Clone, Default, Deserialize)]
struct TokenPayload {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    role: Option<Value>,
}

fn decode_payload(token: &str) -> Option<TokenPayload> {
    let segment = token.split('.').nth(1)?;
    let bytes = PAYLOAD_ENGINE.decode(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extract the role claim from a (possibly absent) session token.
pub fn decode_role(token: Option<&str>) -> RoleClaim {
    let Some(payload) = token.and_then(decode_payload) else {
        return RoleClaim::Invalid;
    };

    let Some(Value::String(raw)) = payload.role else {
        return RoleClaim::Invalid;
    };

    let role = raw.strip_prefix(ROLE_PREFIX).unwrap_or(&raw);
    if role.is_empty() {
        return RoleClaim::Invalid;
    }

    RoleClaim::Decoded {
        role: role.to_string(),
    }
}

/// Subject (username) carried by the token, used for display only.
pub fn decode_subject(token: Option<&str>) -> Option<String> {
    match token.and_then(decode_payload)?.sub? {
        Value::String(sub) if !sub.is_empty() => Some(sub),
        _ => None,
    }
}
