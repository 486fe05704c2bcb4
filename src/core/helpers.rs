use std::collections::HashMap;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::HttpRequest;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use serde_json::Value;

use crate::core::errors::ApiError;
use crate::core::query_params::parse_query_params;

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        HashCost {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

/// Hashes and verifies passwords with argon2id.
#[derive(Clone)]
pub struct CredentialService {
    argon2: Argon2<'static>,
}

impl CredentialService {
    pub fn new(cost: HashCost) -> anyhow::Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow::anyhow!("Invalid password hash cost: {}", e))?;

        Ok(CredentialService {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Salted one-way hash in PHC string form. Every call draws a new salt.
    pub fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Checks `password` against a stored PHC hash. A stored value that is
    /// not a valid hash never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Fields of a request body, parsed from JSON or an urlencoded form.
#[derive(Debug, Default)]
pub struct RequestFields {
    fields: HashMap<String, Value>,
}

impl RequestFields {
    /// Bodies that are neither JSON nor a form are ignored, so every field
    /// reads as missing.
    pub fn from_body(req: &HttpRequest, body: &[u8]) -> Result<Self, ApiError> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let text = std::str::from_utf8(body)
                .map_err(|_| ApiError::BadRequest("Malformed request body".to_string()))?;
            let fields = parse_query_params(text)
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            return Ok(RequestFields { fields });
        }

        let is_json = content_type.starts_with("application/json");
        if !is_json || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RequestFields::default());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(RequestFields {
                fields: map.into_iter().collect(),
            }),
            _ => Err(ApiError::BadRequest("Malformed request body".to_string())),
        }
    }

    /// A field is present when it is a non-empty string or a non-zero number.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Store identifiers are integers; anything else is a caller error.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("{} must be an integer", field)))
}
