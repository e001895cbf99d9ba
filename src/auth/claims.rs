use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload. Stateless: the token is the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
