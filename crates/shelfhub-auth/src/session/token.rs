//! Opaque refresh token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Random bytes per refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates a URL-safe refresh token from the OS CSPRNG.
///
/// The token carries no claims; it is only a lookup key into the
/// refresh token store.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
