/// Production base URL of the Pi Network platform API.
pub const DEFAULT_PI_API_BASE: &str = "https://api.minepi.com/v2";

/// Authorization scheme used with the server-side API key.
pub const KEY_SCHEME: &str = "Key";

/// Authorization scheme used with a user's access token.
pub const BEARER_SCHEME: &str = "Bearer";

pub const JSON_MEDIA_TYPE: &str = "application/json";
