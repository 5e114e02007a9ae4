//! Shared constants for the pawshaven service.

/// Default HTTP port (matches the original deployment).
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default directory for local data files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "pawshaven.toml";

/// Pet document used by the file backend.
pub const PETS_FILE_NAME: &str = "db.json";

/// Database file used by the SQLite backend.
pub const SQLITE_FILE_NAME: &str = "data.sqlite";

/// Local adoption sink document.
pub const ADOPTIONS_FILE_NAME: &str = "adoptions.json";

/// Maximum pet name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Pet types the catalog offers as filters. Other values are stored verbatim.
pub const RECOMMENDED_TYPES: [&str; 5] = ["dog", "cat", "rabbit", "bird", "other"];

/// Header carrying the shared admin secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Remote table holding pet records.
pub const REMOTE_PETS_TABLE: &str = "pets";

/// Remote table holding adoption applications.
pub const REMOTE_ADOPTIONS_TABLE: &str = "adoption_applications";

/// Default timeout for remote table calls, in seconds.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;

/// Default timeout for a whole HTTP request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default server used by the catalog commands.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
