//! Configuration for the catalog client core.
//!
//! Settings resolve in three layers, later layers winning: compiled-in
//! defaults, an optional INI profile file, then `KANTODEX_*` environment
//! variables. The profile file location itself honors
//! [`PROFILE_PATH_ENV_VAR`].

use std::path::PathBuf;

use ini::Ini;

/// Default remote catalog endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default host serving official-artwork sprites.
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Default directory for persisted cache snapshots.
pub const DEFAULT_CACHE_DIR: &str = "~/.kantodex/cache";

/// Default profile file path.
pub const DEFAULT_PROFILE_PATH: &str = "~/.kantodex/profile";

/// Number of items requested per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How close to the end of the list a rendered item must be before the next
/// page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 3;

/// Environment variable overriding the profile file path.
pub const PROFILE_PATH_ENV_VAR: &str = "KANTODEX_PROFILE_PATH";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV_VAR: &str = "KANTODEX_API_URL";

/// Environment variable overriding the sprite base URL.
pub const SPRITE_URL_ENV_VAR: &str = "KANTODEX_SPRITE_URL";

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV_VAR: &str = "KANTODEX_CACHE_DIR";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV_VAR: &str = "KANTODEX_PAGE_SIZE";

/// Resolved settings handed to the services and the view-model.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote catalog API, without a trailing slash.
    pub api_base_url: String,
    /// Base URL for official-artwork sprite images, without a trailing slash.
    pub sprite_base_url: String,
    /// Directory the file-backed cache store writes into.
    pub cache_dir: PathBuf,
    /// Items requested per page.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            cache_dir: PathBuf::from(shellexpand::tilde(DEFAULT_CACHE_DIR).into_owned()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Resolve settings from defaults, the profile file, and the environment.
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_profile(&profile_path());
        config.apply_env();
        config
    }

    /// Overlay values from an INI profile file onto this config.
    ///
    /// A missing or unreadable file is ignored; individual keys are optional.
    /// Expected shape:
    ///
    /// ```ini
    /// [default]
    /// api_url = https://pokeapi.co/api/v2
    /// sprite_url = https://example.org/sprites
    /// cache_dir = ~/.kantodex/cache
    /// page_size = 10
    /// ```
    pub fn apply_profile(&mut self, path: &str) {
        let expanded = shellexpand::tilde(path).into_owned();
        let Ok(profile) = Ini::load_from_file(&expanded) else {
            tracing::debug!(path = %expanded, "no profile file, using defaults");
            return;
        };
        let Some(section) = profile.section(Some("default")) else {
            return;
        };
        if let Some(url) = section.get("api_url") {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = section.get("sprite_url") {
            self.sprite_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = section.get("cache_dir") {
            self.cache_dir = PathBuf::from(shellexpand::tilde(dir).into_owned());
        }
        if let Some(size) = section.get("page_size").and_then(|s| s.parse().ok()) {
            self.page_size = size;
        }
    }

    /// Overlay values from `KANTODEX_*` environment variables.
    pub fn apply_env(&mut self) {
        if let Some(url) = env_string(API_URL_ENV_VAR) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = env_string(SPRITE_URL_ENV_VAR) {
            self.sprite_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = env_string(CACHE_DIR_ENV_VAR) {
            self.cache_dir = PathBuf::from(shellexpand::tilde(&dir).into_owned());
        }
        if let Some(size) = env_string(PAGE_SIZE_ENV_VAR).and_then(|s| s.parse().ok()) {
            self.page_size = size;
        }
    }
}

/// Get the profile file path, checking the environment first.
pub fn profile_path() -> String {
    env_string(PROFILE_PATH_ENV_VAR).unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var_os(name).and_then(|val| val.into_string().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_should_match_constants() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.sprite_base_url, DEFAULT_SPRITE_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(!config.api_base_url.ends_with('/'));
    }

    #[test]
    fn profile_file_should_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[default]").unwrap();
        writeln!(file, "api_url = https://catalog.test/v2/").unwrap();
        writeln!(file, "page_size = 25").unwrap();

        let mut config = Config::default();
        config.apply_profile(path.to_str().unwrap());

        assert_eq!(config.api_base_url, "https://catalog.test/v2");
        assert_eq!(config.page_size, 25);
        // untouched keys keep their defaults
        assert_eq!(config.sprite_base_url, DEFAULT_SPRITE_BASE_URL);
    }

    #[test]
    fn missing_profile_should_leave_defaults() {
        let mut config = Config::default();
        config.apply_profile("/nonexistent/kantodex/profile");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_page_size_should_be_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[default]").unwrap();
        writeln!(file, "page_size = lots").unwrap();

        let mut config = Config::default();
        config.apply_profile(path.to_str().unwrap());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn env_vars_should_override_everything() {
        // The only test that touches the process environment; the other
        // tests stay on the explicit apply_* entry points.
        let saved: Vec<_> = [API_URL_ENV_VAR, PAGE_SIZE_ENV_VAR, PROFILE_PATH_ENV_VAR]
            .iter()
            .map(|name| (*name, std::env::var_os(name)))
            .collect();

        std::env::set_var(API_URL_ENV_VAR, "https://env.test/api/");
        std::env::set_var(PAGE_SIZE_ENV_VAR, "5");
        // keep a real profile file on this machine out of the picture
        std::env::set_var(PROFILE_PATH_ENV_VAR, "/nonexistent/kantodex/profile");

        let config = Config::load();
        assert_eq!(config.api_base_url, "https://env.test/api");
        assert_eq!(config.page_size, 5);

        for (name, value) in saved {
            match value {
                Some(val) => std::env::set_var(name, val),
                None => std::env::remove_var(name),
            }
        }
    }
}
