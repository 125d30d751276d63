use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storytime_config::Config;

pub const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Named JSON profiles kept in one directory
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `STORYTIME_PROFILE_DIR`, else `<config dir>/storytime/profiles`
    pub fn default_location() -> Self {
        let dir = std::env::var_os("STORYTIME_PROFILE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|p| p.join("storytime").join("profiles")))
            .unwrap_or_else(|| PathBuf::from("profiles"));
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the profile folder and a main profile with default settings
    /// if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let main_profile = self.path_for(MAIN_PROFILE);
        if !main_profile.exists() {
            self.save(MAIN_PROFILE, &Config::default())?;
            tracing::info!("Created main profile in {}", self.dir.display());
        }

        Ok(())
    }

    pub fn save(&self, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
        let profile = Profile {
            name: name.into(),
            value: config.clone(),
        };
        let file = self.path_for(name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
        Ok(file)
    }

    /// Load a profile by name, defaulting to main, then to built-in
    /// defaults. Environment variables that are set win over the file.
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        self.load_with_env(name, |var| std::env::var(var).ok())
    }

    pub fn load_with_env(
        &self,
        name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Config> {
        let mut config = match self.read(name)? {
            Some(config) => config,
            None => {
                tracing::warn!("Profile {name} not found, falling back to main profile");
                self.read(MAIN_PROFILE)?.unwrap_or_default()
            }
        };

        config.apply_env_with(lookup);
        Ok(config)
    }

    fn read(&self, name: &str) -> anyhow::Result<Option<Config>> {
        let file = self.path_for(name);
        if !file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&file)?;
        let profile: Profile = serde_json::from_str(&data)?;
        Ok(Some(profile.value))
    }
}
