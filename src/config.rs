use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup configuration. The defaults reproduce the full feature set;
/// turning `lighting` and `autoSpin` off yields the plain draggable cube.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    /// One image per cube face, in face order.
    pub textures: [String; 6],
    /// Enables the lighting subsystem and its selection keys.
    pub lighting: bool,
    /// Free-running rotation about the cube diagonal.
    pub auto_spin: bool,
    /// Debug option: re-upload all face textures every frame. Pure overhead
    /// with static images; off unless you are poking at the loader.
    pub reload_textures_every_frame: bool,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig {
            textures: [
                "imagem1.jpg".to_string(),
                "imagem2.jpg".to_string(),
                "imagem3.jpg".to_string(),
                "imagem4.jpg".to_string(),
                "imagem5.jpg".to_string(),
                "imagem6.jpg".to_string(),
            ],
            lighting: true,
            auto_spin: true,
            reload_textures_every_frame: false,
        }
    }
}

impl SceneConfig {
    /// Loads the config file if it exists; a missing file just means
    /// defaults.
    pub fn load(path: &Path) -> Result<SceneConfig, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(SceneConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn texture_paths(&self) -> Vec<PathBuf> {
        self.textures.iter().map(PathBuf::from).collect()
    }
}
