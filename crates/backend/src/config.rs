use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Served under `/static`: the floor data file and the floor image.
    pub assets_dir: PathBuf,
    /// Built frontend bundle, served under `/dist` and `/assets`.
    pub dist_dir: PathBuf,
    pub data_file: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| format!("Invalid PORT {:?}: {}", p, e))?,
            None => 3000,
        };
        Ok(ServerConfig {
            port,
            assets_dir: PathBuf::from(lookup("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
            dist_dir: PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            data_file: lookup("DATA_FILE").unwrap_or_else(|| "floor_full_data.json".to_string()),
        })
    }

    pub fn data_path(&self) -> PathBuf {
        self.assets_dir.join(&self.data_file)
    }
}
