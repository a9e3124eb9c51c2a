use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentProvider, Validate, YamlConfigSerializer,
};

/// Loads and stores a validated config through a content provider. A missing
/// source is not an error; it yields the config's defaults.
pub struct ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    provider: TProvider,
    serializer: YamlConfigSerializer,
    _config: std::marker::PhantomData<TConfig>,
}

impl<TConfig> ConfigManager<FileContentProvider, TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(path: &str) -> Self {
        Self::new(FileContentProvider::new(path))
    }
}

impl<TProvider, TConfig> ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            serializer: YamlConfigSerializer,
            _config: std::marker::PhantomData,
        }
    }

    pub fn load(&self) -> Result<TConfig, String> {
        let Some(content) = self.provider.read_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = self.serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn store(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = self.serializer.serialize(config)?;
        self.provider.write_content(&content)
    }
}
