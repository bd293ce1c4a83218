use serde::{Deserialize, Serialize};

/// Which platform's addon asset to fetch. Always supplied through
/// configuration, never detected from the host.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    pub fn asset_name(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

/// One AlliedModders-style addon drop: a base URL hosting versioned
/// directories, each containing a "latest" pointer file naming the current
/// archive for a platform.
#[derive(Clone, Debug)]
pub struct AddonSource {
    pub name: String,
    pub base_url: String,
    pub version: String,
    pub platform: Platform,
}

impl AddonSource {
    pub fn metamod(version: &str, platform: Platform) -> Self {
        Self {
            name: "metamod".to_string(),
            base_url: "https://mms.alliedmods.net/mmsdrop".to_string(),
            version: version.to_string(),
            platform,
        }
    }

    pub fn sourcemod(version: &str, platform: Platform) -> Self {
        Self {
            name: "sourcemod".to_string(),
            base_url: "https://sm.alliedmods.net/smdrop".to_string(),
            version: version.to_string(),
            platform,
        }
    }

    pub fn latest_pointer_url(&self) -> String {
        let prefix = match self.name.as_str() {
            "metamod" => "mmsource",
            other => other,
        };
        format!(
            "{}/{}/{}-latest-{}",
            self.base_url,
            self.version,
            prefix,
            self.platform.asset_name()
        )
    }

    pub fn download_url(&self, archive_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, archive_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metamod_latest_pointer_url() {
        let source = AddonSource::metamod("1.11", Platform::Linux);
        assert_eq!(
            source.latest_pointer_url(),
            "https://mms.alliedmods.net/mmsdrop/1.11/mmsource-latest-linux"
        );
    }

    #[test]
    fn test_sourcemod_latest_pointer_url_windows() {
        let source = AddonSource::sourcemod("1.10", Platform::Windows);
        assert_eq!(
            source.latest_pointer_url(),
            "https://sm.alliedmods.net/smdrop/1.10/sourcemod-latest-windows"
        );
    }

    #[test]
    fn test_download_url_joins_version_directory() {
        let source = AddonSource::sourcemod("1.10", Platform::Linux);
        assert_eq!(
            source.download_url("sourcemod-1.10.0-git6528-linux.tar.gz"),
            "https://sm.alliedmods.net/smdrop/1.10/sourcemod-1.10.0-git6528-linux.tar.gz"
        );
    }
}
