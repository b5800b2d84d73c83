use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    net::{Ipv4Addr, SocketAddr},
    path::Path,
};

use crate::error::FolioError;

pub const SETTINGS_PATH: &str = "core/settings.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub contact_endpoint: StrSetting,
    pub projects_path: StrSetting,
    pub resume_path: StrSetting,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StrSetting {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct U16Setting {
    pub name: String,
    pub value: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ipv4Setting {
    pub name: String,
    pub value: Ipv4Addr,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let file = File::open(path.as_ref())?;
        let mut buffer = Vec::new();
        BufReader::new(file).read_to_end(&mut buffer)?;
        let settings = serde_json::from_slice::<Settings>(&buffer)?;
        Ok(settings)
    }

    /// Writes the settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FolioError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.ipv4_addr.value, self.port.value))
    }

    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Setting {
                name: "Ipv4 Address".to_string(),
                value: Ipv4Addr::new(127, 0, 0, 1),
            },
            port: U16Setting {
                name: "Port".to_string(),
                value: 4010,
            },
            contact_endpoint: StrSetting {
                name: "Contact Endpoint".to_string(),
                value: "http://127.0.0.1:4020/api/contact".to_string(),
            },
            projects_path: StrSetting {
                name: "projects_path".to_string(),
                value: "local/projects.json".to_string(),
            },
            resume_path: StrSetting {
                name: "resume_path".to_string(),
                value: "public/resume.pdf".to_string(),
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core").join("settings.json");
        let mut settings = Settings::new();
        settings.port.value = 8088;
        settings.contact_endpoint.value = "https://forms.example.com/send".to_string();

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
        assert_eq!(loaded.socket_addr().to_string(), "127.0.0.1:8088");
    }

    #[test]
    fn saved_file_is_complete_on_return() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::new().save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.trim_end().ends_with('}'));
        assert_eq!(serde_json::from_str::<Settings>(&written).unwrap(), Settings::new());
    }

    #[test]
    fn save_into_a_file_path_parent_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, b"x").unwrap();

        let result = Settings::new().save(blocker.join("settings.json"));
        assert!(matches!(result, Err(FolioError::Io(_))));
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{\"port\": 12}").unwrap();

        assert!(matches!(Settings::load(&path), Err(FolioError::Format(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(FolioError::Io(_))));
    }
}
