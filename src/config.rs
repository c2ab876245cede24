use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{info, warn};

use crate::common::{CameraId, DEFAULT_CAMERA_STATUS};
use crate::manager::{CameraUpdate, SurveillanceCameraManager};
use crate::outcome::Outcome;



pub const DEFAULT_CONFIG_FILES: [&str; 2] = [
	"/etc/camera-registry/camera-registry.toml",
	"camera-registry.toml",
];

/// What `delete_camera` does with footage owned by the camera.
#[derive(Clone)]
#[derive(Copy)]
#[derive(Debug)]
#[derive(Default)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
	/// Remove the camera together with its footage.
	#[default]
	Cascade,
	/// Refuse to delete a camera that still owns footage.
	Forbid,
}

#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
pub struct RegistrySettings {
	pub default_status: String,
	pub delete_policy: DeletePolicy,
}

impl Default for RegistrySettings {
	fn default() -> Self {
		RegistrySettings {
			default_status: DEFAULT_CAMERA_STATUS.to_string(),
			delete_policy: DeletePolicy::default(),
		}
	}
}

/// A camera registered at startup.
#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSeed {
	pub id: CameraId,
	pub location: String,
	pub status: Option<String>,
}

#[derive(Debug)]
#[derive(Default)]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistrySection {
	default_status: Option<String>,
	delete_policy: Option<DeletePolicy>,
}

#[derive(Debug)]
#[derive(Default)]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	#[serde(default)]
	registry: RegistrySection,
	#[serde(default)]
	cameras: Vec<CameraSeed>,
}

/// Accumulates settings and seed cameras from one or more TOML files.
/// Later files override `[registry]` keys; `[[cameras]]` entries are appended.
#[derive(Clone)]
#[derive(Debug)]
#[derive(Default)]
pub struct ConfigManager {
	settings: RegistrySettings,
	cameras: Vec<CameraSeed>,
}

impl ConfigManager {
	pub fn new() -> ConfigManager {
		ConfigManager::default()
	}

	pub fn settings(&self) -> &RegistrySettings {
		&self.settings
	}

	pub fn cameras(&self) -> &[CameraSeed] {
		&self.cameras
	}

	pub fn read_config(&mut self, filenames: Vec<&str>) -> anyhow::Result<()> {
		for filename in filenames {
			self.read_config_file(Path::new(filename))?;
		}
		Ok(())
	}

	pub fn read_default_config_files(&mut self) -> anyhow::Result<()> {
		for filename in DEFAULT_CONFIG_FILES {
			let path = Path::new(filename);
			if path.is_file() {
				self.read_config_file(path)?;
			} else {
				// Running without any config file is normal
				warn!("Config file {} not found; skipping", filename);
			}
		}
		Ok(())
	}

	pub fn read_config_file(&mut self, path: &Path) -> anyhow::Result<()> {
		let text = fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file {}", path.display()))?;
		self.read_config_str(&text)
			.with_context(|| format!("Invalid config file {}", path.display()))?;
		info!("Read config file {}", path.display());
		Ok(())
	}

	pub fn read_config_str(&mut self, text: &str) -> anyhow::Result<()> {
		let file: ConfigFile = toml::from_str(text)?;
		if let Some(default_status) = file.registry.default_status {
			self.settings.default_status = default_status;
		}
		if let Some(delete_policy) = file.registry.delete_policy {
			self.settings.delete_policy = delete_policy;
		}
		self.cameras.extend(file.cameras);
		Ok(())
	}

	/// Builds a manager from the settings and registers every seed camera.
	/// Seeds go through the regular operations, so a repeated id is reported
	/// rather than overwritten.
	pub fn build_manager(&self) -> (SurveillanceCameraManager, Vec<Outcome>) {
		let mut manager = SurveillanceCameraManager::with_settings(&self.settings);
		let mut outcomes = Vec::with_capacity(self.cameras.len());
		for seed in &self.cameras {
			let created = manager.create_camera(&seed.id, &seed.location);
			let is_new = created.is_success();
			outcomes.push(created);
			match &seed.status {
				Some(status) if is_new && *status != self.settings.default_status => {
					outcomes.push(manager.update_camera(&seed.id, CameraUpdate::status(status)));
				},
				_ => {},
			}
		}
		(manager, outcomes)
	}
}
