use log::{debug, info, warn};

use crate::common::{Camera, CameraMap, Footage, FootageMap, DEFAULT_CAMERA_STATUS};
use crate::config::{DeletePolicy, RegistrySettings};
use crate::outcome::Outcome;



/// Fields to overwrite on an existing camera. `None` leaves the field as is;
/// `Some("")` is a real value and is written.
#[derive(Clone)]
#[derive(Debug)]
#[derive(Default)]
#[derive(PartialEq)]
#[derive(Eq)]
pub struct CameraUpdate {
	pub location: Option<String>,
	pub status: Option<String>,
}

impl CameraUpdate {
	pub fn location(location: &str) -> CameraUpdate {
		CameraUpdate { location: Some(location.to_string()), status: None }
	}

	pub fn status(status: &str) -> CameraUpdate {
		CameraUpdate { location: None, status: Some(status.to_string()) }
	}

	pub fn with_status(mut self, status: &str) -> CameraUpdate {
		self.status = Some(status.to_string());
		self
	}
}

/// Owns every camera and footage record.
///
/// Invariants kept by all operations:
///  - each id in a camera's `footage_ids` is a key of `footages`, and that
///    footage's `camera_id` is the camera's id;
///  - each footage's `camera_id` is a key of `cameras`.
#[derive(Debug)]
pub struct SurveillanceCameraManager {
	cameras: CameraMap,
	footages: FootageMap,
	default_status: String,
	delete_policy: DeletePolicy,
}

impl Default for SurveillanceCameraManager {
	fn default() -> Self {
		Self::new()
	}
}

impl SurveillanceCameraManager {
	pub fn new() -> SurveillanceCameraManager {
		SurveillanceCameraManager {
			cameras: CameraMap::new(),
			footages: FootageMap::new(),
			default_status: DEFAULT_CAMERA_STATUS.to_string(),
			delete_policy: DeletePolicy::default(),
		}
	}

	pub fn with_settings(settings: &RegistrySettings) -> SurveillanceCameraManager {
		SurveillanceCameraManager {
			default_status: settings.default_status.clone(),
			delete_policy: settings.delete_policy,
			..Self::new()
		}
	}

	pub fn delete_policy(&self) -> DeletePolicy {
		self.delete_policy
	}

	pub fn create_camera(&mut self, camera_id: &str, location: &str) -> Outcome {
		if self.cameras.contains_key(camera_id) {
			return logged(Outcome::CameraAlreadyExists { camera_id: camera_id.to_string() });
		}
		let camera = Camera::new(camera_id, location, &self.default_status);
		self.cameras.insert(camera_id.to_string(), camera);
		logged(Outcome::CameraCreated { camera_id: camera_id.to_string() })
	}

	pub fn read_camera(&self, camera_id: &str) -> Option<&Camera> {
		self.cameras.get(camera_id)
	}

	pub fn update_camera(&mut self, camera_id: &str, update: CameraUpdate) -> Outcome {
		let camera = match self.cameras.get_mut(camera_id) {
			Some(camera) => camera,
			None => return logged(Outcome::CameraNotFound { camera_id: camera_id.to_string() }),
		};
		if let Some(location) = update.location {
			camera.location = location;
		}
		if let Some(status) = update.status {
			camera.status = status;
		}
		logged(Outcome::CameraUpdated { camera_id: camera_id.to_string() })
	}

	pub fn delete_camera(&mut self, camera_id: &str) -> Outcome {
		let footage_count = match self.cameras.get(camera_id) {
			Some(camera) => camera.footage_ids.len(),
			None => return logged(Outcome::CameraNotFound { camera_id: camera_id.to_string() }),
		};
		if self.delete_policy == DeletePolicy::Forbid && footage_count > 0 {
			return logged(Outcome::CameraHasFootage { camera_id: camera_id.to_string(), footage_count });
		}

		let removed_footage = match self.cameras.remove(camera_id) {
			Some(camera) => camera.footage_ids,
			None => Vec::new(),
		};
		for footage_id in &removed_footage {
			self.footages.remove(footage_id);
		}
		logged(Outcome::CameraDeleted { camera_id: camera_id.to_string(), removed_footage })
	}

	pub fn monitor_surveillance_cameras(&self, camera_id: &str) -> Outcome {
		logged(match self.cameras.get(camera_id) {
			Some(camera) => Outcome::Monitoring { camera: camera.clone() },
			None => Outcome::CameraNotFound { camera_id: camera_id.to_string() },
		})
	}

	pub fn create_footage(&mut self, footage_id: &str, camera_id: &str, timestamp: &str, description: &str) -> Outcome {
		let camera = match self.cameras.get_mut(camera_id) {
			Some(camera) => camera,
			None => return logged(Outcome::CameraNotFound { camera_id: camera_id.to_string() }),
		};
		if self.footages.contains_key(footage_id) {
			return logged(Outcome::FootageAlreadyExists { footage_id: footage_id.to_string() });
		}

		camera.add_footage(footage_id);
		self.footages.insert(footage_id.to_string(), Footage::new(footage_id, camera_id, timestamp, description));
		logged(Outcome::FootageCreated { footage_id: footage_id.to_string(), camera_id: camera_id.to_string() })
	}

	pub fn review_camera_footage(&self, footage_id: &str) -> Outcome {
		logged(match self.footages.get(footage_id) {
			Some(footage) => Outcome::Reviewing { footage: footage.clone() },
			None => Outcome::FootageNotFound { footage_id: footage_id.to_string() },
		})
	}

	pub fn read_footage(&self, footage_id: &str) -> Option<&Footage> {
		self.footages.get(footage_id)
	}

	/// Footage owned by `camera_id` in creation order, or `None` for an unknown camera.
	pub fn footage_for_camera(&self, camera_id: &str) -> Option<Vec<&Footage>> {
		let camera = self.cameras.get(camera_id)?;
		Some(camera.footage_ids.iter().filter_map(|id| self.footages.get(id)).collect())
	}

	/// Cameras ordered by id.
	pub fn cameras(&self) -> impl Iterator<Item = &Camera> {
		self.cameras.values()
	}

	/// Footage ordered by id.
	pub fn footages(&self) -> impl Iterator<Item = &Footage> {
		self.footages.values()
	}

	pub fn camera_count(&self) -> usize {
		self.cameras.len()
	}

	pub fn footage_count(&self) -> usize {
		self.footages.len()
	}
}

fn logged(outcome: Outcome) -> Outcome {
	match &outcome {
		Outcome::Monitoring { .. } | Outcome::Reviewing { .. } => debug!("{}", outcome),
		_ if outcome.is_success() => info!("{}", outcome),
		_ => warn!("{} ({})", outcome, outcome.reason()),
	}
	outcome
}
