use std::collections::BTreeMap;
use std::fmt;



pub type CameraId = String;
pub type FootageId = String;
pub type CameraMap = BTreeMap<CameraId, Camera>;
pub type FootageMap = BTreeMap<FootageId, Footage>;

pub const DEFAULT_CAMERA_STATUS: &str = "active";

#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Serialize)]
pub struct Camera {
	pub camera_id: CameraId,
	pub location: String,
	pub status: String,
	// Creation order; kept in sync with the manager's footage map.
	pub footage_ids: Vec<FootageId>,
}

impl Camera {
	pub fn new(camera_id: &str, location: &str, status: &str) -> Camera {
		Camera {
			camera_id: camera_id.to_string(),
			location: location.to_string(),
			status: status.to_string(),
			footage_ids: Vec::new(),
		}
	}

	/// Appends `footage_id` unless the camera already lists it.
	/// Returns whether the id was added.
	pub fn add_footage(&mut self, footage_id: &str) -> bool {
		if self.owns_footage(footage_id) {
			return false;
		}
		self.footage_ids.push(footage_id.to_string());
		true
	}

	pub fn owns_footage(&self, footage_id: &str) -> bool {
		self.footage_ids.iter().any(|id| id == footage_id)
	}
}

impl fmt::Display for Camera {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Camera(camera_id={}, location='{}', status='{}')", self.camera_id, self.location, self.status)
	}
}

#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Serialize)]
pub struct Footage {
	pub footage_id: FootageId,
	pub camera_id: CameraId,
	// Caller-supplied; not parsed.
	pub timestamp: String,
	pub description: String,
}

impl Footage {
	pub fn new(footage_id: &str, camera_id: &str, timestamp: &str, description: &str) -> Footage {
		Footage {
			footage_id: footage_id.to_string(),
			camera_id: camera_id.to_string(),
			timestamp: timestamp.to_string(),
			description: description.to_string(),
		}
	}
}

impl fmt::Display for Footage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Footage(footage_id={}, camera_id={}, timestamp='{}', description='{}')",
			self.footage_id, self.camera_id, self.timestamp, self.description
		)
	}
}
