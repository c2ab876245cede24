use std::fmt;

use crate::common::{Camera, CameraId, Footage, FootageId};



/// Result of a manager operation.
///
/// Refusals ("not found", "already exists") are ordinary variants rather than
/// errors: the registry state is untouched and the call still completed.
/// `Display` renders the status line shown to operators.
#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
	CameraCreated { camera_id: CameraId },
	CameraAlreadyExists { camera_id: CameraId },
	CameraUpdated { camera_id: CameraId },
	CameraDeleted { camera_id: CameraId, removed_footage: Vec<FootageId> },
	CameraHasFootage { camera_id: CameraId, footage_count: usize },
	CameraNotFound { camera_id: CameraId },
	Monitoring { camera: Camera },
	FootageCreated { footage_id: FootageId, camera_id: CameraId },
	FootageAlreadyExists { footage_id: FootageId },
	Reviewing { footage: Footage },
	FootageNotFound { footage_id: FootageId },
}

impl Outcome {
	pub fn is_success(&self) -> bool {
		matches!(
			self,
			Outcome::CameraCreated { .. }
				| Outcome::CameraUpdated { .. }
				| Outcome::CameraDeleted { .. }
				| Outcome::Monitoring { .. }
				| Outcome::FootageCreated { .. }
				| Outcome::Reviewing { .. }
		)
	}

	/// Stable machine-readable code, identical to the serialized `outcome` tag.
	pub fn reason(&self) -> &'static str {
		match self {
			Outcome::CameraCreated { .. } => "camera_created",
			Outcome::CameraAlreadyExists { .. } => "camera_already_exists",
			Outcome::CameraUpdated { .. } => "camera_updated",
			Outcome::CameraDeleted { .. } => "camera_deleted",
			Outcome::CameraHasFootage { .. } => "camera_has_footage",
			Outcome::CameraNotFound { .. } => "camera_not_found",
			Outcome::Monitoring { .. } => "monitoring",
			Outcome::FootageCreated { .. } => "footage_created",
			Outcome::FootageAlreadyExists { .. } => "footage_already_exists",
			Outcome::Reviewing { .. } => "reviewing",
			Outcome::FootageNotFound { .. } => "footage_not_found",
		}
	}
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Outcome::CameraCreated { camera_id } => write!(f, "Camera {} created.", camera_id),
			Outcome::CameraAlreadyExists { camera_id } => write!(f, "Camera {} already exists.", camera_id),
			Outcome::CameraUpdated { camera_id } => write!(f, "Camera {} updated.", camera_id),
			Outcome::CameraDeleted { camera_id, .. } => write!(f, "Camera {} deleted.", camera_id),
			Outcome::CameraHasFootage { camera_id, footage_count } => {
				write!(f, "Camera {} still has {} footage record(s).", camera_id, footage_count)
			},
			Outcome::CameraNotFound { .. } => write!(f, "Camera not found."),
			Outcome::Monitoring { camera } => {
				write!(f, "Monitoring camera {} at {}. Status: {}", camera.camera_id, camera.location, camera.status)
			},
			Outcome::FootageCreated { footage_id, camera_id } => {
				write!(f, "Footage {} created for camera {}.", footage_id, camera_id)
			},
			Outcome::FootageAlreadyExists { footage_id } => write!(f, "Footage {} already exists.", footage_id),
			Outcome::Reviewing { footage } => write!(f, "Reviewing footage: {}", footage),
			Outcome::FootageNotFound { .. } => write!(f, "Footage not found."),
		}
	}
}
