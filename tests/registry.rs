use std::fs;

use camera_registry::config::{ConfigManager, DeletePolicy};
use camera_registry::report::{Reporter, ScriptSummary};
use camera_registry::{CameraUpdate, Outcome, SurveillanceCameraManager};



#[test]
fn entrance_visitor_scenario() {
	let mut manager = SurveillanceCameraManager::new();
	manager.create_camera("cam1", "Entrance");
	manager.create_camera("cam2", "Parking Lot");

	let created = manager.create_footage("footage1", "cam1", "2024-09-25 10:00:00", "Visitor entry.");
	assert!(created.is_success());

	assert!(manager.read_footage("footage1").is_some());
	assert!(manager.read_camera("cam1").unwrap().owns_footage("footage1"));

	let review = manager.review_camera_footage("footage1");
	assert!(review.to_string().contains("Reviewing footage:"));
	match review {
		Outcome::Reviewing { footage } => {
			assert_eq!(footage.camera_id, "cam1");
			assert_eq!(footage.timestamp, "2024-09-25 10:00:00");
			assert_eq!(footage.description, "Visitor entry.");
		},
		other => panic!("unexpected outcome: {:?}", other),
	}
}

#[test]
fn camera_lifecycle_through_public_api() {
	let mut manager = SurveillanceCameraManager::new();
	assert_eq!(manager.create_camera("cam1", "Entrance").reason(), "camera_created");
	assert_eq!(manager.update_camera("cam1", CameraUpdate::location("Lobby").with_status("inactive")).reason(), "camera_updated");
	assert_eq!(
		manager.monitor_surveillance_cameras("cam1").to_string(),
		"Monitoring camera cam1 at Lobby. Status: inactive"
	);
	assert_eq!(manager.delete_camera("cam1").reason(), "camera_deleted");
	assert_eq!(manager.delete_camera("cam1").reason(), "camera_not_found");
	assert_eq!(manager.camera_count(), 0);
}

#[test]
fn config_files_drive_a_script_run() {
	let dir = tempfile::tempdir().unwrap();
	let base = dir.path().join("base.toml");
	let site = dir.path().join("site.toml");
	fs::write(&base, r#"
[registry]
delete_policy = "forbid"

[[cameras]]
id = "cam1"
location = "Entrance"
"#).unwrap();
	fs::write(&site, r#"
[[cameras]]
id = "cam2"
location = "Parking Lot"
status = "inactive"
"#).unwrap();

	let mut config = ConfigManager::new();
	config.read_config(vec![base.to_str().unwrap(), site.to_str().unwrap()]).unwrap();
	assert_eq!(config.settings().delete_policy, DeletePolicy::Forbid);

	let (mut manager, seeded) = config.build_manager();
	assert!(seeded.iter().all(Outcome::is_success));
	assert_eq!(manager.delete_policy(), DeletePolicy::Forbid);

	let mut reporter = Reporter::new(Vec::new(), false);
	let summary = reporter.run_script(&mut manager, "
create-footage footage1 cam1 \"2024-09-25 10:00:00\" \"Visitor entry.\"
delete-camera cam1
delete-camera cam2
monitor cam2
".as_bytes()).unwrap();
	let output = String::from_utf8(reporter.into_inner()).unwrap();

	assert_eq!(summary, ScriptSummary { succeeded: 2, refused: 2, invalid: 0 });
	assert_eq!(output.lines().collect::<Vec<_>>(), vec![
		"Footage footage1 created for camera cam1.",
		"Camera cam1 still has 1 footage record(s).",
		"Camera cam2 deleted.",
		"Camera not found.",
	]);
	assert!(manager.read_camera("cam1").is_some());
}

#[test]
fn missing_config_file_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("absent.toml");
	let mut config = ConfigManager::new();
	let err = config.read_config(vec![missing.to_str().unwrap()]).unwrap_err();
	assert!(err.to_string().contains("Failed to read config file"));
}
