use std::io::{BufRead, Write};

use anyhow::Context;
use log::error;
use serde::Serialize;

use crate::manager::SurveillanceCameraManager;
use crate::outcome::Outcome;
use crate::script::{self, Command};



#[derive(Clone)]
#[derive(Copy)]
#[derive(Debug)]
#[derive(Default)]
#[derive(PartialEq)]
#[derive(Eq)]
pub struct ScriptSummary {
	pub succeeded: usize,
	pub refused: usize,
	pub invalid: usize,
}

/// Writes outcomes and records to `out`, one line each: the status text by
/// default, or one JSON document per line.
pub struct Reporter<W: Write> {
	out: W,
	json: bool,
}

impl<W: Write> Reporter<W> {
	pub fn new(out: W, json: bool) -> Reporter<W> {
		Reporter { out, json }
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	pub fn outcome(&mut self, outcome: &Outcome) -> anyhow::Result<()> {
		if self.json {
			self.json_line(outcome)
		} else {
			writeln!(self.out, "{}", outcome).context("Failed to write outcome")
		}
	}

	fn json_line<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
		serde_json::to_writer(&mut self.out, value)?;
		writeln!(self.out).context("Failed to write record")
	}

	fn records<T: Serialize + std::fmt::Display>(&mut self, records: &[&T]) -> anyhow::Result<()> {
		if self.json {
			return self.json_line(records);
		}
		for record in records {
			writeln!(self.out, "{}", record).context("Failed to write record")?;
		}
		Ok(())
	}

	/// Runs one command; returns whether the registry accepted it.
	pub fn execute(&mut self, manager: &mut SurveillanceCameraManager, command: Command) -> anyhow::Result<bool> {
		let outcome = match command {
			Command::CreateCamera { camera_id, location } => manager.create_camera(&camera_id, &location),
			Command::UpdateCamera { camera_id, update } => manager.update_camera(&camera_id, update),
			Command::DeleteCamera { camera_id } => manager.delete_camera(&camera_id),
			Command::Monitor { camera_id } => manager.monitor_surveillance_cameras(&camera_id),
			Command::CreateFootage { footage_id, camera_id, timestamp, description } => {
				manager.create_footage(&footage_id, &camera_id, &timestamp, &description)
			},
			Command::Review { footage_id } => manager.review_camera_footage(&footage_id),
			Command::ShowCamera { camera_id } => match manager.read_camera(&camera_id) {
				Some(camera) => {
					self.records(&[camera])?;
					return Ok(true);
				},
				None => Outcome::CameraNotFound { camera_id },
			},
			Command::ListCameras => {
				let cameras: Vec<_> = manager.cameras().collect();
				self.records(&cameras)?;
				return Ok(true);
			},
			Command::ListFootage { camera_id: None } => {
				let footages: Vec<_> = manager.footages().collect();
				self.records(&footages)?;
				return Ok(true);
			},
			Command::ListFootage { camera_id: Some(camera_id) } => match manager.footage_for_camera(&camera_id) {
				Some(footages) => {
					self.records(&footages)?;
					return Ok(true);
				},
				None => Outcome::CameraNotFound { camera_id },
			},
		};
		self.outcome(&outcome)?;
		Ok(outcome.is_success())
	}

	/// Executes every line of `input`. Lines that fail to parse, including ones
	/// that are not UTF-8, are logged and counted; they do not stop the run.
	pub fn run_script<R: BufRead>(&mut self, manager: &mut SurveillanceCameraManager, input: R) -> anyhow::Result<ScriptSummary> {
		let mut summary = ScriptSummary::default();
		for (index, line) in input.split(b'\n').enumerate() {
			let mut line = line.context("Failed to read script")?;
			if line.last() == Some(&b'\r') {
				line.pop();
			}
			match script::parse_bytes(&line) {
				Ok(Some(command)) => {
					if self.execute(manager, command)? {
						summary.succeeded += 1;
					} else {
						summary.refused += 1;
					}
				},
				Ok(None) => {},
				Err(err) => {
					error!("line {}: {}", index + 1, err);
					summary.invalid += 1;
				},
			}
		}
		self.out.flush()?;
		Ok(summary)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	fn run(manager: &mut SurveillanceCameraManager, json: bool, script: &str) -> (String, ScriptSummary) {
		let mut reporter = Reporter::new(Vec::new(), json);
		let summary = reporter.run_script(manager, script.as_bytes()).unwrap();
		(String::from_utf8(reporter.into_inner()).unwrap(), summary)
	}

	#[test]
	fn script_prints_one_status_line_per_command() {
		let mut manager = SurveillanceCameraManager::new();
		let (output, summary) = run(&mut manager, false, r#"
			# two cameras, one clip
			create-camera cam1 Entrance
			create-camera cam2 "Parking Lot"
			create-camera cam1 Entrance
			monitor cam1
			create-footage footage1 cam1 "2024-09-25 10:00:00" "Visitor entry."
			review footage1
			review nonexistent
			frobnicate
		"#);

		let lines: Vec<&str> = output.lines().collect();
		assert_eq!(lines, vec![
			"Camera cam1 created.",
			"Camera cam2 created.",
			"Camera cam1 already exists.",
			"Monitoring camera cam1 at Entrance. Status: active",
			"Footage footage1 created for camera cam1.",
			"Reviewing footage: Footage(footage_id=footage1, camera_id=cam1, timestamp='2024-09-25 10:00:00', description='Visitor entry.')",
			"Footage not found.",
		]);
		assert_eq!(summary, ScriptSummary { succeeded: 5, refused: 2, invalid: 1 });
	}

	#[test]
	fn undecodable_line_does_not_stop_the_script() {
		let mut manager = SurveillanceCameraManager::new();
		let mut reporter = Reporter::new(Vec::new(), false);
		let script: &[u8] = b"create-camera cam1 Entrance\ncreate-camera cam2 \xff\xfe\r\ncreate-camera cam3 Lobby\r\n";
		let summary = reporter.run_script(&mut manager, script).unwrap();
		let output = String::from_utf8(reporter.into_inner()).unwrap();

		assert_eq!(summary, ScriptSummary { succeeded: 2, refused: 0, invalid: 1 });
		assert_eq!(output.lines().collect::<Vec<_>>(), vec!["Camera cam1 created.", "Camera cam3 created."]);
		assert!(manager.read_camera("cam2").is_none());
		assert_eq!(manager.read_camera("cam3").unwrap().location, "Lobby");
	}

	#[test]
	fn show_and_list_print_records() {
		let mut manager = SurveillanceCameraManager::new();
		let (output, _) = run(&mut manager, false, "
			create-camera cam1 Entrance
			create-camera cam2 Lobby
			create-footage f1 cam2 t1
			show-camera cam1
			show-camera cam9
			list-cameras
			list-footage cam2
			list-footage cam9
		");

		let lines: Vec<&str> = output.lines().skip(3).collect();
		assert_eq!(lines, vec![
			"Camera(camera_id=cam1, location='Entrance', status='active')",
			"Camera not found.",
			"Camera(camera_id=cam1, location='Entrance', status='active')",
			"Camera(camera_id=cam2, location='Lobby', status='active')",
			"Footage(footage_id=f1, camera_id=cam2, timestamp='t1', description='')",
			"Camera not found.",
		]);
	}

	#[test]
	fn json_mode_emits_tagged_outcomes_and_records() {
		let mut manager = SurveillanceCameraManager::new();
		let (output, _) = run(&mut manager, true, "
			create-camera cam1 Entrance
			delete-camera cam9
			show-camera cam1
		");

		let values: Vec<serde_json::Value> = output.lines()
			.map(|line| serde_json::from_str(line).unwrap())
			.collect();
		assert_eq!(values[0]["outcome"], "camera_created");
		assert_eq!(values[1]["outcome"], "camera_not_found");
		assert_eq!(values[1]["camera_id"], "cam9");
		assert_eq!(values[2][0]["location"], "Entrance");
		assert_eq!(values[2][0]["footage_ids"], serde_json::json!([]));
	}
}
