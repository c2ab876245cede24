//! Line-oriented command language read by the `camera-registry` binary.
//!
//! One command per line, arguments separated by whitespace. Double quotes
//! group words into one argument (`"Parking Lot"`, `location="Front Gate"`)
//! and `\"` / `\\` escape inside them. Blank lines and lines starting with
//! `#` are ignored.

use thiserror::Error;

use crate::common::{CameraId, FootageId};
use crate::manager::CameraUpdate;



#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
pub enum Command {
	CreateCamera { camera_id: CameraId, location: String },
	ShowCamera { camera_id: CameraId },
	UpdateCamera { camera_id: CameraId, update: CameraUpdate },
	DeleteCamera { camera_id: CameraId },
	Monitor { camera_id: CameraId },
	CreateFootage { footage_id: FootageId, camera_id: CameraId, timestamp: String, description: String },
	Review { footage_id: FootageId },
	ListCameras,
	ListFootage { camera_id: Option<CameraId> },
}

#[derive(Clone)]
#[derive(Debug)]
#[derive(PartialEq)]
#[derive(Eq)]
#[derive(Error)]
pub enum ScriptError {
	#[error("unterminated quote")]
	UnterminatedQuote,

	#[error("unknown command '{0}'")]
	UnknownCommand(String),

	#[error("usage: {command} {usage}")]
	WrongArgumentCount { command: &'static str, usage: &'static str },

	#[error("expected location=<value> or status=<value>, got '{0}'")]
	BadUpdateField(String),

	#[error("line is not valid UTF-8")]
	InvalidEncoding,
}

/// Parses one script line; `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
	let trimmed = line.trim();
	if trimmed.is_empty() || trimmed.starts_with('#') {
		return Ok(None);
	}

	let mut tokens = tokenize(trimmed)?.into_iter();
	let name = match tokens.next() {
		Some(name) => name,
		None => return Ok(None),
	};
	let args: Vec<String> = tokens.collect();

	let command = match name.as_str() {
		"create-camera" => {
			let [camera_id, location] = exact::<2>(args, "create-camera", "<id> <location>")?;
			Command::CreateCamera { camera_id, location }
		},
		"show-camera" => {
			let [camera_id] = exact::<1>(args, "show-camera", "<id>")?;
			Command::ShowCamera { camera_id }
		},
		"update-camera" => parse_update(args)?,
		"delete-camera" => {
			let [camera_id] = exact::<1>(args, "delete-camera", "<id>")?;
			Command::DeleteCamera { camera_id }
		},
		"monitor" => {
			let [camera_id] = exact::<1>(args, "monitor", "<id>")?;
			Command::Monitor { camera_id }
		},
		"create-footage" => parse_create_footage(args)?,
		"review" => {
			let [footage_id] = exact::<1>(args, "review", "<id>")?;
			Command::Review { footage_id }
		},
		"list-cameras" => {
			if !args.is_empty() {
				return Err(ScriptError::WrongArgumentCount { command: "list-cameras", usage: "" });
			}
			Command::ListCameras
		},
		"list-footage" => {
			if args.len() > 1 {
				return Err(ScriptError::WrongArgumentCount { command: "list-footage", usage: "[camera]" });
			}
			Command::ListFootage { camera_id: args.into_iter().next() }
		},
		_ => return Err(ScriptError::UnknownCommand(name)),
	};
	Ok(Some(command))
}

/// Like `parse_line` for a raw line read from a script; a line that is not
/// valid UTF-8 is rejected on its own.
pub fn parse_bytes(line: &[u8]) -> Result<Option<Command>, ScriptError> {
	let line = std::str::from_utf8(line).map_err(|_| ScriptError::InvalidEncoding)?;
	parse_line(line)
}

fn exact<const N: usize>(args: Vec<String>, command: &'static str, usage: &'static str) -> Result<[String; N], ScriptError> {
	args.try_into().map_err(|_| ScriptError::WrongArgumentCount { command, usage })
}

fn parse_update(args: Vec<String>) -> Result<Command, ScriptError> {
	const USAGE: &str = "<id> [location=<value>] [status=<value>]";

	let mut args = args.into_iter();
	let camera_id = args.next()
		.ok_or(ScriptError::WrongArgumentCount { command: "update-camera", usage: USAGE })?;

	let mut update = CameraUpdate::default();
	for field in args {
		match field.split_once('=') {
			Some(("location", value)) => update.location = Some(value.to_string()),
			Some(("status", value)) => update.status = Some(value.to_string()),
			_ => return Err(ScriptError::BadUpdateField(field)),
		}
	}
	Ok(Command::UpdateCamera { camera_id, update })
}

fn parse_create_footage(args: Vec<String>) -> Result<Command, ScriptError> {
	if args.len() < 3 || args.len() > 4 {
		return Err(ScriptError::WrongArgumentCount {
			command: "create-footage",
			usage: "<id> <camera> <timestamp> [description]",
		});
	}
	let mut args = args.into_iter();
	let mut next = || args.next().unwrap_or_default();
	Ok(Command::CreateFootage {
		footage_id: next(),
		camera_id: next(),
		timestamp: next(),
		description: next(),
	})
}

fn tokenize(line: &str) -> Result<Vec<String>, ScriptError> {
	let mut tokens = Vec::new();
	let mut current = String::new();
	let mut in_token = false;
	let mut in_quotes = false;
	let mut chars = line.chars();

	while let Some(c) = chars.next() {
		match c {
			'"' => {
				in_quotes = !in_quotes;
				in_token = true;
			},
			'\\' if in_quotes => match chars.next() {
				Some(escaped) => current.push(escaped),
				None => return Err(ScriptError::UnterminatedQuote),
			},
			c if c.is_whitespace() && !in_quotes => {
				if in_token {
					tokens.push(std::mem::take(&mut current));
					in_token = false;
				}
			},
			c => {
				current.push(c);
				in_token = true;
			},
		}
	}

	if in_quotes {
		return Err(ScriptError::UnterminatedQuote);
	}
	if in_token {
		tokens.push(current);
	}
	Ok(tokens)
}
