#[macro_use] extern crate serde_derive;

pub mod common;
pub mod config;
pub mod manager;
pub mod outcome;
pub mod report;
pub mod script;

pub use common::{Camera, CameraId, Footage, FootageId};
pub use config::{ConfigManager, DeletePolicy};
pub use manager::{CameraUpdate, SurveillanceCameraManager};
pub use outcome::Outcome;
