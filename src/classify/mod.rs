pub mod config;
pub mod label;
pub mod pose;
pub mod sample;
mod strip;

pub use config::ClassifierConfig;
pub use label::ActivityLabel;
pub use pose::classify;
pub use sample::{DetectionSample, FaceBox, FaceLandmarks, Point, StripSample};
