pub mod constants;
pub mod error;
pub mod glyphs;
pub mod gesture;
pub mod gradient;
pub mod landmarks;
pub mod pose;
pub mod session;
pub mod shapes;
pub mod simulation;

pub use error::{FlowError, Result};
pub use gesture::*;
pub use gradient::Gradient;
pub use landmarks::{DetectorFrame, HandObservation, Handedness, ThumbTest};
pub use pose::{Digit, HandPose};
pub use session::*;
pub use shapes::{sample, sample_with, Shape};
pub use simulation::{flicker, ParticleBuffers, Simulation, TargetBuffer};
