pub mod steering;
pub mod pitch_program;

pub use pitch_program::PitchProgram;
pub use steering::ThrustSteering;
