pub mod body;
pub mod config;
pub mod display;
pub mod elements;
pub mod error;
pub mod scenario;
pub mod settings;
pub mod simulation;
pub mod snapshot;
pub mod trail;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use body::Body;
pub use config::SimulationConfig;
pub use elements::{state_from_elements, OrbitalElements};
pub use error::{SimError, SimResult};
pub use scenario::build_simulation;
pub use settings::{Settings, TrailParams};
pub use simulation::{SelectionObserver, SimulationSpace};
pub use snapshot::{BodyState, Snapshot};
pub use trail::OrbitTrailBuffer;
pub use vecmath::{angle_to_vec, vec_to_angle, Vec2};
