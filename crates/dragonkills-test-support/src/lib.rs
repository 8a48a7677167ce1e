//! Shared test doubles for the Green Dragon kills module.

mod clock;
mod events;
mod fight;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use events::RecordingEventPublisher;
pub use fight::RecordingFightStarter;
pub use repository::{FailingRecordRepository, FailingSceneRepository, FlakySceneRepository};
pub use rng::{MockRng, SequenceRng};
