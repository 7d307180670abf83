//! Keyhunt wire contract.
//!
//! JSON-over-HTTPS payloads exchanged with the puzzle-validation service:
//! game-state submissions (`POST /submit-guess`), key lookups
//! (`GET /validate-key/{key}`), and authored answers
//! (`POST /submit-answer`). The server's side of the contract is out of
//! scope; these types define exactly what crosses the wire.

pub mod answer;
pub mod response;
pub mod submission;

pub use answer::AnswerSubmission;
pub use response::{ApiResult, ErrorKind};
pub use submission::{GameStateSubmission, ItemData, LocalCoords, LocationData, WorldCoords};
