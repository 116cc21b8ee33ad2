//! Gear5TV - anime catalog core
//!
//! Watch-progress tracking, continue-watching resumption, playback source
//! classification and the Pub Stream service interface. The binary is a thin
//! command-line front end over these modules.

pub mod config;
pub mod playback;
pub mod player;
pub mod progress;
pub mod pubstream;
pub mod resume;
pub mod state;
pub mod storage;
