//! Reading sessions over extracted text.

pub mod bionic;
mod mode;
pub mod rsvp;

pub use bionic::{BionicWord, Segment};
pub use mode::{ReaderConfig, ReadingMode, UnknownMode};
pub use rsvp::{RsvpSession, Tick, word_delay};
