//! Fragment descriptor primitives.
//!
//! This module collects the data entities of the wire protocol: the
//! eight-state insertion policy, the media tag driving client dispatch, the
//! descriptor callers hand to the composer, and the header names shared by
//! both halves of the protocol.

pub mod descriptor;
pub mod headers;
pub mod media;
pub mod position;

pub use descriptor::FragmentDescriptor;
pub use media::MediaKind;
pub use position::{ContentPosition, UnknownPosition};
