pub mod protocol;

pub use protocol::{encode_event, EventRecord, MarkerSnapshot, SnapshotBuffer, PROTOCOL_VERSION};
