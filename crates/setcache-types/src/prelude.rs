pub use crate::error::{Error, ScResult};
pub use crate::store_adapter::StoreAdapter;

pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

// vim: ts=4
