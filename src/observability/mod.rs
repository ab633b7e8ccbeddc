//! Observability for grid processing
//!
//! Typed [`GridEvent`]s are emitted through `tracing`. The binary installs a
//! subscriber; library users plug in their own.
//!
//! # Usage
//!
//! ```ignore
//! use datagrid::observability::{log_event_with_fields, GridEvent};
//!
//! log_event_with_fields(GridEvent::DataFetched, &[("rows", "20")]);
//! ```

mod events;

pub use events::GridEvent;

use std::fmt;

/// Key/value pairs rendered in deterministic (alphabetical) order
struct Fields<'a>(&'a [(&'a str, &'a str)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<_> = self.0.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (i, (key, value)) in sorted.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Log a grid event
pub fn log_event(event: GridEvent) {
    log_event_with_fields(event, &[]);
}

/// Log a grid event with fields
pub fn log_event_with_fields(event: GridEvent, fields: &[(&str, &str)]) {
    let fields = Fields(fields);

    if event.is_warning() {
        tracing::warn!(event = event.as_str(), "{}", fields);
    } else if event.is_verbose() {
        tracing::debug!(event = event.as_str(), "{}", fields);
    } else {
        tracing::info!(event = event.as_str(), "{}", fields);
    }
}
