//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued atomically. The plugin runtime executes
//! them in order; nothing here touches the host directly.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the storage worker.
    ///
    /// Used for the startup reads and for every persistence write after a
    /// toggle. Writes are fire-and-forget; the acknowledgement only gets
    /// logged.
    PostToWorker(WorkerMessage),

    /// Arms one debounce timer on the host.
    StartTimer {
        /// Delay before the host emits a timer event.
        millis: u64,
    },

    /// Issues a GET request for a movie listing.
    FetchMovies {
        /// Fully built listing URL.
        url: String,
        /// Id echoed back in the response context.
        request_id: u64,
    },
}
