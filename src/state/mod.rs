mod context;
mod editor_state;
mod persistence;

pub use context::{EditorContext, Notice, NoticeLevel, Request, Response, StateTransitionError};
pub use editor_state::EditorState;
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::FileStore;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorage;
pub use persistence::{
    DocumentStore, KeyValueStore, LoadOutcome, MemoryStore, PersistenceError, PersistenceResult,
};
