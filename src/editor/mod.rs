// Editor Module
// In-memory editing of a single composition

pub mod session;

pub use session::EditorSession;
