/// Session-oriented countdown rendering.
pub mod render_session;
