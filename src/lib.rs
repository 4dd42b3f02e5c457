pub mod audio;
pub mod marker;
pub mod oto;
pub mod render;
pub mod session;
pub mod spectro_cache;
pub mod text;
pub mod viewport;

pub use audio::AudioBuffer;
pub use marker::MarkerKind;
pub use oto::OtoEntry;
pub use session::{EditSession, Project};
pub use spectro_cache::SpectroCache;
pub use viewport::Viewport;
