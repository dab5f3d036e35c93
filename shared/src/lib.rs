pub mod board;
pub mod camera;
pub mod lock;
pub mod palette;
pub mod protocol;

pub use board::{BoardDecodeError, BoardState, CHUNK_SIZE};
pub use camera::{Camera, Pixel, ViewRecord, Viewport};
pub use lock::DrawLock;
pub use palette::PixelColor;
pub use protocol::{MessageTag, ParseError, ServerMessage};
