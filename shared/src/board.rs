use crate::palette::PixelColor;

/// Pixels per addressing chunk. A wire patch names a pixel as
/// `(chunk, offset-within-chunk)`, two single bytes, which keeps per-pixel
/// references small even on boards past 65 536 pixels.
pub const CHUNK_SIZE: usize = 256;

const RECORD_HEADER_LEN: usize = 2;
const PATCH_RECORD_LEN: usize = 3;

/// The local mirror of the authoritative board: a row-major grid of palette
/// indices. Replaced wholesale by a snapshot, mutated in place by patches and
/// optimistic local writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BoardDecodeError {
    MissingHeader,
    ZeroDimension,
    LengthMismatch { expected: usize, actual: usize },
}

impl BoardState {
    /// An all-background board of the given size in chunks.
    pub fn new(width_chunks: u8, height_chunks: u8) -> BoardState {
        let width = usize::from(width_chunks) * CHUNK_SIZE;
        let height = usize::from(height_chunks) * CHUNK_SIZE;
        BoardState {
            width,
            height,
            pixels: vec![PixelColor::White.index(); width * height],
        }
    }

    /// Parses a persisted board record: `[width_chunks, height_chunks]`
    /// followed by exactly `width * height` palette indices.
    pub fn decode(bytes: &[u8]) -> Result<BoardState, BoardDecodeError> {
        if bytes.len() < RECORD_HEADER_LEN {
            return Err(BoardDecodeError::MissingHeader);
        }
        if bytes[0] == 0 || bytes[1] == 0 {
            return Err(BoardDecodeError::ZeroDimension);
        }
        let width = usize::from(bytes[0]) * CHUNK_SIZE;
        let height = usize::from(bytes[1]) * CHUNK_SIZE;
        let expected = width * height;
        let actual = bytes.len() - RECORD_HEADER_LEN;
        if actual != expected {
            return Err(BoardDecodeError::LengthMismatch { expected, actual });
        }
        Ok(BoardState {
            width,
            height,
            pixels: bytes[RECORD_HEADER_LEN..].to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut record = Vec::with_capacity(RECORD_HEADER_LEN + self.pixels.len());
        record.push((self.width / CHUNK_SIZE) as u8);
        record.push((self.height / CHUNK_SIZE) as u8);
        record.extend_from_slice(&self.pixels);
        record
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, index: usize) -> u8 {
        self.pixels[index]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Unconditional overwrite. Passing an index or color outside the board
    /// is a bug in the caller's hit-testing math, not a data condition, and
    /// panics rather than being silently ignored.
    pub fn set_pixel(&mut self, index: usize, color: PixelColor) {
        assert!(
            index < self.pixels.len(),
            "pixel index {index} out of range for {}x{} board",
            self.width,
            self.height
        );
        self.pixels[index] = color.index();
    }

    /// Applies a migration patch: repeated `(chunk, offset, color)` triples
    /// in array order, so a later record for the same pixel wins. Records
    /// addressing a pixel past the board edge or naming an unknown color are
    /// skipped; one bad record must not spoil the rest of the patch.
    /// Trailing bytes short of a full triple are discarded.
    pub fn apply_patch(&mut self, patch: &[u8]) {
        for record in patch.chunks_exact(PATCH_RECORD_LEN) {
            let index = pixel_index(record[0], record[1]);
            if index >= self.pixels.len() {
                continue;
            }
            let Some(color) = PixelColor::from_index(record[2]) else {
                continue;
            };
            self.set_pixel(index, color);
        }
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

pub fn chunk_of(index: usize) -> usize {
    index / CHUNK_SIZE
}

pub fn chunk_offset(index: usize) -> usize {
    index % CHUNK_SIZE
}

pub fn pixel_index(chunk: u8, offset: u8) -> usize {
    usize::from(chunk) * CHUNK_SIZE + usize::from(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_encode_round_trips() {
        let mut board = BoardState::new(1, 1);
        board.set_pixel(0, PixelColor::Red);
        board.set_pixel(300, PixelColor::Teal);
        board.set_pixel(board.len() - 1, PixelColor::Black);
        let decoded = BoardState::decode(&board.encode()).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn decode_rejects_missing_header() {
        assert_eq!(BoardState::decode(&[]), Err(BoardDecodeError::MissingHeader));
        assert_eq!(
            BoardState::decode(&[1]),
            Err(BoardDecodeError::MissingHeader)
        );
    }

    #[test]
    fn decode_rejects_zero_dimensions() {
        assert_eq!(
            BoardState::decode(&[0, 1]),
            Err(BoardDecodeError::ZeroDimension)
        );
    }

    #[test]
    fn decode_rejects_inconsistent_length() {
        let mut record = vec![1, 1];
        record.extend_from_slice(&[0; 100]);
        assert_eq!(
            BoardState::decode(&record),
            Err(BoardDecodeError::LengthMismatch {
                expected: 256 * 256,
                actual: 100,
            })
        );
    }

    #[test]
    fn chunk_addressing() {
        assert_eq!(chunk_of(300), 1);
        assert_eq!(chunk_offset(300), 44);
        assert_eq!(pixel_index(1, 44), 300);
        for index in [0usize, 1, 255, 256, 65535, 65536, 131071] {
            assert_eq!(
                pixel_index(chunk_of(index) as u8, chunk_offset(index) as u8),
                index
            );
        }
    }

    #[test]
    fn patch_last_write_wins() {
        let mut board = BoardState::new(1, 1);
        board.apply_patch(&[0, 0, 3, 0, 0, 5]);
        assert_eq!(board.pixel(0), 5);
    }

    #[test]
    fn patch_skips_records_past_board_edge() {
        // chunk 255 offset 255 is the last addressable pixel of a 1x1-chunk board
        let mut board = BoardState::new(1, 1);
        let last = board.len() - 1;
        board.apply_patch(&[255, 255, 4]);
        assert_eq!(board.pixel(last), 4);

        // a board shorter than the addressable chunk range: in-range records
        // apply, the rest are dropped without disturbing the grid
        let mut narrow = BoardState {
            width: 256,
            height: 1,
            pixels: vec![0; 256],
        };
        narrow.apply_patch(&[1, 0, 4, 0, 7, 2]);
        assert_eq!(narrow.pixel(7), 2);
        assert_eq!(narrow.pixels.iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn patch_discards_truncated_tail() {
        let mut board = BoardState::new(1, 1);
        board.apply_patch(&[0, 1, 3, 0, 2]);
        assert_eq!(board.pixel(1), 3);
        assert_eq!(board.pixel(2), 0);
    }

    #[test]
    fn patch_skips_unknown_color() {
        let mut board = BoardState::new(1, 1);
        board.apply_patch(&[0, 0, 99, 0, 1, 9]);
        assert_eq!(board.pixel(0), 0);
        assert_eq!(board.pixel(1), 9);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_pixel_past_board_edge_panics() {
        let mut board = BoardState::new(1, 1);
        board.set_pixel(board.len(), PixelColor::Red);
    }

    #[test]
    fn row_col_round_trips() {
        let board = BoardState::new(2, 1);
        assert_eq!(board.width(), 512);
        assert_eq!(board.height(), 256);
        assert_eq!(board.row_col(0), (0, 0));
        assert_eq!(board.row_col(512), (1, 0));
        assert_eq!(board.row_col(515), (1, 3));
        assert_eq!(board.index_of(1, 3), 515);
        for index in [0usize, 511, 512, 1000, 512 * 256 - 1] {
            let (row, col) = board.row_col(index);
            assert_eq!(board.index_of(row, col), index);
        }
    }
}
