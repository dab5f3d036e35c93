use crate::board::{chunk_of, chunk_offset};
use crate::palette::PixelColor;

/// Message-type tag, byte 0 of every frame. The rest of the frame is the
/// tag-specific payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageTag {
    State = 0,
    StateMigration = 1,
    StatePlayer = 2,
    StatePlayers = 3,
}

impl MessageTag {
    pub fn from_byte(byte: u8) -> Option<MessageTag> {
        match byte {
            0 => Some(MessageTag::State),
            1 => Some(MessageTag::StateMigration),
            2 => Some(MessageTag::StatePlayer),
            3 => Some(MessageTag::StatePlayers),
            _ => None,
        }
    }
}

/// A parsed inbound frame. Board payloads stay as raw bytes; decoding them is
/// the board store's job, so a malformed snapshot fails there without the
/// codec having an opinion about it.
#[derive(Debug, PartialEq, Eq)]
pub enum ServerMessage<'a> {
    /// Authoritative snapshot: a full persisted board record.
    State(&'a [u8]),
    /// Incremental patch: repeated `(chunk, offset, color)` triples.
    StateMigration(&'a [u8]),
    /// Remaining draw-lock seconds for this session; 0 unlocks immediately.
    StatePlayer(u8),
    /// Connected session count, display only.
    StatePlayers(u16),
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownTag(u8),
    ShortPayload(MessageTag),
}

impl<'a> ServerMessage<'a> {
    pub fn parse(frame: &'a [u8]) -> Result<ServerMessage<'a>, ParseError> {
        let (&tag_byte, payload) = frame.split_first().ok_or(ParseError::Empty)?;
        let tag = MessageTag::from_byte(tag_byte).ok_or(ParseError::UnknownTag(tag_byte))?;
        match tag {
            MessageTag::State => Ok(ServerMessage::State(payload)),
            MessageTag::StateMigration => Ok(ServerMessage::StateMigration(payload)),
            MessageTag::StatePlayer => match payload.first() {
                Some(&seconds) => Ok(ServerMessage::StatePlayer(seconds)),
                None => Err(ParseError::ShortPayload(tag)),
            },
            MessageTag::StatePlayers => match payload.get(..2) {
                Some(bytes) => Ok(ServerMessage::StatePlayers(u16::from_le_bytes([
                    bytes[0], bytes[1],
                ]))),
                None => Err(ParseError::ShortPayload(tag)),
            },
        }
    }
}

/// Outbound draw request: a one-record migration patch, the same wire shape
/// the authority uses to broadcast pixel changes. `None` when the pixel's
/// chunk does not fit the one-byte wire field; a request that cannot name its
/// pixel is refused rather than sent truncated.
pub fn encode_draw_request(pixel_index: usize, color: PixelColor) -> Option<[u8; 4]> {
    let chunk = u8::try_from(chunk_of(pixel_index)).ok()?;
    Some([
        MessageTag::StateMigration as u8,
        chunk,
        chunk_offset(pixel_index) as u8,
        color.index(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_state_frame() {
        let frame = [0u8, 2, 1, 7];
        assert_eq!(
            ServerMessage::parse(&frame),
            Ok(ServerMessage::State(&[2, 1, 7][..]))
        );
    }

    #[test]
    fn parses_migration_frame() {
        let frame = [1u8, 0, 44, 3];
        assert_eq!(
            ServerMessage::parse(&frame),
            Ok(ServerMessage::StateMigration(&[0, 44, 3][..]))
        );
    }

    #[test]
    fn parses_player_lock_frame() {
        assert_eq!(
            ServerMessage::parse(&[2, 5]),
            Ok(ServerMessage::StatePlayer(5))
        );
        assert_eq!(
            ServerMessage::parse(&[2]),
            Err(ParseError::ShortPayload(MessageTag::StatePlayer))
        );
    }

    #[test]
    fn parses_players_count_little_endian() {
        assert_eq!(
            ServerMessage::parse(&[3, 0x34, 0x12]),
            Ok(ServerMessage::StatePlayers(0x1234))
        );
        assert_eq!(
            ServerMessage::parse(&[3, 9]),
            Err(ParseError::ShortPayload(MessageTag::StatePlayers))
        );
    }

    #[test]
    fn unknown_tag_is_reported_not_guessed() {
        assert_eq!(ServerMessage::parse(&[9, 1, 2]), Err(ParseError::UnknownTag(9)));
        assert_eq!(ServerMessage::parse(&[]), Err(ParseError::Empty));
    }

    #[test]
    fn draw_request_is_a_single_record_patch() {
        assert_eq!(
            encode_draw_request(300, PixelColor::Red),
            Some([1, 1, 44, PixelColor::Red.index()])
        );
        // the request body parses back as a migration
        let frame = encode_draw_request(300, PixelColor::Red).unwrap();
        assert_eq!(
            ServerMessage::parse(&frame),
            Ok(ServerMessage::StateMigration(&[1, 44, 3][..]))
        );
    }

    #[test]
    fn draw_request_past_wire_range_is_refused() {
        // chunk 255 offset 255 is the last pixel the one-byte fields can name
        assert_eq!(
            encode_draw_request(65535, PixelColor::Red),
            Some([1, 255, 255, PixelColor::Red.index()])
        );
        assert_eq!(encode_draw_request(65536, PixelColor::Red), None);
        assert_eq!(encode_draw_request(131071, PixelColor::Black), None);
    }
}
