use pixelgrid_shared::{BoardState, DrawLock, PixelColor, ServerMessage};

fn snapshot_frame(width_chunks: u8, height_chunks: u8) -> Vec<u8> {
    let total = usize::from(width_chunks) * 256 * usize::from(height_chunks) * 256;
    let mut frame = vec![0u8; 1 + 2 + total];
    frame[0] = 0; // State tag
    frame[1] = width_chunks;
    frame[2] = height_chunks;
    frame
}

#[test]
fn snapshot_frame_installs_a_two_chunk_board() {
    let mut frame = snapshot_frame(2, 1);
    frame[3] = PixelColor::Teal.index(); // first pixel of the record

    let Ok(ServerMessage::State(payload)) = ServerMessage::parse(&frame) else {
        panic!("snapshot frame did not parse as State");
    };
    let board = BoardState::decode(payload).unwrap();
    assert_eq!(board.width(), 512);
    assert_eq!(board.height(), 256);
    assert_eq!(board.pixel(board.index_of(0, 0)), PixelColor::Teal.index());
}

#[test]
fn snapshot_then_patch_then_round_trip() {
    let frame = snapshot_frame(1, 1);
    let Ok(ServerMessage::State(payload)) = ServerMessage::parse(&frame) else {
        panic!("snapshot frame did not parse as State");
    };
    let mut board = BoardState::decode(payload).unwrap();

    let patch_frame = [1u8, 1, 44, PixelColor::Purple.index()];
    let Ok(ServerMessage::StateMigration(patch)) = ServerMessage::parse(&patch_frame) else {
        panic!("patch frame did not parse as StateMigration");
    };
    board.apply_patch(patch);
    assert_eq!(board.pixel(300), PixelColor::Purple.index());

    let restored = BoardState::decode(&board.encode()).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn authoritative_patch_overwrites_optimistic_write() {
    let mut board = BoardState::new(1, 1);
    // local optimistic draw
    board.set_pixel(300, PixelColor::Red);
    // later authority broadcast for the same pixel wins unconditionally
    board.apply_patch(&[1, 44, PixelColor::Green.index()]);
    assert_eq!(board.pixel(300), PixelColor::Green.index());
}

#[test]
fn lock_frames_drive_the_draw_lock() {
    let mut lock = DrawLock::new();

    let Ok(ServerMessage::StatePlayer(seconds)) = ServerMessage::parse(&[2, 2]) else {
        panic!("lock frame did not parse as StatePlayer");
    };
    lock.arm(0.0, seconds);
    assert!(!lock.can_draw(500.0));

    let Ok(ServerMessage::StatePlayer(seconds)) = ServerMessage::parse(&[2, 0]) else {
        panic!("unlock frame did not parse as StatePlayer");
    };
    lock.arm(500.0, seconds);
    assert!(lock.can_draw(500.0));
}
