use quickcheck_macros::quickcheck;
use rstest::*;
use xqf::{
    Board, ErrorKind, GameRecord, GameResult, GbkEncoding, Move, MoveNode, PieceKind, RecordType,
    Square, TextField, Utf8Encoding, XqfReader, XqfReaderBuilder, XqfWriter,
};

fn mv(from: u8, to: u8) -> Move {
    Move::new(Square::from_native(from), Square::from_native(to))
}

fn annotated_record() -> GameRecord {
    let mut record = GameRecord::new();
    record.metadata.title = String::from("第一届全国象棋个人赛");
    record.metadata.event = String::from("全国赛");
    record.metadata.date = String::from("1956-12-01");
    record.metadata.place = String::from("北京");
    record.metadata.red_player = String::from("杨官璘");
    record.metadata.black_player = String::from("王嘉良");
    record.metadata.time_control = String::from("90分钟");
    record.metadata.commentator = String::from("屠景明");
    record.metadata.author = String::from("xqf");
    record.result = GameResult::Draw;
    record.record_type = RecordType::Opening;

    record.root.comment = String::from("中炮对屏风马");
    record
        .root
        .push_child(MoveNode::new(mv(72, 42)).with_comment("炮二平五"))
        .push_child(MoveNode::new(mv(19, 27)))
        .push_child(MoveNode::new(mv(70, 62)).with_comment("马二进三"));
    record
}

#[test]
fn test_round_trip() {
    let record = annotated_record();
    let data = XqfWriter::new().to_vec(&record).unwrap();
    assert_eq!(&data[..3], b"XQ\x0a");
    assert_eq!(&data[3..16], &[0u8; 13][..]);

    let decoded = XqfReader::new().read(&data).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.board, Board::initial());

    let line: Vec<_> = decoded.root.mainline().filter_map(|x| x.mv).collect();
    assert_eq!(line, vec![mv(72, 42), mv(19, 27), mv(70, 62)]);
}

#[test]
fn test_round_trip_utf8() {
    let record = annotated_record();
    let data = XqfWriter::with_encoding(Utf8Encoding::new())
        .to_vec(&record)
        .unwrap();
    let reader = XqfReaderBuilder::with_encoding(Utf8Encoding::new()).build();
    assert_eq!(reader.read(&data).unwrap(), record);
}

#[test]
fn test_header_layout() {
    let record = annotated_record();
    let data = XqfWriter::new().to_vec(&record).unwrap();
    assert_eq!(data[0x33], GameResult::Draw.value());
    assert_eq!(data[0x40], RecordType::Opening.value());

    // 北京 in GBK
    assert_eq!(&data[0x120..0x125], &[4, 0xb1, 0xb1, 0xbe, 0xa9][..]);
    for field in TextField::ALL {
        let len = usize::from(data[field.offset()]);
        assert!(len <= field.capacity(), "{} overflows", field);
    }
}

#[test]
fn test_truncates_long_text() {
    let mut record = GameRecord::new();
    record.metadata.title = "象棋".repeat(40);
    record.metadata.red_player = String::from("0123456789abcdefghij");

    let data = XqfWriter::new().to_vec(&record).unwrap();
    assert_eq!(data[0x50], 63);
    assert_eq!(data[0x130], 15);

    let decoded = XqfReader::new().read(&data).unwrap();
    assert_eq!(decoded.metadata.red_player, "0123456789abcde");

    // the cut lands in the middle of a two byte character
    let expected = format!("{}象\u{fffd}", "象棋".repeat(15));
    assert_eq!(decoded.metadata.title, expected);
}

#[rstest]
#[case("RRR1k4/9/9/9/9/9/9/9/9/4K4", PieceKind::Rook)]
#[case("3k5/9/9/9/9/9/9/9/9/3KK4", PieceKind::King)]
#[case("4k4/9/9/9/9/9/9/9/CCC6/4K4", PieceKind::Cannon)]
fn test_too_many_pieces(#[case] fen: &str, #[case] kind: PieceKind) {
    let mut record = GameRecord::new();
    record.record_type = RecordType::EndGame;
    record.board = Board::from_fen(fen).unwrap();

    let err = XqfWriter::new().to_vec(&record).unwrap_err();
    match err.kind() {
        ErrorKind::PieceOverflow { piece } => assert_eq!(piece.kind, kind),
        _ => panic!("unexpected error: {}", err),
    }
}

#[test]
fn test_endgame_position_round_trip() {
    let mut record = GameRecord::new();
    record.record_type = RecordType::EndGame;
    record.board = Board::from_fen("3ak4/4a4/9/9/9/9/9/9/4p4/3K1R3").unwrap();
    record.root.push_child(MoveNode::new(mv(50, 58)));

    let data = XqfWriter::new().to_vec(&record).unwrap();
    let decoded = XqfReader::new().read(&data).unwrap();
    assert_eq!(decoded.board.to_fen(), "3ak4/4a4/9/9/9/9/9/9/4p4/3K1R3");
    assert_eq!(decoded, record);
}

#[test]
fn test_full_game_ignores_stored_position() {
    let mut record = GameRecord::new();
    record.record_type = RecordType::FullGame;
    record.board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
    record
        .root
        .push_child(MoveNode::new(mv(12, 42)))
        .push_child(MoveNode::new(mv(79, 67)));

    let data = XqfWriter::new().to_vec(&record).unwrap();

    // the placement block still describes the two kings
    assert_eq!(data[0x10 + 4], 40);
    assert_eq!(data[0x10 + 20], 49);

    let decoded = XqfReader::new().read(&data).unwrap();
    assert_eq!(decoded.board, Board::initial());
    assert_eq!(decoded.root, record.root);
}

#[test]
fn test_variations_are_dropped() {
    let mut record = GameRecord::new();
    record.root.push_child(MoveNode::new(mv(72, 42)));
    record.root.push_child(MoveNode::new(mv(12, 42)));

    let data = XqfWriter::new().to_vec(&record).unwrap();
    let decoded = XqfReader::new().read(&data).unwrap();
    assert_eq!(decoded.root.children.len(), 1);
    assert_eq!(decoded.root.children[0].mv, Some(mv(72, 42)));
}

#[rstest]
#[case(b"XP\x0a")]
#[case(b"xq\x0a")]
#[case(b"\0\0\0")]
fn test_bad_magic(#[case] prefix: &[u8; 3]) {
    let mut data = XqfWriter::new().to_vec(&GameRecord::new()).unwrap();
    data[..3].copy_from_slice(prefix);
    let err = XqfReader::new().read(&data).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidMagic(_)));
}

#[rstest]
#[case(0x33, 4)]
#[case(0x40, 4)]
#[case(0x40, 0xff)]
fn test_out_of_range_header_bytes(#[case] offset: usize, #[case] value: u8) {
    let mut data = XqfWriter::new().to_vec(&GameRecord::new()).unwrap();
    data[offset] = value;
    let err = XqfReader::new().read(&data).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::InvalidResult(_) | ErrorKind::InvalidRecordType(_)
    ));
}

#[test]
fn test_oversized_text_length() {
    let mut data = XqfWriter::new().to_vec(&GameRecord::new()).unwrap();
    data[0x110] = 16;
    let err = XqfReader::new().read(&data).unwrap_err();
    assert_eq!(err.offset(), Some(0x110));
    assert!(matches!(
        err.kind(),
        ErrorKind::TextTooLong {
            field: TextField::Date,
            len: 16,
            ..
        }
    ));
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(0x3ff)]
#[case(0x404)]
fn test_truncated_input(#[case] len: usize) {
    let data = XqfWriter::new().to_vec(&annotated_record()).unwrap();
    assert!(XqfReader::new().read(&data[..len]).is_err());
}

#[test]
fn test_size_cap() {
    let data = XqfWriter::new().to_vec(&annotated_record()).unwrap();
    let reader = XqfReader::builder().max_len(data.len()).build();
    let err = reader.read(&data).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TooLarge { .. }));

    let reader = XqfReader::builder().max_len(data.len() + 1).build();
    assert!(reader.read(&data).is_ok());
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("xqf-round-trip-{}.xqf", std::process::id()));
    let record = annotated_record();

    XqfWriter::new().write_file(&path, &record).unwrap();
    let decoded = XqfReader::new().read_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(decoded.unwrap(), record);
}

#[test]
fn test_file_size_cap() {
    let path = std::env::temp_dir().join(format!("xqf-size-cap-{}.xqf", std::process::id()));
    std::fs::write(&path, vec![0u8; 2048]).unwrap();

    let reader = XqfReader::builder().max_len(1024).build();
    let err = reader.read_file(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err.kind(), ErrorKind::TooLarge { len: 2048, max: 1024 }));
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("xqf-does-not-exist.xqf");
    let err = XqfReader::new().read_file(path).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test]
fn test_write_file_skips_unencodable() {
    let path = std::env::temp_dir().join(format!("xqf-unencodable-{}.xqf", std::process::id()));
    let mut record = GameRecord::new();
    record.board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/3KK4").unwrap();

    assert!(XqfWriter::new().write_file(&path, &record).is_err());
    assert!(!path.exists());
}

#[test]
fn test_unencodable_text_is_rejected() {
    let mut record = annotated_record();
    record.metadata.red_player = String::from("Ω😀");
    let err = XqfWriter::new().to_vec(&record).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnencodableText {
            field: TextField::RedPlayer
        }
    ));

    let mut record = annotated_record();
    record.root.children[0].comment = String::from("好😀");
    let err = XqfWriter::new().to_vec(&record).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnencodableComment { ply: 1 }));

    // utf-8 can hold both
    record.metadata.red_player = String::from("Ω😀");
    let data = XqfWriter::with_encoding(Utf8Encoding::new())
        .to_vec(&record)
        .unwrap();
    let reader = XqfReaderBuilder::with_encoding(Utf8Encoding::new()).build();
    let decoded = reader.read(&data).unwrap();
    assert_eq!(decoded.metadata.red_player, "Ω😀");
    assert_eq!(decoded.root.children[0].comment, "好😀");
}

#[test]
fn test_unencodable_write_file_skips_file() {
    let path = std::env::temp_dir().join(format!("xqf-gbk-{}.xqf", std::process::id()));
    let mut record = GameRecord::new();
    record.metadata.event = String::from("😀");

    let err = XqfWriter::new().write_file(&path, &record).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnencodableText { .. }));
    assert!(!path.exists());
}

#[quickcheck]
fn ascii_text_round_trips(title: String, comment: String) -> bool {
    let title: String = title.chars().filter(char::is_ascii).take(63).collect();
    let comment: String = comment.chars().filter(char::is_ascii).collect();

    let mut record = GameRecord::new();
    record.metadata.title = title;
    record
        .root
        .push_child(MoveNode::new(mv(72, 42)).with_comment(comment));

    let data = XqfWriter::new().to_vec(&record).unwrap();
    XqfReader::new().read(&data).unwrap() == record
}

#[quickcheck]
fn reader_never_panics(data: Vec<u8>) -> bool {
    let _ = XqfReader::new().read(&data);
    let mut data = data;
    if data.len() >= 3 {
        data[..3].copy_from_slice(b"XQ\x0b");
    }
    let _ = XqfReader::<GbkEncoding>::default().read(&data);
    true
}
