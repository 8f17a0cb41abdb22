#![no_main]
use libfuzzer_sys::fuzz_target;
use xqf::{XqfReader, XqfWriter};

fuzz_target!(|data: &[u8]| {
    let Ok(record) = XqfReader::new().read(data) else {
        return;
    };

    // Off board moves and text decoded with replacement characters can't
    // be written
    let Ok(out) = XqfWriter::new().to_vec(&record) else {
        return;
    };

    // Re-encoded comments may grow, so lift the size cap
    let reader = XqfReader::builder().max_len(usize::MAX).build();
    let decoded = reader.read(&out).unwrap();
    assert_eq!(decoded.board, record.board);

    let expected: Vec<_> = record.root.mainline().map(|x| x.mv).collect();
    let actual: Vec<_> = decoded.root.mainline().map(|x| x.mv).collect();
    assert_eq!(actual, expected);
});
