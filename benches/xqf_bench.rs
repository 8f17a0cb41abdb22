use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xqf::{
    Encoding, GameRecord, GbkEncoding, KeyStream, Move, MoveNode, RecordType, Square, XqfReader,
    XqfWriter,
};

fn record_with_moves(moves: usize) -> GameRecord {
    let mut record = GameRecord::new();
    record.record_type = RecordType::MiddleGame;
    record.metadata.title = String::from("中炮过河车对屏风马平炮兑车");
    record.metadata.red_player = String::from("红方");
    record.metadata.black_player = String::from("黑方");

    let mut tip = &mut record.root;
    for i in 0..moves {
        let (from, to) = if i % 2 == 0 { (72, 42) } else { (42, 72) };
        let node = MoveNode::new(Move::new(Square::from_native(from), Square::from_native(to)));
        let node = if i % 4 == 0 {
            node.with_comment("变着")
        } else {
            node
        };
        tip = tip.push_child(node);
    }
    record
}

pub fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let reader = XqfReader::new();
    for moves in [0, 16, 128, 1024].iter() {
        let data = XqfWriter::new().to_vec(&record_with_moves(*moves)).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(moves), moves, |b, &_moves| {
            b.iter(|| reader.read(black_box(&data)).unwrap())
        });
    }
    group.finish();
}

pub fn write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let writer = XqfWriter::new();
    for moves in [0, 16, 128, 1024].iter() {
        let record = record_with_moves(*moves);
        group.bench_with_input(BenchmarkId::from_parameter(moves), moves, |b, &_moves| {
            b.iter(|| writer.to_vec(black_box(&record)).unwrap())
        });
    }
    group.finish();
}

pub fn decrypt_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");
    let mut tags = [0u8; 16];
    tags[..4].copy_from_slice(b"XQ\x0c\x5a");
    tags[8..].copy_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x9a, 0x7b, 0x3c, 0xe1]);
    let keys = KeyStream::derive(&tags);

    for size in [32, 512, 4096].iter() {
        let data = vec![0xa5u8; *size];
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &_size| {
            b.iter(|| keys.decryptor().decrypt(black_box(&data)))
        });
    }
    group.finish();
}

pub fn gbk_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gbk");
    let encoding = GbkEncoding::new();
    for size in [2, 16, 64].iter() {
        let text = "象".repeat(*size / 2);
        let data = encoding.encode(&text).unwrap().into_owned();
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("decode", size), size, |b, &_size| {
            b.iter(|| encoding.decode(black_box(&data)).into_owned())
        });
        group.bench_with_input(BenchmarkId::new("encode", size), size, |b, &_size| {
            b.iter(|| encoding.encode(black_box(&text)).map(|x| x.into_owned()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    read_benchmark,
    write_benchmark,
    decrypt_benchmark,
    gbk_benchmark
);
criterion_main!(benches);
