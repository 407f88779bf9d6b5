use criterion::{criterion_group, criterion_main, Criterion, black_box};
use piebot_puzzles::bucketer::group_records;
use std::path::Path;

const THEMES: [&str; 6] = ["fork", "pin", "mateIn2 short", "endgame crushing", "skewer middlegame long", "discoveredAttack"];

fn synthetic_dump(rows: usize) -> String {
    let mut s = String::from("PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags\n");
    for i in 0..rows {
        let rating = 600 + (i * 37) % 2400;
        s.push_str(&format!(
            "p{:06},r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,f1c4 g8f6,{},80,95,120,{},https://lichess.org/x,\n",
            i, rating, THEMES[i % THEMES.len()]
        ));
    }
    s
}

fn bench_bucketing(c: &mut Criterion) {
    let dump = synthetic_dump(20_000);
    c.bench_function("group_records_20k", |ben| {
        ben.iter(|| {
            let parts = group_records(black_box(dump.as_bytes()), Path::new("bench"), 100).unwrap();
            black_box(parts.len())
        })
    });
}

criterion_group!(benches, bench_bucketing);
criterion_main!(benches);
