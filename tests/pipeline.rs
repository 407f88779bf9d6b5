use piebot_puzzles::pipeline::run;
use piebot_puzzles::DatasetParams;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DUMP: &str = "\
PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags
p1,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,f1c4 g8f6,1050,80,95,120,fork,https://lichess.org/a,
p2,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,f1b5 a7a6,1050,80,95,120,fork,https://lichess.org/b,
p3,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,d2d4 e5d4,1075,80,95,120,pin,https://lichess.org/c,
p4,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,b1c3 g8f6,1120,80,95,120,fork,https://lichess.org/d,
p5,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,b1c3 g8f6,1130,80,95,120,,https://lichess.org/e,
p6,r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3,b1c3 g8f6,n/a,80,95,120,fork,https://lichess.org/f,
";

fn seeded_root(dir: &Path, name: &str) -> DatasetParams {
    let params = DatasetParams::with_root(dir.join(name));
    fs::create_dir_all(&params.data_root).unwrap();
    let packed = zstd::stream::encode_all(DUMP.as_bytes(), 3).unwrap();
    fs::write(params.archive_path(), packed).unwrap();
    // Unreachable on purpose: the archive is already present.
    DatasetParams { url: "http://127.0.0.1:9/unused".to_string(), ..params }
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for e in fs::read_dir(dir).unwrap() {
            let p = e.unwrap().path();
            if p.is_dir() { walk(base, &p, out); } else { out.insert(p.strip_prefix(base).unwrap().to_path_buf(), fs::read(&p).unwrap()); }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn ids(path: &Path) -> Vec<String> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()[0].to_string()).collect()
}

#[test]
fn end_to_end_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let params = seeded_root(tmp.path(), "data");
    let report = run(&params).unwrap();
    assert!(!report.downloaded);
    assert!(report.extracted);
    let b = report.bucketed.expect("bucketed");
    assert_eq!(b.rows, 6);
    assert_eq!(b.bad_rating, 1);
    assert_eq!(b.no_themes, 1);

    let csv_text = fs::read_to_string(params.csv_path()).unwrap();
    assert!(csv_text.contains("p5,"), "themeless puzzle stays in the extracted CSV");

    let sorted = params.sorted_root();
    assert_eq!(ids(&sorted.join("1000/fork.csv")), vec!["p1", "p2"]);
    assert_eq!(ids(&sorted.join("1000/pin.csv")), vec!["p3"]);
    assert_eq!(ids(&sorted.join("1100/fork.csv")), vec!["p4"]);
    let files = snapshot(&sorted);
    assert_eq!(files.len(), 3, "p5 and p6 land nowhere: {:?}", files.keys().collect::<Vec<_>>());

    let ds = params.datasets_root();
    // 1000/fork: 2 records -> train 2; 1000/pin: 1 -> test; 1100/fork: 1 -> test
    let mut train = ids(&ds.join("range_1000/train.csv"));
    train.sort();
    assert_eq!(train, vec!["p1", "p2"]);
    assert_eq!(ids(&ds.join("range_1000/test.csv")), vec!["p3"]);
    let mut test = ids(&ds.join("range_1000_1100/test.csv"));
    test.sort();
    assert_eq!(test, vec!["p3", "p4"]);
    assert_eq!(report.windowed.unwrap().windows, 2);
}

#[test]
fn rerun_is_a_no_op_and_runs_are_reproducible() {
    let tmp = tempfile::tempdir().unwrap();
    let a = seeded_root(tmp.path(), "a");
    let b = seeded_root(tmp.path(), "b");
    run(&a).unwrap();
    let first = snapshot(&a.data_root);
    let again = run(&a).unwrap();
    assert!(!again.extracted);
    assert!(again.bucketed.is_none());
    assert!(again.windowed.is_none());
    assert_eq!(snapshot(&a.data_root), first);

    run(&b).unwrap();
    assert_eq!(snapshot(&b.data_root), first);
}

#[test]
fn missing_archive_without_network_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let params = DatasetParams {
        url: "http://127.0.0.1:9/unreachable.csv.zst".to_string(),
        ..DatasetParams::with_root(tmp.path().join("data"))
    };
    assert!(run(&params).is_err());
    assert!(!params.archive_path().exists());
}
