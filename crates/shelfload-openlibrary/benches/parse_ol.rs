use shelfload_openlibrary::AuthorGate;
use shelfload_openlibrary::transform::{AuthorRow, WorkRow};

fn load_lines(filename: &str) -> Vec<String> {
    let dir = std::env::var("BENCH_DATA_DIR")
        .expect("set BENCH_DATA_DIR to directory with sample dump files");
    let path = std::path::Path::new(&dir).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()))
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[divan::bench]
fn parse_author_row(bencher: divan::Bencher) {
    let lines = load_lines("ol_dump_authors.txt");
    bencher.bench(|| {
        for line in &lines {
            let _: AuthorRow = shelfload_core::parse_line(line).unwrap();
        }
    });
}

#[divan::bench]
fn parse_work_row(bencher: divan::Bencher) {
    let lines = load_lines("ol_dump_works.txt");
    bencher.bench(|| {
        for line in &lines {
            let _: WorkRow = shelfload_core::parse_line(line).unwrap();
        }
    });
}

#[divan::bench]
fn extract_works(bencher: divan::Bencher) {
    let lines = load_lines("ol_dump_works.txt");
    bencher.bench(|| {
        lines
            .iter()
            .filter_map(|line| {
                let row: WorkRow = shelfload_core::parse_line(line).ok()?;
                row.extract(AuthorGate::Authors).ok().flatten()
            })
            .count()
    });
}

fn main() {
    divan::main();
}
