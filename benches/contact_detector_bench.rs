use contact_guard::scan_pipeline::{scan_files, ScanOptions};
use contact_guard::{build_segments, ContactDetector, WarningCatalog};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SHORT_MESSAGES: &[&str] = &[
    "Добрий день! Коли зможете почати?",
    "пишіть на test@example.com",
    "мій тг @john_doe123",
    "дзвони +380501234567",
    "сайт example.com/page",
    "просто текст без контактів",
];

fn long_transcript() -> String {
    let block = "Привіт! Дякую за замовлення, все зрозуміло. \
        Пошта: anna.k@mail.ua, тел. (050) 123-4567, skype: anna.k. \
        Портфоліо на https://www.behance.net/anna-k і linkedin.com/in/anna-k. \
        Бюджет 1500 грн, термін 5 днів, інста @design.studio. ";
    block.repeat(200)
}

fn bench_detector_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector_construction");
    group.sample_size(20);

    group.bench_function("compile_all_rules", |b| {
        b.iter(|| black_box(ContactDetector::new().expect("built-in rules compile")))
    });
    group.finish();
}

fn bench_detection(c: &mut Criterion) {
    let detector = ContactDetector::new().expect("built-in rules compile");
    let transcript = long_transcript();

    let mut group = c.benchmark_group("detection");

    group.bench_function("short_messages", |b| {
        b.iter(|| {
            for message in SHORT_MESSAGES {
                black_box(detector.detect(black_box(message)));
            }
        })
    });

    group.throughput(Throughput::Bytes(transcript.len() as u64));
    group.bench_function("long_transcript", |b| {
        b.iter(|| black_box(detector.detect(black_box(&transcript))))
    });
    group.finish();
}

fn bench_segments(c: &mut Criterion) {
    let detector = ContactDetector::new().expect("built-in rules compile");
    let transcript = long_transcript();
    let matches = detector.detect(&transcript);

    c.bench_function("build_segments_long_transcript", |b| {
        b.iter(|| black_box(build_segments(black_box(&transcript), black_box(&matches))))
    });
}

fn bench_scan_pipeline(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let transcript = SHORT_MESSAGES.join("\n").repeat(50);
    let paths: Vec<_> = (0..16)
        .map(|i| {
            let path = temp_dir.path().join(format!("chat-{i}.txt"));
            std::fs::write(&path, &transcript).expect("Failed to write transcript");
            path
        })
        .collect();

    let detector = ContactDetector::new().expect("built-in rules compile");
    let catalog = WarningCatalog::default();
    let options = ScanOptions::default();

    let mut group = c.benchmark_group("scan_pipeline");
    group.sample_size(10);
    group.bench_function("scan_16_transcripts", |b| {
        b.iter(|| {
            rt.block_on(async {
                let scans = scan_files(&paths, &detector, &catalog, &options, None)
                    .await
                    .expect("scan succeeds");
                black_box(scans.len())
            })
        })
    });
    group.finish();
}

criterion_group!(benches, bench_detector_construction, bench_detection, bench_segments, bench_scan_pipeline);
criterion_main!(benches);
