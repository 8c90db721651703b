use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use steptrack::{process_lines, OutputFormat, PersonalAttributes, RecordKind};

/// Throughput benchmarks for the parse -> report pipeline
///
/// Datasets mix valid lines with malformed and unknown-activity lines so the
/// error paths are measured alongside the happy path.

fn create_training_dataset(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| match i % 5 {
            0 => format!("{},бег,{}m", 4_000 + i, 20 + i % 40),
            1 => format!("{},ходьба,1h{}m", 6_000 + i, i % 60),
            2 => format!("{},Running,{}m", 5_000 + i, 30 + i % 30),
            3 => format!("{},swimming,45m", 3_000 + i),
            _ => "not a record".to_string(),
        })
        .collect()
}

fn create_steps_dataset(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| match i % 4 {
            0 => format!("{},{}m", 8_000 + i, 30 + i % 90),
            1 => format!("+{},1h", 10_000 + i),
            2 => format!(" {},30m", 5_000 + i),
            _ => format!("{},2h30m", 12_000 + i),
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let personal = PersonalAttributes::new("Bench Athlete", 72.0, 1.8);
    let mut group = c.benchmark_group("Pipeline");

    for &size in &[10, 100, 1000] {
        let training = create_training_dataset(size);
        let steps = create_steps_dataset(size);

        group.throughput(Throughput::Elements(size as u64));

        for format in [OutputFormat::Text, OutputFormat::Json] {
            group.bench_with_input(
                BenchmarkId::new(format!("training_{:?}", format).to_lowercase(), size),
                &training,
                |b, lines| {
                    let mut record = RecordKind::Training.new_record(personal.clone());
                    b.iter(|| {
                        let mut sink = Vec::with_capacity(lines.len() * 128);
                        process_lines(black_box(lines), record.as_mut(), &mut sink, format)
                    });
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("steps_text", size), &steps, |b, lines| {
            let mut record = RecordKind::Steps.new_record(personal.clone());
            b.iter(|| {
                let mut sink = Vec::with_capacity(lines.len() * 96);
                process_lines(black_box(lines), record.as_mut(), &mut sink, OutputFormat::Text)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
