//! Performance benchmarks for `ppc_emit`.
//!
//! Measures:
//! - Single instruction latency
//! - Multi-instruction throughput (bytes of machine code per second)
//! - Composite immediate loads
//! - Label-heavy workloads
//! - Directive expansion (repeat, counted loops)
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use ppc_emit::{Emitter, Fpr, Gpr};

// ─── Single-Instruction Latency ──────────────────────────────────────────────

fn bench_single_instruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_instruction");

    group.bench_function("add", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(16).unwrap();
            asm.add(
                black_box(Gpr::R3),
                black_box(Gpr::R4),
                black_box(Gpr::R5),
                false,
            )
            .unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.bench_function("lwz", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(16).unwrap();
            asm.lwz(black_box(Gpr::R3), black_box(Gpr::R1), black_box(8))
                .unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.bench_function("fmadd", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(16).unwrap();
            asm.fmadd(
                black_box(Fpr::F1),
                black_box(Fpr::F2),
                black_box(Fpr::F3),
                black_box(Fpr::F4),
                false,
            )
            .unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.finish();
}

// ─── Multi-Instruction Throughput ─────────────────────────────────────────────

fn emit_block(asm: &mut Emitter<'_>, n: usize) {
    for i in 0..n {
        match i % 6 {
            0 => asm.add(Gpr::R3, Gpr::R4, Gpr::R5, false).unwrap(),
            1 => asm.sub(Gpr::R6, Gpr::R7, Gpr::R8, false).unwrap(),
            2 => asm.xor(Gpr::R9, Gpr::R10, Gpr::R11, false).unwrap(),
            3 => asm.and(Gpr::R12, Gpr::R13, Gpr::R14, false).unwrap(),
            4 => asm.or(Gpr::R15, Gpr::R16, Gpr::R17, false).unwrap(),
            5 => asm.mullw(Gpr::R18, Gpr::R19, Gpr::R20, false).unwrap(),
            _ => unreachable!(),
        }
    }
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    for n in [100usize, 1000, 5000] {
        group.throughput(Throughput::Bytes((n * 4) as u64));
        group.bench_function(format!("{n}_insn"), |b| {
            b.iter(|| {
                let mut asm = Emitter::new(n * 4).unwrap();
                emit_block(&mut asm, n);
                black_box(asm.into_bytes())
            })
        });
    }

    group.throughput(Throughput::Bytes(5000 * 4));
    group.bench_function("5000_insn_auto_grow", |b| {
        b.iter(|| {
            let mut asm = Emitter::auto_grow(64).unwrap();
            emit_block(&mut asm, 5000);
            black_box(asm.into_bytes())
        })
    });

    group.finish();
}

// ─── Composite Immediate Loads ────────────────────────────────────────────────

fn bench_liw(c: &mut Criterion) {
    let mut group = c.benchmark_group("liw");

    group.bench_function("short_form", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(16).unwrap();
            asm.liw(Gpr::R3, black_box(0x1234)).unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.bench_function("long_form", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(16).unwrap();
            asm.liw(Gpr::R3, black_box(0xCAFE_BABE)).unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.finish();
}

// ─── Label-Heavy Workloads ────────────────────────────────────────────────────

fn bench_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("labels");

    for n in [50usize, 200, 500] {
        group.bench_function(format!("{n}_forward_branches"), |b| {
            b.iter(|| {
                let mut asm = Emitter::new(n * 8 + 16).unwrap();
                let labels: Vec<_> = (0..n).map(|_| asm.bne().unwrap()).collect();
                asm.nop().unwrap();
                for label in labels {
                    asm.set_label(label).unwrap();
                }
                black_box(asm.into_bytes())
            })
        });
    }

    group.finish();
}

// ─── Directive Expansion ──────────────────────────────────────────────────────

fn bench_directives(c: &mut Criterion) {
    let mut group = c.benchmark_group("directives");

    group.bench_function("repeat_100_nop", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(512).unwrap();
            asm.repeat::<100, _>(|asm, _| asm.nop()).unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.bench_function("counted_loop", |b| {
        b.iter(|| {
            let mut asm = Emitter::new(64).unwrap();
            asm.counted_loop(black_box(Gpr::R4), black_box(16), |asm| {
                asm.add(Gpr::R3, Gpr::R3, Gpr::R5, false)
            })
            .unwrap();
            black_box(asm.into_bytes())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_instruction,
    bench_throughput,
    bench_liw,
    bench_labels,
    bench_directives,
);
criterion_main!(benches);
