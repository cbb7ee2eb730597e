use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ldusolve::parallel::SerialComm;
use ldusolve::{LduAddressing, LduMatrix, LduSolverContext, SolverControls};

fn poisson_1d(n: usize) -> LduMatrix<f64> {
    let addr = Arc::new(
        LduAddressing::new(n, (0..n - 1).collect(), (1..n).collect()).unwrap(),
    );
    LduMatrix::symmetric(addr, vec![2.0; n], vec![-1.0; n - 1]).unwrap()
}

fn bench_pcg_poisson(c: &mut Criterion) {
    let n = 10_000;
    let m = poisson_1d(n);
    let b = vec![1.0; n];

    for pc in ["none", "diagonal", "DIC"] {
        let ctx = LduSolverContext {
            field_name: "p".to_owned(),
            matrix: &m,
            bou_coeffs: &[],
            int_coeffs: &[],
            interfaces: &[],
            controls: SolverControls::default()
                .with_preconditioner(pc)
                .with_tolerance(1.0e-6)
                .with_rel_tol(0.0)
                .with_max_iter(20_000),
            comm: &SerialComm,
        };
        c.bench_function(&format!("PCG {pc} n={n}"), |ben| {
            ben.iter(|| {
                let mut psi = vec![0.0; n];
                ctx.solve(black_box(&mut psi), black_box(&b), 0).unwrap()
            })
        });
    }
}

fn bench_amul(c: &mut Criterion) {
    let n = 100_000;
    let m = poisson_1d(n);
    let psi: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
    let mut out = vec![0.0; n];
    c.bench_function(&format!("amul n={n}"), |ben| {
        ben.iter(|| {
            m.amul(black_box(&mut out), black_box(&psi), &[], &[], 0)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_pcg_poisson, bench_amul);
criterion_main!(benches);
