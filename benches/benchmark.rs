use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkGroup,
    Criterion,
    SamplingMode
};
use criterion::measurement::WallTime;

use knights_tour::Board;
use knights_tour::solver::{
    ClosedTourSolver,
    NaiveSolver,
    Solution,
    Solver,
    StructuredSolver,
    WarnsdorffSolver
};

// Explanation of benchmark classes:
//
// naive: Unpruned backtracking in the canonical move order. Only benched on
//        a small board; its runtime explodes beyond that.
// warnsdorff: Backtracking ordered by Warnsdorff's rule, open acceptance.
// closed: Warnsdorff ordering with the closed acceptance test.
// structured: Divide-and-conquer construction from closed quadrant tours.

const MEASUREMENT_TIME_SECS: u64 = 10;
const SAMPLE_SIZE: usize = 20;

fn solve_complete<S: Solver>(solver: &S, board: &Board) {
    let solve = solver.solve(board).unwrap();

    match solve.solution() {
        Solution::Complete(_) => { },
        solution => panic!("benchmark solve failed: {:?}", solution)
    }
}

fn benchmark_solver<S: Solver>(group: &mut BenchmarkGroup<WallTime>,
        solver: &S, size: usize) {
    let board = Board::square(size).unwrap();
    let id = format!("{0}x{0}", size);

    group.bench_function(id.as_str(),
        |b| b.iter(|| solve_complete(solver, &board)));
}

fn benchmark_sizes<S: Solver>(c: &mut Criterion, group_name: &str, solver: S,
        sizes: &[usize]) {
    let mut group = c.benchmark_group(group_name);

    group.measurement_time(std::time::Duration::from_secs(
        MEASUREMENT_TIME_SECS));
    group.sample_size(SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);

    for &size in sizes {
        benchmark_solver(&mut group, &solver, size);
    }

    group.finish();
}

fn benchmark_naive(c: &mut Criterion) {
    benchmark_sizes(c, "naive", NaiveSolver, &[5]);
}

fn benchmark_warnsdorff(c: &mut Criterion) {
    benchmark_sizes(c, "warnsdorff", WarnsdorffSolver, &[8, 16, 32]);
}

fn benchmark_closed(c: &mut Criterion) {
    benchmark_sizes(c, "closed", ClosedTourSolver, &[6, 8]);
}

fn benchmark_structured(c: &mut Criterion) {
    benchmark_sizes(c, "structured", StructuredSolver, &[16, 24, 48]);
}

criterion_group!(all_benches,
    benchmark_naive,
    benchmark_warnsdorff,
    benchmark_closed,
    benchmark_structured);
criterion_main!(all_benches);
