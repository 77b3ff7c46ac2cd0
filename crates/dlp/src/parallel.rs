use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Barrier, Mutex, RwLock};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use kanga_ecc::fields::{Fp, GroupParams};
use kanga_ecc::groups::{Affine, CurvePoint};
use kanga_numeric::MixState;

use crate::error::SolveError;
use crate::lambda::build_jump_table;

/// Walk table shared by all workers. Worker 0 rebuilds it at the start of
/// each round, before the first barrier; afterwards every access is a read.
struct JumpTable<S: GroupParams<NS>, P, const NS: usize> {
    steps: Vec<Fp<S, NS>>,
    points: Vec<P>,
}

struct SharedState<S, P, const NS: usize, const NB: usize>
where
    S: GroupParams<NS>,
    P: CurvePoint<NB>,
{
    table: RwLock<JumpTable<S, P, NS>>,
    /// Tame-walk endpoints, keyed by canonical affine form. Lookups take
    /// the lock too; the map is not safe to probe concurrently with
    /// insertion.
    traps: Mutex<HashMap<Affine<P::Curve, NB>, Fp<S, NS>, MixState>>,
    result: Mutex<Option<Fp<S, NS>>>,
    shutdown: AtomicBool,
    barrier: Barrier,
    a: Fp<S, NS>,
    b: Fp<S, NS>,
    g: P,
    h: P,
    bound: u64,
    m: usize,
}

/// Multithreaded Pollard λ on the interval `[a, b)`.
///
/// Per round, every worker sets one tame trap and then runs one wild walk
/// that probes the whole trap table; the first worker to find a usable
/// collision publishes the answer and raises the shutdown flag, which the
/// others observe once per step. Rounds repeat until some worker succeeds,
/// so the call only returns with the correct scalar.
pub fn pollard_lambda_parallel<S, P, R, const NS: usize, const NB: usize>(
    worker_n: usize,
    bound: u64,
    a: &Fp<S, NS>,
    b: &Fp<S, NS>,
    g: &P,
    h: &P,
    rng: &mut R,
) -> Result<Fp<S, NS>, SolveError>
where
    S: GroupParams<NS>,
    P: CurvePoint<NB>,
    R: Rng,
{
    assert!(worker_n > 0, "at least one worker is required");
    if a >= b {
        return Err(SolveError::EmptyInterval);
    }
    let width = b.sub(a);
    let m = width.bit_length().saturating_sub(1) as usize;
    if m == 0 {
        // single-element interval
        return Ok(*a);
    }

    let shared = SharedState {
        table: RwLock::new(JumpTable { steps: Vec::new(), points: Vec::new() }),
        traps: Mutex::new(HashMap::default()),
        result: Mutex::new(None),
        shutdown: AtomicBool::new(false),
        barrier: Barrier::new(worker_n),
        a: *a,
        b: *b,
        g: *g,
        h: *h,
        bound,
        m,
    };
    let seeds: Vec<u64> = (0..worker_n).map(|_| rng.random()).collect();

    thread::scope(|scope| {
        for (id, seed) in seeds.into_iter().enumerate() {
            let shared = &shared;
            scope.spawn(move || worker(id, seed, shared));
        }
    });

    let result = shared
        .result
        .into_inner()
        .expect("result lock poisoned")
        .expect("workers only shut down after publishing a result");
    Ok(result)
}

fn worker<S, P, const NS: usize, const NB: usize>(
    id: usize,
    seed: u64,
    shared: &SharedState<S, P, NS, NB>,
) where
    S: GroupParams<NS>,
    P: CurvePoint<NB>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let m = shared.m;

    loop {
        if id == 0 {
            let mut table = shared.table.write().expect("jump table lock poisoned");
            let (steps, points) = build_jump_table(m, &shared.g, &mut rng);
            table.steps = steps;
            table.points = points;
            debug!(worker = id, entries = m, "jump table generated");
        }
        shared.barrier.wait();

        // tame walk: set one trap
        let mut tame_x = Fp::sample_range_inclusive(&shared.a, &shared.b, &mut rng);
        let mut u = shared.g.mul_uint(tame_x.as_uint()).normalize();
        {
            let table = shared.table.read().expect("jump table lock poisoned");
            for _ in 0..shared.bound {
                let i = (u.x_word() % m as u64) as usize;
                tame_x = tame_x.add(&table.steps[i]);
                u = u.add_full(&table.points[i]).normalize();
            }
        }
        shared
            .traps
            .lock()
            .expect("trap table lock poisoned")
            .insert(u.to_affine_point(), tame_x);
        debug!(worker = id, "trap set");
        shared.barrier.wait();

        // wild walk: probe the traps at every step
        let mut wild_x = Fp::sample_range_inclusive(&shared.a, &shared.b, &mut rng);
        let mut v = shared
            .h
            .add_full(&shared.g.mul_uint(wild_x.as_uint()))
            .normalize();
        {
            let table = shared.table.read().expect("jump table lock poisoned");
            for _ in 0..shared.bound {
                if shared.shutdown.load(Ordering::Acquire) {
                    break;
                }
                let trap = {
                    let traps = shared.traps.lock().expect("trap table lock poisoned");
                    traps.get(&v.to_affine_point()).copied()
                };
                if let Some(trapped_x) = trap {
                    if trapped_x != wild_x {
                        let mut result = shared.result.lock().expect("result lock poisoned");
                        if !shared.shutdown.load(Ordering::Acquire) {
                            *result = Some(trapped_x.sub(&wild_x));
                            shared.shutdown.store(true, Ordering::Release);
                            debug!(worker = id, "collision found, shutting down");
                        }
                        break;
                    }
                }
                let i = (v.x_word() % m as u64) as usize;
                wild_x = wild_x.add(&table.steps[i]);
                v = v.add_full(&table.points[i]).normalize();
            }
        }
        shared.barrier.wait();

        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }
        debug!(worker = id, "no collision, retrying");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lambda::pollard_lambda;
    use kanga_ecc::curves::tiny::{TinyJacobian, TinyScalar};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn recovers_discrete_logs_with_four_workers() {
        let mut rng = StdRng::seed_from_u64(0x706c);
        let g = TinyJacobian::generator();
        let a = TinyScalar::from_u64(1);
        let b = TinyScalar::from_u64(0x8007a);

        let x = TinyScalar::sample_range(&a, &b, &mut rng);
        let h = g.mul_uint(x.as_uint());
        let found = pollard_lambda_parallel(4, 8_192, &a, &b, &g, &h, &mut rng).unwrap();
        assert_eq!(found, x);
    }

    #[test]
    fn consecutive_solves_terminate() {
        let mut rng = StdRng::seed_from_u64(0x706d);
        let g = TinyJacobian::generator();
        let a = TinyScalar::from_u64(1);
        let b = TinyScalar::from_u64(0x8007a);

        for _ in 0..2 {
            let x = TinyScalar::sample_range(&a, &b, &mut rng);
            let h = g.mul_uint(x.as_uint());
            let found = pollard_lambda_parallel(4, 8_192, &a, &b, &g, &h, &mut rng).unwrap();
            assert_eq!(found, x);
        }
    }

    #[test]
    fn single_worker_still_succeeds() {
        let mut rng = StdRng::seed_from_u64(0x706e);
        let g = TinyJacobian::generator();
        let a = TinyScalar::from_u64(1);
        let b = TinyScalar::from_u64(0x8007a);

        let x = TinyScalar::sample_range(&a, &b, &mut rng);
        let h = g.mul_uint(x.as_uint());
        let found = pollard_lambda_parallel(1, 16_384, &a, &b, &g, &h, &mut rng).unwrap();
        assert_eq!(found, x);
    }

    #[test]
    fn agrees_with_the_serial_solver() {
        let mut rng = StdRng::seed_from_u64(0x706f);
        let g = TinyJacobian::generator();
        let a = TinyScalar::from_u64(1);
        let b = TinyScalar::from_u64(0x8007a);

        let x = TinyScalar::sample_range(&a, &b, &mut rng);
        let h = g.mul_uint(x.as_uint());
        let serial = pollard_lambda(16_384, &a, &b, &g, &h, &mut rng).unwrap();
        let parallel = pollard_lambda_parallel(4, 8_192, &a, &b, &g, &h, &mut rng).unwrap();
        assert_eq!(serial, parallel);
        assert_eq!(serial, x);
    }

    #[test]
    fn empty_interval_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0x7070);
        let g = TinyJacobian::generator();
        let a = TinyScalar::from_u64(9);
        let b = TinyScalar::from_u64(4);
        assert_eq!(
            pollard_lambda_parallel(2, 16, &a, &b, &g, &g, &mut rng),
            Err(SolveError::EmptyInterval)
        );
    }
}
