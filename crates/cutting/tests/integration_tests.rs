//! Integration tests for u-vecsort-cutting.

use rand::prelude::*;
use u_vecsort_core::{Point, Segment, SortConfig};
use u_vecsort_cutting::{
    build_store, optimize_job, refine, refine_until_stable, sequence, stats_from, transit_length,
    Chain, SegmentStore,
};

/// Random strokes, deduplicated by the store. Coordinates are on a coarse
/// grid so shared endpoints and continuous joins actually occur.
fn random_store(rng: &mut StdRng, n: usize) -> SegmentStore {
    let mut store = SegmentStore::new();
    while store.len() < n {
        let x1 = rng.gen_range(0..40) as f64;
        let y1 = rng.gen_range(0..40) as f64;
        let x2 = x1 + rng.gen_range(-3..=3) as f64;
        let y2 = y1 + rng.gen_range(-3..=3) as f64;
        store.insert(Segment::from_coords(x1, y1, x2, y2));
    }
    store
}

/// Direction-insensitive key of a stroke, for multiset comparison.
fn undirected_key(s: &Segment) -> (i64, i64, i64, i64) {
    let a = (s.a.x.round() as i64, s.a.y.round() as i64);
    let b = (s.b.x.round() as i64, s.b.y.round() as i64);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo.0, lo.1, hi.0, hi.1)
}

fn sorted_keys<'a, I: IntoIterator<Item = &'a Segment>>(segments: I) -> Vec<(i64, i64, i64, i64)> {
    let mut keys: Vec<_> = segments.into_iter().map(undirected_key).collect();
    keys.sort_unstable();
    keys
}

mod store_tests {
    use super::*;

    #[test]
    fn test_dedup_same_direction() {
        let store = build_store([(1.0, 2.0, 3.0, 4.0), (1.0, 2.0, 3.0, 4.0)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_dedup_reverse_direction() {
        let store = build_store([(2.0, 2.0, 3.0, 3.0), (3.0, 3.0, 2.0, 2.0)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_degenerate_never_grows_store() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = random_store(&mut rng, 20);
        for _ in 0..50 {
            let x = rng.gen_range(-100.0..100.0);
            let y = rng.gen_range(-100.0..100.0);
            store.insert(Segment::from_coords(x, y, x, y));
        }
        assert_eq!(store.len(), 20);
    }
}

mod sequence_tests {
    use super::*;

    #[test]
    fn test_three_segment_scenario() {
        let store = build_store([
            (0.0, 0.0, 1.0, 0.0),
            (5.0, 5.0, 5.0, 6.0),
            (1.0, 0.0, 1.0, 1.0),
        ]);
        let result = sequence(store, Point::ORIGIN).expect("sequencing");
        let order = result.chain.to_vec();

        assert_eq!(order[0], Segment::from_coords(0.0, 0.0, 1.0, 0.0));
        assert_eq!(order[1], Segment::from_coords(1.0, 0.0, 1.0, 1.0));
        // (5,5) is nearer to (1,1) than (5,6), so no reversal
        assert_eq!(order[2], Segment::from_coords(5.0, 5.0, 5.0, 6.0));

        let stats = stats_from(&result.chain, Point::ORIGIN);
        assert_eq!(stats.transit_count, 1);
    }

    #[test]
    fn test_completeness_on_random_stores() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 5, 17, 60] {
            let store = random_store(&mut rng, n);
            let input = sorted_keys(store.iter());

            let result = sequence(store, Point::ORIGIN).expect("sequencing");
            assert_eq!(result.chain.len(), n);
            assert_eq!(sorted_keys(result.chain.iter()), input);
        }
    }

    #[test]
    fn test_pen_continuity_on_random_stores() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..10 {
            let store = random_store(&mut rng, 25);
            let start = Point::new(rng.gen_range(0.0..40.0), rng.gen_range(0.0..40.0));
            let result = sequence(store, start).expect("sequencing");
            let last = result.chain.last().expect("chain is non-empty");
            assert_eq!(result.end, last.b);
        }
    }

    #[test]
    fn test_greedy_each_step_picks_nearest_remaining() {
        let mut rng = StdRng::seed_from_u64(99);
        let store = random_store(&mut rng, 30);
        let mut remaining: Vec<Segment> = store.iter().copied().collect();

        let result = sequence(store, Point::ORIGIN).expect("sequencing");
        let mut pen = Point::ORIGIN;
        for placed in result.chain.iter() {
            let nearest = remaining
                .iter()
                .map(|s| pen.distance_sq(s.a).min(pen.distance_sq(s.b)))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(pen.distance_sq(placed.a), nearest);

            let pos = remaining
                .iter()
                .position(|s| s.is_duplicate_of(placed))
                .expect("placed segment came from the store");
            remaining.remove(pos);
            pen = placed.b;
        }
        assert!(remaining.is_empty());
    }
}

mod refine_tests {
    use super::*;

    #[test]
    fn test_positive_reduction_never_increases_transit() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let store = random_store(&mut rng, 40);
            let mut chain = sequence(store, Point::ORIGIN).expect("sequencing").chain;

            let before = stats_from(&chain, Point::ORIGIN).transit_length;
            let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");
            let after = stats_from(&chain, Point::ORIGIN).transit_length;

            assert!(outcome.reduction >= 0.0);
            assert!(after <= before);
            if outcome.applied {
                assert!((outcome.reduction - (before - after)).abs() < 1e-9);
            } else {
                assert_eq!(after, before);
            }
            assert_eq!(outcome.end, chain.end_position(Point::ORIGIN));
        }
    }

    #[test]
    fn test_repeated_refine_terminates() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..10 {
            let store = random_store(&mut rng, 30);
            let n = store.len();
            let input = sorted_keys(store.iter());
            let mut chain = sequence(store, Point::ORIGIN).expect("sequencing").chain;

            let mut stopped = false;
            for _ in 0..(2 * n).max(1) * 10 {
                let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");
                if outcome.reduction <= 0.0 {
                    stopped = true;
                    break;
                }
            }
            assert!(stopped, "refinement did not settle");
            assert_eq!(sorted_keys(chain.iter()), input);
        }
    }

    #[test]
    fn test_refine_on_unsorted_chain() {
        // Input order zig-zags between two clusters
        let chain_segments = vec![
            Segment::from_coords(0.0, 0.0, 1.0, 0.0),
            Segment::from_coords(100.0, 0.0, 101.0, 0.0),
            Segment::from_coords(1.0, 0.0, 2.0, 0.0),
            Segment::from_coords(101.0, 0.0, 102.0, 0.0),
        ];
        let mut chain = Chain::from_segments(chain_segments);
        let before = transit_length(&chain, Point::ORIGIN);

        let summary = refine_until_stable(&mut chain, Point::ORIGIN, 8).expect("refine");
        let after = transit_length(&chain, Point::ORIGIN);

        assert!(summary.improvements >= 1);
        assert!(after < before);
        assert!((before - after - summary.total_reduction).abs() < 1e-9);
    }
}

mod job_tests {
    use super::*;

    #[test]
    fn test_job_keeps_passes_separate() {
        let passes = vec![
            build_store([(0.0, 0.0, 1.0, 0.0), (1.0, 0.0, 2.0, 0.0)]),
            build_store([(0.5, 0.0, 1.5, 0.0)]),
            build_store([(9.0, 9.0, 8.0, 8.0)]),
        ];
        let result = optimize_job(passes, &SortConfig::new().with_auto_refine()).expect("job");

        let sizes: Vec<usize> = result.passes.iter().map(|p| p.chain.len()).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
        assert_eq!(result.passes[1].start, result.passes[0].end);
        assert_eq!(result.passes[2].start, result.passes[1].end);
        assert_eq!(result.end, result.passes[2].end);
    }

    #[test]
    fn test_job_summary_totals() {
        let passes = vec![
            build_store([(0.0, 0.0, 3.0, 4.0)]),
            build_store([(3.0, 4.0, 3.0, 10.0)]),
        ];
        let result = optimize_job(passes, &SortConfig::default()).expect("job");
        let summary = result.summary();

        assert_eq!(summary.passes.len(), 2);
        assert_eq!(summary.totals.cut_count, 2);
        assert!((summary.totals.cut_length - 11.0).abs() < 1e-9);
        assert_eq!(summary.totals.transit_count, 0);
        assert_eq!(summary.end, Point::new(3.0, 10.0));
    }

    #[test]
    fn test_refinement_pays_off_for_passes_far_from_home() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut improved_passes = 0;

        for _ in 0..40 {
            let mut store = SegmentStore::new();
            while store.len() < 30 {
                let x = rng.gen_range(500.0..560.0);
                let y = rng.gen_range(500.0..560.0);
                let dx = rng.gen_range(-4.0..4.0);
                let dy = rng.gen_range(-4.0..4.0);
                store.insert(Segment::from_coords(x, y, x + dx, y + dy));
            }

            let greedy = optimize_job(vec![store.clone()], &SortConfig::default()).expect("job");
            let refined =
                optimize_job(vec![store], &SortConfig::new().with_auto_refine()).expect("job");

            let (g, r) = (&greedy.passes[0], &refined.passes[0]);
            assert_eq!(r.chain.len(), 30);
            assert!(
                (g.after.transit_length - r.after.transit_length - r.refine.total_reduction).abs()
                    < 1e-6
            );
            if r.refine.improvements > 0 {
                assert!(r.after.transit_length < g.after.transit_length);
                improved_passes += 1;
            }
        }

        assert!(improved_passes > 0);
    }
}
