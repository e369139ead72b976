use curve_clip::core::{
    BoundaryCrossingSolver, ClippingAssembler, SeriesAggregator, SeriesPoint, Viewport,
};
use proptest::prelude::*;

fn aggregator() -> SeriesAggregator {
    let viewport = Viewport::new(-100.0, 100.0, -1_000.0, 1_000.0).expect("viewport");
    SeriesAggregator::new(ClippingAssembler::new(viewport, BoundaryCrossingSolver::new()))
}

fn point_strategy() -> impl Strategy<Value = SeriesPoint> {
    (0usize..3, -20i32..20, -500i32..500).prop_map(|(series, x, y)| {
        SeriesPoint::new(format!("s{series}"), f64::from(x), f64::from(y))
    })
}

proptest! {
    #[test]
    fn merging_is_idempotent(
        points in proptest::collection::vec(point_strategy(), 1..96)
    ) {
        let aggregator = aggregator();
        let merged = aggregator.merge(&points).expect("merge");
        let flattened: Vec<SeriesPoint> = merged.values().flatten().cloned().collect();

        let remerged = aggregator.merge(&flattened).expect("merge again");
        prop_assert_eq!(&remerged, &merged);
        prop_assert_eq!(
            aggregator.aggregate(&flattened).expect("aggregate"),
            aggregator.aggregate(&points).expect("aggregate")
        );
    }

    #[test]
    fn merged_points_are_strictly_increasing_and_weights_add_up(
        points in proptest::collection::vec(point_strategy(), 1..96)
    ) {
        let merged = aggregator().merge(&points).expect("merge");
        let mut total_weight = 0_u32;
        for group in merged.values() {
            for pair in group.windows(2) {
                prop_assert!(pair[0].x < pair[1].x);
            }
            total_weight += group.iter().map(|point| point.weight).sum::<u32>();
        }
        prop_assert_eq!(total_weight as usize, points.len());
    }

    #[test]
    fn merge_is_order_independent(
        points in proptest::collection::vec(point_strategy(), 1..64)
    ) {
        let aggregator = aggregator();
        let mut reversed = points.clone();
        reversed.reverse();

        let forward = aggregator.merge(&points).expect("merge");
        let backward = aggregator.merge(&reversed).expect("merge");
        for (series, group) in &forward {
            let other = &backward[series];
            prop_assert_eq!(group.len(), other.len());
            for (lhs, rhs) in group.iter().zip(other) {
                prop_assert_eq!(lhs.x, rhs.x);
                prop_assert_eq!(lhs.weight, rhs.weight);
                prop_assert!((lhs.y - rhs.y).abs() <= 1e-9);
            }
        }
    }
}
