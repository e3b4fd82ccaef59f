use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compute::ComputationMethod;
use crate::core::data::{is_valid, Data, RetentionIndex, RetentionTime};

/// Scale on which retention times are interpolated between ladder points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationScale {
    /// Retention time itself (temperature-programmed, van den Dool and Kratz)
    #[default]
    Linear,
    /// Natural logarithm of the retention time (isothermal Kovats index)
    Logarithmic,
}

impl InterpolationScale {
    /// Map a retention time onto the interpolation axis.
    /// `None` when the logarithm is undefined.
    fn transform(self, rt: f64) -> Option<f64> {
        match self {
            Self::Linear => Some(rt),
            Self::Logarithmic => (rt > 0.0).then(|| rt.ln()),
        }
    }
}

/// Kovats retention index method.
///
/// Each query retention time is placed between the closest reference points
/// below and above it and its index interpolated on the configured scale.
/// Retention times outside the ladder are extrapolated from the two nearest
/// boundary points. Exact matches return the reference index unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kovats {
    scale: InterpolationScale,
}

/// One usable (RT, RI) pair of the reference ladder
#[derive(Debug, Clone, Copy, PartialEq)]
struct LadderPoint {
    rt: f64,
    ri: f64,
}

impl Kovats {
    #[must_use]
    pub fn new(scale: InterpolationScale) -> Self {
        Self { scale }
    }

    /// Isothermal variant interpolating on the logarithm of retention time
    #[must_use]
    pub fn logarithmic() -> Self {
        Self::new(InterpolationScale::Logarithmic)
    }

    #[must_use]
    pub fn scale(&self) -> InterpolationScale {
        self.scale
    }

    #[allow(clippy::float_cmp)]
    fn retention_index(&self, ladder: &[LadderPoint], rt: RetentionTime) -> RetentionIndex {
        let rt = rt.filter(|value| is_valid(Some(*value)))?;

        // Index of the first point at or after the query
        let upper = ladder.partition_point(|point| point.rt < rt);

        if let Some(point) = ladder.get(upper).filter(|point| point.rt == rt) {
            return Some(point.ri);
        }

        if ladder.len() < 2 {
            return None;
        }

        let (lo, hi) = if upper == 0 {
            (0, 1)
        } else if upper == ladder.len() {
            (ladder.len() - 2, ladder.len() - 1)
        } else {
            (upper - 1, upper)
        };

        self.interpolate(ladder[lo], ladder[hi], rt)
    }

    fn interpolate(&self, lower: LadderPoint, upper: LadderPoint, rt: f64) -> RetentionIndex {
        let x = self.scale.transform(rt)?;
        let x_lo = self.scale.transform(lower.rt)?;
        let x_hi = self.scale.transform(upper.rt)?;

        let ri = lower.ri + (upper.ri - lower.ri) * (x - x_lo) / (x_hi - x_lo);
        ri.is_finite().then_some(ri)
    }
}

impl ComputationMethod for Kovats {
    fn name(&self) -> &'static str {
        match self.scale {
            InterpolationScale::Linear => "kovats",
            InterpolationScale::Logarithmic => "kovats-log",
        }
    }

    fn compute(&self, query: &dyn Data, reference: &dyn Data) -> Vec<RetentionIndex> {
        let ladder = prepare_ladder(reference);

        debug!(
            method = self.name(),
            query = query.filename(),
            reference = reference.filename(),
            ladder_points = ladder.len(),
            rows = query.len(),
            "Computing retention indices"
        );

        if ladder.len() < 2 {
            warn!(
                reference = reference.filename(),
                ladder_points = ladder.len(),
                "Reference ladder has fewer than two usable points, only exact matches can be assigned"
            );
        }

        query
            .retention_times()
            .iter()
            .map(|rt| self.retention_index(&ladder, *rt))
            .collect()
    }
}

/// Collect the usable reference pairs, sorted ascending by retention time.
///
/// Rows without a valid retention time or a finite index are dropped. An
/// unsorted ladder is stably sorted; of several points sharing a retention
/// time the first in source order is kept.
#[allow(clippy::float_cmp)]
fn prepare_ladder(reference: &dyn Data) -> Vec<LadderPoint> {
    let rts = reference.retention_times();
    let ris = reference.retention_indices();

    let mut ladder: Vec<LadderPoint> = rts
        .iter()
        .zip(ris)
        .filter_map(|(rt, ri)| match (*rt, *ri) {
            (Some(rt), Some(ri)) if is_valid(Some(rt)) && ri.is_finite() => {
                Some(LadderPoint { rt, ri })
            }
            _ => None,
        })
        .collect();

    let skipped = rts.len().max(ris.len()) - ladder.len();
    if skipped > 0 {
        warn!(
            reference = reference.filename(),
            skipped, "Ignoring reference rows without a usable retention time and index"
        );
    }

    if !ladder.windows(2).all(|pair| pair[0].rt <= pair[1].rt) {
        warn!(
            reference = reference.filename(),
            "Reference is not sorted by retention time, sorting"
        );
        ladder.sort_by(|a, b| a.rt.total_cmp(&b.rt));
    }

    let before = ladder.len();
    ladder.dedup_by(|later, earlier| later.rt == earlier.rt);
    if ladder.len() < before {
        warn!(
            reference = reference.filename(),
            duplicates = before - ladder.len(),
            "Reference has duplicate retention times, keeping the first of each"
        );
    }

    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::ComputeError;
    use crate::core::data::{CommentField, DataError};
    use crate::core::unit::TimeUnit;
    use std::path::Path;

    struct DataStub {
        rts: Vec<RetentionTime>,
        ris: Vec<RetentionIndex>,
        comments: Vec<CommentField>,
    }

    impl DataStub {
        fn new(rts: Vec<RetentionTime>, ris: Vec<RetentionIndex>) -> Self {
            let comments = vec![None; rts.len()];
            Self { rts, ris, comments }
        }

        fn ladder(points: &[(f64, f64)]) -> Self {
            Self::new(
                points.iter().map(|(rt, _)| Some(*rt)).collect(),
                points.iter().map(|(_, ri)| Some(*ri)).collect(),
            )
        }

        fn query(rts: &[RetentionTime]) -> Self {
            Self::new(rts.to_vec(), vec![None; rts.len()])
        }
    }

    impl Data for DataStub {
        fn filename(&self) -> &str {
            "stub"
        }

        fn unit(&self) -> TimeUnit {
            TimeUnit::Seconds
        }

        fn retention_times(&self) -> &[RetentionTime] {
            &self.rts
        }

        fn retention_indices(&self) -> &[RetentionIndex] {
            &self.ris
        }

        fn set_retention_indices(&mut self, values: Vec<RetentionIndex>) -> Result<(), DataError> {
            self.ris = values;
            Ok(())
        }

        fn comment(&self) -> &[CommentField] {
            &self.comments
        }

        fn write(&self, _path: &Path) -> Result<(), DataError> {
            Ok(())
        }
    }

    const ALKANES: [(f64, f64); 8] = [
        (2.5, 700.0),
        (3.2, 800.0),
        (4.1, 900.0),
        (5.4, 1000.0),
        (6.9, 1100.0),
        (8.3, 1200.0),
        (9.8, 1300.0),
        (11.2, 1400.0),
    ];

    fn assert_close(actual: &[RetentionIndex], expected: &[RetentionIndex]) {
        assert_eq!(actual.len(), expected.len(), "length differs");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-6, "row {i}: {a} != {e}"),
                (None, None) => {}
                _ => panic!("row {i}: {a:?} != {e:?}"),
            }
        }
    }

    fn log_formula(rt: f64, (rt_lo, ri_lo): (f64, f64), (rt_hi, ri_hi): (f64, f64)) -> f64 {
        ri_lo + (ri_hi - ri_lo) * (rt.ln() - rt_lo.ln()) / (rt_hi.ln() - rt_lo.ln())
    }

    #[test]
    fn test_compute_ri_logarithmic() {
        let reference = DataStub::ladder(&ALKANES);
        let query = DataStub::query(&[
            Some(2.1),
            Some(2.5),
            Some(3.0),
            Some(4.6),
            Some(7.7),
            Some(10.5),
            Some(12.0),
        ]);

        let expected = [
            Some(629.371_574),
            Some(700.0),
            Some(773.856_234),
            Some(941.780_800),
            Some(1159.382_061),
            Some(1351.667_904),
            Some(1451.667_904),
        ];

        assert_close(&Kovats::logarithmic().compute(&query, &reference), &expected);
    }

    #[test]
    fn test_compute_ri_linear() {
        let reference = DataStub::ladder(&ALKANES);
        let query = DataStub::query(&[Some(2.1), Some(3.0), Some(4.6), Some(7.7), Some(12.0)]);

        let expected = [
            Some(642.857_143),
            Some(771.428_571),
            Some(938.461_538),
            Some(1157.142_857),
            Some(1457.142_857),
        ];

        assert_close(&Kovats::default().compute(&query, &reference), &expected);
    }

    #[test]
    fn test_invalid_rt_has_none_ri() {
        let reference = DataStub::ladder(&ALKANES);
        let query = DataStub::query(&[None, Some(-1.0), Some(f64::NAN), Some(3.0)]);

        let actual = Kovats::default().compute(&query, &reference);
        assert_eq!(actual[..3], [None, None, None]);
        assert_close(&actual[3..], &[Some(771.428_571)]);
    }

    #[test]
    fn test_missing_alkane() {
        let reference = DataStub::ladder(&[(5.0, 1000.0), (7.0, 1200.0)]);
        let query = DataStub::query(&[Some(6.0)]);

        assert_eq!(Kovats::default().compute(&query, &reference), vec![Some(1100.0)]);

        let expected = log_formula(6.0, (5.0, 1000.0), (7.0, 1200.0));
        assert!((expected - 1108.372_422).abs() < 1e-6);
        assert_close(
            &Kovats::logarithmic().compute(&query, &reference),
            &[Some(expected)],
        );
    }

    #[test]
    fn test_exact_match_returns_reference_ri() {
        let reference = DataStub::ladder(&ALKANES);
        let rts: Vec<RetentionTime> = ALKANES.iter().map(|(rt, _)| Some(*rt)).collect();
        let query = DataStub::query(&rts);

        for method in [Kovats::default(), Kovats::logarithmic()] {
            let actual = method.compute(&query, &reference);
            let expected: Vec<RetentionIndex> = ALKANES.iter().map(|(_, ri)| Some(*ri)).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_interpolation_stays_within_bracket() {
        let reference = DataStub::ladder(&ALKANES);
        for pair in ALKANES.windows(2) {
            let (rt_lo, ri_lo) = pair[0];
            let (rt_hi, ri_hi) = pair[1];
            let steps: Vec<RetentionTime> = (1..10)
                .map(|k| Some(rt_lo + (rt_hi - rt_lo) * f64::from(k) / 10.0))
                .collect();
            let query = DataStub::query(&steps);

            for ri in Kovats::logarithmic().compute(&query, &reference) {
                let ri = ri.unwrap();
                assert!(ri > ri_lo && ri < ri_hi, "{ri} outside ({ri_lo}, {ri_hi})");
            }
        }
    }

    #[test]
    fn test_extrapolation_uses_boundary_points() {
        let reference = DataStub::ladder(&ALKANES);
        let query = DataStub::query(&[Some(12.0), Some(13.0), Some(20.0), Some(1.0)]);

        let actual = Kovats::logarithmic().compute(&query, &reference);
        let above = |rt| log_formula(rt, ALKANES[6], ALKANES[7]);
        let below = |rt| log_formula(rt, ALKANES[0], ALKANES[1]);
        assert_close(
            &actual,
            &[
                Some(above(12.0)),
                Some(above(13.0)),
                Some(above(20.0)),
                Some(below(1.0)),
            ],
        );

        // Strictly increasing beyond the ladder
        assert!(actual[0] < actual[1] && actual[1] < actual[2]);
    }

    #[test]
    fn test_ladder_too_short() {
        let single = DataStub::ladder(&[(5.0, 1000.0)]);
        let query = DataStub::query(&[Some(5.0), Some(6.0)]);
        assert_eq!(
            Kovats::default().compute(&query, &single),
            vec![Some(1000.0), None]
        );

        let empty = DataStub::ladder(&[]);
        assert_eq!(Kovats::default().compute(&query, &empty), vec![None, None]);
    }

    #[test]
    fn test_zero_rt_under_logarithm() {
        let reference = DataStub::ladder(&[(0.0, 600.0), (2.5, 700.0), (3.2, 800.0)]);
        let query = DataStub::query(&[Some(0.0), Some(1.0), Some(3.0)]);

        // Exact match needs no logarithm, the (0.0, 2.5) bracket does
        let actual = Kovats::logarithmic().compute(&query, &reference);
        assert_eq!(actual[0], Some(600.0));
        assert_eq!(actual[1], None);
        assert!(actual[2].is_some());

        assert_close(
            &Kovats::default().compute(&query, &reference),
            &[Some(600.0), Some(640.0), Some(771.428_571)],
        );

        let ladder = DataStub::ladder(&ALKANES);
        let zero = DataStub::query(&[Some(0.0)]);
        assert_eq!(Kovats::logarithmic().compute(&zero, &ladder), vec![None]);
    }

    #[test]
    fn test_unsorted_reference_is_sorted() {
        let mut shuffled = ALKANES.to_vec();
        shuffled.reverse();
        shuffled.swap(2, 5);

        let query = DataStub::query(&[Some(2.1), Some(4.6), Some(12.0)]);
        let sorted = Kovats::logarithmic().compute(&query, &DataStub::ladder(&ALKANES));
        let unsorted = Kovats::logarithmic().compute(&query, &DataStub::ladder(&shuffled));
        assert_eq!(sorted, unsorted);
    }

    #[test]
    fn test_duplicate_reference_rt_keeps_first() {
        let reference = DataStub::ladder(&[(5.0, 1000.0), (5.0, 1050.0), (7.0, 1200.0)]);
        let query = DataStub::query(&[Some(5.0), Some(6.0)]);

        assert_close(
            &Kovats::default().compute(&query, &reference),
            &[Some(1000.0), Some(1100.0)],
        );
    }

    #[test]
    fn test_reference_rows_without_ri_are_skipped() {
        let reference = DataStub::new(
            vec![Some(5.0), Some(6.0), None, Some(7.0)],
            vec![Some(1000.0), None, Some(1100.0), Some(1200.0)],
        );
        let query = DataStub::query(&[Some(6.0)]);

        assert_close(
            &Kovats::default().compute(&query, &reference),
            &[Some(1100.0)],
        );
    }

    #[test]
    fn test_compute_does_not_mutate_inputs() {
        let reference = DataStub::ladder(&ALKANES);
        let query = DataStub::query(&[Some(3.0), None]);

        let _ = Kovats::default().compute(&query, &reference);
        assert_eq!(query.retention_indices(), &[None, None]);
        assert_eq!(reference.retention_indices().len(), ALKANES.len());
        assert_eq!(reference.retention_times()[0], Some(2.5));
    }

    #[test]
    fn test_compute_checked_missing_arguments() {
        let data = DataStub::ladder(&ALKANES);
        let method = Kovats::default();

        let err = method.compute_checked(None, Some(&data)).unwrap_err();
        assert_eq!(err, ComputeError::MissingQuery);
        assert_eq!(err.to_string(), "Query data is 'None'.");

        let err = method.compute_checked(Some(&data), None).unwrap_err();
        assert_eq!(err, ComputeError::MissingReference);
        assert_eq!(err.to_string(), "Reference data is 'None'.");

        assert_eq!(
            method.compute_checked(None, None).unwrap_err(),
            ComputeError::MissingQuery
        );
        assert!(method.compute_checked(Some(&data), Some(&data)).is_ok());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Kovats::default().name(), "kovats");
        assert_eq!(Kovats::logarithmic().name(), "kovats-log");
        assert_eq!(Kovats::default().scale(), InterpolationScale::Linear);
    }
}
