use paygap::models::{Forecast, ForecastMap, ForecastPoint, Origin, WageGapRecord};
use paygap::stats::{clip_forecasts, global_trend, max_prediction_year, yearly_summary};

fn rec(code: &str, year: i32, gap: f64) -> WageGapRecord {
    WageGapRecord::new(code, None, year, gap)
}

fn fc(points: &[(i32, f64)]) -> Forecast {
    Forecast::Available(
        points
            .iter()
            .map(|&(year, gap)| ForecastPoint { year, gap })
            .collect(),
    )
}

fn scenario() -> (Vec<WageGapRecord>, ForecastMap) {
    let hist = vec![
        rec("USA", 2020, 18.5),
        rec("USA", 2021, 17.9),
        rec("CAN", 2020, 15.2),
        rec("CAN", 2021, 14.8),
    ];
    let mut fcs = ForecastMap::new();
    fcs.insert("USA".into(), fc(&[(2025, 15.0)]));
    fcs.insert("CAN".into(), fc(&[]));
    (hist, fcs)
}

#[test]
fn global_trend_matches_worked_example() {
    let (hist, fcs) = scenario();
    let t = global_trend(&hist, &fcs).unwrap();
    assert_eq!(t.len(), 3);

    assert_eq!(t[0].year, 2020);
    assert!((t[0].avg_gap - 16.85).abs() < 1e-9);
    assert_eq!(t[0].min_gap, 15.2);
    assert_eq!(t[0].max_gap, 18.5);
    assert_eq!(t[0].origin, Origin::Historical);

    assert_eq!(t[1].year, 2021);
    assert!((t[1].avg_gap - 16.35).abs() < 1e-9);
    assert_eq!(t[1].min_gap, 14.8);
    assert_eq!(t[1].max_gap, 17.9);

    assert_eq!(t[2].year, 2025);
    assert_eq!(t[2].origin, Origin::Prediction);
    assert_eq!((t[2].avg_gap, t[2].min_gap, t[2].max_gap), (15.0, 15.0, 15.0));
}

#[test]
fn history_block_precedes_prediction_block() {
    let hist = vec![rec("A", 2003, 10.0), rec("A", 2001, 12.0), rec("B", 2002, 11.0)];
    let mut fcs = ForecastMap::new();
    fcs.insert("A".into(), fc(&[(2010, 8.0), (2005, 9.0)]));
    fcs.insert("B".into(), fc(&[(2007, 9.5)]));
    let t = global_trend(&hist, &fcs).unwrap();

    let years: Vec<i32> = t.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2001, 2002, 2003, 2005, 2007, 2010]);
    let boundary = t.iter().position(|p| p.origin == Origin::Prediction).unwrap();
    assert!(t[..boundary].iter().all(|p| p.origin == Origin::Historical));
    assert!(t[boundary..].iter().all(|p| p.origin == Origin::Prediction));
}

#[test]
fn min_avg_max_are_ordered_per_year() {
    let values: Vec<(i32, f64)> = (0..60)
        .map(|i| (1990 + (i % 6), ((i * 37) % 41) as f64 / 1.7 - 3.0))
        .collect();
    for p in yearly_summary(values, Origin::Historical) {
        assert!(p.min_gap <= p.avg_gap && p.avg_gap <= p.max_gap, "{p:?}");
    }
}

#[test]
fn years_without_values_are_absent() {
    let t = yearly_summary(vec![(2000, 1.0), (2002, 3.0)], Origin::Historical);
    let years: Vec<i32> = t.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2000, 2002]);
}

#[test]
fn empty_history_is_an_error() {
    assert_eq!(
        global_trend(&[], &ForecastMap::new()),
        Err(paygap::Error::NoHistoricalData)
    );
}

#[test]
fn max_prediction_year_falls_back_to_latest() {
    let (_, mut fcs) = scenario();
    assert_eq!(max_prediction_year(&fcs, 2021), 2025);
    fcs.insert("USA".into(), Forecast::Unavailable);
    assert_eq!(max_prediction_year(&fcs, 2021), 2021);
    assert_eq!(max_prediction_year(&ForecastMap::new(), 2021), 2021);
}

#[test]
fn overlapping_forecast_years_are_clipped() {
    let mut fcs = ForecastMap::new();
    fcs.insert("USA".into(), fc(&[(2020, 1.0), (2021, 2.0), (2022, 3.0)]));
    fcs.insert("MEX".into(), Forecast::Unavailable);
    let clipped = clip_forecasts(&fcs, 2021);
    assert_eq!(clipped["USA"], fc(&[(2022, 3.0)]));
    assert_eq!(clipped["MEX"], Forecast::Unavailable);

    let hist = vec![rec("USA", 2021, 17.9)];
    let t = global_trend(&hist, &fcs).unwrap();
    let years: Vec<(i32, Origin)> = t.iter().map(|p| (p.year, p.origin)).collect();
    assert_eq!(
        years,
        vec![(2021, Origin::Historical), (2022, Origin::Prediction)]
    );
}
