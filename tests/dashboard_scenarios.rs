use paygap::config::DashboardOptions;
use paygap::models::{
    Country, DashboardInputs, EconomicImpact, Forecast, ForecastPoint, GlobalStats, Origin,
    PolicyEntry, PolicyImpact, WageGapRecord,
};
use paygap::selection::Selection;
use paygap::view::{assemble, regional_summary};
use std::collections::BTreeMap;

fn rec(code: &str, year: i32, gap: f64) -> WageGapRecord {
    WageGapRecord::new(code, None, year, gap)
}

fn worked_example() -> DashboardInputs {
    let mut inputs = DashboardInputs {
        countries: vec![
            Country { code: "USA".into(), name: Some("United States".into()) },
            Country { code: "CAN".into(), name: Some("Canada".into()) },
        ],
        historical: vec![
            rec("USA", 2020, 18.5),
            rec("USA", 2021, 17.9),
            rec("CAN", 2020, 15.2),
            rec("CAN", 2021, 14.8),
        ],
        ..Default::default()
    };
    inputs.forecasts.insert(
        "USA".into(),
        Forecast::Available(vec![ForecastPoint { year: 2025, gap: 15.0 }]),
    );
    inputs.forecasts.insert("CAN".into(), Forecast::Available(vec![]));
    inputs
}

#[test]
fn worked_example_end_to_end() {
    let inputs = worked_example();
    let d = assemble(&inputs, &Selection::new(["USA", "CAN"]), &DashboardOptions::default()).unwrap();

    assert_eq!((d.earliest_year, d.latest_year, d.max_prediction_year), (2020, 2021, 2025));
    assert_eq!(d.global_trend.len(), 3);
    assert_eq!(d.global_trend[2].origin, Origin::Prediction);
    assert_eq!(d.predicted_average, Some(15.0));

    assert_eq!(d.deltas.len(), 1);
    assert_eq!(d.deltas[0].country_display_name, "United States");
    assert!((d.deltas[0].delta + 2.9).abs() < 1e-9);

    assert_eq!(d.ranking.len(), 2);
    assert_eq!(d.ranking[0].country_code, "CAN");
    assert_eq!(d.best_today().map(|e| e.gap), Some(14.8));
    let bucketed: usize = d.distribution.iter().map(|b| b.count).sum();
    assert_eq!(bucketed, d.ranking.len());

    assert_eq!(d.selected_country_display_names, vec!["United States", "Canada"]);
    assert!(d.regional_summary.is_empty());
    assert!(d.policy_leaders.is_empty());
    assert_eq!(d.global_average, None);
}

#[test]
fn duplicate_selection_counts_once() {
    let d = assemble(
        &worked_example(),
        &Selection::new(["USA", "USA", "CAN"]),
        &DashboardOptions::default(),
    )
    .unwrap();
    assert_eq!(d.selected_country_display_names.len(), 2);
    assert_eq!(d.selected_count(), 2);
    assert_eq!(d.selection_trend.series.len(), 2);
}

#[test]
fn reassembly_is_byte_identical() {
    let mut inputs = worked_example();
    let mut regions = BTreeMap::new();
    regions.insert("Europe".to_string(), 12.3);
    regions.insert("Americas".to_string(), 16.0);
    inputs.economic = Some(EconomicImpact {
        global_stats: Some(GlobalStats { average_gap: 14.456 }),
        regional_gaps: Some(regions),
    });
    let sel = Selection::new(["CAN", "USA"]);
    let opts = DashboardOptions::default();
    let a = serde_json::to_string(&assemble(&inputs, &sel, &opts).unwrap()).unwrap();
    let b = serde_json::to_string(&assemble(&inputs, &sel, &opts).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_history_is_fatal_other_gaps_degrade() {
    let inputs = DashboardInputs::default();
    let err = assemble(&inputs, &Selection::default(), &DashboardOptions::default()).unwrap_err();
    assert_eq!(err, paygap::Error::NoHistoricalData);

    let inputs = DashboardInputs {
        historical: vec![rec("USA", 2021, 17.9)],
        ..Default::default()
    };
    let d = assemble(&inputs, &Selection::default(), &DashboardOptions::default()).unwrap();
    assert_eq!(d.max_prediction_year, 2021);
    assert!(d.deltas.is_empty());
    assert!(d.prediction_rows().next().is_none());
    assert_eq!(d.predicted_average, None);
    assert_eq!(d.selected_country_display_names, vec!["CAN", "USA", "MEX"]);
}

#[test]
fn options_truncate_lists() {
    let mut inputs = DashboardInputs {
        historical: (0..30).map(|i| rec(&format!("C{i:02}"), 2021, i as f64 + 0.5)).collect(),
        ..Default::default()
    };
    inputs.policy = Some(PolicyImpact {
        top_performers: (0..12)
            .map(|i| PolicyEntry {
                name: format!("P{i}"),
                annual_reduction: i as f64 / 10.0,
                current_gap: 9.0,
            })
            .collect(),
    });
    let d = assemble(&inputs, &Selection::new(["C00"]), &DashboardOptions::default()).unwrap();
    assert_eq!(d.best.len(), 15);
    assert_eq!(d.best_of(3).len(), 3);
    assert_eq!(d.ranking.len(), 30);
    assert_eq!(d.policy_leaders.len(), 10);
    assert_eq!(d.policy_leaders[0].name, "P11");

    let opts = DashboardOptions { best_n: 5, policy_n: 2 };
    let d = assemble(&inputs, &Selection::new(["C00"]), &opts).unwrap();
    assert_eq!(d.best.len(), 5);
    assert_eq!(d.policy_leaders.len(), 2);
}

#[test]
fn regional_summary_is_ordered_and_rounded() {
    let mut regions = BTreeMap::new();
    regions.insert("Europe".to_string(), 12.346);
    regions.insert("Asia".to_string(), 18.0);
    let econ = EconomicImpact {
        global_stats: None,
        regional_gaps: Some(regions),
    };
    let got: Vec<(String, f64)> = regional_summary(Some(&econ))
        .into_iter()
        .map(|r| (r.region, r.gap))
        .collect();
    assert_eq!(got, vec![("Asia".to_string(), 18.0), ("Europe".to_string(), 12.35)]);
    assert!(regional_summary(None).is_empty());
    assert!(regional_summary(Some(&EconomicImpact::default())).is_empty());
}
