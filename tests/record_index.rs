use paygap::index::RecordIndex;
use paygap::models::WageGapRecord;

fn rec(code: &str, year: i32, gap: f64) -> WageGapRecord {
    WageGapRecord::new(code, None, year, gap)
}

#[test]
fn span_and_lookups() {
    let rows = vec![
        rec("USA", 2021, 17.9),
        rec("CAN", 2019, 15.9),
        rec("USA", 2020, 18.5),
        rec("CAN", 2021, 14.8),
    ];
    let idx = RecordIndex::new(&rows);
    assert_eq!(idx.earliest_year(), Some(2019));
    assert_eq!(idx.latest_year(), Some(2021));
    assert_eq!(idx.year_span().unwrap(), (2019, 2021));

    let y2021: Vec<&str> = idx.in_year(2021).iter().map(|r| r.country_code.as_str()).collect();
    assert_eq!(y2021, vec!["USA", "CAN"]);

    let usa: Vec<i32> = idx.for_country("USA").iter().map(|r| r.year).collect();
    assert_eq!(usa, vec![2021, 2020]);
    assert!(idx.in_year(1999).is_empty());
    assert_eq!(idx.latest_for("CAN").map(|r| r.year), Some(2021));
}

#[test]
fn earliest_never_after_latest() {
    for n in 1..20 {
        let rows: Vec<WageGapRecord> = (0..n)
            .map(|i| rec("X", 2000 + ((i * 7) % 13), i as f64))
            .collect();
        let idx = RecordIndex::new(&rows);
        assert!(idx.earliest_year().unwrap() <= idx.latest_year().unwrap());
    }
}
